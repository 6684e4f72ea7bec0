use std::path::PathBuf;

use clap::Parser;

use super::app_config::LogLevel;
use crate::domain::entities::UserRole;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "billfold",
    version,
    about = "A terminal client for managing employee expense reports",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the bill store API.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Seed the session with this email (persisted for later runs).
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Role for a seeded session.
    #[arg(long, value_name = "ROLE")]
    pub role: Option<UserRole>,
}
