use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use billfold::domain::entities::SessionUser;
use billfold::domain::ports::SessionStorePort;
use billfold::infrastructure::{
    AppConfig, BilledApiClient, CliArgs, FileSessionStore, StorageManager,
};
use billfold::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        // The terminal belongs to the TUI; logs only ever go to the file.
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn resolve_session(args: &CliArgs, sessions: &FileSessionStore) -> Result<SessionUser> {
    if let Some(email) = &args.email {
        let session = SessionUser::new(args.role.unwrap_or_default(), email.clone());
        sessions.store(&session)?;
        info!(email = %session.email, role = %session.role, "Session seeded from CLI");
        return Ok(session);
    }

    sessions.load()?.ok_or_else(|| {
        eyre!("no session found; start once with --email <EMAIL> (and optionally --role)")
    })
}

fn create_app() -> Result<App> {
    let args = CliArgs::parse();

    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(&args);

    init_logging(&config)?;

    info!(version = billfold::VERSION, "Starting Billfold");

    let sessions = FileSessionStore::new();
    let session = resolve_session(&args, &sessions)?;

    let store = Arc::new(BilledApiClient::new(config.api_url.as_str())?);

    Ok(App::new(store, session))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
