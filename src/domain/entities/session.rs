//! Current-user session record.

use serde::{Deserialize, Serialize};

/// Role of the connected user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Regular employee submitting expense reports.
    #[default]
    Employee,
    /// Administrator reviewing them (not served by this client's screens,
    /// but a valid session role).
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Employee => write!(f, "Employee"),
            Self::Admin => write!(f, "Admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "employee" => Ok(Self::Employee),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The connected user, as set at login and read by every screen.
///
/// This client never mutates the session; it only attaches the email to
/// submission payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User role.
    pub role: UserRole,
    /// Email attached to every submitted bill.
    pub email: String,
}

impl SessionUser {
    /// Creates a session record.
    #[must_use]
    pub fn new(role: UserRole, email: impl Into<String>) -> Self {
        Self {
            role,
            email: email.into(),
        }
    }
}
