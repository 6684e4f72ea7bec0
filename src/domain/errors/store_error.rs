//! Remote store error types.

use thiserror::Error;

/// Failure of a remote store operation.
///
/// Server-side failures display as the product's error text
/// (`"Erreur 404"`, `"Erreur 500"`), which the list screen renders inline.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StoreError {
    #[error("Erreur {status}")]
    Server { status: u16 },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("malformed response: {message}")]
    Malformed { message: String },

    #[error("unexpected store error: {message}")]
    Unexpected { message: String },
}

impl StoreError {
    /// Creates a server error carrying the HTTP status.
    #[must_use]
    pub const fn server(status: u16) -> Self {
        Self::Server { status }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a malformed-response error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether retrying the same call could succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Server { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_text() {
        assert_eq!(StoreError::server(404).to_string(), "Erreur 404");
        assert_eq!(StoreError::server(500).to_string(), "Erreur 500");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(StoreError::server(500).is_recoverable());
        assert!(StoreError::network("timeout").is_recoverable());
        assert!(!StoreError::malformed("truncated body").is_recoverable());
    }
}
