//! Session storage error types.

use thiserror::Error;

/// Failure of the local session store.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SessionError {
    #[error("failed to determine session directory")]
    DirNotFound,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("session deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
