//! Receipt file validation and upload state.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// File extensions accepted for a receipt upload.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Error raised when a picked file cannot be used as a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptError {
    /// The file extension is not in the accepted allow-list. The message
    /// is the product's fixed diagnostic, logged verbatim.
    #[error("Bad file format. Please choose .jpg, .jpeg or .png file.")]
    BadFormat,
}

/// A picked receipt file whose extension passed the allow-list check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    path: PathBuf,
    file_name: String,
}

impl ReceiptFile {
    /// Validates a picked path against the `{jpg, jpeg, png}` allow-list.
    ///
    /// The check is on the file extension, case-insensitive. No filesystem
    /// access happens here; reading the bytes is the uploader's concern.
    ///
    /// # Errors
    /// Returns `ReceiptError::BadFormat` for any other extension, or none.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, ReceiptError> {
        let path = path.into();

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or(ReceiptError::BadFormat)?;

        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ReceiptError::BadFormat);
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or(ReceiptError::BadFormat)?;

        Ok(Self { path, file_name })
    }

    /// Returns the path of the picked file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the original file name, as sent to the store.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Upload state captured from a successful receipt upload.
///
/// `None` until the store's create call resolves; reset on failure. Exists
/// only for the lifetime of one new-bill form session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReceipt {
    /// Bill identifier assigned by the store (the response `key`).
    pub bill_id: String,
    /// URL where the uploaded file is served from.
    pub file_url: String,
    /// Original name of the uploaded file.
    pub file_name: String,
}
