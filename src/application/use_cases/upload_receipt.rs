//! Receipt upload use case.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::domain::entities::{PendingReceipt, ReceiptError, ReceiptFile};
use crate::domain::errors::StoreError;
use crate::domain::ports::{BillStorePort, NewReceipt};

/// Failure of a receipt upload attempt.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The picked file failed the format allow-list; nothing was sent.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// The picked file could not be read.
    #[error("failed to read receipt file: {0}")]
    Read(#[from] std::io::Error),

    /// The store rejected the upload.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validates a picked receipt file and uploads it to the store.
#[derive(Clone)]
pub struct UploadReceiptUseCase {
    store: Arc<dyn BillStorePort>,
}

impl UploadReceiptUseCase {
    /// Creates the use case.
    #[must_use]
    pub fn new(store: Arc<dyn BillStorePort>) -> Self {
        Self { store }
    }

    /// Uploads the file at `path` for the given user.
    ///
    /// Validation runs before anything touches the network: a file outside
    /// the `{jpg, jpeg, png}` allow-list logs the product's fixed
    /// diagnostic and returns without a store call. On success the
    /// response's `key` and `file_url` plus the picked file name become
    /// the [`PendingReceipt`] attached to the eventual submission.
    ///
    /// # Errors
    /// `UploadError::Receipt` for a bad format, `::Read` when the file
    /// cannot be read, `::Store` when the upload itself is rejected.
    pub async fn execute(&self, path: &Path, email: &str) -> Result<PendingReceipt, UploadError> {
        let receipt = ReceiptFile::from_path(path).map_err(|e| {
            error!("{e}");
            e
        })?;

        let content = tokio::fs::read(receipt.path()).await?;
        debug!(file = %receipt.file_name(), bytes = content.len(), "Uploading receipt");

        let created = self
            .store
            .create_receipt(NewReceipt {
                file_name: receipt.file_name().to_string(),
                content,
                email: email.to_string(),
            })
            .await
            .map_err(|e| {
                error!(error = ?e, "Receipt upload failed");
                e
            })?;

        info!(key = %created.key, "Receipt uploaded");

        Ok(PendingReceipt {
            bill_id: created.key,
            file_url: created.file_url,
            file_name: receipt.file_name().to_string(),
        })
    }
}
