//! Bill store port definition.

use async_trait::async_trait;

use crate::domain::entities::Bill;
use crate::domain::errors::StoreError;

/// Multipart payload for a receipt upload.
///
/// The store receives the raw bytes under a `file` part (carrying the
/// original file name) and the submitting user's email under an `email`
/// part; the adapter owns the multipart encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReceipt {
    /// Original name of the picked file.
    pub file_name: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
    /// Email of the submitting user.
    pub email: String,
}

/// Response to a successful receipt upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptCreated {
    /// Identifier of the bill record the store opened for this receipt.
    pub key: String,
    /// URL the uploaded file is served from.
    pub file_url: String,
}

/// Port for the remote bill store.
///
/// One real implementation talks HTTP; tests swap in
/// [`mock::MockBillStore`]. Selected by dependency injection at `App`
/// construction.
#[async_trait]
pub trait BillStorePort: Send + Sync {
    /// Fetches all bills visible to the connected user.
    async fn list_bills(&self) -> Result<Vec<Bill>, StoreError>;

    /// Uploads a receipt file and opens a bill record for it.
    async fn create_receipt(&self, receipt: NewReceipt) -> Result<ReceiptCreated, StoreError>;

    /// Persists a filled-in bill against its record.
    async fn update_bill(&self, bill: Bill) -> Result<Bill, StoreError>;
}
