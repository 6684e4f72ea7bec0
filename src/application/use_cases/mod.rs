//! Use case implementations.

mod fetch_bills;
mod submit_bill;
mod upload_receipt;

pub use fetch_bills::{BillRow, FetchBillsUseCase};
pub use submit_bill::SubmitBillUseCase;
pub use upload_receipt::{UploadError, UploadReceiptUseCase};
