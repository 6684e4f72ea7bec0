//! Application layer containing use cases and formatting services.

/// Small pure services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use use_cases::{
    BillRow, FetchBillsUseCase, SubmitBillUseCase, UploadError, UploadReceiptUseCase,
};
