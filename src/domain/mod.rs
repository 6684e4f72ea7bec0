//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{Bill, BillStatus, SessionUser};
pub use errors::{SessionError, StoreError};
pub use ports::{BillStorePort, SessionStorePort};
