mod bill_store_port;
mod session_port;

pub use bill_store_port::{BillStorePort, NewReceipt, ReceiptCreated};
pub use session_port::SessionStorePort;

#[cfg(test)]
pub mod mocks {
    pub use super::bill_store_port::mock::{
        MOCK_CREATE_FILE_URL, MOCK_CREATE_KEY, MockBillStore, fixture_bills,
    };
    pub use super::session_port::mock::MockSessionStore;
}
