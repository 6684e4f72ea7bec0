//! UI screens.

pub mod app;
pub mod bills_screen;
pub mod new_bill_screen;
pub mod receipt_modal;

pub use app::{App, Route};
pub use bills_screen::{BillsAction, BillsScreen, BillsState};
pub use new_bill_screen::{EXPENSE_CATEGORIES, NewBillAction, NewBillScreen, ReceiptState};
pub use receipt_modal::ReceiptModal;
