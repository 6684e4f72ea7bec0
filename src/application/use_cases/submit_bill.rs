//! Bill submission use case.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::entities::Bill;
use crate::domain::errors::StoreError;
use crate::domain::ports::BillStorePort;

/// Persists an assembled bill against the remote store.
#[derive(Clone)]
pub struct SubmitBillUseCase {
    store: Arc<dyn BillStorePort>,
}

impl SubmitBillUseCase {
    /// Creates the use case.
    #[must_use]
    pub fn new(store: Arc<dyn BillStorePort>) -> Self {
        Self { store }
    }

    /// Persists the bill.
    ///
    /// A rejection is logged with the raw error and returned; whether the
    /// user still moves on to the bill list is the screen's policy, not
    /// this use case's.
    ///
    /// # Errors
    /// Propagates the store rejection.
    pub async fn execute(&self, bill: Bill) -> Result<Bill, StoreError> {
        debug!(name = %bill.name, expense_type = %bill.expense_type, "Persisting bill");

        match self.store.update_bill(bill).await {
            Ok(saved) => {
                info!(id = %saved.id, "Bill persisted");
                Ok(saved)
            }
            Err(e) => {
                error!(error = ?e, "Failed to persist bill");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::BillStatus;
    use crate::domain::ports::mocks::MockBillStore;

    fn pending_bill() -> Bill {
        Bill {
            email: "employee@test.tld".into(),
            expense_type: "Transports".into(),
            name: "Vol Paris-Montréal".into(),
            amount: 42,
            date: "2021-03-01".into(),
            vat: "10".into(),
            pct: 10,
            commentary: "vol AR".into(),
            file_url: Some("https://test.storage.tld/justificatif.jpg".into()),
            file_name: Some("justificatif.jpg".into()),
            status: BillStatus::Pending,
            ..Bill::default()
        }
    }

    #[tokio::test]
    async fn test_submits_bill_exactly_once() {
        let store = Arc::new(MockBillStore::new());
        let use_case = SubmitBillUseCase::new(store.clone());
        let bill = pending_bill();

        use_case.execute(bill.clone()).await.unwrap();

        let calls = store.update_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], bill);
        assert_eq!(calls[0].status, BillStatus::Pending);
    }

    #[tokio::test]
    async fn test_rejection_propagates_with_error_text() {
        let store = Arc::new(MockBillStore::new());
        store.fail_next_update(StoreError::server(500));
        let use_case = SubmitBillUseCase::new(store.clone());

        let result = use_case.execute(pending_bill()).await;

        assert!(result.unwrap_err().to_string().contains("Erreur 500"));
        assert!(store.update_calls().is_empty());
    }
}
