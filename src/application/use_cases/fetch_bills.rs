//! Bill list fetching use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::format_display_date;
use crate::domain::entities::Bill;
use crate::domain::errors::StoreError;
use crate::domain::ports::BillStorePort;

/// One bill prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    /// The underlying record; `status` stays the machine value so rows can
    /// be classified without re-parsing the display label.
    pub bill: Bill,
    /// Formatted date, or the raw wire value when formatting failed.
    pub display_date: String,
}

impl BillRow {
    /// URL of the receipt attached to this row.
    #[must_use]
    pub fn receipt_url(&self) -> &str {
        self.bill.file_url.as_deref().unwrap_or_default()
    }

    /// File name of the receipt attached to this row.
    #[must_use]
    pub fn receipt_file_name(&self) -> &str {
        self.bill.file_name.as_deref().unwrap_or_default()
    }
}

/// Fetches bills and prepares them for the list screen.
#[derive(Clone)]
pub struct FetchBillsUseCase {
    store: Arc<dyn BillStorePort>,
}

impl FetchBillsUseCase {
    /// Creates the use case.
    #[must_use]
    pub fn new(store: Arc<dyn BillStorePort>) -> Self {
        Self { store }
    }

    /// Fetches, formats, and orders the bill list.
    ///
    /// A record with a malformed date keeps its raw date string (logged,
    /// not fatal) so the whole list still renders. Rows are ordered by
    /// descending lexicographic comparison of the *display* string, the
    /// product's historical ordering.
    ///
    /// # Errors
    /// Propagates the store rejection; the caller renders its text.
    pub async fn execute(&self) -> Result<Vec<BillRow>, StoreError> {
        debug!("Fetching bills");

        let bills = self.store.list_bills().await.map_err(|e| {
            warn!(error = %e, "Bill list fetch failed");
            e
        })?;

        let mut rows: Vec<BillRow> = bills.into_iter().map(Self::to_row).collect();
        rows.sort_by(|a, b| b.display_date.cmp(&a.display_date));

        info!(count = rows.len(), "Bills fetched");
        Ok(rows)
    }

    fn to_row(bill: Bill) -> BillRow {
        let display_date = match format_display_date(&bill.date) {
            Ok(formatted) => formatted,
            Err(e) => {
                warn!(error = %e, date = %bill.date, "Unformattable bill date, keeping raw value");
                bill.date.clone()
            }
        };
        BillRow { bill, display_date }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::BillId;
    use crate::domain::ports::mocks::{MockBillStore, fixture_bills};

    #[tokio::test]
    async fn test_row_count_matches_list_length() {
        let store = Arc::new(MockBillStore::new());
        let rows = FetchBillsUseCase::new(store).execute().await.unwrap();

        assert_eq!(rows.len(), fixture_bills().len());
    }

    #[tokio::test]
    async fn test_receipt_urls_match_input_set() {
        let store = Arc::new(MockBillStore::new());
        let rows = FetchBillsUseCase::new(store).execute().await.unwrap();

        let mut row_urls: Vec<String> = rows.iter().map(|r| r.receipt_url().to_string()).collect();
        let mut input_urls: Vec<String> = fixture_bills()
            .iter()
            .filter_map(|b| b.file_url.clone())
            .collect();
        row_urls.sort();
        input_urls.sort();

        assert_eq!(row_urls, input_urls);
    }

    #[tokio::test]
    async fn test_display_dates_are_lexicographically_non_increasing() {
        let store = Arc::new(MockBillStore::new());
        let rows = FetchBillsUseCase::new(store).execute().await.unwrap();

        for pair in rows.windows(2) {
            assert!(
                pair[0].display_date >= pair[1].display_date,
                "{} should sort before {}",
                pair[0].display_date,
                pair[1].display_date
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_date_falls_back_to_raw_value() {
        let mut bills = fixture_bills();
        bills[0].date = "pas-une-date".to_string();
        let corrupt_id = bills[0].id.clone();
        let expected_len = bills.len();

        let store = Arc::new(MockBillStore::with_bills(bills));
        let rows = FetchBillsUseCase::new(store).execute().await.unwrap();

        assert_eq!(rows.len(), expected_len);
        let corrupt_row = rows.iter().find(|r| r.bill.id == corrupt_id).unwrap();
        assert_eq!(corrupt_row.display_date, "pas-une-date");
    }

    #[tokio::test]
    async fn test_list_rejection_propagates_error_text() {
        let store = Arc::new(MockBillStore::new());
        store.fail_next_list(StoreError::server(404));

        let result = FetchBillsUseCase::new(store).execute().await;

        let error = result.unwrap_err();
        assert!(error.to_string().contains("Erreur 404"));
    }

    #[tokio::test]
    async fn test_rows_without_receipt_yield_empty_url() {
        let bill = Bill {
            id: BillId::from("no-receipt"),
            date: "2020-01-01".into(),
            ..Bill::default()
        };
        let store = Arc::new(MockBillStore::with_bills(vec![bill]));

        let rows = FetchBillsUseCase::new(store).execute().await.unwrap();

        assert_eq!(rows[0].receipt_url(), "");
    }
}
