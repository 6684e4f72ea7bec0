//! Bill store HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use super::dto::{BillDto, BillPayload, ErrorResponse, ReceiptCreatedDto};
use crate::domain::entities::Bill;
use crate::domain::errors::StoreError;
use crate::domain::ports::{BillStorePort, NewReceipt, ReceiptCreated};

const USER_AGENT: &str = concat!("billfold/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// HTTP implementation of [`BillStorePort`].
pub struct BilledApiClient {
    client: Client,
    base_url: String,
}

impl BilledApiClient {
    /// Creates a client for the given API base URL.
    ///
    /// # Errors
    /// Returns an error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn map_transport_error(e: &reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::network("request timed out")
        } else if e.is_connect() {
            StoreError::network("failed to connect to the bill store")
        } else {
            StoreError::network(e.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if let Ok(error) = response.json::<ErrorResponse>().await {
            debug!(status = %status, message = %error.message, "Store returned an error body");
        }
        Err(StoreError::server(status.as_u16()))
    }

    fn receipt_part(receipt: NewReceipt) -> Result<Part, StoreError> {
        let mime = match receipt.file_name.rsplit('.').next() {
            Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
            _ => "image/jpeg",
        };
        Part::bytes(receipt.content)
            .file_name(receipt.file_name)
            .mime_str(mime)
            .map_err(|e| StoreError::unexpected(format!("invalid multipart part: {e}")))
    }
}

#[async_trait]
impl BillStorePort for BilledApiClient {
    async fn list_bills(&self) -> Result<Vec<Bill>, StoreError> {
        debug!("Fetching bill list from store");

        let response = self
            .client
            .get(self.endpoint("bills"))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Bill list request failed");
                Self::map_transport_error(&e)
            })?;

        let response = Self::check_status(response).await?;

        let bills: Vec<BillDto> = response
            .json()
            .await
            .map_err(|e| StoreError::malformed(format!("failed to parse bill list: {e}")))?;

        Ok(bills.into_iter().map(Bill::from).collect())
    }

    async fn create_receipt(&self, receipt: NewReceipt) -> Result<ReceiptCreated, StoreError> {
        debug!(file = %receipt.file_name, "Uploading receipt to store");

        let email = receipt.email.clone();
        let form = Form::new()
            .part("file", Self::receipt_part(receipt)?)
            .text("email", email);

        // reqwest sets the multipart boundary content-type; never override it.
        let response = self
            .client
            .post(self.endpoint("bills"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Receipt upload request failed");
                Self::map_transport_error(&e)
            })?;

        let response = Self::check_status(response).await?;

        let created: ReceiptCreatedDto = response
            .json()
            .await
            .map_err(|e| StoreError::malformed(format!("failed to parse upload response: {e}")))?;

        Ok(ReceiptCreated {
            key: created.key,
            file_url: created.file_url,
        })
    }

    async fn update_bill(&self, bill: Bill) -> Result<Bill, StoreError> {
        debug!(id = %bill.id, "Persisting bill to store");

        let response = self
            .client
            .patch(self.endpoint(&format!("bills/{}", bill.id)))
            .json(&BillPayload::from(&bill))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Bill update request failed");
                Self::map_transport_error(&e)
            })?;

        let response = Self::check_status(response).await?;

        let saved: BillDto = response
            .json()
            .await
            .map_err(|e| StoreError::malformed(format!("failed to parse updated bill: {e}")))?;

        Ok(saved.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_client_creation() {
        let client = BilledApiClient::new("http://localhost:5678");
        assert!(client.is_ok());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = BilledApiClient::new("http://localhost:5678/").unwrap();
        assert_eq!(client.endpoint("bills"), "http://localhost:5678/bills");
    }

    #[tokio::test]
    async fn test_unreachable_store_maps_to_network_error() {
        let client = BilledApiClient::new("http://127.0.0.1:1").unwrap();

        let result = client.list_bills().await;

        assert!(matches!(result, Err(StoreError::Network { .. })));
    }

    #[test]
    fn test_status_codes_display_as_product_error_text() {
        assert_eq!(
            StoreError::server(StatusCode::NOT_FOUND.as_u16()).to_string(),
            "Erreur 404"
        );
        assert_eq!(
            StoreError::server(StatusCode::INTERNAL_SERVER_ERROR.as_u16()).to_string(),
            "Erreur 500"
        );
    }
}
