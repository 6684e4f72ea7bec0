//! Wire-level DTOs for the bill store API.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Bill, BillId, BillStatus};

fn default_pct() -> u32 {
    20
}

/// Bill record as served by the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDto {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: i64,
    pub date: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default = "default_pct")]
    pub pct: u32,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    pub status: BillStatus,
}

impl From<BillDto> for Bill {
    fn from(dto: BillDto) -> Self {
        Self {
            id: BillId(dto.id),
            email: dto.email,
            expense_type: dto.expense_type,
            name: dto.name,
            amount: dto.amount,
            date: dto.date,
            vat: dto.vat,
            pct: dto.pct,
            commentary: dto.commentary,
            file_url: dto.file_url,
            file_name: dto.file_name,
            status: dto.status,
        }
    }
}

/// Bill record as sent to the API on submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPayload {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: i64,
    pub date: String,
    pub vat: String,
    pub pct: u32,
    pub commentary: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub status: BillStatus,
}

impl From<&Bill> for BillPayload {
    fn from(bill: &Bill) -> Self {
        Self {
            email: bill.email.clone(),
            expense_type: bill.expense_type.clone(),
            name: bill.name.clone(),
            amount: bill.amount,
            date: bill.date.clone(),
            vat: bill.vat.clone(),
            pct: bill.pct,
            commentary: bill.commentary.clone(),
            file_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
            status: bill.status,
        }
    }
}

/// Response to a successful receipt upload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptCreatedDto {
    pub file_url: String,
    pub key: String,
}

/// API error response body.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_dto_reads_camel_case_fields() {
        let json = r#"{
            "id": "47qAXb6fIm2zOKkLzMro",
            "email": "a@a",
            "type": "Hôtel et logement",
            "name": "encore",
            "amount": 400,
            "date": "2004-04-04",
            "vat": "80",
            "pct": 20,
            "commentary": "séminaire billed",
            "fileUrl": "https://test.storage.tld/receipts/encore.jpg",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "status": "pending"
        }"#;

        let bill: Bill = serde_json::from_str::<BillDto>(json).unwrap().into();

        assert_eq!(bill.id.as_str(), "47qAXb6fIm2zOKkLzMro");
        assert_eq!(bill.expense_type, "Hôtel et logement");
        assert_eq!(bill.amount, 400);
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(
            bill.file_url.as_deref(),
            Some("https://test.storage.tld/receipts/encore.jpg")
        );
    }

    #[test]
    fn test_bill_dto_defaults_missing_optionals() {
        let json = r#"{"type": "Transports", "date": "2021-03-01", "status": "accepted"}"#;

        let bill: Bill = serde_json::from_str::<BillDto>(json).unwrap().into();

        assert_eq!(bill.pct, 20);
        assert_eq!(bill.file_url, None);
        assert!(bill.id.is_empty());
    }

    #[test]
    fn test_payload_writes_camel_case_fields() {
        let bill = Bill {
            email: "employee@test.tld".into(),
            expense_type: "Transports".into(),
            name: "Vol Paris-Montréal".into(),
            amount: 42,
            date: "2021-03-01".into(),
            vat: "10".into(),
            pct: 10,
            commentary: String::new(),
            file_url: Some("https://test.storage.tld/justificatif.jpg".into()),
            file_name: Some("justificatif.jpg".into()),
            status: BillStatus::Pending,
            ..Bill::default()
        };

        let json = serde_json::to_value(BillPayload::from(&bill)).unwrap();

        assert_eq!(json["type"], "Transports");
        assert_eq!(json["fileUrl"], "https://test.storage.tld/justificatif.jpg");
        assert_eq!(json["fileName"], "justificatif.jpg");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn test_receipt_created_reads_file_url_and_key() {
        let json = r#"{"fileUrl": "https://test.storage.tld/justificatif.jpg", "key": "1234"}"#;

        let created: ReceiptCreatedDto = serde_json::from_str(json).unwrap();

        assert_eq!(created.key, "1234");
        assert_eq!(created.file_url, "https://test.storage.tld/justificatif.jpg");
    }
}
