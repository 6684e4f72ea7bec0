//! Expense report (bill) entity.

use serde::{Deserialize, Serialize};

/// Identifier assigned to a bill by the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillId(pub String);

impl BillId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no identifier has been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for BillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BillId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BillId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Review status of a bill.
///
/// A submitted bill always starts out `Pending`; the two other values are
/// set by an administrator and only ever displayed by this client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// Waiting for review.
    #[default]
    Pending,
    /// Approved by an administrator.
    Accepted,
    /// Rejected by an administrator.
    Refused,
}

impl BillStatus {
    /// Returns the machine value used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Refused => "refused",
        }
    }

    /// Returns the label shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Accepted => "Accepté",
            Self::Refused => "Refusé",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single expense report as persisted by the remote store.
///
/// `date` is kept as the raw wire string; it is expected to be an ISO
/// calendar date but a malformed value must never prevent the rest of the
/// list from rendering, so parsing happens at display time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bill {
    /// Store-assigned identifier; empty for a bill not yet persisted.
    pub id: BillId,
    /// Email of the employee who submitted the bill.
    pub email: String,
    /// Expense category ("Transports", "Hôtel et logement", ...).
    pub expense_type: String,
    /// Free-form expense name.
    pub name: String,
    /// Amount in the smallest displayed unit (whole euros).
    pub amount: i64,
    /// Expense date as an ISO-like string.
    pub date: String,
    /// VAT amount, kept as entered.
    pub vat: String,
    /// VAT percentage.
    pub pct: u32,
    /// Optional commentary.
    pub commentary: String,
    /// URL of the uploaded receipt file, when one was attached.
    pub file_url: Option<String>,
    /// Original name of the uploaded receipt file.
    pub file_name: Option<String>,
    /// Review status.
    pub status: BillStatus,
}
