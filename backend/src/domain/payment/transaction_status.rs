//! Midtrans transaction and fraud status values.

use std::fmt;

/// `transaction_status` as reported by Midtrans.
///
/// Unrecognised values are preserved so they can be logged verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Capture,
    Settlement,
    Pending,
    Deny,
    Cancel,
    Expire,
    Unknown(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Capture => "capture",
            TransactionStatus::Settlement => "settlement",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Deny => "deny",
            TransactionStatus::Cancel => "cancel",
            TransactionStatus::Expire => "expire",
            TransactionStatus::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for TransactionStatus {
    fn from(value: &str) -> Self {
        match value {
            "capture" => TransactionStatus::Capture,
            "settlement" => TransactionStatus::Settlement,
            "pending" => TransactionStatus::Pending,
            "deny" => TransactionStatus::Deny,
            "cancel" => TransactionStatus::Cancel,
            "expire" => TransactionStatus::Expire,
            other => TransactionStatus::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `fraud_status` as reported by Midtrans. Only meaningful for card captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FraudStatus {
    Accept,
    Challenge,
    Other(String),
}

impl From<&str> for FraudStatus {
    fn from(value: &str) -> Self {
        match value {
            "accept" => FraudStatus::Accept,
            "challenge" => FraudStatus::Challenge,
            other => FraudStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FraudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FraudStatus::Accept => write!(f, "accept"),
            FraudStatus::Challenge => write!(f, "challenge"),
            FraudStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}
