//! Subscription status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Stored subscription state, persisted as upper-case text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Pending,
    Challenge,
    Inactive,
    Active,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "PENDING",
            SubscriptionStatus::Challenge => "CHALLENGE",
            SubscriptionStatus::Inactive => "INACTIVE",
            SubscriptionStatus::Active => "ACTIVE",
        }
    }

    /// Tie-breaker between updates observed at the same instant.
    ///
    /// Midtrans reports a `cancel` after `capture` with the same
    /// `transaction_time`, so deactivation outranks activation. A stale failure
    /// after settlement still loses on the later `settlement_time`.
    pub fn precedence(&self) -> i16 {
        match self {
            SubscriptionStatus::Pending => 0,
            SubscriptionStatus::Challenge => 1,
            SubscriptionStatus::Active => 2,
            SubscriptionStatus::Inactive => 3,
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(SubscriptionStatus::Pending),
            "CHALLENGE" => Ok(SubscriptionStatus::Challenge),
            "INACTIVE" => Ok(SubscriptionStatus::Inactive),
            "ACTIVE" => Ok(SubscriptionStatus::Active),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown subscription status '{}'", other),
            )),
        }
    }
}
