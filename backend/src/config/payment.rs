//! Payment configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::payment::MissingSignaturePolicy;

use super::error::ValidationError;

/// Payment configuration (Midtrans)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Midtrans server key. Signs notifications and authenticates Snap calls.
    pub server_key: Option<String>,

    /// Midtrans client key, handed to the browser Snap widget
    pub client_key: Option<String>,

    /// Use the Midtrans production environment instead of sandbox
    #[serde(default)]
    pub is_production: bool,

    /// What to do when a notification arrives without `x-signature`
    #[serde(default)]
    pub missing_signature_policy: MissingSignaturePolicy,

    /// Upper bound for each store write or email send, in seconds
    #[serde(default = "default_downstream_timeout")]
    pub downstream_timeout_secs: u64,
}

impl PaymentConfig {
    /// Configured server key, treating an empty string as unset
    pub fn server_key(&self) -> Option<&str> {
        self.server_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Check if the server key is a sandbox key
    pub fn is_sandbox_key(&self) -> bool {
        self.server_key()
            .map(|k| k.starts_with("SB-"))
            .unwrap_or(false)
    }

    /// Snap API base URL for the configured environment
    pub fn snap_base_url(&self) -> &'static str {
        if self.is_production {
            "https://app.midtrans.com"
        } else {
            "https://app.sandbox.midtrans.com"
        }
    }

    /// Get downstream timeout as Duration
    pub fn downstream_timeout(&self) -> Duration {
        Duration::from_secs(self.downstream_timeout_secs)
    }

    /// Validate payment configuration
    ///
    /// The server key is only mandatory in production. Elsewhere the webhook
    /// answers 500 until one is configured.
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if production && self.server_key().is_none() {
            return Err(ValidationError::MissingRequired("PAYMENT__SERVER_KEY"));
        }
        if self.is_production && self.is_sandbox_key() {
            return Err(ValidationError::SandboxKeyInProduction);
        }
        if self.downstream_timeout_secs == 0 || self.downstream_timeout_secs > 60 {
            return Err(ValidationError::InvalidDownstreamTimeout);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            server_key: None,
            client_key: None,
            is_production: false,
            missing_signature_policy: MissingSignaturePolicy::default(),
            downstream_timeout_secs: default_downstream_timeout(),
        }
    }
}

fn default_downstream_timeout() -> u64 {
    10
}
