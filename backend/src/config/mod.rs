//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `NEXUS_EDGE` prefix and nested values
//! are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use nexus_edge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.port);
//! ```

mod database;
mod email;
mod error;
mod payment;
mod server;

pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has usable defaults so a bare development checkout starts;
/// [`AppConfig::validate()`] enforces what production needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, public URL)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Payment configuration (Midtrans)
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Email configuration (Resend)
    #[serde(default)]
    pub email: EmailConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NEXUS_EDGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `NEXUS_EDGE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `NEXUS_EDGE__PAYMENT__SERVER_KEY=...` -> `payment.server_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NEXUS_EDGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Production additionally requires a server key, a database URL and a
    /// Resend key.
    ///
    /// A notification makes up to two bounded downstream calls (store write,
    /// then email), so the request timeout must outlast both or Midtrans sees
    /// a 408 instead of the acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let production = self.is_production();
        self.server.validate()?;
        self.database.validate(production)?;
        self.payment.validate(production)?;
        self.email.validate(production)?;
        if self.server.request_timeout_secs <= 2 * self.payment.downstream_timeout_secs {
            return Err(ValidationError::RequestTimeoutTooShort);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
