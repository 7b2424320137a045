//! Tracing subscriber setup.
//!
//! JSON lines in production, human-readable output elsewhere. `RUST_LOG`
//! overrides `server.log_level` when set.

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ServerConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Install the global tracing subscriber.
pub fn init_tracing(config: &ServerConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::InvalidFilter(e.to_string()))?;

    if config.is_production() {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    tracing::info!(
        environment = ?config.environment,
        log_level = %config.log_level,
        "tracing initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_is_reported() {
        let config = ServerConfig {
            log_level: "nexus_edge=verbose".to_string(),
            ..ServerConfig::default()
        };

        // Only meaningful when RUST_LOG is unset in the test environment.
        if std::env::var("RUST_LOG").is_err() {
            assert!(matches!(
                init_tracing(&config),
                Err(TelemetryError::InvalidFilter(_))
            ));
        }
    }
}
