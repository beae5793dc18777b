//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::net::SocketAddr;

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `listen_addr` is not a socket address
    /// - `timeout_ms` or `command_timeout_ms` is under 100ms or over 5 minutes
    /// - `user_agent` is set but empty
    /// - `fetch_command` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid {
                field: "listen_addr".into(),
                reason: format!("not a socket address: {}", self.listen_addr),
            });
        }

        check_timeout("timeout_ms", self.timeout_ms)?;
        check_timeout("command_timeout_ms", self.command_timeout_ms)?;

        if self.user_agent.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.fetch_command.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "fetch_command".into(), reason: "must not be empty".into() });
        }

        if self.command_denylist {
            tracing::debug!("denylist enabled for command-style endpoint");
        }

        Ok(())
    }
}

fn check_timeout(field: &str, value: u64) -> Result<(), ConfigError> {
    if value < 100 {
        return Err(ConfigError::Invalid { field: field.into(), reason: "must be at least 100ms".into() });
    }
    if value > 300_000 {
        return Err(ConfigError::Invalid {
            field: field.into(),
            reason: "must not exceed 5 minutes (300000ms)".into(),
        });
    }
    Ok(())
}
