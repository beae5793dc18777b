//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (FETCHGATE_*)
//! 2. TOML config file (if FETCHGATE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (FETCHGATE_*)
/// 2. TOML config file (if FETCHGATE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    ///
    /// Set via FETCHGATE_LISTEN_ADDR environment variable.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// User-Agent string for outbound HTTP requests. Unset means no header is sent.
    ///
    /// Set via FETCHGATE_USER_AGENT environment variable.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Connect and total timeout for outbound HTTP requests, in milliseconds.
    ///
    /// Set via FETCHGATE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of redirects to follow (libcurl's default of 30).
    ///
    /// Set via FETCHGATE_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Program run by the command-style endpoint.
    ///
    /// Set via FETCHGATE_FETCH_COMMAND environment variable.
    #[serde(default = "default_fetch_command")]
    pub fetch_command: String,

    /// Upper bound on the external command's run time, in milliseconds.
    ///
    /// Set via FETCHGATE_COMMAND_TIMEOUT_MS environment variable.
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,

    /// Apply the URL denylist to the command-style endpoint as well.
    ///
    /// Set via FETCHGATE_COMMAND_DENYLIST environment variable.
    #[serde(default)]
    pub command_denylist: bool,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_redirects() -> usize {
    30
}

fn default_fetch_command() -> String {
    "curl".into()
}

fn default_command_timeout_ms() -> u64 {
    60_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            user_agent: None,
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            fetch_command: default_fetch_command(),
            command_timeout_ms: default_command_timeout_ms(),
            command_denylist: false,
        }
    }
}

impl AppConfig {
    /// HTTP timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// External command timeout as Duration for use with tokio.
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `FETCHGATE_`
    /// 2. TOML file from `FETCHGATE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("FETCHGATE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("FETCHGATE_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }
}
