//! Configuration module for the order engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_engine::config::load_config;
//!
//! // Built-in defaults
//! let config = load_config(None)?;
//!
//! // From a file
//! let config = load_config(Some("config/order-engine.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod execution;
mod observability;
mod price_feed;
mod server;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use execution::ExecutionConfig;
pub use observability::{LogFormat, ObservabilityConfig};
pub use price_feed::PriceFeedConfig;
pub use server::ServerConfig;

use crate::application::services::ExecutionSettings;
use crate::domain::risk_management::{RiskSettings, RiskSettingsInput};
use crate::domain::shared::Money;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    Validation(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Execution configuration.
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// Risk settings for accounts without a stored override.
    #[serde(default)]
    pub risk: RiskSettingsInput,
    /// Seed quotes for the price feed.
    #[serde(default)]
    pub price_feed: PriceFeedConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Runtime settings for the use cases.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the default risk settings are
    /// out of bounds.
    pub fn execution_settings(&self) -> Result<ExecutionSettings, ConfigError> {
        let default_risk = RiskSettings::new(self.risk.clone())
            .map_err(|e| ConfigError::Validation(format!("risk: {e}")))?;
        Ok(ExecutionSettings {
            fee_rate: self.execution.fee_rate,
            dependency_timeout: self.execution.dependency_timeout(),
            default_risk,
        })
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// `None` yields the built-in defaults.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        let config = Config::default();
        validate_config(&config)?;
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. A variable that is
/// unset or empty takes the default, or the empty string without one.
#[allow(clippy::expect_used)] // constant pattern
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::Validation(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    let fee_rate = config.execution.fee_rate;
    if fee_rate < Decimal::ZERO || fee_rate >= Decimal::ONE {
        return Err(ConfigError::Validation(format!(
            "execution.fee_rate must be in [0, 1), got {fee_rate}"
        )));
    }

    if config.execution.dependency_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "execution.dependency_timeout_ms must be positive".to_string(),
        ));
    }

    if config.execution.default_account_equity <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "execution.default_account_equity must be positive".to_string(),
        ));
    }

    config.execution_settings()?;

    for (symbol, price) in &config.price_feed.quotes {
        Money::new(*price)
            .validate_as_price(&format!("price_feed.quotes.{symbol}"))
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
    }

    Ok(())
}
