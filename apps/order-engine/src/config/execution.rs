//! Execution configuration: fees, dependency timeouts, starting equity.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Execution configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Fee charged on each fill, as a fraction of its value.
    #[serde(default = "default_fee_rate")]
    pub fee_rate: Decimal,
    /// Timeout for each store or price feed call, in milliseconds.
    #[serde(default = "default_dependency_timeout_ms")]
    pub dependency_timeout_ms: u64,
    /// Equity of an account the store has not seen before.
    #[serde(default = "default_account_equity")]
    pub default_account_equity: Decimal,
}

impl ExecutionConfig {
    /// Dependency timeout as a `Duration`.
    #[must_use]
    pub const fn dependency_timeout(&self) -> Duration {
        Duration::from_millis(self.dependency_timeout_ms)
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            fee_rate: default_fee_rate(),
            dependency_timeout_ms: default_dependency_timeout_ms(),
            default_account_equity: default_account_equity(),
        }
    }
}

const fn default_fee_rate() -> Decimal {
    dec!(0.001)
}

const fn default_dependency_timeout_ms() -> u64 {
    2_000
}

const fn default_account_equity() -> Decimal {
    dec!(100000)
}
