//! Runtime settings for order execution.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::risk_management::RiskSettings;

/// Settings the use cases read at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSettings {
    /// Fee charged on each fill, as a fraction of its value.
    pub fee_rate: Decimal,
    /// Upper bound on any single store or price feed call.
    pub dependency_timeout: Duration,
    /// Risk settings for accounts without a stored override.
    pub default_risk: RiskSettings,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            fee_rate: dec!(0.001),
            dependency_timeout: Duration::from_millis(2_000),
            default_risk: RiskSettings::default(),
        }
    }
}
