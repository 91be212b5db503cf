//! Risk validation report types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::Money;

/// The individual risk checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCheck {
    /// Account equity must be positive for any percentage check to apply.
    AccountEquity,
    /// Order notional as % of equity.
    PositionSize,
    /// Today's realized losses plus this order's worst case.
    DailyLoss,
    /// Amount at risk on this order as % of equity.
    RiskPerTrade,
    /// Required margin against available margin.
    Margin,
    /// Post-trade drawdown estimate.
    Drawdown,
    /// Count of open positions.
    OpenPositions,
    /// Count of fills today.
    DailyTrades,
}

impl fmt::Display for RiskCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AccountEquity => "ACCOUNT_EQUITY",
            Self::PositionSize => "POSITION_SIZE",
            Self::DailyLoss => "DAILY_LOSS",
            Self::RiskPerTrade => "RISK_PER_TRADE",
            Self::Margin => "MARGIN",
            Self::Drawdown => "DRAWDOWN",
            Self::OpenPositions => "OPEN_POSITIONS",
            Self::DailyTrades => "DAILY_TRADES",
        };
        write!(f, "{name}")
    }
}

/// A single failed risk check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskViolation {
    /// Which check failed.
    pub check: RiskCheck,
    /// Human-readable message.
    pub message: String,
    /// Observed value that violated the limit.
    pub observed: Option<String>,
    /// Configured limit.
    pub limit: Option<String>,
}

impl RiskViolation {
    /// Create a new violation.
    #[must_use]
    pub fn new(check: RiskCheck, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
            observed: None,
            limit: None,
        }
    }

    /// Add observed value.
    #[must_use]
    pub fn with_observed(mut self, value: impl Into<String>) -> Self {
        self.observed = Some(value.into());
        self
    }

    /// Add limit value.
    #[must_use]
    pub fn with_limit(mut self, value: impl Into<String>) -> Self {
        self.limit = Some(value.into());
        self
    }
}

impl fmt::Display for RiskViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.check, self.message)
    }
}

/// Exposure figures reported with every validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Worst-case loss of the order, % of equity.
    pub current_risk: Decimal,
    /// Order notional, % of equity.
    pub exposure_percentage: Decimal,
    /// Committed plus required margin, % of equity.
    pub margin_usage: Decimal,
    /// Equity not yet committed as margin.
    pub available_margin: Money,
}

impl RiskMetrics {
    /// All figures zero.
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// Outcome of validating one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskReport {
    /// True only if every check passed.
    pub is_valid: bool,
    /// One message per failed check.
    pub messages: Vec<String>,
    /// Structured form of the failed checks.
    pub violations: Vec<RiskViolation>,
    /// Always populated, even on failure.
    pub metrics: RiskMetrics,
}

impl RiskReport {
    /// Build a report from the collected violations.
    #[must_use]
    pub fn from_violations(violations: Vec<RiskViolation>, metrics: RiskMetrics) -> Self {
        Self {
            is_valid: violations.is_empty(),
            messages: violations.iter().map(|v| v.message.clone()).collect(),
            violations,
            metrics,
        }
    }

    /// A report for a validation that could not run.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            messages: vec![message.into()],
            violations: Vec::new(),
            metrics: RiskMetrics::zeroed(),
        }
    }

    /// Returns true if the given check failed.
    #[must_use]
    pub fn failed_check(&self, check: RiskCheck) -> bool {
        self.violations.iter().any(|v| v.check == check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_violations_is_valid() {
        let report = RiskReport::from_violations(Vec::new(), RiskMetrics::zeroed());
        assert!(report.is_valid);
        assert!(report.messages.is_empty());
    }

    #[test]
    fn messages_mirror_violations() {
        let report = RiskReport::from_violations(
            vec![
                RiskViolation::new(RiskCheck::Margin, "margin").with_limit("100"),
                RiskViolation::new(RiskCheck::Drawdown, "drawdown").with_observed("25%"),
            ],
            RiskMetrics::zeroed(),
        );
        assert!(!report.is_valid);
        assert_eq!(report.messages, vec!["margin", "drawdown"]);
        assert!(report.failed_check(RiskCheck::Margin));
        assert!(!report.failed_check(RiskCheck::PositionSize));
    }

    #[test]
    fn failed_report_has_one_message_and_zero_metrics() {
        let report = RiskReport::failed("internal error");
        assert!(!report.is_valid);
        assert_eq!(report.messages.len(), 1);
        assert_eq!(report.metrics, RiskMetrics::zeroed());
    }

    #[test]
    fn violation_display() {
        let v = RiskViolation::new(RiskCheck::PositionSize, "too large");
        assert_eq!(v.to_string(), "[POSITION_SIZE] too large");
    }
}
