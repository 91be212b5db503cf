//! Risk Settings Aggregate
//!
//! Per-account risk limits. Percentages are expressed on a 0-100 scale.
//! A `RiskSettings` value is only ever built through [`RiskSettings::new`],
//! so a stored record is never partially invalid.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::risk_management::errors::RiskError;

const HUNDRED: Decimal = dec!(100);

/// Unvalidated risk settings, as supplied by config or a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSettingsInput {
    /// Max notional of a single order, % of equity.
    pub max_position_size: Decimal,
    /// Max realized plus prospective loss per day, % of equity.
    pub max_daily_loss: Decimal,
    /// Max amount at risk on one trade, % of equity.
    pub risk_per_trade: Decimal,
    /// Max peak-to-trough equity decline, %.
    pub max_drawdown: Decimal,
    /// Leverage divisor for margin: `margin = notional / leverage_limit`.
    pub leverage_limit: Decimal,
    /// Max number of simultaneously open positions.
    pub max_open_positions: u32,
    /// Max number of fills per calendar day.
    pub max_daily_trades: u32,
}

impl Default for RiskSettingsInput {
    fn default() -> Self {
        Self {
            max_position_size: dec!(10),
            max_daily_loss: dec!(5),
            risk_per_trade: dec!(2),
            max_drawdown: dec!(20),
            leverage_limit: dec!(1),
            max_open_positions: 5,
            max_daily_trades: 10,
        }
    }
}

/// Validated per-account risk limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RiskSettingsInput", into = "RiskSettingsInput")]
pub struct RiskSettings {
    max_position_size: Decimal,
    max_daily_loss: Decimal,
    risk_per_trade: Decimal,
    max_drawdown: Decimal,
    leverage_limit: Decimal,
    max_open_positions: u32,
    max_daily_trades: u32,
}

impl RiskSettings {
    /// Validate every bound and build the settings.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidSettings`] naming the first field out of bounds.
    pub fn new(input: RiskSettingsInput) -> Result<Self, RiskError> {
        for (field, value) in [
            ("max_position_size", input.max_position_size),
            ("max_daily_loss", input.max_daily_loss),
            ("risk_per_trade", input.risk_per_trade),
            ("max_drawdown", input.max_drawdown),
        ] {
            if value <= Decimal::ZERO || value > HUNDRED {
                return Err(RiskError::invalid(
                    field,
                    format!("must be greater than 0 and at most 100, got {value}"),
                ));
            }
        }

        if input.risk_per_trade > input.max_daily_loss {
            return Err(RiskError::invalid(
                "risk_per_trade",
                format!(
                    "must not exceed max_daily_loss ({} > {})",
                    input.risk_per_trade, input.max_daily_loss
                ),
            ));
        }

        if input.leverage_limit <= Decimal::ZERO {
            return Err(RiskError::invalid(
                "leverage_limit",
                format!("must be greater than 0, got {}", input.leverage_limit),
            ));
        }

        if input.max_open_positions == 0 {
            return Err(RiskError::invalid("max_open_positions", "must be at least 1"));
        }

        if input.max_daily_trades == 0 {
            return Err(RiskError::invalid("max_daily_trades", "must be at least 1"));
        }

        Ok(Self {
            max_position_size: input.max_position_size,
            max_daily_loss: input.max_daily_loss,
            risk_per_trade: input.risk_per_trade,
            max_drawdown: input.max_drawdown,
            leverage_limit: input.leverage_limit,
            max_open_positions: input.max_open_positions,
            max_daily_trades: input.max_daily_trades,
        })
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Max notional of a single order, % of equity.
    #[must_use]
    pub const fn max_position_size(&self) -> Decimal {
        self.max_position_size
    }

    /// Max daily loss, % of equity.
    #[must_use]
    pub const fn max_daily_loss(&self) -> Decimal {
        self.max_daily_loss
    }

    /// Max risk per trade, % of equity.
    #[must_use]
    pub const fn risk_per_trade(&self) -> Decimal {
        self.risk_per_trade
    }

    /// Max drawdown, %.
    #[must_use]
    pub const fn max_drawdown(&self) -> Decimal {
        self.max_drawdown
    }

    /// Leverage limit.
    #[must_use]
    pub const fn leverage_limit(&self) -> Decimal {
        self.leverage_limit
    }

    /// Max open positions.
    #[must_use]
    pub const fn max_open_positions(&self) -> u32 {
        self.max_open_positions
    }

    /// Max fills per day.
    #[must_use]
    pub const fn max_daily_trades(&self) -> u32 {
        self.max_daily_trades
    }
}

impl Default for RiskSettings {
    fn default() -> Self {
        let input = RiskSettingsInput::default();
        Self {
            max_position_size: input.max_position_size,
            max_daily_loss: input.max_daily_loss,
            risk_per_trade: input.risk_per_trade,
            max_drawdown: input.max_drawdown,
            leverage_limit: input.leverage_limit,
            max_open_positions: input.max_open_positions,
            max_daily_trades: input.max_daily_trades,
        }
    }
}

impl TryFrom<RiskSettingsInput> for RiskSettings {
    type Error = RiskError;

    fn try_from(input: RiskSettingsInput) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

impl From<RiskSettings> for RiskSettingsInput {
    fn from(settings: RiskSettings) -> Self {
        Self {
            max_position_size: settings.max_position_size,
            max_daily_loss: settings.max_daily_loss,
            risk_per_trade: settings.risk_per_trade,
            max_drawdown: settings.max_drawdown,
            leverage_limit: settings.leverage_limit,
            max_open_positions: settings.max_open_positions,
            max_daily_trades: settings.max_daily_trades,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RiskSettingsInput {
        RiskSettingsInput::default()
    }

    #[test]
    fn defaults_are_valid() {
        let settings = RiskSettings::new(input()).unwrap();
        assert_eq!(settings, RiskSettings::default());
    }

    #[test]
    fn bound_table() {
        let cases: [(&str, RiskSettingsInput, bool); 9] = [
            (
                "max_position_size = 0",
                RiskSettingsInput {
                    max_position_size: dec!(0),
                    ..input()
                },
                false,
            ),
            (
                "max_position_size = 100",
                RiskSettingsInput {
                    max_position_size: dec!(100),
                    ..input()
                },
                true,
            ),
            (
                "max_position_size > 100",
                RiskSettingsInput {
                    max_position_size: dec!(100.01),
                    ..input()
                },
                false,
            ),
            (
                "max_drawdown negative",
                RiskSettingsInput {
                    max_drawdown: dec!(-1),
                    ..input()
                },
                false,
            ),
            (
                "risk_per_trade > max_daily_loss",
                RiskSettingsInput {
                    risk_per_trade: dec!(6),
                    max_daily_loss: dec!(5),
                    ..input()
                },
                false,
            ),
            (
                "risk_per_trade == max_daily_loss",
                RiskSettingsInput {
                    risk_per_trade: dec!(5),
                    max_daily_loss: dec!(5),
                    ..input()
                },
                true,
            ),
            (
                "leverage_limit tiny",
                RiskSettingsInput {
                    leverage_limit: dec!(0.0001),
                    ..input()
                },
                true,
            ),
            (
                "leverage_limit = 0",
                RiskSettingsInput {
                    leverage_limit: dec!(0),
                    ..input()
                },
                false,
            ),
            (
                "max_open_positions = 0",
                RiskSettingsInput {
                    max_open_positions: 0,
                    ..input()
                },
                false,
            ),
        ];

        for (name, candidate, expected_ok) in cases {
            assert_eq!(RiskSettings::new(candidate).is_ok(), expected_ok, "{name}");
        }
    }

    #[test]
    fn error_names_offending_field() {
        let err = RiskSettings::new(RiskSettingsInput {
            risk_per_trade: dec!(3),
            max_daily_loss: dec!(2),
            ..input()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            RiskError::InvalidSettings { ref field, .. } if field == "risk_per_trade"
        ));
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<RiskSettings, _> = serde_json::from_str(r#"{"max_position_size": "50"}"#);
        assert_eq!(ok.unwrap().max_position_size(), dec!(50));

        let bad: Result<RiskSettings, _> = serde_json::from_str(r#"{"leverage_limit": "0"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn serialize_exposes_all_fields() {
        let json = serde_json::to_value(RiskSettings::default()).unwrap();
        for key in [
            "max_position_size",
            "max_daily_loss",
            "risk_per_trade",
            "max_drawdown",
            "leverage_limit",
            "max_open_positions",
            "max_daily_trades",
        ] {
            assert!(json.get(key).is_some(), "{key}");
        }
    }
}
