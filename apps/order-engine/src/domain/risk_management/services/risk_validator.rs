//! Risk Validator
//!
//! Runs every risk check against a proposed order. Checks never
//! short-circuit: the report lists every rule the order breaks.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::risk_management::aggregate::RiskSettings;
use crate::domain::risk_management::value_objects::{
    AccountSnapshot, ProposedOrder, RiskCheck, RiskMetrics, RiskReport, RiskViolation,
};
use crate::domain::shared::Money;

const HUNDRED: Decimal = dec!(100);

/// `value / divisor`, clamped to the representable range instead of overflowing.
/// `divisor` must be positive.
fn saturating_div(value: Decimal, divisor: Decimal) -> Decimal {
    value.checked_div(divisor).unwrap_or(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// `value` as a percentage of a positive `base`, saturating.
fn percent_of(value: Decimal, base: Decimal) -> Decimal {
    saturating_div(value, base).saturating_mul(HUNDRED)
}

/// Figures shared by the individual checks.
struct Exposure {
    equity: Decimal,
    notional: Decimal,
    worst_case_loss: Decimal,
    committed_margin: Decimal,
    required_margin: Decimal,
    available_margin: Decimal,
}

impl Exposure {
    fn measure(order: &ProposedOrder, account: &AccountSnapshot, settings: &RiskSettings) -> Self {
        let leverage = settings.leverage_limit();
        let equity = account.equity.amount();
        let committed_margin = account
            .open_positions
            .iter()
            .map(|p| saturating_div(p.cost_basis().amount(), leverage))
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let notional = order.notional().amount();

        Self {
            equity,
            notional,
            worst_case_loss: order.worst_case_loss().amount(),
            committed_margin,
            required_margin: saturating_div(notional, leverage),
            available_margin: equity.saturating_sub(committed_margin).max(Decimal::ZERO),
        }
    }

    fn pct_of_equity(&self, value: Decimal) -> Decimal {
        percent_of(value, self.equity)
    }

    fn metrics(&self) -> RiskMetrics {
        RiskMetrics {
            current_risk: self.pct_of_equity(self.worst_case_loss).round_dp(2),
            exposure_percentage: self.pct_of_equity(self.notional).round_dp(2),
            margin_usage: self
                .pct_of_equity(self.committed_margin + self.required_margin)
                .round_dp(2),
            available_margin: Money::new(self.available_margin).round(),
        }
    }
}

/// Risk Validator - validates orders against per-account risk settings.
///
/// Pure: identical inputs always yield identical reports.
pub struct RiskValidator {
    settings: RiskSettings,
}

impl RiskValidator {
    /// Create a validator for the given settings.
    #[must_use]
    pub const fn new(settings: RiskSettings) -> Self {
        Self { settings }
    }

    /// The settings this validator enforces.
    #[must_use]
    pub const fn settings(&self) -> &RiskSettings {
        &self.settings
    }

    /// Validate an order against the account snapshot.
    #[must_use]
    pub fn validate(&self, order: &ProposedOrder, account: &AccountSnapshot) -> RiskReport {
        if !account.equity.is_positive() {
            return RiskReport::from_violations(
                vec![
                    RiskViolation::new(
                        RiskCheck::AccountEquity,
                        format!("Account equity must be positive, got {}", account.equity),
                    )
                    .with_observed(account.equity.amount().to_string()),
                ],
                RiskMetrics::zeroed(),
            );
        }

        let exposure = Exposure::measure(order, account, &self.settings);

        let violations: Vec<RiskViolation> = [
            self.check_position_size(&exposure),
            self.check_daily_loss(&exposure, account),
            self.check_risk_per_trade(&exposure),
            Self::check_margin(&exposure),
            self.check_drawdown(&exposure, account),
            self.check_open_positions(order, account),
            self.check_daily_trades(account),
        ]
        .into_iter()
        .flatten()
        .collect();

        RiskReport::from_violations(violations, exposure.metrics())
    }

    fn check_position_size(&self, exposure: &Exposure) -> Option<RiskViolation> {
        let pct = exposure.pct_of_equity(exposure.notional);
        let limit = self.settings.max_position_size();
        (pct > limit).then(|| {
            RiskViolation::new(
                RiskCheck::PositionSize,
                format!("Position size {pct:.2}% of equity exceeds maximum of {limit}%"),
            )
            .with_observed(format!("{pct:.2}%"))
            .with_limit(format!("{limit}%"))
        })
    }

    fn check_daily_loss(
        &self,
        exposure: &Exposure,
        account: &AccountSnapshot,
    ) -> Option<RiskViolation> {
        let potential = account
            .realized_loss_today
            .amount()
            .abs()
            .saturating_add(exposure.worst_case_loss);
        let limit_pct = self.settings.max_daily_loss();
        let limit = exposure.equity.saturating_mul(limit_pct) / HUNDRED;
        (potential > limit).then(|| {
            RiskViolation::new(
                RiskCheck::DailyLoss,
                format!(
                    "Daily loss limit exceeded: potential loss ${potential:.2} is above ${limit:.2} ({limit_pct}% of equity)"
                ),
            )
            .with_observed(format!("${potential:.2}"))
            .with_limit(format!("${limit:.2}"))
        })
    }

    fn check_risk_per_trade(&self, exposure: &Exposure) -> Option<RiskViolation> {
        let pct = exposure.pct_of_equity(exposure.worst_case_loss);
        let limit = self.settings.risk_per_trade();
        (pct > limit).then(|| {
            RiskViolation::new(
                RiskCheck::RiskPerTrade,
                format!("Risk per trade {pct:.2}% of equity exceeds maximum of {limit}%"),
            )
            .with_observed(format!("{pct:.2}%"))
            .with_limit(format!("{limit}%"))
        })
    }

    fn check_margin(exposure: &Exposure) -> Option<RiskViolation> {
        let required = exposure.required_margin;
        let available = exposure.available_margin;
        (required > available).then(|| {
            RiskViolation::new(
                RiskCheck::Margin,
                format!(
                    "Insufficient margin: required ${required:.2} exceeds available ${available:.2}"
                ),
            )
            .with_observed(format!("${required:.2}"))
            .with_limit(format!("${available:.2}"))
        })
    }

    fn check_drawdown(
        &self,
        exposure: &Exposure,
        account: &AccountSnapshot,
    ) -> Option<RiskViolation> {
        let peak = account.effective_peak().amount();
        let post_trade = exposure.equity.saturating_sub(exposure.worst_case_loss);
        let drawdown = percent_of(peak.saturating_sub(post_trade), peak);
        let limit = self.settings.max_drawdown();
        (drawdown > limit).then(|| {
            RiskViolation::new(
                RiskCheck::Drawdown,
                format!(
                    "Drawdown of {drawdown:.2}% after this trade would exceed maximum of {limit}%"
                ),
            )
            .with_observed(format!("{drawdown:.2}%"))
            .with_limit(format!("{limit}%"))
        })
    }

    fn check_open_positions(
        &self,
        order: &ProposedOrder,
        account: &AccountSnapshot,
    ) -> Option<RiskViolation> {
        if account.holds(&order.symbol) {
            return None;
        }
        let open = account.open_positions.len();
        let limit = self.settings.max_open_positions() as usize;
        (open >= limit).then(|| {
            RiskViolation::new(
                RiskCheck::OpenPositions,
                format!("Maximum open positions reached ({open} of {limit})"),
            )
            .with_observed(open.to_string())
            .with_limit(limit.to_string())
        })
    }

    fn check_daily_trades(&self, account: &AccountSnapshot) -> Option<RiskViolation> {
        let limit = self.settings.max_daily_trades();
        (account.trades_today >= limit).then(|| {
            RiskViolation::new(
                RiskCheck::DailyTrades,
                format!(
                    "Daily trade limit reached ({} of {limit})",
                    account.trades_today
                ),
            )
            .with_observed(account.trades_today.to_string())
            .with_limit(limit.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::OrderSide;
    use crate::domain::position_ledger::{Position, PositionFill};
    use crate::domain::risk_management::aggregate::RiskSettingsInput;
    use crate::domain::shared::{AccountId, Quantity, Symbol, Timestamp};

    fn permissive() -> RiskSettingsInput {
        RiskSettingsInput {
            max_position_size: dec!(100),
            max_daily_loss: dec!(100),
            risk_per_trade: dec!(100),
            max_drawdown: dec!(100),
            leverage_limit: dec!(1),
            max_open_positions: 10,
            max_daily_trades: 100,
        }
    }

    fn validator(input: RiskSettingsInput) -> RiskValidator {
        RiskValidator::new(RiskSettings::new(input).unwrap())
    }

    fn order(symbol: &str, qty: i64, price: i64, stop_loss: Option<i64>) -> ProposedOrder {
        ProposedOrder {
            symbol: Symbol::new(symbol),
            side: OrderSide::Buy,
            quantity: Quantity::from_i64(qty),
            reference_price: Money::from_i64(price),
            stop_loss: stop_loss.map(Money::from_i64),
        }
    }

    fn open_position(symbol: &str, qty: i64, price: i64) -> Position {
        Position::open(&PositionFill {
            account_id: AccountId::new("acc-1"),
            symbol: Symbol::new(symbol),
            side: OrderSide::Buy,
            quantity: Quantity::from_i64(qty),
            price: Money::from_i64(price),
            executed_at: Timestamp::now(),
        })
    }

    #[test]
    fn position_size_breach_is_reported() {
        let v = validator(RiskSettingsInput {
            max_position_size: dec!(5),
            ..permissive()
        });
        let account = AccountSnapshot::with_equity(Money::from_i64(10_000));
        let report = v.validate(&order("AAPL", 6, 100, None), &account);

        assert!(!report.is_valid);
        assert_eq!(report.metrics.exposure_percentage, dec!(6));
        assert!(report.failed_check(RiskCheck::PositionSize));
        assert!(
            report
                .messages
                .iter()
                .any(|m| m.to_lowercase().contains("position size"))
        );
    }

    #[test]
    fn all_checks_are_evaluated() {
        let v = validator(RiskSettingsInput {
            max_position_size: dec!(5),
            max_daily_loss: dec!(3),
            risk_per_trade: dec!(1),
            max_drawdown: dec!(2),
            leverage_limit: dec!(1),
            max_open_positions: 1,
            max_daily_trades: 1,
        });
        let mut account = AccountSnapshot::with_equity(Money::from_i64(1_000));
        account.open_positions.push(open_position("MSFT", 1, 500));
        account.trades_today = 1;

        let report = v.validate(&order("AAPL", 10, 100, None), &account);
        for check in [
            RiskCheck::PositionSize,
            RiskCheck::DailyLoss,
            RiskCheck::RiskPerTrade,
            RiskCheck::Margin,
            RiskCheck::Drawdown,
            RiskCheck::OpenPositions,
            RiskCheck::DailyTrades,
        ] {
            assert!(report.failed_check(check), "{check} should fail");
        }
        assert_eq!(report.messages.len(), 7);
    }

    #[test]
    fn small_order_passes_defaults() {
        let v = RiskValidator::new(RiskSettings::default());
        let account = AccountSnapshot::with_equity(Money::from_i64(100_000));
        let report = v.validate(&order("AAPL", 10, 100, None), &account);
        assert!(report.is_valid, "{:?}", report.messages);
        assert_eq!(report.metrics.exposure_percentage, dec!(1));
        assert_eq!(report.metrics.current_risk, dec!(1));
        assert_eq!(report.metrics.available_margin, Money::from_i64(100_000));
    }

    #[test]
    fn stop_loss_bounds_risk_per_trade() {
        let v = validator(RiskSettingsInput {
            risk_per_trade: dec!(1),
            max_daily_loss: dec!(1),
            ..permissive()
        });
        let account = AccountSnapshot::with_equity(Money::from_i64(10_000));

        let without_stop = v.validate(&order("AAPL", 10, 100, None), &account);
        assert!(without_stop.failed_check(RiskCheck::RiskPerTrade));

        let with_stop = v.validate(&order("AAPL", 10, 100, Some(95)), &account);
        assert!(with_stop.is_valid, "{:?}", with_stop.messages);
        assert_eq!(with_stop.metrics.current_risk, dec!(0.5));
    }

    #[test]
    fn daily_loss_counts_realized_losses() {
        let v = validator(RiskSettingsInput {
            max_daily_loss: dec!(5),
            risk_per_trade: dec!(5),
            ..permissive()
        });
        let mut account = AccountSnapshot::with_equity(Money::from_i64(10_000));
        let order = order("AAPL", 10, 100, Some(70));

        assert!(v.validate(&order, &account).is_valid);

        account.realized_loss_today = Money::from_i64(300);
        let report = v.validate(&order, &account);
        assert!(report.failed_check(RiskCheck::DailyLoss));
    }

    #[test]
    fn margin_accounts_for_open_positions_and_leverage() {
        let v = validator(RiskSettingsInput {
            leverage_limit: dec!(2),
            ..permissive()
        });
        let mut account = AccountSnapshot::with_equity(Money::from_i64(10_000));
        account.open_positions.push(open_position("MSFT", 100, 150));

        let report = v.validate(&order("AAPL", 50, 100, Some(99)), &account);
        assert!(report.is_valid, "{:?}", report.messages);
        assert_eq!(report.metrics.available_margin, Money::from_i64(2_500));
        assert_eq!(report.metrics.margin_usage, dec!(100));

        let report = v.validate(&order("AAPL", 51, 100, Some(99)), &account);
        assert!(report.failed_check(RiskCheck::Margin));
    }

    #[test]
    fn drawdown_uses_recorded_peak() {
        let v = validator(RiskSettingsInput {
            max_drawdown: dec!(10),
            ..permissive()
        });
        let mut account = AccountSnapshot::with_equity(Money::from_i64(9_500));
        account.peak_equity = Money::from_i64(10_000);

        let report = v.validate(&order("AAPL", 1, 100, Some(99)), &account);
        assert!(!report.failed_check(RiskCheck::Drawdown));

        let report = v.validate(&order("AAPL", 10, 100, None), &account);
        assert!(report.failed_check(RiskCheck::Drawdown));
    }

    #[test]
    fn adding_to_held_symbol_ignores_open_position_cap() {
        let v = validator(RiskSettingsInput {
            max_open_positions: 1,
            ..permissive()
        });
        let mut account = AccountSnapshot::with_equity(Money::from_i64(100_000));
        account.open_positions.push(open_position("AAPL", 1, 100));

        assert!(v.validate(&order("AAPL", 1, 100, None), &account).is_valid);
        assert!(
            v.validate(&order("MSFT", 1, 100, None), &account)
                .failed_check(RiskCheck::OpenPositions)
        );
    }

    #[test]
    fn non_positive_equity_is_rejected_with_zero_metrics() {
        let v = RiskValidator::new(RiskSettings::default());
        let report = v.validate(
            &order("AAPL", 1, 100, None),
            &AccountSnapshot::with_equity(Money::ZERO),
        );
        assert!(!report.is_valid);
        assert!(report.failed_check(RiskCheck::AccountEquity));
        assert_eq!(report.metrics, RiskMetrics::zeroed());
    }

    #[test]
    fn validate_is_pure() {
        let v = validator(RiskSettingsInput {
            max_position_size: dec!(5),
            ..permissive()
        });
        let mut account = AccountSnapshot::with_equity(Money::from_i64(10_000));
        account.open_positions.push(open_position("MSFT", 3, 100));
        let order = order("AAPL", 6, 100, None);

        let first = v.validate(&order, &account);
        let second = v.validate(&order, &account);
        assert_eq!(first, second);
    }

    #[test]
    fn extreme_figures_saturate_instead_of_overflowing() {
        let v = validator(RiskSettingsInput {
            leverage_limit: dec!(0.0000000001),
            ..permissive()
        });
        let mut account = AccountSnapshot::with_equity(Money::new(dec!(0.0000000001)));
        account.open_positions.push(open_position("MSFT", 1_000_000, 1_000_000));
        let huge = ProposedOrder {
            quantity: Quantity::new(Decimal::MAX),
            reference_price: Money::new(Decimal::MAX),
            ..order("AAPL", 1, 1, None)
        };

        let report = v.validate(&huge, &account);
        assert!(!report.is_valid);
        assert!(report.failed_check(RiskCheck::PositionSize));
        assert!(report.failed_check(RiskCheck::Margin));
        assert_eq!(report.metrics.exposure_percentage, Decimal::MAX);
    }
}
