//! Trade metrics calculator.

use rust_decimal::Decimal;

use super::math::{TRADING_DAYS, max_drawdown, mean, sqrt_decimal, std_dev};
use crate::domain::shared::Money;
use crate::domain::trade_journal::aggregate::Trade;
use crate::domain::trade_journal::value_objects::TradeMetrics;

const RATIO_DP: u32 = 4;

/// Computes [`TradeMetrics`] over a set of trades.
#[derive(Debug, Default, Clone, Copy)]
pub struct TradeMetricsCalculator;

impl TradeMetricsCalculator {
    /// Calculate metrics for `trades` in any order.
    #[must_use]
    pub fn calculate(trades: &[Trade]) -> TradeMetrics {
        let total_fees: Money = trades.iter().map(Trade::fee).sum();

        let mut closing: Vec<&Trade> = trades.iter().filter(|t| t.is_closing()).collect();
        closing.sort_by_key(|t| t.executed_at());

        let pnl: Vec<Decimal> = closing.iter().map(|t| t.realized_pnl().amount()).collect();

        let mut metrics = TradeMetrics {
            fill_count: trades.len() as u64,
            total_trades: pnl.len() as u64,
            total_fees,
            ..TradeMetrics::default()
        };
        if pnl.is_empty() {
            return metrics;
        }

        let wins: Vec<Decimal> = pnl.iter().copied().filter(|p| *p > Decimal::ZERO).collect();
        let losses: Vec<Decimal> = pnl
            .iter()
            .filter(|p| **p < Decimal::ZERO)
            .map(|p| p.abs())
            .collect();

        let gross_profit: Decimal = wins.iter().sum();
        let gross_loss: Decimal = losses.iter().sum();
        let net: Decimal = pnl.iter().sum();
        let drawdown = max_drawdown(pnl.iter().copied());

        metrics.winning_trades = wins.len() as u64;
        metrics.losing_trades = losses.len() as u64;
        metrics.win_rate = (Decimal::from(metrics.winning_trades)
            / Decimal::from(metrics.total_trades))
        .round_dp(RATIO_DP);
        metrics.average_win = Money::new(mean(&wins).unwrap_or_default()).round();
        metrics.average_loss = Money::new(mean(&losses).unwrap_or_default()).round();
        metrics.largest_win = Money::new(wins.iter().copied().max().unwrap_or_default());
        metrics.largest_loss = Money::new(losses.iter().copied().max().unwrap_or_default());
        metrics.gross_profit = Money::new(gross_profit);
        metrics.gross_loss = Money::new(gross_loss);
        metrics.net_pnl = Money::new(net);
        metrics.profit_factor = Self::profit_factor(gross_profit, gross_loss);
        metrics.sharpe_ratio = Self::sharpe(&pnl);
        metrics.max_drawdown = Money::new(drawdown);
        metrics.recovery_factor = if drawdown > Decimal::ZERO {
            (net / drawdown).round_dp(RATIO_DP)
        } else {
            Decimal::ZERO
        };
        metrics
    }

    fn profit_factor(gross_profit: Decimal, gross_loss: Decimal) -> Decimal {
        if gross_loss > Decimal::ZERO {
            (gross_profit / gross_loss).round_dp(RATIO_DP)
        } else if gross_profit > Decimal::ZERO {
            Decimal::MAX
        } else {
            Decimal::ZERO
        }
    }

    /// Mean / sample std-dev of per-trade P/L, annualized by sqrt(252).
    fn sharpe(pnl: &[Decimal]) -> Decimal {
        let (Some(avg), Some(std)) = (mean(pnl), std_dev(pnl)) else {
            return Decimal::ZERO;
        };
        if std.is_zero() {
            return Decimal::ZERO;
        }
        let annualization = sqrt_decimal(TRADING_DAYS).unwrap_or(Decimal::ONE);
        (avg / std * annualization).round_dp(RATIO_DP)
    }
}
