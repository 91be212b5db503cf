//! Aggregate performance metrics over a set of trades.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Money;

/// Performance summary for a filtered set of trades.
///
/// Win/loss statistics cover closing trades only; `fill_count` counts
/// every fill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradeMetrics {
    /// All fills in the set.
    pub fill_count: u64,
    /// Fills that realized P/L.
    pub total_trades: u64,
    pub winning_trades: u64,
    pub losing_trades: u64,
    /// Winning trades / total trades, 0 with no trades.
    pub win_rate: Decimal,
    pub average_win: Money,
    /// Loss figures are magnitudes.
    pub average_loss: Money,
    pub largest_win: Money,
    pub largest_loss: Money,
    pub gross_profit: Money,
    pub gross_loss: Money,
    /// Sum of realized P/L before fees.
    pub net_pnl: Money,
    pub total_fees: Money,
    /// Gross profit / gross loss. `Decimal::MAX` when there are winners
    /// and no losers, 0 without closing trades.
    pub profit_factor: Decimal,
    /// Annualized per-trade Sharpe ratio.
    pub sharpe_ratio: Decimal,
    /// Largest decline of cumulative realized P/L.
    pub max_drawdown: Money,
    /// Net P/L / max drawdown, 0 when there was no drawdown.
    pub recovery_factor: Decimal,
}
