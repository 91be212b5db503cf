//! Point-in-time view of an account used for risk validation.

use serde::{Deserialize, Serialize};

use crate::domain::position_ledger::Position;
use crate::domain::shared::{Money, Symbol};

/// Account state the risk checks run against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Current account equity.
    pub equity: Money,
    /// Highest equity observed so far.
    pub peak_equity: Money,
    /// Currently open positions.
    pub open_positions: Vec<Position>,
    /// Magnitude of losses realized today (non-negative).
    pub realized_loss_today: Money,
    /// Number of fills recorded today.
    pub trades_today: u32,
}

impl AccountSnapshot {
    /// Snapshot with only an equity figure; nothing open, nothing traded.
    #[must_use]
    pub const fn with_equity(equity: Money) -> Self {
        Self {
            equity,
            peak_equity: equity,
            open_positions: Vec::new(),
            realized_loss_today: Money::ZERO,
            trades_today: 0,
        }
    }

    /// Returns true if a position in `symbol` is already open.
    #[must_use]
    pub fn holds(&self, symbol: &Symbol) -> bool {
        self.open_positions.iter().any(|p| p.symbol() == symbol)
    }

    /// Peak equity, never below current equity.
    #[must_use]
    pub fn effective_peak(&self) -> Money {
        self.peak_equity.max(self.equity)
    }
}
