//! Position Aggregate Root
//!
//! Signed quantity with a weighted-average entry price. The ledger
//! service drives every mutation; the aggregate guards its invariants.

use serde::{Deserialize, Serialize};

use crate::domain::order_execution::OrderSide;
use crate::domain::position_ledger::errors::PositionError;
use crate::domain::position_ledger::value_objects::{PositionFill, PositionStatus};
use crate::domain::shared::{AccountId, Money, PositionId, Quantity, Symbol, Timestamp};

/// Position Aggregate Root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    id: PositionId,
    account_id: AccountId,
    symbol: Symbol,
    quantity: Quantity,
    average_entry_price: Option<Money>,
    realized_pnl: Money,
    status: PositionStatus,
    opened_at: Timestamp,
    updated_at: Timestamp,
    closed_at: Option<Timestamp>,
}

impl Position {
    /// Open a new position from a fill.
    ///
    /// Quantity is the fill quantity signed by side; the entry price is
    /// the fill price.
    #[must_use]
    pub fn open(fill: &PositionFill) -> Self {
        Self::open_with(fill, fill.signed_quantity())
    }

    pub(crate) fn open_with(fill: &PositionFill, quantity: Quantity) -> Self {
        Self {
            id: PositionId::generate(),
            account_id: fill.account_id.clone(),
            symbol: fill.symbol.clone(),
            quantity,
            average_entry_price: Some(fill.price),
            realized_pnl: Money::ZERO,
            status: PositionStatus::Open,
            opened_at: fill.executed_at,
            updated_at: fill.executed_at,
            closed_at: None,
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the position ID.
    #[must_use]
    pub const fn id(&self) -> &PositionId {
        &self.id
    }

    /// Get the owning account.
    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Get the symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Signed quantity: positive long, negative short, zero once closed.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Weighted-average entry price; `None` once the position is closed.
    #[must_use]
    pub const fn average_entry_price(&self) -> Option<Money> {
        self.average_entry_price
    }

    /// Cumulative realized P/L.
    #[must_use]
    pub const fn realized_pnl(&self) -> Money {
        self.realized_pnl
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> PositionStatus {
        self.status
    }

    /// Returns true while the position carries exposure.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PositionStatus::Open
    }

    /// Side of the exposure (`BUY` for long, `SELL` for short).
    #[must_use]
    pub fn side(&self) -> Option<OrderSide> {
        OrderSide::from_signed(self.quantity)
    }

    /// When the position was opened.
    #[must_use]
    pub const fn opened_at(&self) -> Timestamp {
        self.opened_at
    }

    /// Last mutation time.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// When the position was closed.
    #[must_use]
    pub const fn closed_at(&self) -> Option<Timestamp> {
        self.closed_at
    }

    /// Cost basis of the open quantity: |quantity| × average entry.
    #[must_use]
    pub fn cost_basis(&self) -> Money {
        self.average_entry_price
            .map_or(Money::ZERO, |avg| avg * self.quantity.abs())
    }

    // ========================================================================
    // Mutations (driven by the ledger service)
    // ========================================================================

    pub(crate) fn ensure_accepts(&self, fill: &PositionFill) -> Result<(), PositionError> {
        if !self.is_open() {
            return Err(PositionError::PositionClosed {
                position_id: self.id.to_string(),
            });
        }
        if self.account_id != fill.account_id || self.symbol != fill.symbol {
            return Err(PositionError::Mismatch {
                position: format!("{}/{}", self.account_id, self.symbol),
                fill: fill.key(),
            });
        }
        Ok(())
    }

    /// Same-direction fill: accumulate and re-weight the entry price.
    pub(crate) fn increase(&mut self, fill: &PositionFill) {
        let added = fill.quantity.abs();
        let held = self.quantity.abs();
        let total = held + added;
        let prior_avg = self.average_entry_price.unwrap_or(fill.price);

        let weighted =
            (prior_avg.amount() * held.amount() + fill.price.amount() * added.amount())
                / total.amount();

        self.quantity = self.quantity + fill.signed_quantity();
        self.average_entry_price = Some(Money::new(weighted));
        self.updated_at = fill.executed_at;
    }

    /// Opposite-direction fill for at most the held quantity.
    ///
    /// Returns the realized P/L of the reduced portion.
    pub(crate) fn reduce(&mut self, reduced: Quantity, price: Money, at: Timestamp) -> Money {
        let avg = self.average_entry_price.unwrap_or(price);
        let direction = self.quantity.signum();
        let realized = Money::new(reduced.amount() * (price - avg).amount() * direction);

        self.quantity = Quantity::new(self.quantity.amount() - reduced.amount() * direction);
        self.realized_pnl += realized;
        self.updated_at = at;

        if self.quantity.is_zero() {
            self.close(at);
        }

        realized
    }

    fn close(&mut self, at: Timestamp) {
        self.quantity = Quantity::ZERO;
        self.average_entry_price = None;
        self.status = PositionStatus::Closed;
        self.closed_at = Some(at);
    }
}
