//! Position DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::OrderSide;
use crate::domain::position_ledger::{MarkPrice, Position, PositionStatus, UnrealizedPnl};
use crate::domain::shared::Timestamp;

/// DTO representing a position valued at a mark price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionDto {
    /// Position ID.
    pub position_id: String,
    /// Account ID.
    pub account_id: String,
    /// Symbol.
    pub symbol: String,
    /// Direction (absent when flat).
    pub side: Option<OrderSide>,
    /// Signed quantity.
    pub quantity: Decimal,
    /// Weighted average entry price (absent when flat).
    pub average_entry_price: Option<Decimal>,
    /// Cumulative realized P/L.
    pub realized_pnl: Decimal,
    /// Mark price used for valuation; `null` when unavailable.
    pub mark_price: Option<Decimal>,
    /// Unrealized P/L; `null` when the mark price is unavailable.
    pub unrealized_pnl: Option<Decimal>,
    /// Status.
    pub status: PositionStatus,
    /// Opened at.
    pub opened_at: Timestamp,
    /// Updated at.
    pub updated_at: Timestamp,
}

impl PositionDto {
    /// Create from a position and its valuation.
    #[must_use]
    pub fn from_position(
        position: &Position,
        mark: Option<MarkPrice>,
        unrealized: UnrealizedPnl,
    ) -> Self {
        Self {
            position_id: position.id().to_string(),
            account_id: position.account_id().to_string(),
            symbol: position.symbol().to_string(),
            side: position.side(),
            quantity: position.quantity().amount(),
            average_entry_price: position.average_entry_price().map(|m| m.amount()),
            realized_pnl: position.realized_pnl().amount(),
            mark_price: mark.map(|m| m.price().amount()),
            unrealized_pnl: unrealized.amount().map(|m| m.round().amount()),
            status: position.status(),
            opened_at: position.opened_at(),
            updated_at: position.updated_at(),
        }
    }
}

/// Open positions for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionsDto {
    /// Account ID.
    pub account_id: String,
    /// Open positions ordered by symbol.
    pub positions: Vec<PositionDto>,
    /// When the valuation was taken.
    pub timestamp: Timestamp,
}
