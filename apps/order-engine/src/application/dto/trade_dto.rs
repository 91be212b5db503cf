//! Trade DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::{OrderSide, OrderType};
use crate::domain::position_ledger::FillEffect;
use crate::domain::shared::Timestamp;
use crate::domain::trade_journal::{Trade, TradeMetrics};

/// DTO representing an executed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeDto {
    /// Trade ID.
    pub trade_id: String,
    /// Originating order.
    pub order_id: String,
    /// Account ID.
    pub account_id: String,
    /// Symbol.
    pub symbol: String,
    /// Side.
    pub side: OrderSide,
    /// Type of the originating order.
    pub order_type: OrderType,
    /// Quantity.
    pub quantity: Decimal,
    /// Fill price.
    pub price: Decimal,
    /// Quantity times price.
    pub value: Decimal,
    /// Fee charged.
    pub fee: Decimal,
    /// P/L realized by this fill.
    pub realized_pnl: Decimal,
    /// Effect on the position.
    pub effect: FillEffect,
    /// Execution time.
    pub executed_at: Timestamp,
}

impl TradeDto {
    /// Create from domain Trade.
    #[must_use]
    pub fn from_trade(trade: &Trade) -> Self {
        Self {
            trade_id: trade.id().to_string(),
            order_id: trade.order_id().to_string(),
            account_id: trade.account_id().to_string(),
            symbol: trade.symbol().to_string(),
            side: trade.side(),
            order_type: trade.order_type(),
            quantity: trade.quantity().amount(),
            price: trade.price().amount(),
            value: trade.value().amount(),
            fee: trade.fee().amount(),
            realized_pnl: trade.realized_pnl().amount(),
            effect: trade.effect(),
            executed_at: trade.executed_at(),
        }
    }
}

/// A page of trades plus metrics over the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeListingDto {
    /// Trades on this page, newest first.
    pub trades: Vec<TradeDto>,
    /// Number of trades matching the filter before pagination.
    pub total: usize,
    /// Metrics over every matching trade.
    pub metrics: TradeMetrics,
}
