//! Domain events for order execution.
//!
//! Every event shares an envelope (order, account, symbol, time) and a
//! kind-specific payload. Events are drained from the aggregate and
//! published only after the state they describe has been stored.

use serde::{Deserialize, Serialize};

use super::value_objects::{CancelReason, OrderSide, RejectReason};
use crate::domain::shared::{AccountId, Money, OrderId, Quantity, Symbol, Timestamp};

/// A lifecycle transition of one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Order the event belongs to.
    pub order_id: OrderId,
    /// Owning account.
    pub account_id: AccountId,
    /// Symbol.
    pub symbol: Symbol,
    /// When the transition happened.
    pub occurred_at: Timestamp,
    /// What happened.
    #[serde(flatten)]
    pub kind: OrderEventKind,
}

impl OrderEvent {
    /// Stable name used as the log/event-bus key.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self.kind {
            OrderEventKind::Submitted { .. } => "ORDER_SUBMITTED",
            OrderEventKind::PartiallyFilled { .. } => "ORDER_PARTIALLY_FILLED",
            OrderEventKind::Filled { .. } => "ORDER_FILLED",
            OrderEventKind::Cancelled { .. } => "ORDER_CANCELLED",
            OrderEventKind::Rejected { .. } => "ORDER_REJECTED",
        }
    }
}

/// Payload of an [`OrderEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventKind {
    /// Accepted for processing in `PENDING`.
    Submitted {
        /// Side.
        side: OrderSide,
        /// Requested quantity.
        quantity: Quantity,
    },
    /// An execution left part of the order open.
    PartiallyFilled {
        /// Quantity of this execution.
        fill_quantity: Quantity,
        /// Price of this execution.
        fill_price: Money,
        /// Cumulative filled quantity.
        filled_quantity: Quantity,
    },
    /// The order is completely filled.
    Filled {
        /// Total filled quantity.
        filled_quantity: Quantity,
        /// Volume-weighted fill price.
        average_price: Money,
    },
    /// Cancelled before filling.
    Cancelled {
        /// Why.
        reason: CancelReason,
    },
    /// Refused by risk validation.
    Rejected {
        /// Why.
        reason: RejectReason,
    },
}
