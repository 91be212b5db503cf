//! Order Aggregate Root
//!
//! The Order aggregate owns the lifecycle of a single order from
//! submission (`PENDING`) to one of the terminal states.

use serde::{Deserialize, Serialize};

use crate::domain::order_execution::errors::OrderError;
use crate::domain::order_execution::events::{OrderEvent, OrderEventKind};
use crate::domain::order_execution::services::OrderStateMachine;
use crate::domain::order_execution::value_objects::{
    CancelReason, FillReport, OrderSide, OrderStatus, OrderType, RejectReason,
};
use crate::domain::shared::{AccountId, Money, OrderId, Quantity, Symbol, Timestamp};

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Account placing the order.
    pub account_id: AccountId,
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Order type.
    pub order_type: OrderType,
    /// Quantity to trade.
    pub quantity: Quantity,
    /// Limit price (required for, and only for, LIMIT).
    pub limit_price: Option<Money>,
    /// Stop price (required for, and only for, STOP).
    pub stop_price: Option<Money>,
    /// Protective stop-loss level used to bound the order's risk.
    pub stop_loss: Option<Money>,
}

impl CreateOrderCommand {
    /// Validate the command parameters.
    ///
    /// # Errors
    ///
    /// Returns error if required parameters are missing or invalid.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.account_id.is_blank() {
            return Err(OrderError::invalid("account_id", "Account ID is required"));
        }

        self.symbol
            .validate()
            .map_err(|e| OrderError::invalid("symbol", e.to_string()))?;

        self.quantity
            .validate_for_order()
            .map_err(|e| OrderError::invalid("quantity", e.to_string()))?;

        match (self.order_type.requires_limit_price(), self.limit_price) {
            (true, None) => {
                return Err(OrderError::invalid(
                    "limit_price",
                    "Limit price required for LIMIT orders",
                ));
            }
            (false, Some(_)) => {
                return Err(OrderError::invalid(
                    "limit_price",
                    format!("Limit price not allowed for {} orders", self.order_type),
                ));
            }
            _ => {}
        }

        match (self.order_type.requires_stop_price(), self.stop_price) {
            (true, None) => {
                return Err(OrderError::invalid(
                    "stop_price",
                    "Stop price required for STOP orders",
                ));
            }
            (false, Some(_)) => {
                return Err(OrderError::invalid(
                    "stop_price",
                    format!("Stop price not allowed for {} orders", self.order_type),
                ));
            }
            _ => {}
        }

        for (field, price) in [
            ("limit_price", self.limit_price),
            ("stop_price", self.stop_price),
            ("stop_loss", self.stop_loss),
        ] {
            if let Some(price) = price {
                price
                    .validate_as_price(field)
                    .map_err(|e| OrderError::invalid(field, e.to_string()))?;
            }
        }

        Ok(())
    }
}

/// Result of a cancel request on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The order moved to `CANCELLED`.
    Cancelled,
    /// The order was already cancelled; nothing changed.
    AlreadyCancelled,
}

/// Order Aggregate Root.
// `order_type` mirrors the wire name used by every client of the API.
#[allow(clippy::struct_field_names)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    account_id: AccountId,
    symbol: Symbol,
    side: OrderSide,
    order_type: OrderType,
    quantity: Quantity,
    limit_price: Option<Money>,
    stop_price: Option<Money>,
    stop_loss: Option<Money>,
    status: OrderStatus,
    filled_quantity: Quantity,
    average_fill_price: Option<Money>,
    reject_reason: Option<RejectReason>,
    cancel_reason: Option<CancelReason>,
    #[serde(skip)]
    events: Vec<OrderEvent>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Create a new `PENDING` order from a command.
    ///
    /// Records a `Submitted` event.
    ///
    /// # Errors
    ///
    /// Returns error if command validation fails.
    pub fn new(cmd: CreateOrderCommand) -> Result<Self, OrderError> {
        cmd.validate()?;

        let now = Timestamp::now();

        let mut order = Self {
            id: OrderId::generate(),
            account_id: cmd.account_id,
            symbol: cmd.symbol,
            side: cmd.side,
            order_type: cmd.order_type,
            quantity: cmd.quantity,
            limit_price: cmd.limit_price,
            stop_price: cmd.stop_price,
            stop_loss: cmd.stop_loss,
            status: OrderStatus::Pending,
            filled_quantity: Quantity::ZERO,
            average_fill_price: None,
            reject_reason: None,
            cancel_reason: None,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        order.record(OrderEventKind::Submitted {
            side: cmd.side,
            quantity: cmd.quantity,
        });

        Ok(order)
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
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

    /// Get the order side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Get the order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Get the quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the limit price.
    #[must_use]
    pub const fn limit_price(&self) -> Option<Money> {
        self.limit_price
    }

    /// Get the stop price.
    #[must_use]
    pub const fn stop_price(&self) -> Option<Money> {
        self.stop_price
    }

    /// Get the protective stop-loss level.
    #[must_use]
    pub const fn stop_loss(&self) -> Option<Money> {
        self.stop_loss
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Quantity executed so far.
    #[must_use]
    pub const fn filled_quantity(&self) -> Quantity {
        self.filled_quantity
    }

    /// Quantity still open.
    #[must_use]
    pub fn remaining_quantity(&self) -> Quantity {
        self.quantity - self.filled_quantity
    }

    /// Volume-weighted average fill price, if anything executed.
    #[must_use]
    pub const fn average_fill_price(&self) -> Option<Money> {
        self.average_fill_price
    }

    /// Rejection reason, set when the order is `REJECTED`.
    #[must_use]
    pub const fn reject_reason(&self) -> Option<&RejectReason> {
        self.reject_reason.as_ref()
    }

    /// Cancellation reason, set when the order is `CANCELLED`.
    #[must_use]
    pub const fn cancel_reason(&self) -> Option<&CancelReason> {
        self.cancel_reason.as_ref()
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Price the order would reference before any market quote:
    /// the limit price for LIMIT, the stop price for STOP.
    #[must_use]
    pub const fn quoted_price(&self) -> Option<Money> {
        match self.order_type {
            OrderType::Market => None,
            OrderType::Limit => self.limit_price,
            OrderType::Stop => self.stop_price,
        }
    }

    // ========================================================================
    // State Transitions
    // ========================================================================

    /// Apply an execution to the order.
    ///
    /// Records `PartiallyFilled` or, once complete, `Filled`.
    ///
    /// # Errors
    ///
    /// Returns error if the order cannot receive fills or the fill
    /// exceeds the open quantity.
    pub fn apply_fill(&mut self, fill: &FillReport) -> Result<(), OrderError> {
        if !self.status.can_fill() {
            return Err(OrderError::CannotFill {
                status: self.status,
            });
        }

        let remaining = self.remaining_quantity();
        if !fill.quantity.is_positive() || fill.quantity > remaining {
            return Err(OrderError::FillExceedsRemaining {
                fill_qty: fill.quantity.to_string(),
                remaining_qty: remaining.to_string(),
            });
        }

        let cumulative = self.filled_quantity + fill.quantity;
        let prior_value = self.average_fill_price.unwrap_or(Money::ZERO) * self.filled_quantity;
        let average = Money::new(
            (prior_value + fill.price * fill.quantity).amount() / cumulative.amount(),
        );

        let target = if cumulative == self.quantity {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
        OrderStateMachine::validate_transition(self.status, target)?;

        self.filled_quantity = cumulative;
        self.average_fill_price = Some(average);
        self.status = target;
        self.updated_at = fill.executed_at;

        self.record(if target == OrderStatus::Filled {
            OrderEventKind::Filled {
                filled_quantity: cumulative,
                average_price: average,
            }
        } else {
            OrderEventKind::PartiallyFilled {
                fill_quantity: fill.quantity,
                fill_price: fill.price,
                filled_quantity: cumulative,
            }
        });

        Ok(())
    }

    /// Cancel the order.
    ///
    /// Cancelling an already-cancelled order is a no-op and reports
    /// [`CancelOutcome::AlreadyCancelled`].
    ///
    /// # Errors
    ///
    /// Returns error if the order is `FILLED` or `REJECTED`.
    pub fn cancel(&mut self, reason: CancelReason) -> Result<CancelOutcome, OrderError> {
        if self.status == OrderStatus::Cancelled {
            return Ok(CancelOutcome::AlreadyCancelled);
        }
        if !self.status.is_cancelable() {
            return Err(OrderError::CannotCancel {
                status: self.status,
            });
        }
        OrderStateMachine::validate_transition(self.status, OrderStatus::Cancelled)?;

        self.status = OrderStatus::Cancelled;
        self.updated_at = Timestamp::now();
        self.cancel_reason = Some(reason.clone());

        self.record(OrderEventKind::Cancelled { reason });

        Ok(CancelOutcome::Cancelled)
    }

    /// Reject the order.
    ///
    /// Records a `Rejected` event.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not `PENDING`.
    pub fn reject(&mut self, reason: RejectReason) -> Result<(), OrderError> {
        OrderStateMachine::validate_transition(self.status, OrderStatus::Rejected)?;

        self.status = OrderStatus::Rejected;
        self.updated_at = Timestamp::now();
        self.reject_reason = Some(reason.clone());

        self.record(OrderEventKind::Rejected { reason });

        Ok(())
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Stamp an event with this order's envelope.
    fn record(&mut self, kind: OrderEventKind) {
        self.events.push(OrderEvent {
            order_id: self.id.clone(),
            account_id: self.account_id.clone(),
            symbol: self.symbol.clone(),
            occurred_at: self.updated_at,
            kind,
        });
    }

    /// Drain accumulated domain events.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get pending events without draining.
    #[must_use]
    pub fn pending_events(&self) -> &[OrderEvent] {
        &self.events
    }
}
