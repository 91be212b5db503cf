//! Order DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::parse_account_id;
use crate::domain::order_execution::{
    CreateOrderCommand, Order, OrderSide, OrderStatus, OrderType,
};
use crate::domain::position_ledger::Position;
use crate::domain::risk_management::RiskReport;
use crate::domain::shared::{Money, Quantity, Symbol, Timestamp};
use crate::domain::trade_journal::Trade;
use crate::error::EngineError;

const fn default_order_type() -> OrderType {
    OrderType::Market
}

/// DTO for submitting an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOrderDto {
    /// Account placing the order.
    #[serde(default)]
    pub account_id: Option<String>,
    /// Symbol.
    pub symbol: String,
    /// Side.
    pub side: OrderSide,
    /// Type (defaults to MARKET).
    #[serde(default = "default_order_type")]
    pub order_type: OrderType,
    /// Quantity.
    pub quantity: Decimal,
    /// Limit price (LIMIT only).
    #[serde(default)]
    pub limit_price: Option<Decimal>,
    /// Stop price (STOP only).
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Protective stop-loss level.
    #[serde(default)]
    pub stop_loss: Option<Decimal>,
    /// Externally supplied execution price.
    #[serde(default)]
    pub execution_price: Option<Decimal>,
    /// Partial fills are not supported; `true` is rejected.
    #[serde(default)]
    pub allow_partial_fill: bool,
}

impl SubmitOrderDto {
    /// Convert to a validated domain command.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for missing or malformed fields and for
    /// partial-fill requests.
    pub fn to_command(&self) -> Result<CreateOrderCommand, EngineError> {
        if self.allow_partial_fill {
            return Err(EngineError::invalid_argument(
                "Partial fills are not supported",
            ));
        }
        if let Some(stop_loss) = self.stop_loss {
            Money::new(stop_loss).validate_as_price("stop_loss")?;
        }
        self.execution_price()?;

        let command = CreateOrderCommand {
            account_id: parse_account_id(self.account_id.as_deref())?,
            symbol: Symbol::new(&self.symbol),
            side: self.side,
            order_type: self.order_type,
            quantity: Quantity::new(self.quantity),
            limit_price: self.limit_price.map(Money::new),
            stop_price: self.stop_price.map(Money::new),
            stop_loss: self.stop_loss.map(Money::new),
        };
        command.validate()?;
        Ok(command)
    }

    /// The explicit execution price, if supplied.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the price is out of range.
    pub fn execution_price(&self) -> Result<Option<Money>, EngineError> {
        self.execution_price
            .map(|price| -> Result<Money, EngineError> {
                let price = Money::new(price);
                price.validate_as_price("execution_price")?;
                Ok(price)
            })
            .transpose()
    }
}

/// DTO for a what-if risk check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOrderDto {
    /// Order to validate.
    pub order: SubmitOrderDto,
    /// Equity to validate against instead of the stored balance.
    #[serde(default)]
    pub account_balance: Option<Decimal>,
}

/// DTO representing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDto {
    /// Order ID.
    pub order_id: String,
    /// Account ID.
    pub account_id: String,
    /// Symbol.
    pub symbol: String,
    /// Side.
    pub side: OrderSide,
    /// Type.
    pub order_type: OrderType,
    /// Quantity.
    pub quantity: Decimal,
    /// Filled quantity.
    pub filled_quantity: Decimal,
    /// Limit price.
    pub limit_price: Option<Decimal>,
    /// Stop price.
    pub stop_price: Option<Decimal>,
    /// Stop-loss level.
    pub stop_loss: Option<Decimal>,
    /// Average fill price.
    pub average_fill_price: Option<Decimal>,
    /// Status.
    pub status: OrderStatus,
    /// Rejection messages, if rejected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reject_messages: Vec<String>,
    /// Cancellation message, if cancelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    /// Created at.
    pub created_at: Timestamp,
    /// Updated at.
    pub updated_at: Timestamp,
}

impl OrderDto {
    /// Create from domain Order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.id().to_string(),
            account_id: order.account_id().to_string(),
            symbol: order.symbol().to_string(),
            side: order.side(),
            order_type: order.order_type(),
            quantity: order.quantity().amount(),
            filled_quantity: order.filled_quantity().amount(),
            limit_price: order.limit_price().map(|m| m.amount()),
            stop_price: order.stop_price().map(|m| m.amount()),
            stop_loss: order.stop_loss().map(|m| m.amount()),
            average_fill_price: order.average_fill_price().map(|m| m.amount()),
            status: order.status(),
            reject_messages: order
                .reject_reason()
                .map(|r| r.messages.clone())
                .unwrap_or_default(),
            cancel_reason: order.cancel_reason().map(|r| r.message.clone()),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

/// Result of a submission that reached the risk check.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The order passed risk checks and was filled.
    Filled {
        /// The order, now FILLED.
        order: Order,
        /// The trade recorded for the fill.
        trade: Trade,
        /// Position records the fill touched.
        positions: Vec<Position>,
        /// The passing risk report.
        report: RiskReport,
    },
    /// The order failed risk checks and was persisted as REJECTED.
    Rejected {
        /// The order, now REJECTED.
        order: Order,
        /// The failing risk report.
        report: RiskReport,
    },
}

impl SubmitOutcome {
    /// The order in its final state.
    #[must_use]
    pub const fn order(&self) -> &Order {
        match self {
            Self::Filled { order, .. } | Self::Rejected { order, .. } => order,
        }
    }

    /// The risk report the decision was based on.
    #[must_use]
    pub const fn report(&self) -> &RiskReport {
        match self {
            Self::Filled { report, .. } | Self::Rejected { report, .. } => report,
        }
    }

    /// Returns true if the order was filled.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        matches!(self, Self::Filled { .. })
    }

    /// The rejection as an error, if the order was rejected.
    #[must_use]
    pub fn rejection(&self) -> Option<EngineError> {
        match self {
            Self::Filled { .. } => None,
            Self::Rejected { report, .. } => Some(EngineError::ValidationRejected {
                messages: report.messages.clone(),
            }),
        }
    }
}
