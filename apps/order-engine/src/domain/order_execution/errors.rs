//! Order execution errors.

use super::value_objects::OrderStatus;

/// Errors raised by the order aggregate and its repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// Transition not allowed by the state machine.
    #[error("Invalid order state transition: {from} -> {to}: {reason}")]
    InvalidStateTransition {
        /// Current order status.
        from: OrderStatus,
        /// Attempted status.
        to: OrderStatus,
        /// Reason for failure.
        reason: String,
    },

    /// Order cannot be filled in current state.
    #[error("Cannot fill order in status: {status}")]
    CannotFill {
        /// Current status.
        status: OrderStatus,
    },

    /// Order cannot be cancelled in current state.
    #[error("Cannot cancel order in status: {status}")]
    CannotCancel {
        /// Current status.
        status: OrderStatus,
    },

    /// Fill larger than the open quantity, or not positive.
    #[error("Fill quantity {fill_qty} exceeds remaining {remaining_qty}")]
    FillExceedsRemaining {
        /// Fill quantity attempted.
        fill_qty: String,
        /// Remaining quantity.
        remaining_qty: String,
    },

    /// A request field failed validation.
    #[error("Invalid order parameter '{field}': {message}")]
    InvalidParameters {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// No order with this id.
    #[error("Order not found: {order_id}")]
    NotFound {
        /// Order ID.
        order_id: String,
    },

    /// Order storage failed.
    #[error("Order repository error: {message}")]
    Repository {
        /// Error message.
        message: String,
    },
}

impl OrderError {
    /// Shorthand for an [`OrderError::InvalidParameters`].
    #[must_use]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            field: field.into(),
            message: message.into(),
        }
    }
}
