//! Error taxonomy for the order engine.
//!
//! Domain errors are classified into [`EngineError`] at the application
//! boundary. Each variant maps to a stable [`ErrorCode`] and an HTTP status.
//!
//! | Code | HTTP | Usage |
//! |------|------|-------|
//! | `INVALID_ARGUMENT` | 400 | Malformed or missing request field |
//! | `VALIDATION_REJECTED` | 400 | Order failed risk checks |
//! | `INVALID_STATE` | 400 | Operation not allowed in the current lifecycle state |
//! | `NOT_FOUND` | 404 | Unknown order |
//! | `DEPENDENCY_UNAVAILABLE` | 503 | Store or price feed failed or timed out |
//! | `INTERNAL` | 500 | Unexpected server error |

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::{AccountError, PriceFeedError, StoreError};
use crate::domain::order_execution::OrderError;
use crate::domain::position_ledger::PositionError;
use crate::domain::risk_management::RiskError;
use crate::domain::shared::DomainError;
use crate::domain::trade_journal::TradeError;

/// Message returned to callers for `DEPENDENCY_UNAVAILABLE`.
pub const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable, please retry";

/// Message returned to callers for `INTERNAL`.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Stable error codes exposed to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or missing request field.
    InvalidArgument,
    /// Risk rules failed.
    ValidationRejected,
    /// Operation incompatible with the current lifecycle state.
    InvalidState,
    /// Unknown identifier.
    NotFound,
    /// Store or price feed failure.
    DependencyUnavailable,
    /// Unexpected failure.
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument | Self::ValidationRejected | Self::InvalidState => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::DependencyUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::ValidationRejected => "VALIDATION_REJECTED",
            Self::InvalidState => "INVALID_STATE",
            Self::NotFound => "NOT_FOUND",
            Self::DependencyUnavailable => "DEPENDENCY_UNAVAILABLE",
            Self::Internal => "INTERNAL",
        }
    }

    /// Returns true for errors caused by the caller.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        !matches!(self, Self::DependencyUnavailable | Self::Internal)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Application-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Malformed or missing input. Never persisted.
    #[error("{message}")]
    InvalidArgument {
        /// Error message.
        message: String,
    },

    /// Risk checks failed; the order was persisted as REJECTED.
    #[error("Order rejected: {}", messages.join("; "))]
    ValidationRejected {
        /// Every failing check.
        messages: Vec<String>,
    },

    /// Operation not allowed in the current lifecycle state.
    #[error("{message}")]
    InvalidState {
        /// Error message.
        message: String,
    },

    /// Unknown identifier.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Kind of resource.
        resource: String,
        /// Requested identifier.
        id: String,
    },

    /// A store or price feed call failed or timed out.
    #[error("{dependency} unavailable: {message}")]
    DependencyUnavailable {
        /// Name of the failing dependency.
        dependency: String,
        /// Error details (logged, not returned to callers).
        message: String,
    },

    /// Unexpected failure.
    #[error("Internal error: {message}")]
    Internal {
        /// Error details (logged, not returned to callers).
        message: String,
    },
}

impl EngineError {
    /// Invalid argument.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Dependency failure.
    #[must_use]
    pub fn unavailable(dependency: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DependencyUnavailable {
            dependency: dependency.into(),
            message: message.into(),
        }
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Order not found.
    #[must_use]
    pub fn order_not_found(order_id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "Order".to_string(),
            id: order_id.into(),
        }
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Self::ValidationRejected { .. } => ErrorCode::ValidationRejected,
            Self::InvalidState { .. } => ErrorCode::InvalidState,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::DependencyUnavailable { .. } => ErrorCode::DependencyUnavailable,
            Self::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Message safe to return to callers.
    ///
    /// Caller errors are returned verbatim; dependency and internal
    /// failures are replaced by a generic message.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::DependencyUnavailable { .. } => UNAVAILABLE_MESSAGE.to_string(),
            Self::Internal { .. } => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        Self::invalid_argument(err.to_string())
    }
}

impl From<OrderError> for EngineError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidParameters { .. } => Self::invalid_argument(err.to_string()),
            OrderError::InvalidStateTransition { .. }
            | OrderError::CannotFill { .. }
            | OrderError::CannotCancel { .. } => Self::InvalidState {
                message: err.to_string(),
            },
            OrderError::NotFound { order_id } => Self::order_not_found(order_id),
            OrderError::Repository { message } => Self::unavailable("order store", message),
            OrderError::FillExceedsRemaining { .. } => Self::internal(err.to_string()),
        }
    }
}

impl From<RiskError> for EngineError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::InvalidSettings { .. } => Self::invalid_argument(err.to_string()),
            RiskError::Repository { message } => Self::unavailable("risk settings store", message),
        }
    }
}

impl From<PositionError> for EngineError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::InvalidFill { .. } => Self::invalid_argument(err.to_string()),
            PositionError::Repository { message } => Self::unavailable("position store", message),
            PositionError::Mismatch { .. }
            | PositionError::PositionClosed { .. }
            | PositionError::DuplicateOpenPosition { .. } => Self::internal(err.to_string()),
        }
    }
}

impl From<TradeError> for EngineError {
    fn from(err: TradeError) -> Self {
        match err {
            TradeError::InvalidTrade { .. } | TradeError::InvalidFilter { .. } => {
                Self::invalid_argument(err.to_string())
            }
            TradeError::Repository { message } => Self::unavailable("trade journal", message),
            TradeError::DuplicateTrade { .. } => Self::internal(err.to_string()),
        }
    }
}

impl From<PriceFeedError> for EngineError {
    fn from(err: PriceFeedError) -> Self {
        Self::unavailable("price feed", err.to_string())
    }
}

impl From<AccountError> for EngineError {
    fn from(err: AccountError) -> Self {
        Self::unavailable("account store", err.to_string())
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { .. } => Self::internal(err.to_string()),
            StoreError::Unavailable { .. } => Self::unavailable("execution store", err.to_string()),
        }
    }
}
