//! Reasons for order rejection and cancellation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason an order was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RejectReason {
    /// Machine-readable rejection code.
    pub code: String,
    /// Individual human-readable messages.
    pub messages: Vec<String>,
}

impl RejectReason {
    /// Create a new reject reason.
    #[must_use]
    pub fn new(code: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            code: code.into(),
            messages,
        }
    }

    /// One or more risk limits were violated.
    #[must_use]
    pub fn risk_limits(messages: Vec<String>) -> Self {
        Self::new("RISK_LIMIT_VIOLATION", messages)
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.messages.join("; "))
    }
}

/// Reason an order was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CancelReason {
    /// Cancellation code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl CancelReason {
    /// Create a new cancel reason.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Cancelled on request of the account holder.
    #[must_use]
    pub fn user_requested() -> Self {
        Self::new("USER_REQUESTED", "Cancelled by user")
    }
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
