//! Order lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an order in its lifecycle.
///
/// `Pending` is initial. `Filled`, `Cancelled` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created and awaiting risk validation or execution.
    Pending,
    /// Some quantity has executed; the remainder is still open.
    PartiallyFilled,
    /// Fully executed.
    Filled,
    /// Cancelled before full execution.
    Cancelled,
    /// Refused by risk validation.
    Rejected,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::PartiallyFilled,
        Self::Filled,
        Self::Cancelled,
        Self::Rejected,
    ];

    /// Returns true if this is a terminal status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Filled | Self::Cancelled | Self::Rejected)
    }

    /// Returns true if the order can still execute.
    #[must_use]
    pub const fn can_fill(&self) -> bool {
        matches!(self, Self::Pending | Self::PartiallyFilled)
    }

    /// Returns true if the order can be cancelled.
    #[must_use]
    pub const fn is_cancelable(&self) -> bool {
        matches!(self, Self::Pending | Self::PartiallyFilled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}
