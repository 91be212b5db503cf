//! Mark-to-market profit and loss.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Money;

/// Unrealized P/L of a position.
///
/// `Unknown` means no mark price was available. It is distinct from a
/// known value of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "amount", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnrealizedPnl {
    /// Valued against a mark price.
    Known(Money),
    /// No mark price was supplied.
    Unknown,
}

impl UnrealizedPnl {
    /// The amount, if known.
    #[must_use]
    pub const fn amount(&self) -> Option<Money> {
        match self {
            Self::Known(amount) => Some(*amount),
            Self::Unknown => None,
        }
    }

    /// Returns true if no mark price was available.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}
