//! Effect of a fill on the position it touches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a fill changed the position for its (account, symbol).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FillEffect {
    /// Opened a new position where none existed.
    Open,
    /// Added to an existing position in the same direction.
    Increase,
    /// Reduced an existing position without closing it.
    Reduce,
    /// Reduced an existing position exactly to zero.
    Close,
    /// Closed the existing position and opened one in the opposite direction.
    Flip,
}

impl FillEffect {
    /// Returns true if the fill realized profit or loss.
    #[must_use]
    pub const fn realizes_pnl(&self) -> bool {
        matches!(self, Self::Reduce | Self::Close | Self::Flip)
    }
}

impl fmt::Display for FillEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Increase => write!(f, "INCREASE"),
            Self::Reduce => write!(f, "REDUCE"),
            Self::Close => write!(f, "CLOSE"),
            Self::Flip => write!(f, "FLIP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_reducing_effects_realize_pnl() {
        assert!(!FillEffect::Open.realizes_pnl());
        assert!(!FillEffect::Increase.realizes_pnl());
        assert!(FillEffect::Reduce.realizes_pnl());
        assert!(FillEffect::Close.realizes_pnl());
        assert!(FillEffect::Flip.realizes_pnl());
    }
}
