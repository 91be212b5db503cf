//! Mark price used for mark-to-market valuation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::position_ledger::errors::PositionError;
use crate::domain::shared::Money;

/// A strictly positive reference price supplied by a price source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkPrice(Money);

impl MarkPrice {
    /// Create a mark price.
    ///
    /// # Errors
    ///
    /// Returns error if the price is zero or negative.
    pub fn new(price: Money) -> Result<Self, PositionError> {
        if !price.is_positive() {
            return Err(PositionError::InvalidFill {
                field: "mark_price".to_string(),
                message: "Mark price must be positive".to_string(),
            });
        }
        Ok(Self(price))
    }

    /// Get the price.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.0
    }
}

impl fmt::Display for MarkPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_price_must_be_positive() {
        assert!(MarkPrice::new(Money::from_i64(101)).is_ok());
        assert!(MarkPrice::new(Money::ZERO).is_err());
        assert!(MarkPrice::new(Money::from_i64(-1)).is_err());
    }
}
