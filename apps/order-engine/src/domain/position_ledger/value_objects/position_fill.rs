//! A fill as seen by the position ledger.

use serde::{Deserialize, Serialize};

use crate::domain::order_execution::OrderSide;
use crate::domain::position_ledger::errors::PositionError;
use crate::domain::shared::{AccountId, Money, Quantity, Symbol, Timestamp};

/// An execution to apply to the position for (account, symbol).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionFill {
    /// Account that traded.
    pub account_id: AccountId,
    /// Instrument traded.
    pub symbol: Symbol,
    /// Direction of the fill.
    pub side: OrderSide,
    /// Unsigned fill quantity.
    pub quantity: Quantity,
    /// Execution price.
    pub price: Money,
    /// Time of execution.
    pub executed_at: Timestamp,
}

impl PositionFill {
    /// Fill quantity signed by side (BUY positive, SELL negative).
    #[must_use]
    pub fn signed_quantity(&self) -> Quantity {
        self.side.signed(self.quantity)
    }

    /// Check the fill is well formed.
    ///
    /// # Errors
    ///
    /// Returns error if the quantity or price is not positive.
    pub fn validate(&self) -> Result<(), PositionError> {
        if !self.quantity.is_positive() {
            return Err(PositionError::InvalidFill {
                field: "quantity".to_string(),
                message: "Fill quantity must be positive".to_string(),
            });
        }
        if !self.price.is_positive() {
            return Err(PositionError::InvalidFill {
                field: "price".to_string(),
                message: "Fill price must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Key used in error messages.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.account_id, self.symbol)
    }
}
