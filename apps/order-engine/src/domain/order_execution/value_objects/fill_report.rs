//! Fill report for an order execution.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, Quantity, Timestamp};

/// A single execution of some or all of an order's quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillReport {
    /// Quantity filled in this execution (always positive).
    pub quantity: Quantity,
    /// Price at which this fill occurred.
    pub price: Money,
    /// Time of the execution.
    pub executed_at: Timestamp,
}

impl FillReport {
    /// Create a new fill report.
    #[must_use]
    pub const fn new(quantity: Quantity, price: Money, executed_at: Timestamp) -> Self {
        Self {
            quantity,
            price,
            executed_at,
        }
    }

    /// Notional value of the fill (quantity × price).
    #[must_use]
    pub fn notional(&self) -> Money {
        self.price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn notional_is_quantity_times_price() {
        let fill = FillReport::new(
            Quantity::from_i64(10),
            Money::new(dec!(100.25)),
            Timestamp::now(),
        );
        assert_eq!(fill.notional().amount(), dec!(1002.50));
    }
}
