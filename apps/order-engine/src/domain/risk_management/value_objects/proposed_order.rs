//! An order as seen by the risk validator.

use serde::{Deserialize, Serialize};

use crate::domain::order_execution::{Order, OrderSide};
use crate::domain::shared::{Money, Quantity, Symbol};

/// The risk-relevant facts of an order priced at a reference price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedOrder {
    /// Instrument.
    pub symbol: Symbol,
    /// Direction.
    pub side: OrderSide,
    /// Unsigned quantity.
    pub quantity: Quantity,
    /// Price used to value the order.
    pub reference_price: Money,
    /// Protective stop-loss level.
    pub stop_loss: Option<Money>,
}

impl ProposedOrder {
    /// Price an order at a reference price.
    #[must_use]
    pub fn from_order(order: &Order, reference_price: Money) -> Self {
        Self {
            symbol: order.symbol().clone(),
            side: order.side(),
            quantity: order.quantity(),
            reference_price,
            stop_loss: order.stop_loss(),
        }
    }

    /// Notional value: quantity × reference price, saturating.
    #[must_use]
    pub fn notional(&self) -> Money {
        Money::new(
            self.reference_price
                .amount()
                .saturating_mul(self.quantity.abs().amount()),
        )
    }

    /// Largest loss the order can incur: the stop-loss distance times
    /// quantity when a stop is set, otherwise the whole notional.
    #[must_use]
    pub fn worst_case_loss(&self) -> Money {
        self.stop_loss.map_or_else(
            || self.notional(),
            |stop| {
                let distance = self.reference_price.amount().saturating_sub(stop.amount());
                Money::new(distance.abs().saturating_mul(self.quantity.abs().amount()))
            },
        )
    }
}
