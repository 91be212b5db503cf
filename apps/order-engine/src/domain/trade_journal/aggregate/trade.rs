//! Trade Aggregate Root

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_execution::{OrderSide, OrderType};
use crate::domain::position_ledger::FillEffect;
use crate::domain::shared::{AccountId, Money, OrderId, Quantity, Symbol, Timestamp, TradeId};
use crate::domain::trade_journal::errors::TradeError;

/// Inputs for recording a fill.
#[derive(Debug, Clone)]
pub struct NewTrade {
    /// Order that produced the fill.
    pub order_id: OrderId,
    /// Owning account.
    pub account_id: AccountId,
    /// Traded symbol.
    pub symbol: Symbol,
    /// Fill side.
    pub side: OrderSide,
    /// Type of the originating order.
    pub order_type: OrderType,
    /// Filled quantity (unsigned).
    pub quantity: Quantity,
    /// Fill price.
    pub price: Money,
    /// Fee rate applied to the fill value.
    pub fee_rate: Decimal,
    /// Execution time.
    pub executed_at: Timestamp,
    /// P/L realized by this fill.
    pub realized_pnl: Money,
    /// How the fill changed the position.
    pub effect: FillEffect,
}

/// An executed fill. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    id: TradeId,
    order_id: OrderId,
    account_id: AccountId,
    symbol: Symbol,
    side: OrderSide,
    order_type: OrderType,
    quantity: Quantity,
    price: Money,
    value: Money,
    fee: Money,
    executed_at: Timestamp,
    realized_pnl: Money,
    effect: FillEffect,
}

impl Trade {
    /// Record a fill, computing its value and fee.
    ///
    /// # Errors
    ///
    /// Returns [`TradeError::InvalidTrade`] if a required field is blank or
    /// out of range.
    pub fn record(input: NewTrade) -> Result<Self, TradeError> {
        if input.fee_rate < Decimal::ZERO {
            return Err(TradeError::invalid("fee_rate", "must not be negative"));
        }
        let value = input.price * input.quantity;
        let trade = Self {
            id: TradeId::generate(),
            order_id: input.order_id,
            account_id: input.account_id,
            symbol: input.symbol,
            side: input.side,
            order_type: input.order_type,
            quantity: input.quantity,
            price: input.price,
            value,
            fee: (value * input.fee_rate).round(),
            executed_at: input.executed_at,
            realized_pnl: input.realized_pnl,
            effect: input.effect,
        };
        trade.validate()?;
        Ok(trade)
    }

    /// Check that every required field is present and in range.
    ///
    /// # Errors
    ///
    /// Returns [`TradeError::InvalidTrade`] naming the first bad field.
    pub fn validate(&self) -> Result<(), TradeError> {
        if self.id.is_blank() {
            return Err(TradeError::invalid("id", "is required"));
        }
        if self.order_id.is_blank() {
            return Err(TradeError::invalid("order_id", "is required"));
        }
        if self.account_id.is_blank() {
            return Err(TradeError::invalid("account_id", "is required"));
        }
        self.symbol
            .validate()
            .map_err(|e| TradeError::invalid("symbol", e.to_string()))?;
        if !self.quantity.is_positive() {
            return Err(TradeError::invalid("quantity", "must be positive"));
        }
        if !self.price.is_positive() {
            return Err(TradeError::invalid("price", "must be positive"));
        }
        if self.fee.is_negative() {
            return Err(TradeError::invalid("fee", "must not be negative"));
        }
        if !self.effect.realizes_pnl() && !self.realized_pnl.is_zero() {
            return Err(TradeError::invalid(
                "realized_pnl",
                format!("must be zero for a {} fill", self.effect),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Trade ID.
    #[must_use]
    pub const fn id(&self) -> &TradeId {
        &self.id
    }

    /// Originating order.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Owning account.
    #[must_use]
    pub const fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Traded symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Quantity times price.
    #[must_use]
    pub const fn value(&self) -> Money {
        self.value
    }

    #[must_use]
    pub const fn fee(&self) -> Money {
        self.fee
    }

    #[must_use]
    pub const fn executed_at(&self) -> Timestamp {
        self.executed_at
    }

    /// P/L realized by this fill; zero for opening and increasing fills.
    #[must_use]
    pub const fn realized_pnl(&self) -> Money {
        self.realized_pnl
    }

    #[must_use]
    pub const fn effect(&self) -> FillEffect {
        self.effect
    }

    /// Returns true if the fill closed some or all of a position.
    #[must_use]
    pub const fn is_closing(&self) -> bool {
        self.effect.realizes_pnl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input() -> NewTrade {
        NewTrade {
            order_id: OrderId::new("ord-1"),
            account_id: AccountId::new("acc-1"),
            symbol: Symbol::new("AAPL"),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            quantity: Quantity::from_i64(10),
            price: Money::new(dec!(150.25)),
            fee_rate: dec!(0.001),
            executed_at: Timestamp::now(),
            realized_pnl: Money::ZERO,
            effect: FillEffect::Open,
        }
    }

    #[test]
    fn record_computes_value_and_fee() {
        let trade = Trade::record(input()).unwrap();
        assert_eq!(trade.value().amount(), dec!(1502.50));
        assert_eq!(trade.fee().amount(), dec!(1.50));
        assert!(!trade.is_closing());
    }

    #[test]
    fn record_rejects_missing_fields() {
        let cases = [
            (
                NewTrade {
                    order_id: OrderId::new(""),
                    ..input()
                },
                "order_id",
            ),
            (
                NewTrade {
                    account_id: AccountId::new("  "),
                    ..input()
                },
                "account_id",
            ),
            (
                NewTrade {
                    quantity: Quantity::ZERO,
                    ..input()
                },
                "quantity",
            ),
            (
                NewTrade {
                    price: Money::ZERO,
                    ..input()
                },
                "price",
            ),
            (
                NewTrade {
                    fee_rate: dec!(-0.1),
                    ..input()
                },
                "fee_rate",
            ),
        ];

        for (trade, field) in cases {
            match Trade::record(trade) {
                Err(TradeError::InvalidTrade { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected InvalidTrade for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn opening_fill_cannot_carry_realized_pnl() {
        let result = Trade::record(NewTrade {
            realized_pnl: Money::from_i64(5),
            ..input()
        });
        assert!(matches!(result, Err(TradeError::InvalidTrade { .. })));
    }

    #[test]
    fn closing_fill_keeps_realized_pnl() {
        let trade = Trade::record(NewTrade {
            side: OrderSide::Sell,
            realized_pnl: Money::from_i64(-40),
            effect: FillEffect::Reduce,
            ..input()
        })
        .unwrap();
        assert!(trade.is_closing());
        assert_eq!(trade.realized_pnl(), Money::from_i64(-40));
    }
}
