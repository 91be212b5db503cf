//! Position Ledger Service
//!
//! Applies fills to positions and values them against mark prices.
//!
//! Rules:
//! - same-direction fills re-weight the average entry price
//! - opposite-direction fills realize `reduced × (fill − avg) × sign(position)`
//! - a fill that crosses zero closes the old position and opens the
//!   remainder as a new position at the fill price

use crate::domain::position_ledger::aggregate::Position;
use crate::domain::position_ledger::errors::PositionError;
use crate::domain::position_ledger::value_objects::{
    FillEffect, MarkPrice, PositionFill, UnrealizedPnl,
};
use crate::domain::shared::Money;

/// Outcome of applying one fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerUpdate {
    /// Position that was closed by this fill, if any.
    pub closed: Option<Position>,
    /// Position that is open after this fill, if any.
    pub open: Option<Position>,
    /// P/L realized by this fill.
    pub realized_pnl: Money,
    /// How the fill changed the position.
    pub effect: FillEffect,
}

impl LedgerUpdate {
    /// Every position record touched by the fill.
    #[must_use]
    pub fn touched(&self) -> Vec<Position> {
        self.closed.iter().chain(self.open.iter()).cloned().collect()
    }
}

/// Stateless position ledger service.
pub struct PositionLedger;

impl PositionLedger {
    /// Apply a fill to the current open position for its (account, symbol).
    ///
    /// # Errors
    ///
    /// Returns error if the fill is malformed or does not belong to the
    /// supplied position.
    pub fn apply(
        current: Option<Position>,
        fill: &PositionFill,
    ) -> Result<LedgerUpdate, PositionError> {
        fill.validate()?;

        let Some(mut position) = current else {
            return Ok(LedgerUpdate {
                closed: None,
                open: Some(Position::open(fill)),
                realized_pnl: Money::ZERO,
                effect: FillEffect::Open,
            });
        };
        position.ensure_accepts(fill)?;

        let signed_fill = fill.signed_quantity();
        if position.quantity().signum() == signed_fill.signum() {
            position.increase(fill);
            return Ok(LedgerUpdate {
                closed: None,
                open: Some(position),
                realized_pnl: Money::ZERO,
                effect: FillEffect::Increase,
            });
        }

        let held = position.quantity().abs();
        let reduced = fill.quantity.abs().min(held);
        let remainder = fill.quantity.abs() - reduced;
        let realized = position.reduce(reduced, fill.price, fill.executed_at);

        let update = if !remainder.is_zero() {
            let flipped = Position::open_with(fill, fill.side.signed(remainder));
            LedgerUpdate {
                closed: Some(position),
                open: Some(flipped),
                realized_pnl: realized,
                effect: FillEffect::Flip,
            }
        } else if position.is_open() {
            LedgerUpdate {
                closed: None,
                open: Some(position),
                realized_pnl: realized,
                effect: FillEffect::Reduce,
            }
        } else {
            LedgerUpdate {
                closed: Some(position),
                open: None,
                realized_pnl: realized,
                effect: FillEffect::Close,
            }
        };

        Ok(update)
    }

    /// Mark-to-market P/L: `(mark − average entry) × signed quantity`.
    ///
    /// Closed positions are worth exactly zero; a missing mark is `Unknown`.
    #[must_use]
    pub fn unrealized_pnl(position: &Position, mark: Option<MarkPrice>) -> UnrealizedPnl {
        if !position.is_open() {
            return UnrealizedPnl::Known(Money::ZERO);
        }
        match (mark, position.average_entry_price()) {
            (Some(mark), Some(avg)) => {
                UnrealizedPnl::Known((mark.price() - avg) * position.quantity())
            }
            _ => UnrealizedPnl::Unknown,
        }
    }

    /// Sort positions by symbol for deterministic listing.
    pub fn sort_by_symbol(positions: &mut [Position]) {
        positions.sort_by(|a, b| a.symbol().cmp(b.symbol()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::OrderSide;
    use crate::domain::position_ledger::value_objects::PositionStatus;
    use crate::domain::shared::{AccountId, Quantity, Symbol, Timestamp};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn fill(side: OrderSide, qty: i64, price: i64) -> PositionFill {
        PositionFill {
            account_id: AccountId::new("acc-1"),
            symbol: Symbol::new("AAPL"),
            side,
            quantity: Quantity::from_i64(qty),
            price: Money::from_i64(price),
            executed_at: Timestamp::now(),
        }
    }

    fn apply_all(fills: &[PositionFill]) -> (Option<Position>, Money) {
        let mut open = None;
        let mut realized = Money::ZERO;
        for f in fills {
            let update = PositionLedger::apply(open.take(), f).unwrap();
            realized += update.realized_pnl;
            open = update.open;
        }
        (open, realized)
    }

    #[test]
    fn first_fill_opens_position() {
        let update = PositionLedger::apply(None, &fill(OrderSide::Buy, 10, 100)).unwrap();
        assert_eq!(update.effect, FillEffect::Open);
        let position = update.open.unwrap();
        assert_eq!(position.quantity(), Quantity::from_i64(10));
        assert_eq!(position.average_entry_price(), Some(Money::from_i64(100)));
    }

    #[test]
    fn same_direction_fill_weights_average() {
        let (open, realized) = apply_all(&[
            fill(OrderSide::Buy, 10, 100),
            fill(OrderSide::Buy, 5, 110),
        ]);
        let position = open.unwrap();
        assert_eq!(position.quantity(), Quantity::from_i64(15));
        assert_eq!(
            position.average_entry_price().unwrap().round().amount(),
            dec!(103.33)
        );
        assert_eq!(realized, Money::ZERO);
    }

    #[test]
    fn crossing_fill_closes_and_opens_short() {
        let opened = PositionLedger::apply(None, &fill(OrderSide::Buy, 10, 100))
            .unwrap()
            .open;
        let update = PositionLedger::apply(opened, &fill(OrderSide::Sell, 15, 120)).unwrap();

        assert_eq!(update.effect, FillEffect::Flip);
        assert_eq!(update.realized_pnl, Money::from_i64(200));

        let closed = update.closed.as_ref().unwrap();
        assert_eq!(closed.status(), PositionStatus::Closed);
        assert_eq!(closed.quantity(), Quantity::ZERO);
        assert_eq!(closed.realized_pnl(), Money::from_i64(200));

        let short = update.open.as_ref().unwrap();
        assert_eq!(short.quantity(), Quantity::from_i64(-5));
        assert_eq!(short.average_entry_price(), Some(Money::from_i64(120)));
        assert_eq!(short.realized_pnl(), Money::ZERO);
        assert_ne!(short.id(), closed.id());
        assert_eq!(update.touched(), vec![closed.clone(), short.clone()]);
    }

    #[test]
    fn partial_reduce_keeps_average() {
        let (open, realized) = apply_all(&[
            fill(OrderSide::Buy, 10, 100),
            fill(OrderSide::Sell, 4, 90),
        ]);
        let position = open.unwrap();
        assert_eq!(position.quantity(), Quantity::from_i64(6));
        assert_eq!(position.average_entry_price(), Some(Money::from_i64(100)));
        assert_eq!(realized, Money::from_i64(-40));
    }

    #[test]
    fn exact_close_leaves_no_open_position() {
        let opened = PositionLedger::apply(None, &fill(OrderSide::Sell, 3, 50))
            .unwrap()
            .open;
        let update = PositionLedger::apply(opened, &fill(OrderSide::Buy, 3, 45)).unwrap();
        assert_eq!(update.effect, FillEffect::Close);
        assert!(update.open.is_none());
        assert_eq!(update.realized_pnl, Money::from_i64(15));
        assert_eq!(update.touched().len(), 1);
    }

    #[test]
    fn malformed_fill_is_rejected() {
        let mut bad = fill(OrderSide::Buy, 1, 100);
        bad.price = Money::ZERO;
        assert!(matches!(
            PositionLedger::apply(None, &bad),
            Err(PositionError::InvalidFill { .. })
        ));
    }

    #[test]
    fn unrealized_for_long_and_short() {
        let long = Position::open(&fill(OrderSide::Buy, 10, 100));
        let mark = MarkPrice::new(Money::from_i64(105)).unwrap();
        assert_eq!(
            PositionLedger::unrealized_pnl(&long, Some(mark)),
            UnrealizedPnl::Known(Money::from_i64(50))
        );

        let short = Position::open(&fill(OrderSide::Sell, 5, 120));
        let mark = MarkPrice::new(Money::from_i64(110)).unwrap();
        assert_eq!(
            PositionLedger::unrealized_pnl(&short, Some(mark)),
            UnrealizedPnl::Known(Money::from_i64(50))
        );
    }

    #[test]
    fn unrealized_without_mark_is_unknown() {
        let long = Position::open(&fill(OrderSide::Buy, 10, 100));
        assert_eq!(
            PositionLedger::unrealized_pnl(&long, None),
            UnrealizedPnl::Unknown
        );
    }

    #[test]
    fn unrealized_for_closed_is_zero() {
        let update = PositionLedger::apply(
            Some(Position::open(&fill(OrderSide::Buy, 1, 100))),
            &fill(OrderSide::Sell, 1, 100),
        )
        .unwrap();
        let closed = update.closed.unwrap();
        assert_eq!(
            PositionLedger::unrealized_pnl(&closed, None),
            UnrealizedPnl::Known(Money::ZERO)
        );
    }

    #[test]
    fn sort_by_symbol_orders_listing() {
        let mut positions = vec!["MSFT", "AAPL", "GOOG"]
            .into_iter()
            .map(|s| {
                let mut f = fill(OrderSide::Buy, 1, 10);
                f.symbol = Symbol::new(s);
                Position::open(&f)
            })
            .collect::<Vec<_>>();
        PositionLedger::sort_by_symbol(&mut positions);
        let symbols: Vec<_> = positions.iter().map(|p| p.symbol().as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "GOOG", "MSFT"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_fill() -> impl Strategy<Value = PositionFill> {
            (any::<bool>(), 1i64..50, 1i64..500).prop_map(|(buy, qty, price)| {
                let side = if buy { OrderSide::Buy } else { OrderSide::Sell };
                fill(side, qty, price)
            })
        }

        proptest! {
            #[test]
            fn final_quantity_is_signed_sum(fills in prop::collection::vec(arb_fill(), 1..40)) {
                let (open, _) = apply_all(&fills);
                let expected: Decimal = fills.iter().map(|f| f.signed_quantity().amount()).sum();
                let actual = open.map_or(Decimal::ZERO, |p| p.quantity().amount());
                prop_assert_eq!(actual, expected);
            }

            #[test]
            fn same_direction_average_ignores_order(
                mut fills in prop::collection::vec((1i64..50, 1i64..500), 1..10)
            ) {
                let buys = |fills: &[(i64, i64)]| -> Vec<PositionFill> {
                    fills.iter().map(|(q, p)| fill(OrderSide::Buy, *q, *p)).collect()
                };
                let average = |fills: &[PositionFill]| {
                    apply_all(fills)
                        .0
                        .and_then(|p| p.average_entry_price())
                        .map(|m| m.amount().round_dp(10))
                };

                let forward = buys(&fills);
                fills.reverse();
                let backward = buys(&fills);
                prop_assert_eq!(average(&forward), average(&backward));
            }
        }
    }
}
