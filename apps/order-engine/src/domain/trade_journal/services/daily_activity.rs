//! Per-day trading activity used by the risk checks.

use chrono::NaiveDate;

use crate::domain::shared::Money;
use crate::domain::trade_journal::aggregate::Trade;

/// Fills and realized losses recorded on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DailyActivity {
    /// Number of fills executed that day.
    pub fill_count: u32,
    /// Sum of losing realized P/L, as a positive amount.
    pub realized_loss: Money,
}

impl DailyActivity {
    /// Summarize the trades executed on `date` (UTC).
    #[must_use]
    pub fn on<'a>(trades: impl IntoIterator<Item = &'a Trade>, date: NaiveDate) -> Self {
        trades
            .into_iter()
            .filter(|t| t.executed_at().date() == date)
            .fold(Self::default(), |mut acc, trade| {
                acc.fill_count = acc.fill_count.saturating_add(1);
                if trade.realized_pnl().is_negative() {
                    acc.realized_loss += trade.realized_pnl().abs();
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::{OrderSide, OrderType};
    use crate::domain::position_ledger::FillEffect;
    use crate::domain::shared::{AccountId, OrderId, Quantity, Symbol, Timestamp};
    use crate::domain::trade_journal::aggregate::NewTrade;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn trade(day: u32, pnl: i64) -> Trade {
        Trade::record(NewTrade {
            order_id: OrderId::generate(),
            account_id: AccountId::new("acc-1"),
            symbol: Symbol::new("AAPL"),
            side: OrderSide::Sell,
            order_type: OrderType::Market,
            quantity: Quantity::from_i64(1),
            price: Money::from_i64(100),
            fee_rate: Decimal::ZERO,
            executed_at: Timestamp::new(Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()),
            realized_pnl: Money::from_i64(pnl),
            effect: FillEffect::Reduce,
        })
        .unwrap()
    }

    #[test]
    fn counts_only_the_requested_day() {
        let trades = [trade(3, -50), trade(3, 20), trade(3, -25), trade(4, -1000)];
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

        let activity = DailyActivity::on(&trades, day);

        assert_eq!(activity.fill_count, 3);
        assert_eq!(activity.realized_loss, Money::from_i64(75));
    }

    #[test]
    fn empty_day_is_default() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(DailyActivity::on(&[], day), DailyActivity::default());
    }
}
