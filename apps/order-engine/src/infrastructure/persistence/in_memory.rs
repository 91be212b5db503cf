//! In-memory engine store.
//!
//! One `RwLock` guards every table, so a reader always sees either all or
//! none of a fill commit.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::application::ports::{
    AccountBalance, AccountError, AccountPort, ExecutionStorePort, FillCommit, StoreError,
};
use crate::domain::order_execution::{Order, OrderError, OrderRepository, OrderStatus};
use crate::domain::position_ledger::{Position, PositionError, PositionLedger, PositionRepository};
use crate::domain::risk_management::{RiskError, RiskSettings, RiskSettingsRepository};
use crate::domain::shared::{AccountId, Money, OrderId, Symbol, TradeId};
use crate::domain::trade_journal::{Trade, TradeError, TradeRepository};

#[derive(Debug, Default)]
struct State {
    orders: HashMap<OrderId, Order>,
    orders_by_account: HashMap<AccountId, Vec<OrderId>>,
    open_positions: HashMap<(AccountId, Symbol), Position>,
    closed_positions: Vec<Position>,
    trades: HashMap<AccountId, Vec<Trade>>,
    trade_ids: HashSet<TradeId>,
    risk_settings: HashMap<AccountId, RiskSettings>,
    balances: HashMap<AccountId, AccountBalance>,
}

impl State {
    fn put_order(&mut self, order: &Order) {
        if self.orders.insert(order.id().clone(), order.clone()).is_none() {
            self.orders_by_account
                .entry(order.account_id().clone())
                .or_default()
                .push(order.id().clone());
        }
    }

    /// Reject a commit that would break a store invariant.
    fn check_commit(&self, commit: &FillCommit) -> Result<(), StoreError> {
        if self.trade_ids.contains(commit.trade.id()) {
            return Err(StoreError::Conflict {
                message: format!("trade {} already recorded", commit.trade.id()),
            });
        }

        if let Some(stored) = self.orders.get(commit.order.id())
            && stored.status().is_terminal()
        {
            return Err(StoreError::Conflict {
                message: format!(
                    "order {} is already {}",
                    commit.order.id(),
                    stored.status()
                ),
            });
        }

        for position in commit.positions.iter().filter(|p| p.is_open()) {
            let key = (position.account_id().clone(), position.symbol().clone());
            if let Some(existing) = self.open_positions.get(&key) {
                let replaced = existing.id() == position.id()
                    || commit.positions.iter().any(|p| p.id() == existing.id());
                if !replaced {
                    return Err(StoreError::Conflict {
                        message: format!(
                            "open position already exists for {} {}",
                            key.0, key.1
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

/// In-memory implementation of every store port.
///
/// Suitable for testing and development. State is lost on restart.
#[derive(Debug)]
pub struct InMemoryStore {
    state: RwLock<State>,
    default_equity: Money,
}

impl InMemoryStore {
    /// Create an empty store. Accounts start with `default_equity`.
    #[must_use]
    pub fn new(default_equity: Money) -> Self {
        Self {
            state: RwLock::new(State::default()),
            default_equity,
        }
    }

    /// Set an account's equity, resetting its peak.
    pub fn set_balance(&self, account_id: &AccountId, equity: Money) {
        self.write()
            .balances
            .insert(account_id.clone(), AccountBalance::new(equity));
    }

    /// Closed positions of an account, retained for audit.
    #[must_use]
    pub fn closed_positions(&self, account_id: &AccountId) -> Vec<Position> {
        self.read()
            .closed_positions
            .iter()
            .filter(|p| p.account_id() == account_id)
            .cloned()
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        self.write().put_order(order);
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self.read().orders.get(id).cloned())
    }

    async fn find_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, OrderError> {
        let state = self.read();
        let mut orders: Vec<Order> = state
            .orders_by_account
            .get(account_id)
            .into_iter()
            .flatten()
            .rev()
            .filter_map(|id| state.orders.get(id).cloned())
            .collect();
        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(orders)
    }
}

#[async_trait]
impl PositionRepository for InMemoryStore {
    async fn find_open(
        &self,
        account_id: &AccountId,
        symbol: &Symbol,
    ) -> Result<Option<Position>, PositionError> {
        Ok(self
            .read()
            .open_positions
            .get(&(account_id.clone(), symbol.clone()))
            .cloned())
    }

    async fn find_open_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Position>, PositionError> {
        let mut positions: Vec<Position> = self
            .read()
            .open_positions
            .values()
            .filter(|p| p.account_id() == account_id)
            .cloned()
            .collect();
        PositionLedger::sort_by_symbol(&mut positions);
        Ok(positions)
    }
}

#[async_trait]
impl TradeRepository for InMemoryStore {
    async fn append(&self, trade: &Trade) -> Result<(), TradeError> {
        trade.validate()?;
        let mut state = self.write();
        if !state.trade_ids.insert(trade.id().clone()) {
            return Err(TradeError::DuplicateTrade {
                trade_id: trade.id().to_string(),
            });
        }
        state
            .trades
            .entry(trade.account_id().clone())
            .or_default()
            .push(trade.clone());
        Ok(())
    }

    async fn list_by_account(&self, account_id: &AccountId) -> Result<Vec<Trade>, TradeError> {
        let mut trades: Vec<Trade> = self
            .read()
            .trades
            .get(account_id)
            .into_iter()
            .flatten()
            .rev()
            .cloned()
            .collect();
        trades.sort_by(|a, b| b.executed_at().cmp(&a.executed_at()));
        Ok(trades)
    }
}

#[async_trait]
impl RiskSettingsRepository for InMemoryStore {
    async fn find_settings(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<RiskSettings>, RiskError> {
        Ok(self.read().risk_settings.get(account_id).cloned())
    }

    async fn save_settings(
        &self,
        account_id: &AccountId,
        settings: &RiskSettings,
    ) -> Result<(), RiskError> {
        self.write()
            .risk_settings
            .insert(account_id.clone(), settings.clone());
        Ok(())
    }
}

#[async_trait]
impl AccountPort for InMemoryStore {
    async fn balance(&self, account_id: &AccountId) -> Result<AccountBalance, AccountError> {
        Ok(self
            .read()
            .balances
            .get(account_id)
            .copied()
            .unwrap_or_else(|| AccountBalance::new(self.default_equity)))
    }
}

#[async_trait]
impl ExecutionStorePort for InMemoryStore {
    async fn commit_fill(&self, commit: FillCommit) -> Result<(), StoreError> {
        if commit.order.status() != OrderStatus::Filled {
            return Err(StoreError::Conflict {
                message: format!(
                    "order {} is {}, expected FILLED",
                    commit.order.id(),
                    commit.order.status()
                ),
            });
        }
        commit.trade.validate().map_err(|e| StoreError::Conflict {
            message: e.to_string(),
        })?;

        let mut state = self.write();
        state.check_commit(&commit)?;

        let account_id = commit.order.account_id().clone();
        state.put_order(&commit.order);

        for position in commit.positions {
            let key = (position.account_id().clone(), position.symbol().clone());
            if position.is_open() {
                state.open_positions.insert(key, position);
            } else {
                if state
                    .open_positions
                    .get(&key)
                    .is_some_and(|p| p.id() == position.id())
                {
                    state.open_positions.remove(&key);
                }
                state.closed_positions.push(position);
            }
        }

        state.trade_ids.insert(commit.trade.id().clone());
        state
            .trades
            .entry(account_id.clone())
            .or_default()
            .push(commit.trade);

        let default_equity = self.default_equity;
        let balance = state
            .balances
            .entry(account_id)
            .or_insert_with(|| AccountBalance::new(default_equity));
        *balance = balance.apply(commit.cash_delta);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::{
        CancelReason, CreateOrderCommand, FillReport, OrderSide, OrderType,
    };
    use crate::domain::position_ledger::{FillEffect, PositionFill};
    use crate::domain::shared::{Quantity, Timestamp};
    use crate::domain::trade_journal::NewTrade;
    use rust_decimal_macros::dec;

    fn account() -> AccountId {
        AccountId::new("acc-1")
    }

    fn store() -> InMemoryStore {
        InMemoryStore::new(Money::from_i64(10_000))
    }

    fn order(side: OrderSide, qty: i64) -> Order {
        Order::new(CreateOrderCommand {
            account_id: account(),
            symbol: Symbol::new("AAPL"),
            side,
            order_type: OrderType::Market,
            quantity: Quantity::from_i64(qty),
            limit_price: None,
            stop_price: None,
            stop_loss: None,
        })
        .unwrap()
    }

    /// Build the commit for filling a fresh order against `current`.
    fn fill(current: Option<Position>, side: OrderSide, qty: i64, price: i64) -> FillCommit {
        fill_order(order(side, qty), current, price)
    }

    fn fill_order(mut order: Order, current: Option<Position>, price: i64) -> FillCommit {
        let now = Timestamp::now();
        let update = PositionLedger::apply(
            current,
            &PositionFill {
                account_id: account(),
                symbol: Symbol::new("AAPL"),
                side: order.side(),
                quantity: order.quantity(),
                price: Money::from_i64(price),
                executed_at: now,
            },
        )
        .unwrap();
        let trade = Trade::record(NewTrade {
            order_id: order.id().clone(),
            account_id: account(),
            symbol: Symbol::new("AAPL"),
            side: order.side(),
            order_type: OrderType::Market,
            quantity: order.quantity(),
            price: Money::from_i64(price),
            fee_rate: dec!(0),
            executed_at: now,
            realized_pnl: update.realized_pnl,
            effect: update.effect,
        })
        .unwrap();
        order
            .apply_fill(&FillReport::new(order.quantity(), Money::from_i64(price), now))
            .unwrap();
        FillCommit {
            order,
            positions: update.touched(),
            cash_delta: trade.realized_pnl(),
            trade,
        }
    }

    #[tokio::test]
    async fn commit_records_every_effect() {
        let store = store();
        let commit = fill(None, OrderSide::Buy, 10, 100);
        let order_id = commit.order.id().clone();

        store.commit_fill(commit).await.unwrap();

        assert_eq!(
            store.find_by_id(&order_id).await.unwrap().unwrap().status(),
            OrderStatus::Filled
        );
        assert_eq!(store.list_by_account(&account()).await.unwrap().len(), 1);
        let position = store
            .find_open(&account(), &Symbol::new("AAPL"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(position.quantity(), Quantity::from_i64(10));
    }

    #[tokio::test]
    async fn closing_fill_retains_closed_position_and_moves_equity() {
        let store = store();
        store
            .commit_fill(fill(None, OrderSide::Buy, 10, 100))
            .await
            .unwrap();
        let open = store.find_open(&account(), &Symbol::new("AAPL")).await.unwrap();

        let close = fill(open, OrderSide::Sell, 10, 90);
        assert_eq!(close.trade.effect(), FillEffect::Close);
        store.commit_fill(close).await.unwrap();

        assert!(store.find_open_by_account(&account()).await.unwrap().is_empty());
        assert_eq!(store.closed_positions(&account()).len(), 1);

        let balance = store.balance(&account()).await.unwrap();
        assert_eq!(balance.equity, Money::from_i64(9_900));
        assert_eq!(balance.peak_equity, Money::from_i64(10_000));
    }

    #[tokio::test]
    async fn second_open_position_for_same_symbol_conflicts() {
        let store = store();
        store
            .commit_fill(fill(None, OrderSide::Buy, 10, 100))
            .await
            .unwrap();

        // built as if no position existed
        let stale = fill(None, OrderSide::Buy, 5, 100);
        let stale_order = stale.order.id().clone();
        let err = store.commit_fill(stale).await.unwrap_err();

        assert!(matches!(err, StoreError::Conflict { .. }));
        assert!(store.find_by_id(&stale_order).await.unwrap().is_none());
        assert_eq!(store.list_by_account(&account()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cancelled_order_cannot_be_filled() {
        let store = store();
        let pending = order(OrderSide::Buy, 1);
        let mut cancelled = pending.clone();
        cancelled.cancel(CancelReason::user_requested()).unwrap();
        store.save(&cancelled).await.unwrap();

        let err = store.commit_fill(fill_order(pending, None, 100)).await.unwrap_err();

        assert!(matches!(err, StoreError::Conflict { .. }));
        assert!(store.list_by_account(&account()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orders_and_trades_are_newest_first() {
        let store = store();
        let first = order(OrderSide::Buy, 1);
        let second = order(OrderSide::Buy, 2);
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();
        // re-saving must not duplicate the index
        store.save(&first).await.unwrap();

        let orders = store.find_by_account(&account()).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id(), second.id());
    }

    #[tokio::test]
    async fn duplicate_trade_append_is_rejected() {
        let store = store();
        let commit = fill(None, OrderSide::Buy, 1, 100);

        store.append(&commit.trade).await.unwrap();
        let err = store.append(&commit.trade).await.unwrap_err();

        assert!(matches!(err, TradeError::DuplicateTrade { .. }));
    }

    #[tokio::test]
    async fn unknown_account_gets_default_balance() {
        let store = store();
        let balance = store.balance(&AccountId::new("new")).await.unwrap();
        assert_eq!(balance.equity, Money::from_i64(10_000));

        store.set_balance(&AccountId::new("new"), Money::from_i64(500));
        let balance = store.balance(&AccountId::new("new")).await.unwrap();
        assert_eq!(balance.equity, Money::from_i64(500));
    }
}
