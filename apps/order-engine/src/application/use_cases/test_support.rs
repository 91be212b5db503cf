//! Shared fixtures for use case tests.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::application::dto::SubmitOrderDto;
use crate::application::ports::{
    AccountBalance, AccountError, AccountPort, ExecutionStorePort, FillCommit, PriceFeedError,
    PriceFeedPort, StoreError,
};
use crate::domain::order_execution::{Order, OrderError, OrderRepository, OrderSide, OrderType};
use crate::domain::position_ledger::{Position, PositionError, PositionRepository};
use crate::domain::risk_management::{RiskError, RiskSettings, RiskSettingsRepository};
use crate::domain::shared::{AccountId, Money, OrderId, Symbol};
use crate::domain::trade_journal::{Trade, TradeError, TradeRepository};
use crate::infrastructure::persistence::InMemoryStore;

pub fn store(equity: Decimal) -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new(Money::new(equity)))
}

pub fn submit_dto(symbol: &str, side: &str, quantity: Decimal) -> SubmitOrderDto {
    SubmitOrderDto {
        account_id: Some("acc-1".to_string()),
        symbol: symbol.to_string(),
        side: if side == "SELL" {
            OrderSide::Sell
        } else {
            OrderSide::Buy
        },
        order_type: OrderType::Market,
        quantity,
        limit_price: None,
        stop_price: None,
        stop_loss: None,
        execution_price: None,
        allow_partial_fill: false,
    }
}

/// A price feed that never answers.
pub struct HangingPriceFeed;

#[async_trait]
impl PriceFeedPort for HangingPriceFeed {
    async fn last_price(&self, _symbol: &Symbol) -> Result<Money, PriceFeedError> {
        std::future::pending().await
    }
}

/// Delegates everything to an in-memory store but refuses every fill commit.
pub struct FailingCommitStore(pub Arc<InMemoryStore>);

#[async_trait]
impl OrderRepository for FailingCommitStore {
    async fn save(&self, order: &Order) -> Result<(), OrderError> {
        self.0.save(order).await
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        self.0.find_by_id(id).await
    }

    async fn find_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, OrderError> {
        self.0.find_by_account(account_id).await
    }
}

#[async_trait]
impl PositionRepository for FailingCommitStore {
    async fn find_open(
        &self,
        account_id: &AccountId,
        symbol: &Symbol,
    ) -> Result<Option<Position>, PositionError> {
        self.0.find_open(account_id, symbol).await
    }

    async fn find_open_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Position>, PositionError> {
        self.0.find_open_by_account(account_id).await
    }
}

#[async_trait]
impl TradeRepository for FailingCommitStore {
    async fn append(&self, trade: &Trade) -> Result<(), TradeError> {
        self.0.append(trade).await
    }

    async fn list_by_account(&self, account_id: &AccountId) -> Result<Vec<Trade>, TradeError> {
        self.0.list_by_account(account_id).await
    }
}

#[async_trait]
impl RiskSettingsRepository for FailingCommitStore {
    async fn find_settings(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<RiskSettings>, RiskError> {
        self.0.find_settings(account_id).await
    }

    async fn save_settings(
        &self,
        account_id: &AccountId,
        settings: &RiskSettings,
    ) -> Result<(), RiskError> {
        self.0.save_settings(account_id, settings).await
    }
}

#[async_trait]
impl AccountPort for FailingCommitStore {
    async fn balance(&self, account_id: &AccountId) -> Result<AccountBalance, AccountError> {
        self.0.balance(account_id).await
    }
}

#[async_trait]
impl ExecutionStorePort for FailingCommitStore {
    async fn commit_fill(&self, _commit: FillCommit) -> Result<(), StoreError> {
        Err(StoreError::Unavailable {
            message: "disk full".to_string(),
        })
    }
}
