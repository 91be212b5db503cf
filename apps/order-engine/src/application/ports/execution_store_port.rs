//! Execution Store Port (Driven Port)
//!
//! Atomic commit of everything a fill changes.

use async_trait::async_trait;

use super::account_port::AccountPort;
use crate::domain::order_execution::{Order, OrderRepository};
use crate::domain::position_ledger::{Position, PositionRepository};
use crate::domain::risk_management::RiskSettingsRepository;
use crate::domain::shared::Money;
use crate::domain::trade_journal::{Trade, TradeRepository};

/// Everything a single fill changes.
#[derive(Debug, Clone)]
pub struct FillCommit {
    /// The order in its post-fill state.
    pub order: Order,
    /// Position records touched by the fill (closed and/or open).
    pub positions: Vec<Position>,
    /// The trade recorded for the fill.
    pub trade: Trade,
    /// Change in account equity: realized P/L less fees.
    pub cash_delta: Money,
}

/// Store error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The commit would break a store invariant.
    #[error("Commit conflict: {message}")]
    Conflict {
        /// Error details.
        message: String,
    },

    /// Storage failed.
    #[error("Store unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for committing fills.
#[async_trait]
pub trait ExecutionStorePort: Send + Sync {
    /// Persist the order's terminal state, the touched positions, the trade,
    /// and the cash delta together. Either all of them become visible or
    /// none do.
    async fn commit_fill(&self, commit: FillCommit) -> Result<(), StoreError>;
}

/// Every storage capability the use cases need, as one bound.
pub trait EngineStore:
    OrderRepository
    + PositionRepository
    + TradeRepository
    + RiskSettingsRepository
    + AccountPort
    + ExecutionStorePort
{
}

impl<T> EngineStore for T where
    T: OrderRepository
        + PositionRepository
        + TradeRepository
        + RiskSettingsRepository
        + AccountPort
        + ExecutionStorePort
{
}
