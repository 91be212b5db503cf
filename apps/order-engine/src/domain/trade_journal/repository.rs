//! Trade Repository Trait

use async_trait::async_trait;

use super::aggregate::Trade;
use super::errors::TradeError;
use crate::domain::shared::AccountId;

/// Append-only trade storage.
#[async_trait]
pub trait TradeRepository: Send + Sync {
    /// Append a trade. Trades are never updated or removed.
    ///
    /// # Errors
    ///
    /// Returns [`TradeError::InvalidTrade`] for malformed trades and
    /// [`TradeError::DuplicateTrade`] if the ID was already recorded.
    async fn append(&self, trade: &Trade) -> Result<(), TradeError>;

    /// All trades for an account, newest execution first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_by_account(&self, account_id: &AccountId) -> Result<Vec<Trade>, TradeError>;
}
