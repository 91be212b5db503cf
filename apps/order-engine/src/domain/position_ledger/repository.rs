//! Position Repository Trait

use async_trait::async_trait;

use super::aggregate::Position;
use super::errors::PositionError;
use crate::domain::shared::{AccountId, Symbol};

/// Read access to positions.
///
/// Writes go through the atomic fill commit so that positions never
/// diverge from the trade journal.
#[async_trait]
pub trait PositionRepository: Send + Sync {
    /// The open position for an account and symbol, if any.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_open(
        &self,
        account_id: &AccountId,
        symbol: &Symbol,
    ) -> Result<Option<Position>, PositionError>;

    /// All open positions for an account, ordered by symbol.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_open_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Position>, PositionError>;
}
