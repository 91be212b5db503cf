//! Get Positions Use Case
//!
//! Open positions with mark-to-market figures. A missing mark price never
//! fails the query; the position is reported with unknown unrealized P/L.

use std::sync::Arc;
use std::time::Duration;

use crate::application::dto::{PositionDto, PositionsDto};
use crate::application::ports::{EngineStore, PriceFeedPort};
use crate::application::services::call_dependency;
use crate::domain::position_ledger::{MarkPrice, Position, PositionLedger};
use crate::domain::shared::{AccountId, Timestamp};
use crate::error::EngineError;

/// Use case for listing an account's open positions.
pub struct GetPositionsUseCase<S, F>
where
    S: EngineStore,
    F: PriceFeedPort,
{
    store: Arc<S>,
    price_feed: Arc<F>,
    timeout: Duration,
}

impl<S, F> GetPositionsUseCase<S, F>
where
    S: EngineStore,
    F: PriceFeedPort,
{
    /// Create a new GetPositionsUseCase.
    pub const fn new(store: Arc<S>, price_feed: Arc<F>, timeout: Duration) -> Self {
        Self {
            store,
            price_feed,
            timeout,
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// Returns `DependencyUnavailable` if positions cannot be loaded.
    pub async fn execute(&self, account_id: &AccountId) -> Result<PositionsDto, EngineError> {
        let mut positions = call_dependency(
            "position store",
            self.timeout,
            self.store.find_open_by_account(account_id),
        )
        .await?;
        PositionLedger::sort_by_symbol(&mut positions);

        let mut dtos = Vec::with_capacity(positions.len());
        for position in &positions {
            let mark = self.mark(position).await;
            let unrealized = PositionLedger::unrealized_pnl(position, mark);
            dtos.push(PositionDto::from_position(position, mark, unrealized));
        }

        Ok(PositionsDto {
            account_id: account_id.to_string(),
            positions: dtos,
            timestamp: Timestamp::now(),
        })
    }

    async fn mark(&self, position: &Position) -> Option<MarkPrice> {
        let price = call_dependency(
            "price feed",
            self.timeout,
            self.price_feed.last_price(position.symbol()),
        )
        .await;

        match price.and_then(|p| MarkPrice::new(p).map_err(EngineError::from)) {
            Ok(mark) => Some(mark),
            Err(e) => {
                tracing::warn!(
                    symbol = %position.symbol(),
                    error = %e,
                    "No mark price, unrealized P/L unknown"
                );
                None
            }
        }
    }
}
