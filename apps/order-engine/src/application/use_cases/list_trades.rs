//! List Trades Use Case

use std::sync::Arc;
use std::time::Duration;

use crate::application::dto::{TradeDto, TradeListingDto};
use crate::application::ports::EngineStore;
use crate::application::services::call_dependency;
use crate::domain::shared::AccountId;
use crate::domain::trade_journal::{Trade, TradeFilter, TradeMetricsCalculator};
use crate::error::EngineError;

/// Use case for listing an account's trades with aggregate metrics.
pub struct ListTradesUseCase<S: EngineStore> {
    store: Arc<S>,
    timeout: Duration,
}

impl<S: EngineStore> ListTradesUseCase<S> {
    /// Create a new ListTradesUseCase.
    pub const fn new(store: Arc<S>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Execute the use case.
    ///
    /// Trades are newest first. `total` and `metrics` describe the whole
    /// filtered set; only `trades` is paginated.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for an inconsistent filter.
    /// - `DependencyUnavailable` if the journal cannot be read.
    pub async fn execute(
        &self,
        account_id: &AccountId,
        filter: &TradeFilter,
    ) -> Result<TradeListingDto, EngineError> {
        filter.validate()?;

        let trades: Vec<Trade> = call_dependency(
            "trade journal",
            self.timeout,
            self.store.list_by_account(account_id),
        )
        .await?
        .into_iter()
        .filter(|t| filter.matches(t))
        .collect();

        let metrics = TradeMetricsCalculator::calculate(&trades);
        let total = trades.len();
        let page = filter.paginate(trades);

        Ok(TradeListingDto {
            trades: page.iter().map(TradeDto::from_trade).collect(),
            total,
            metrics,
        })
    }
}
