//! Order lookups.

use std::sync::Arc;
use std::time::Duration;

use crate::application::dto::OrderDto;
use crate::application::ports::EngineStore;
use crate::application::services::call_dependency;
use crate::domain::shared::{AccountId, OrderId};
use crate::error::EngineError;

/// Read-only order queries.
pub struct OrderQueries<S: EngineStore> {
    store: Arc<S>,
    timeout: Duration,
}

impl<S: EngineStore> OrderQueries<S> {
    /// Create a new OrderQueries.
    pub const fn new(store: Arc<S>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// A single order by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such order exists.
    pub async fn get(&self, order_id: &OrderId) -> Result<OrderDto, EngineError> {
        call_dependency("order store", self.timeout, self.store.find_by_id(order_id))
            .await?
            .map(|order| OrderDto::from_order(&order))
            .ok_or_else(|| EngineError::order_not_found(order_id.as_str()))
    }

    /// Every order of an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DependencyUnavailable` if the store fails.
    pub async fn list(&self, account_id: &AccountId) -> Result<Vec<OrderDto>, EngineError> {
        let orders = call_dependency(
            "order store",
            self.timeout,
            self.store.find_by_account(account_id),
        )
        .await?;
        Ok(orders.iter().map(OrderDto::from_order).collect())
    }
}
