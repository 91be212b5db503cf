//! Cancel Order Use Case

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{EngineStore, EventPublisherPort};
use crate::application::services::{AccountLocks, call_dependency};
use crate::domain::order_execution::{CancelOutcome, CancelReason, Order};
use crate::domain::shared::OrderId;
use crate::error::EngineError;

/// Result of a cancel request.
#[derive(Debug, Clone)]
pub struct CancelOrderResult {
    /// The order after the request.
    pub order: Order,
    /// Whether the request changed the order.
    pub outcome: CancelOutcome,
}

/// Use case for cancelling an order.
pub struct CancelOrderUseCase<S, E>
where
    S: EngineStore,
    E: EventPublisherPort,
{
    store: Arc<S>,
    event_publisher: Arc<E>,
    locks: Arc<AccountLocks>,
    timeout: Duration,
}

impl<S, E> CancelOrderUseCase<S, E>
where
    S: EngineStore,
    E: EventPublisherPort,
{
    /// Create a new CancelOrderUseCase.
    pub const fn new(
        store: Arc<S>,
        event_publisher: Arc<E>,
        locks: Arc<AccountLocks>,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            event_publisher,
            locks,
            timeout,
        }
    }

    /// Execute the use case. Cancelling a cancelled order succeeds without
    /// touching it.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order does not exist.
    /// - `InvalidState` if the order is `FILLED` or `REJECTED`.
    pub async fn execute(&self, order_id: &OrderId) -> Result<CancelOrderResult, EngineError> {
        let account_id = self.load(order_id).await?.account_id().clone();
        let _guard = self.locks.acquire(&account_id).await;

        // re-read under the lock; a submit may have finished in between
        let mut order = self.load(order_id).await?;
        let outcome = order.cancel(CancelReason::user_requested())?;

        if outcome == CancelOutcome::Cancelled {
            call_dependency("order store", self.timeout, self.store.save(&order)).await?;
            tracing::info!(order_id = %order_id, account_id = %account_id, "Order cancelled");

            let events = order.drain_events();
            if let Err(e) = self.event_publisher.publish(events).await {
                tracing::error!(order_id = %order_id, error = %e, "Failed to publish events");
            }
        } else {
            tracing::debug!(order_id = %order_id, "Order already cancelled");
        }

        Ok(CancelOrderResult { order, outcome })
    }

    async fn load(&self, order_id: &OrderId) -> Result<Order, EngineError> {
        call_dependency("order store", self.timeout, self.store.find_by_id(order_id))
            .await?
            .ok_or_else(|| EngineError::order_not_found(order_id.as_str()))
    }
}
