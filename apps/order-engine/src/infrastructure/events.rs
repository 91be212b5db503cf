//! Event publishing adapter that writes order events to the log.

use async_trait::async_trait;

use crate::application::ports::{EventPublishError, EventPublisherPort};
use crate::domain::order_execution::OrderEvent;

/// Publishes each order event as a structured `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisherPort for TracingEventPublisher {
    async fn publish(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        for event in &events {
            let payload = serde_json::to_string(event).map_err(|e| EventPublishError::Encode {
                message: e.to_string(),
            })?;
            tracing::info!(
                target: "order_engine::events",
                event_type = event.event_type(),
                order_id = %event.order_id,
                account_id = %event.account_id,
                occurred_at = %event.occurred_at,
                payload = %payload,
                "Order event"
            );
        }
        Ok(())
    }
}
