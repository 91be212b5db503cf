//! Event Publisher Port (Driven Port)
//!
//! Order events leave the engine through this port after the state change
//! they describe has been committed. Delivery failures are logged by the
//! caller and never undo the commit.

use async_trait::async_trait;

use crate::domain::order_execution::events::OrderEvent;

/// Event publishing error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventPublishError {
    /// The event could not be encoded.
    #[error("Failed to encode order event: {message}")]
    Encode {
        /// Error details.
        message: String,
    },

    /// The sink refused or dropped the event.
    #[error("Failed to deliver order event: {message}")]
    Delivery {
        /// Error details.
        message: String,
    },
}

/// Sink for order lifecycle events.
#[async_trait]
pub trait EventPublisherPort: Send + Sync {
    /// Publish a batch, in order.
    async fn publish(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError>;
}

/// Publisher that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisherPort for NoOpEventPublisher {
    async fn publish(&self, _events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_execution::{CreateOrderCommand, Order, OrderSide, OrderType};
    use crate::domain::shared::{AccountId, Quantity, Symbol};

    #[tokio::test]
    async fn no_op_publisher_accepts_order_events() {
        let mut order = Order::new(CreateOrderCommand {
            account_id: AccountId::new("acc-1"),
            symbol: Symbol::new("AAPL"),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            quantity: Quantity::from_i64(10),
            limit_price: None,
            stop_price: None,
            stop_loss: None,
        })
        .unwrap();

        let events = order.drain_events();
        assert_eq!(events.len(), 1);
        assert!(NoOpEventPublisher.publish(events).await.is_ok());
    }
}
