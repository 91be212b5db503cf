//! Application Ports (Driven)
//!
//! Interfaces the use cases depend on. Adapters live in the
//! infrastructure layer.

mod account_port;
mod event_publisher_port;
mod execution_store_port;
mod price_feed_port;

pub use account_port::{AccountBalance, AccountError, AccountPort};
pub use event_publisher_port::{EventPublishError, EventPublisherPort, NoOpEventPublisher};
pub use execution_store_port::{EngineStore, ExecutionStorePort, FillCommit, StoreError};
pub use price_feed_port::{PriceFeedError, PriceFeedPort};
