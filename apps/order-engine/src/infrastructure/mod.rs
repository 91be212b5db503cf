//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - **Driven Adapters (Outbound)**
//!   - `persistence/`: In-memory store for every repository and the fill commit
//!   - `price_feed`: Static quote table
//!   - `events`: Order events written to the log
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controllers

pub mod events;
pub mod http;
pub mod persistence;
pub mod price_feed;

pub use events::TracingEventPublisher;
pub use persistence::InMemoryStore;
pub use price_feed::StaticPriceFeed;
