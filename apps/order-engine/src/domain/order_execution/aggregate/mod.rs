//! Order Aggregate

mod order;

pub use order::{CancelOutcome, CreateOrderCommand, Order};
