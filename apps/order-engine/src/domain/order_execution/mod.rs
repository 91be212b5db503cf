//! Order Execution Bounded Context
//!
//! Manages the order lifecycle from submission to a terminal state.
//!
//! # Key Concepts
//!
//! - **Order Aggregate**: The root entity managing order state transitions
//! - **State Machine**: An exhaustive table of legal status transitions
//! - **Domain Events**: Capturing all state transitions

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{CancelOutcome, CreateOrderCommand, Order};
pub use errors::OrderError;
pub use events::{OrderEvent, OrderEventKind};
pub use repository::OrderRepository;
pub use services::OrderStateMachine;
pub use value_objects::{CancelReason, FillReport, OrderSide, OrderStatus, OrderType, RejectReason};
