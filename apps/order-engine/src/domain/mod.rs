//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Events**: Records of state transitions
//! - **Domain Services**: Stateless business logic
//! - **Repository Traits**: Persistence abstractions (implemented in adapters)
//!
//! # Bounded Contexts
//!
//! - [`order_execution`]: Order lifecycle from submission to a terminal state
//! - [`risk_management`]: Per-account risk settings and order validation
//! - [`position_ledger`]: Weighted-average positions and realized/unrealized P/L
//! - [`trade_journal`]: Append-only fills and performance metrics

pub mod order_execution;
pub mod position_ledger;
pub mod risk_management;
pub mod shared;
pub mod trade_journal;
