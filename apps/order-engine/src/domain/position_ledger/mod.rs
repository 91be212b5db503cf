//! Position Ledger Bounded Context
//!
//! Owns open positions per (account, symbol): weighted-average entry
//! prices, realized P/L on reductions, and mark-to-market P/L.
//!
//! # Key Concepts
//!
//! - **Position Aggregate**: at most one OPEN position per account and symbol
//! - **Sign flips**: a fill crossing zero closes the old position and opens
//!   a new one at the fill price
//! - **Unknown marks**: unrealized P/L without a mark price is `Unknown`,
//!   never zero

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::Position;
pub use errors::PositionError;
pub use repository::PositionRepository;
pub use services::{LedgerUpdate, PositionLedger};
pub use value_objects::{FillEffect, MarkPrice, PositionFill, PositionStatus, UnrealizedPnl};
