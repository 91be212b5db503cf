//! Trade Journal Bounded Context
//!
//! Append-only record of executed trades and the performance metrics
//! derived from them.
//!
//! # Key Concepts
//!
//! - **Trade Aggregate**: immutable, created exactly once per fill
//! - **Filters**: date range, symbol, and offset/limit pagination
//! - **Metrics**: win rate, profit factor, Sharpe ratio, and drawdown over
//!   the trades that realized P/L

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{NewTrade, Trade};
pub use errors::TradeError;
pub use repository::TradeRepository;
pub use services::{DailyActivity, TradeMetricsCalculator};
pub use value_objects::{TradeFilter, TradeMetrics};
