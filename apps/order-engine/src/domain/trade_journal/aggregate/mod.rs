//! Trade Aggregate

mod trade;

pub use trade::{NewTrade, Trade};
