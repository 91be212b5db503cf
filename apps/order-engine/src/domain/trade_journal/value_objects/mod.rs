//! Trade Journal Value Objects

mod trade_filter;
mod trade_metrics;

pub use trade_filter::TradeFilter;
pub use trade_metrics::TradeMetrics;
