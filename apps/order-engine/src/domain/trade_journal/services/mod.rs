//! Trade Journal Domain Services

mod daily_activity;
mod math;
mod metrics_calculator;

pub use daily_activity::DailyActivity;
pub use metrics_calculator::TradeMetricsCalculator;
