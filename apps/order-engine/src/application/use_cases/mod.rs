//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod account_context;
mod cancel_order;
mod get_positions;
mod list_trades;
mod order_queries;
mod risk_settings;
mod submit_order;
mod validate_order;

#[cfg(test)]
pub(crate) mod test_support;

pub use cancel_order::{CancelOrderResult, CancelOrderUseCase};
pub use get_positions::GetPositionsUseCase;
pub use list_trades::ListTradesUseCase;
pub use order_queries::OrderQueries;
pub use risk_settings::RiskSettingsUseCase;
pub use submit_order::SubmitOrderUseCase;
pub use validate_order::ValidateOrderUseCase;
