//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod order_dto;
mod position_dto;
mod risk_dto;
mod trade_dto;

pub use order_dto::{OrderDto, SubmitOrderDto, SubmitOutcome, ValidateOrderDto};
pub use position_dto::{PositionDto, PositionsDto};
pub use risk_dto::RiskSettingsDto;
pub use trade_dto::{TradeDto, TradeListingDto};

use crate::domain::shared::AccountId;
use crate::error::EngineError;

/// Parse a caller-supplied account ID.
///
/// # Errors
///
/// Returns `InvalidArgument` if the ID is missing or blank.
pub fn parse_account_id(raw: Option<&str>) -> Result<AccountId, EngineError> {
    match raw.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(AccountId::new(id)),
        _ => Err(EngineError::invalid_argument("account_id is required")),
    }
}
