//! Risk DTOs

use serde::{Deserialize, Serialize};

use crate::domain::risk_management::RiskSettings;

/// Risk settings for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSettingsDto {
    /// Account ID.
    pub account_id: String,
    /// Effective settings.
    #[serde(flatten)]
    pub settings: RiskSettings,
    /// True when no override is stored and defaults apply.
    pub is_default: bool,
}
