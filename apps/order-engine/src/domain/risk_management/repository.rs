//! Risk Settings Repository Trait

use async_trait::async_trait;

use super::aggregate::RiskSettings;
use super::errors::RiskError;
use crate::domain::shared::AccountId;

/// Repository trait for per-account risk settings.
#[async_trait]
pub trait RiskSettingsRepository: Send + Sync {
    /// Stored settings for an account, if any override exists.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_settings(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<RiskSettings>, RiskError>;

    /// Store settings for an account, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save_settings(
        &self,
        account_id: &AccountId,
        settings: &RiskSettings,
    ) -> Result<(), RiskError>;
}
