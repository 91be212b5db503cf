//! Risk Settings Use Case

use std::sync::Arc;
use std::time::Duration;

use crate::application::dto::RiskSettingsDto;
use crate::application::ports::EngineStore;
use crate::application::services::{AccountLocks, call_dependency};
use crate::domain::risk_management::{RiskSettings, RiskSettingsInput};
use crate::domain::shared::AccountId;
use crate::error::EngineError;

use super::account_context::load_risk_settings;

/// Use case for reading and replacing per-account risk settings.
pub struct RiskSettingsUseCase<S: EngineStore> {
    store: Arc<S>,
    locks: Arc<AccountLocks>,
    defaults: RiskSettings,
    timeout: Duration,
}

impl<S: EngineStore> RiskSettingsUseCase<S> {
    /// Create a new RiskSettingsUseCase.
    pub const fn new(
        store: Arc<S>,
        locks: Arc<AccountLocks>,
        defaults: RiskSettings,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            locks,
            defaults,
            timeout,
        }
    }

    /// Stored settings, or the defaults if the account has none.
    ///
    /// # Errors
    ///
    /// Returns `DependencyUnavailable` if the store fails.
    pub async fn get(&self, account_id: &AccountId) -> Result<RiskSettingsDto, EngineError> {
        let (settings, is_default) =
            load_risk_settings(self.store.as_ref(), account_id, &self.defaults, self.timeout)
                .await?;
        Ok(RiskSettingsDto {
            account_id: account_id.to_string(),
            settings,
            is_default,
        })
    }

    /// Replace the account's settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if any bound is violated; nothing is stored.
    pub async fn update(
        &self,
        account_id: &AccountId,
        input: RiskSettingsInput,
    ) -> Result<RiskSettingsDto, EngineError> {
        let settings = RiskSettings::new(input)?;

        let _guard = self.locks.acquire(account_id).await;
        call_dependency(
            "risk settings store",
            self.timeout,
            self.store.save_settings(account_id, &settings),
        )
        .await?;
        tracing::info!(account_id = %account_id, "Risk settings updated");

        Ok(RiskSettingsDto {
            account_id: account_id.to_string(),
            settings,
            is_default: false,
        })
    }
}
