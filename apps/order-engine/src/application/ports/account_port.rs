//! Account Port (Driven Port)
//!
//! Equity and high-water mark for an account.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{AccountId, Money};

/// Current equity and the highest equity recorded for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Current equity.
    pub equity: Money,
    /// Highest equity recorded.
    pub peak_equity: Money,
}

impl AccountBalance {
    /// A fresh balance whose peak equals its equity.
    #[must_use]
    pub const fn new(equity: Money) -> Self {
        Self {
            equity,
            peak_equity: equity,
        }
    }

    /// Apply a cash delta, raising the peak if the new equity exceeds it.
    #[must_use]
    pub fn apply(self, delta: Money) -> Self {
        let equity = self.equity + delta;
        Self {
            equity,
            peak_equity: self.peak_equity.max(equity),
        }
    }
}

/// Account lookup error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    /// Account storage failed.
    #[error("Account store unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for reading account balances.
#[async_trait]
pub trait AccountPort: Send + Sync {
    /// Balance for an account. Unknown accounts get the configured
    /// starting equity.
    async fn balance(&self, account_id: &AccountId) -> Result<AccountBalance, AccountError>;
}
