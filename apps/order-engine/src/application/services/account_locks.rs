//! Per-account exclusive locks.
//!
//! Mutations for one account (submit, cancel, settings update) run one at
//! a time; different accounts never contend. Entries nobody holds or
//! waits on are dropped on the next acquire, so the registry stays bounded
//! by the accounts currently in flight.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;

use crate::domain::shared::AccountId;

/// Guard held for the duration of an account mutation.
pub type AccountGuard = OwnedMutexGuard<()>;

/// Registry of async mutexes keyed by account.
#[derive(Debug, Default)]
pub struct AccountLocks {
    locks: Mutex<HashMap<AccountId, Arc<tokio::sync::Mutex<()>>>>,
}

impl AccountLocks {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to an account.
    pub async fn acquire(&self, account_id: &AccountId) -> AccountGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // only the map references an idle entry
            locks.retain(|id, lock| id == account_id || Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(account_id.clone()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of tracked accounts: those locked or awaited, plus any
    /// released since the last acquire.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no account is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
