//! Application Services
//!
//! Cross-cutting coordination shared by the use cases: per-account
//! serialization, dependency timeouts, and execution settings.

mod account_locks;
mod dependency;
mod execution_settings;

pub use account_locks::{AccountGuard, AccountLocks};
pub use dependency::call_dependency;
pub use execution_settings::ExecutionSettings;
