//! Price Feed Port (Driven Port)
//!
//! Reference and mark price lookup.

use async_trait::async_trait;

use crate::domain::shared::{Money, Symbol};

/// Price feed error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceFeedError {
    /// No price is known for the symbol.
    #[error("No price available for symbol: {symbol}")]
    SymbolNotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// The feed could not be reached.
    #[error("Price feed unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for looking up the last traded price of a symbol.
#[async_trait]
pub trait PriceFeedPort: Send + Sync {
    /// Get the last price for a symbol.
    async fn last_price(&self, symbol: &Symbol) -> Result<Money, PriceFeedError>;
}
