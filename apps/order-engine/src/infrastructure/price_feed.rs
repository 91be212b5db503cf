//! Price feed adapter backed by an in-memory quote table.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{PriceFeedError, PriceFeedPort};
use crate::domain::shared::{Money, Symbol};

/// Price feed backed by a table of last prices, seeded from configuration
/// and updatable at runtime.
#[derive(Debug, Default)]
pub struct StaticPriceFeed {
    prices: RwLock<HashMap<Symbol, Money>>,
}

impl StaticPriceFeed {
    /// Create a feed with no prices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a feed seeded with the given prices.
    #[must_use]
    pub fn from_quotes(quotes: impl IntoIterator<Item = (Symbol, Money)>) -> Self {
        Self {
            prices: RwLock::new(quotes.into_iter().collect()),
        }
    }

    /// Set the last price for a symbol.
    pub fn set_price(&self, symbol: Symbol, price: Money) {
        self.prices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol, price);
    }

    /// Number of symbols with a known price.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if no prices are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PriceFeedPort for StaticPriceFeed {
    async fn last_price(&self, symbol: &Symbol) -> Result<Money, PriceFeedError> {
        self.prices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol)
            .copied()
            .ok_or_else(|| PriceFeedError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }
}
