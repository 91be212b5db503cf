//! Seed quotes for the static price feed.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, Symbol};

/// Price feed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFeedConfig {
    /// Last price per symbol.
    #[serde(default)]
    pub quotes: BTreeMap<String, Decimal>,
}

impl PriceFeedConfig {
    /// Quotes as domain values, symbols normalized.
    #[must_use]
    pub fn seed(&self) -> Vec<(Symbol, Money)> {
        self.quotes
            .iter()
            .map(|(symbol, price)| (Symbol::new(symbol), Money::new(*price)))
            .collect()
    }
}
