//! Symbol value object for instrument identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// A trading symbol.
///
/// Examples: `"AAPL"`, `"EURUSD"`, `"EUR/USD"`, `"BRK.B"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Maximum accepted symbol length.
    pub const MAX_LEN: usize = 21;

    /// Create a new Symbol.
    ///
    /// The symbol is trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_uppercase())
    }

    /// Create and validate a Symbol in one step.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is empty, too long, or has invalid characters.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let symbol = Self::new(value);
        symbol.validate()?;
        Ok(symbol)
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the symbol format.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is empty, too long, or has invalid characters.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::invalid("symbol", "Symbol cannot be empty"));
        }

        if self.0.len() > Self::MAX_LEN {
            return Err(DomainError::invalid(
                "symbol",
                "Symbol exceeds maximum length",
            ));
        }

        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '-' | '_'))
        {
            return Err(DomainError::invalid(
                "symbol",
                "Symbol contains invalid characters",
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_new_normalizes_case_and_whitespace() {
        assert_eq!(Symbol::new(" aapl ").as_str(), "AAPL");
    }

    #[test]
    fn symbol_parse_accepts_forex_pairs() {
        assert!(Symbol::parse("EUR/USD").is_ok());
        assert!(Symbol::parse("eurusd").is_ok());
        assert!(Symbol::parse("BRK.B").is_ok());
    }

    #[test]
    fn symbol_validate_empty() {
        assert!(Symbol::parse("").is_err());
        assert!(Symbol::parse("   ").is_err());
    }

    #[test]
    fn symbol_validate_invalid_chars() {
        assert!(Symbol::parse("AA PL").is_err());
        assert!(Symbol::parse("AAPL$").is_err());
    }

    #[test]
    fn symbol_validate_too_long() {
        assert!(Symbol::parse("A".repeat(Symbol::MAX_LEN + 1)).is_err());
    }

    #[test]
    fn symbols_order_lexicographically() {
        let mut symbols = vec![Symbol::new("MSFT"), Symbol::new("AAPL"), Symbol::new("GOOG")];
        symbols.sort();
        assert_eq!(symbols[0].as_str(), "AAPL");
        assert_eq!(symbols[2].as_str(), "MSFT");
    }
}
