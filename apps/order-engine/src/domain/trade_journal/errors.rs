//! Trade journal errors.

use std::fmt;

/// Errors that can occur in the trade journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    /// Trade is missing a required field or carries an invalid value.
    InvalidTrade {
        /// Offending field.
        field: String,
        /// Error message.
        message: String,
    },

    /// Filter parameters are inconsistent.
    InvalidFilter {
        /// Error message.
        message: String,
    },

    /// A trade with this ID was already recorded.
    DuplicateTrade {
        /// Trade ID.
        trade_id: String,
    },

    /// Journal storage failed.
    Repository {
        /// Error message.
        message: String,
    },
}

impl TradeError {
    /// Shorthand for an [`TradeError::InvalidTrade`].
    #[must_use]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTrade {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for TradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTrade { field, message } => {
                write!(f, "Invalid trade '{field}': {message}")
            }
            Self::InvalidFilter { message } => write!(f, "Invalid trade filter: {message}"),
            Self::DuplicateTrade { trade_id } => {
                write!(f, "Trade already recorded: {trade_id}")
            }
            Self::Repository { message } => write!(f, "Trade repository error: {message}"),
        }
    }
}

impl std::error::Error for TradeError {}
