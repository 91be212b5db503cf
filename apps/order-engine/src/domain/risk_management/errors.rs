//! Risk management errors.

use std::fmt;

/// Errors that can occur in risk management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskError {
    /// A risk setting is out of bounds.
    InvalidSettings {
        /// Setting name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Risk settings storage failed.
    Repository {
        /// Error message.
        message: String,
    },
}

impl RiskError {
    /// Shorthand for an [`RiskError::InvalidSettings`].
    #[must_use]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSettings { field, message } => {
                write!(f, "Invalid risk setting '{field}': {message}")
            }
            Self::Repository { message } => {
                write!(f, "Risk settings repository error: {message}")
            }
        }
    }
}

impl std::error::Error for RiskError {}
