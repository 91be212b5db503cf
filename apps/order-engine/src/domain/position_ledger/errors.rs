//! Position ledger errors.

use std::fmt;

/// Errors that can occur while applying fills to positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Fill is malformed.
    InvalidFill {
        /// Offending field.
        field: String,
        /// Error message.
        message: String,
    },

    /// Fill targets a different account or symbol than the position.
    Mismatch {
        /// Position key (`account/symbol`).
        position: String,
        /// Fill key (`account/symbol`).
        fill: String,
    },

    /// Fill applied to a position that is already closed.
    PositionClosed {
        /// Position ID.
        position_id: String,
    },

    /// A second open position for the same account and symbol.
    DuplicateOpenPosition {
        /// Account ID.
        account_id: String,
        /// Symbol.
        symbol: String,
    },

    /// Position storage failed.
    Repository {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFill { field, message } => {
                write!(f, "Invalid fill '{field}': {message}")
            }
            Self::Mismatch { position, fill } => {
                write!(f, "Fill for {fill} cannot apply to position {position}")
            }
            Self::PositionClosed { position_id } => {
                write!(f, "Position is closed: {position_id}")
            }
            Self::DuplicateOpenPosition { account_id, symbol } => {
                write!(f, "Open position already exists for {account_id}/{symbol}")
            }
            Self::Repository { message } => {
                write!(f, "Position repository error: {message}")
            }
        }
    }
}

impl std::error::Error for PositionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_display() {
        let err = PositionError::Mismatch {
            position: "acc-1/AAPL".to_string(),
            fill: "acc-1/MSFT".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Fill for acc-1/MSFT cannot apply to position acc-1/AAPL"
        );
    }

    #[test]
    fn duplicate_open_position_display() {
        let err = PositionError::DuplicateOpenPosition {
            account_id: "acc-1".to_string(),
            symbol: "AAPL".to_string(),
        };
        assert!(err.to_string().contains("acc-1/AAPL"));
    }
}
