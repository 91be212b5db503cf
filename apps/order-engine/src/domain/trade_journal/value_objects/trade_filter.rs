//! Filter and pagination for trade listings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;
use crate::domain::trade_journal::aggregate::Trade;
use crate::domain::trade_journal::errors::TradeError;

/// Criteria for listing trades.
///
/// Date bounds are inclusive and compare the UTC calendar date of
/// execution. Pagination applies `offset` before `limit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeFilter {
    /// Earliest execution date.
    pub start_date: Option<NaiveDate>,
    /// Latest execution date.
    pub end_date: Option<NaiveDate>,
    /// Exact symbol match.
    pub symbol: Option<Symbol>,
    /// Maximum number of trades returned.
    pub limit: Option<usize>,
    /// Number of trades skipped.
    pub offset: Option<usize>,
}

impl TradeFilter {
    /// Upper bound on a single page.
    pub const MAX_LIMIT: usize = 1000;

    /// Check that the bounds are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`TradeError::InvalidFilter`] if the range is inverted or the
    /// limit is zero or above [`Self::MAX_LIMIT`].
    pub fn validate(&self) -> Result<(), TradeError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start > end
        {
            return Err(TradeError::InvalidFilter {
                message: format!("start_date {start} is after end_date {end}"),
            });
        }
        if let Some(limit) = self.limit
            && !(1..=Self::MAX_LIMIT).contains(&limit)
        {
            return Err(TradeError::InvalidFilter {
                message: format!("limit must be between 1 and {}", Self::MAX_LIMIT),
            });
        }
        Ok(())
    }

    /// Returns true if the trade passes the date and symbol criteria.
    #[must_use]
    pub fn matches(&self, trade: &Trade) -> bool {
        let date = trade.executed_at().date();
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
            && self.symbol.as_ref().is_none_or(|s| trade.symbol() == s)
    }

    /// Apply offset then limit.
    #[must_use]
    pub fn paginate(&self, trades: Vec<Trade>) -> Vec<Trade> {
        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(usize::MAX);
        trades.into_iter().skip(offset).take(limit).collect()
    }
}
