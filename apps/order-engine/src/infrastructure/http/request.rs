//! HTTP request DTOs.
//!
//! Request bodies for orders reuse the application DTOs; this module holds
//! the query-string shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::dto::parse_account_id;
use crate::domain::shared::{AccountId, Symbol};
use crate::domain::trade_journal::TradeFilter;
use crate::error::EngineError;

/// `?account_id=` query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountQuery {
    /// Account to query.
    pub account_id: Option<String>,
}

impl AccountQuery {
    /// The required account ID.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if it is missing or blank.
    pub fn account_id(&self) -> Result<AccountId, EngineError> {
        parse_account_id(self.account_id.as_deref())
    }
}

/// Query for listing trades.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradesQuery {
    /// Account to query.
    pub account_id: Option<String>,
    /// Exact symbol match.
    pub symbol: Option<String>,
    /// Earliest execution date (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Latest execution date (inclusive).
    pub end_date: Option<NaiveDate>,
    /// Page size.
    pub limit: Option<usize>,
    /// Trades to skip.
    pub offset: Option<usize>,
}

impl TradesQuery {
    /// Split into the account and the journal filter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the account ID is missing.
    pub fn into_parts(self) -> Result<(AccountId, TradeFilter), EngineError> {
        let account_id = parse_account_id(self.account_id.as_deref())?;
        let filter = TradeFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            symbol: self
                .symbol
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Symbol::new),
            limit: self.limit,
            offset: self.offset,
        };
        Ok((account_id, filter))
    }
}
