//! Loading the inputs of a risk decision.

use std::time::Duration;

use crate::application::ports::{EngineStore, PriceFeedPort};
use crate::application::services::call_dependency;
use crate::domain::risk_management::{AccountSnapshot, RiskSettings};
use crate::domain::shared::{AccountId, Money, Symbol, Timestamp};
use crate::domain::trade_journal::DailyActivity;
use crate::error::EngineError;

/// Price an order executes at: the explicit price if supplied, else the
/// order's own limit/stop price, else the feed's last price.
pub(super) async fn resolve_price<F: PriceFeedPort>(
    feed: &F,
    symbol: &Symbol,
    explicit: Option<Money>,
    quoted: Option<Money>,
    timeout: Duration,
) -> Result<Money, EngineError> {
    if let Some(price) = explicit.or(quoted) {
        return Ok(price);
    }
    let price = call_dependency("price feed", timeout, feed.last_price(symbol)).await?;
    if !price.is_positive() {
        return Err(EngineError::unavailable(
            "price feed",
            format!("non-positive price {price} for {symbol}"),
        ));
    }
    Ok(price)
}

/// Equity, open positions, and today's activity for an account.
pub(super) async fn load_snapshot<S: EngineStore>(
    store: &S,
    account_id: &AccountId,
    timeout: Duration,
) -> Result<AccountSnapshot, EngineError> {
    let balance = call_dependency("account store", timeout, store.balance(account_id)).await?;
    let open_positions = call_dependency(
        "position store",
        timeout,
        store.find_open_by_account(account_id),
    )
    .await?;
    let trades =
        call_dependency("trade journal", timeout, store.list_by_account(account_id)).await?;
    let today = DailyActivity::on(&trades, Timestamp::now().date());

    Ok(AccountSnapshot {
        equity: balance.equity,
        peak_equity: balance.peak_equity,
        open_positions,
        realized_loss_today: today.realized_loss,
        trades_today: today.fill_count,
    })
}

/// Stored risk settings, or the defaults. The flag is true when the
/// defaults apply.
pub(super) async fn load_risk_settings<S: EngineStore>(
    store: &S,
    account_id: &AccountId,
    defaults: &RiskSettings,
    timeout: Duration,
) -> Result<(RiskSettings, bool), EngineError> {
    let stored = call_dependency(
        "risk settings store",
        timeout,
        store.find_settings(account_id),
    )
    .await?;
    Ok(match stored {
        Some(settings) => (settings, false),
        None => (defaults.clone(), true),
    })
}
