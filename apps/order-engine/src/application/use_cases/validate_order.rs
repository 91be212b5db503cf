//! Validate Order Use Case
//!
//! Dry-run risk check. Nothing is persisted and no lock is taken.

use std::sync::Arc;

use crate::application::dto::ValidateOrderDto;
use crate::application::ports::{EngineStore, PriceFeedPort};
use crate::application::services::ExecutionSettings;
use crate::domain::order_execution::Order;
use crate::domain::risk_management::{ProposedOrder, RiskReport, RiskValidator};
use crate::domain::shared::Money;
use crate::error::EngineError;

use super::account_context::{load_risk_settings, load_snapshot, resolve_price};

/// Use case for validating an order without submitting it.
pub struct ValidateOrderUseCase<S, F>
where
    S: EngineStore,
    F: PriceFeedPort,
{
    store: Arc<S>,
    price_feed: Arc<F>,
    settings: ExecutionSettings,
}

impl<S, F> ValidateOrderUseCase<S, F>
where
    S: EngineStore,
    F: PriceFeedPort,
{
    /// Create a new ValidateOrderUseCase.
    pub const fn new(store: Arc<S>, price_feed: Arc<F>, settings: ExecutionSettings) -> Self {
        Self {
            store,
            price_feed,
            settings,
        }
    }

    /// Execute the use case.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for malformed requests.
    /// - `DependencyUnavailable` if no reference price or account state
    ///   can be loaded.
    pub async fn execute(&self, request: ValidateOrderDto) -> Result<RiskReport, EngineError> {
        let command = request.order.to_command()?;
        let explicit_price = request.order.execution_price()?;
        let equity_override = request
            .account_balance
            .map(|balance| -> Result<Money, EngineError> {
                if balance.is_sign_negative() {
                    return Err(EngineError::invalid_argument(
                        "account_balance must not be negative",
                    ));
                }
                Ok(Money::new(balance))
            })
            .transpose()?;
        let timeout = self.settings.dependency_timeout;

        // never persisted; only used to derive the proposed order
        let order = Order::new(command)?;

        let price = resolve_price(
            self.price_feed.as_ref(),
            order.symbol(),
            explicit_price,
            order.quoted_price(),
            timeout,
        )
        .await?;

        let mut snapshot = load_snapshot(self.store.as_ref(), order.account_id(), timeout).await?;
        if let Some(equity) = equity_override {
            snapshot.equity = equity;
            snapshot.peak_equity = snapshot.peak_equity.max(equity);
        }
        let (risk_settings, _) = load_risk_settings(
            self.store.as_ref(),
            order.account_id(),
            &self.settings.default_risk,
            timeout,
        )
        .await?;

        let report = RiskValidator::new(risk_settings)
            .validate(&ProposedOrder::from_order(&order, price), &snapshot);
        tracing::debug!(
            account_id = %order.account_id(),
            symbol = %order.symbol(),
            is_valid = report.is_valid,
            "Order validated"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{store, submit_dto};
    use crate::domain::order_execution::OrderRepository;
    use crate::domain::risk_management::RiskCheck;
    use crate::domain::shared::{AccountId, Quantity, Symbol};
    use crate::infrastructure::persistence::InMemoryStore;
    use crate::infrastructure::price_feed::StaticPriceFeed;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn use_case(store: Arc<InMemoryStore>) -> ValidateOrderUseCase<InMemoryStore, StaticPriceFeed> {
        ValidateOrderUseCase::new(
            store,
            Arc::new(StaticPriceFeed::from_quotes([(
                Symbol::new("AAPL"),
                Money::from_i64(100),
            )])),
            ExecutionSettings::default(),
        )
    }

    #[tokio::test]
    async fn reports_without_persisting() {
        let store = store(dec!(100000));
        let uc = use_case(Arc::clone(&store));

        let report = uc
            .execute(ValidateOrderDto {
                order: submit_dto("AAPL", "BUY", dec!(10)),
                account_balance: None,
            })
            .await
            .unwrap();

        assert!(report.is_valid);
        assert_eq!(report.metrics.exposure_percentage, dec!(1));
        assert!(
            store
                .find_by_account(&AccountId::new("acc-1"))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn balance_override_replaces_equity() {
        let store = store(dec!(100000));
        let uc = use_case(Arc::clone(&store));

        let report = uc
            .execute(ValidateOrderDto {
                order: submit_dto("AAPL", "BUY", dec!(10)),
                account_balance: Some(dec!(5000)),
            })
            .await
            .unwrap();

        // 1,000 notional is 20% of 5,000
        assert!(!report.is_valid);
        assert!(report.failed_check(RiskCheck::PositionSize));
        assert_eq!(report.metrics.exposure_percentage, dec!(20));
    }

    #[tokio::test]
    async fn zero_balance_override_fails_equity_check() {
        let store = store(dec!(100000));
        let report = use_case(store)
            .execute(ValidateOrderDto {
                order: submit_dto("AAPL", "BUY", dec!(1)),
                account_balance: Some(dec!(0)),
            })
            .await
            .unwrap();

        assert!(report.failed_check(RiskCheck::AccountEquity));
        assert_eq!(report.messages.len(), 1);
    }

    #[tokio::test]
    async fn tiny_balance_with_largest_order_saturates_metrics() {
        let store = store(dec!(100000));
        let report = use_case(store)
            .execute(ValidateOrderDto {
                order: submit_dto("AAPL", "BUY", Quantity::MAX_ORDER.amount()),
                account_balance: Some(Decimal::new(1, 28)),
            })
            .await
            .unwrap();

        assert!(!report.is_valid);
        assert!(report.failed_check(RiskCheck::PositionSize));
        assert!(report.failed_check(RiskCheck::Margin));
        assert_eq!(report.metrics.exposure_percentage, Decimal::MAX);
    }
}
