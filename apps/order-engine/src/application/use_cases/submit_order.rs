//! Submit Order Use Case
//!
//! Validate, risk-check, and fill an order for one account. The whole
//! sequence runs under the account's lock so two orders never pass a
//! margin check against the same stale balance.

use std::sync::Arc;

use crate::application::dto::{SubmitOrderDto, SubmitOutcome};
use crate::application::ports::{EngineStore, EventPublisherPort, FillCommit, PriceFeedPort};
use crate::application::services::{AccountLocks, ExecutionSettings, call_dependency};
use crate::domain::order_execution::{FillReport, Order, RejectReason};
use crate::domain::position_ledger::{PositionFill, PositionLedger};
use crate::domain::risk_management::{AccountSnapshot, ProposedOrder, RiskValidator};
use crate::domain::shared::{Money, Timestamp};
use crate::domain::trade_journal::{NewTrade, Trade};
use crate::error::EngineError;

use super::account_context::{load_risk_settings, load_snapshot, resolve_price};

/// Use case for submitting an order.
pub struct SubmitOrderUseCase<S, F, E>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    store: Arc<S>,
    price_feed: Arc<F>,
    event_publisher: Arc<E>,
    locks: Arc<AccountLocks>,
    settings: ExecutionSettings,
}

impl<S, F, E> SubmitOrderUseCase<S, F, E>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    /// Create a new SubmitOrderUseCase.
    pub const fn new(
        store: Arc<S>,
        price_feed: Arc<F>,
        event_publisher: Arc<E>,
        locks: Arc<AccountLocks>,
        settings: ExecutionSettings,
    ) -> Self {
        Self {
            store,
            price_feed,
            event_publisher,
            locks,
            settings,
        }
    }

    /// Execute the use case.
    ///
    /// A risk rejection is a normal outcome ([`SubmitOutcome::Rejected`]),
    /// not an error.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for malformed requests (nothing is persisted).
    /// - `DependencyUnavailable` if the price feed or store fails; the order
    ///   stays `PENDING` and no fill is recorded.
    pub async fn execute(&self, request: SubmitOrderDto) -> Result<SubmitOutcome, EngineError> {
        let command = request.to_command()?;
        let explicit_price = request.execution_price()?;
        let timeout = self.settings.dependency_timeout;

        let _guard = self.locks.acquire(&command.account_id).await;

        let mut order = Order::new(command)?;
        call_dependency("order store", timeout, self.store.save(&order)).await?;
        tracing::info!(
            order_id = %order.id(),
            account_id = %order.account_id(),
            symbol = %order.symbol(),
            side = %order.side(),
            quantity = %order.quantity(),
            "Order accepted as PENDING"
        );

        let price = resolve_price(
            self.price_feed.as_ref(),
            order.symbol(),
            explicit_price,
            order.quoted_price(),
            timeout,
        )
        .await
        .inspect_err(|e| {
            tracing::warn!(
                order_id = %order.id(),
                error = %e,
                "Order left PENDING: no execution price"
            );
        })?;

        let snapshot = load_snapshot(self.store.as_ref(), order.account_id(), timeout).await?;
        let (risk_settings, _) = load_risk_settings(
            self.store.as_ref(),
            order.account_id(),
            &self.settings.default_risk,
            timeout,
        )
        .await?;

        let report = RiskValidator::new(risk_settings)
            .validate(&ProposedOrder::from_order(&order, price), &snapshot);

        if !report.is_valid {
            order.reject(RejectReason::risk_limits(report.messages.clone()))?;
            call_dependency("order store", timeout, self.store.save(&order)).await?;
            tracing::info!(
                order_id = %order.id(),
                account_id = %order.account_id(),
                violations = report.messages.len(),
                "Order rejected by risk checks"
            );
            self.publish(&mut order).await;
            return Ok(SubmitOutcome::Rejected { order, report });
        }

        let (commit, trade) = self.fill(&mut order, price, &snapshot)?;
        let positions = commit.positions.clone();
        call_dependency("execution store", timeout, self.store.commit_fill(commit))
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    order_id = %order.id(),
                    error = %e,
                    "Fill not committed, order left PENDING"
                );
            })?;

        tracing::info!(
            order_id = %order.id(),
            trade_id = %trade.id(),
            account_id = %order.account_id(),
            price = %price,
            effect = %trade.effect(),
            realized_pnl = %trade.realized_pnl(),
            "Order filled"
        );
        self.publish(&mut order).await;

        Ok(SubmitOutcome::Filled {
            order,
            trade,
            positions,
            report,
        })
    }

    /// Build every effect of filling `order` at `price` without persisting.
    fn fill(
        &self,
        order: &mut Order,
        price: Money,
        snapshot: &AccountSnapshot,
    ) -> Result<(FillCommit, Trade), EngineError> {
        let executed_at = Timestamp::now();
        let quantity = order.remaining_quantity();

        let current = snapshot
            .open_positions
            .iter()
            .find(|p| p.symbol() == order.symbol())
            .cloned();
        let update = PositionLedger::apply(
            current,
            &PositionFill {
                account_id: order.account_id().clone(),
                symbol: order.symbol().clone(),
                side: order.side(),
                quantity,
                price,
                executed_at,
            },
        )?;

        let trade = Trade::record(NewTrade {
            order_id: order.id().clone(),
            account_id: order.account_id().clone(),
            symbol: order.symbol().clone(),
            side: order.side(),
            order_type: order.order_type(),
            quantity,
            price,
            fee_rate: self.settings.fee_rate,
            executed_at,
            realized_pnl: update.realized_pnl,
            effect: update.effect,
        })?;

        order.apply_fill(&FillReport::new(quantity, price, executed_at))?;

        let commit = FillCommit {
            order: order.clone(),
            positions: update.touched(),
            trade: trade.clone(),
            cash_delta: trade.realized_pnl() - trade.fee(),
        };
        Ok((commit, trade))
    }

    async fn publish(&self, order: &mut Order) {
        let events = order.drain_events();
        if let Err(e) = self.event_publisher.publish(events).await {
            tracing::error!(order_id = %order.id(), error = %e, "Failed to publish events");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{AccountPort, NoOpEventPublisher};
    use crate::application::use_cases::test_support::{
        FailingCommitStore, HangingPriceFeed, store, submit_dto,
    };
    use crate::domain::order_execution::{OrderRepository, OrderStatus};
    use crate::domain::position_ledger::{FillEffect, PositionRepository};
    use crate::domain::risk_management::{RiskSettings, RiskSettingsInput, RiskSettingsRepository};
    use crate::domain::shared::{AccountId, Quantity, Symbol};
    use crate::domain::trade_journal::TradeRepository;
    use crate::error::ErrorCode;
    use crate::infrastructure::price_feed::StaticPriceFeed;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    type TestUseCase<S, F> = SubmitOrderUseCase<S, F, NoOpEventPublisher>;

    fn use_case<S: EngineStore, F: PriceFeedPort>(store: Arc<S>, feed: F) -> TestUseCase<S, F> {
        SubmitOrderUseCase::new(
            store,
            Arc::new(feed),
            Arc::new(NoOpEventPublisher),
            Arc::new(AccountLocks::new()),
            ExecutionSettings {
                dependency_timeout: Duration::from_millis(100),
                ..ExecutionSettings::default()
            },
        )
    }

    fn feed() -> StaticPriceFeed {
        StaticPriceFeed::from_quotes([(Symbol::new("AAPL"), Money::from_i64(100))])
    }

    fn account() -> AccountId {
        AccountId::new("acc-1")
    }

    #[tokio::test]
    async fn accepted_order_is_filled_with_trade_and_position() {
        let store = store(dec!(100000));
        let uc = use_case(Arc::clone(&store), feed());

        let outcome = uc.execute(submit_dto("AAPL", "BUY", dec!(10))).await.unwrap();

        let SubmitOutcome::Filled {
            order,
            trade,
            positions,
            report,
        } = outcome
        else {
            panic!("expected fill");
        };
        assert!(report.is_valid);
        assert_eq!(order.status(), OrderStatus::Filled);
        assert_eq!(trade.price(), Money::from_i64(100));
        assert_eq!(trade.effect(), FillEffect::Open);
        assert_eq!(positions.len(), 1);

        let stored = store.find_by_id(order.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Filled);
        assert_eq!(store.list_by_account(&account()).await.unwrap().len(), 1);

        let position = store
            .find_open(&account(), &Symbol::new("AAPL"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(position.quantity(), Quantity::from_i64(10));

        // fee of 1.00 on 1,000 notional
        let balance = store.balance(&account()).await.unwrap();
        assert_eq!(balance.equity, Money::new(dec!(99999)));
    }

    #[tokio::test]
    async fn rejected_order_is_persisted_without_effects() {
        let store = store(dec!(10000));
        store
            .save_settings(
                &account(),
                &RiskSettings::new(RiskSettingsInput {
                    max_position_size: dec!(5),
                    ..RiskSettingsInput::default()
                })
                .unwrap(),
            )
            .await
            .unwrap();
        let uc = use_case(Arc::clone(&store), feed());

        let outcome = uc.execute(submit_dto("AAPL", "BUY", dec!(6))).await.unwrap();

        assert!(!outcome.is_filled());
        assert_eq!(outcome.order().status(), OrderStatus::Rejected);
        assert_eq!(outcome.report().metrics.exposure_percentage, dec!(6));
        assert!(
            outcome
                .report()
                .messages
                .iter()
                .any(|m| m.to_lowercase().contains("position size"))
        );
        assert_eq!(
            outcome.rejection().map(|e| e.code()),
            Some(ErrorCode::ValidationRejected)
        );

        let stored = store.find_by_id(outcome.order().id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), OrderStatus::Rejected);
        assert!(store.list_by_account(&account()).await.unwrap().is_empty());
        assert!(store.find_open_by_account(&account()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_request_is_not_persisted() {
        let store = store(dec!(100000));
        let uc = use_case(Arc::clone(&store), feed());

        let err = uc
            .execute(submit_dto("AAPL", "BUY", dec!(-1)))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        assert!(store.find_by_account(&account()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_figures_are_rejected_before_persisting() {
        let store = store(dec!(100000));
        let uc = use_case(Arc::clone(&store), feed());

        let mut huge_price = submit_dto("AAPL", "BUY", dec!(1));
        huge_price.execution_price = Some(Decimal::MAX);
        let mut huge_stop = submit_dto("AAPL", "BUY", dec!(1));
        huge_stop.stop_loss = Some(Decimal::MAX);

        for dto in [submit_dto("AAPL", "BUY", Decimal::MAX), huge_price, huge_stop] {
            let err = uc.execute(dto).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidArgument);
        }
        assert!(store.find_by_account(&account()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn price_feed_timeout_leaves_order_pending() {
        let store = store(dec!(100000));
        let uc = use_case(Arc::clone(&store), HangingPriceFeed);

        let err = uc
            .execute(submit_dto("AAPL", "BUY", dec!(1)))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::DependencyUnavailable);
        let orders = store.find_by_account(&account()).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status(), OrderStatus::Pending);
        assert!(store.list_by_account(&account()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_symbol_without_price_is_dependency_failure() {
        let store = store(dec!(100000));
        let uc = use_case(Arc::clone(&store), feed());

        let err = uc
            .execute(submit_dto("MSFT", "BUY", dec!(1)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DependencyUnavailable);
    }

    #[tokio::test]
    async fn explicit_price_skips_the_feed() {
        let store = store(dec!(100000));
        let uc = use_case(Arc::clone(&store), HangingPriceFeed);

        let mut dto = submit_dto("AAPL", "BUY", dec!(1));
        dto.execution_price = Some(dec!(101.5));
        let outcome = uc.execute(dto).await.unwrap();

        let SubmitOutcome::Filled { trade, .. } = outcome else {
            panic!("expected fill");
        };
        assert_eq!(trade.price(), Money::new(dec!(101.5)));
    }

    #[tokio::test]
    async fn failed_commit_leaves_order_pending_and_nothing_recorded() {
        let inner = store(dec!(100000));
        let failing = Arc::new(FailingCommitStore(Arc::clone(&inner)));
        let uc = use_case(failing, feed());

        let err = uc
            .execute(submit_dto("AAPL", "BUY", dec!(1)))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::DependencyUnavailable);
        let orders = inner.find_by_account(&account()).await.unwrap();
        assert_eq!(orders[0].status(), OrderStatus::Pending);
        assert!(inner.list_by_account(&account()).await.unwrap().is_empty());
        assert!(inner.find_open_by_account(&account()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reducing_fill_realizes_pnl() {
        let store = store(dec!(100000));
        let uc = use_case(Arc::clone(&store), HangingPriceFeed);

        let mut buy = submit_dto("AAPL", "BUY", dec!(10));
        buy.execution_price = Some(dec!(100));
        uc.execute(buy).await.unwrap();

        let mut sell = submit_dto("AAPL", "SELL", dec!(15));
        sell.execution_price = Some(dec!(120));
        let outcome = uc.execute(sell).await.unwrap();

        let SubmitOutcome::Filled {
            trade, positions, ..
        } = outcome
        else {
            panic!("expected fill");
        };
        assert_eq!(trade.effect(), FillEffect::Flip);
        assert_eq!(trade.realized_pnl(), Money::from_i64(200));
        assert_eq!(positions.len(), 2);

        let open = store
            .find_open(&account(), &Symbol::new("AAPL"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(open.quantity(), Quantity::from_i64(-5));
        assert_eq!(open.average_entry_price(), Some(Money::from_i64(120)));
    }

    #[tokio::test]
    async fn concurrent_orders_cannot_share_margin() {
        let store = store(dec!(10000));
        store
            .save_settings(
                &account(),
                &RiskSettings::new(RiskSettingsInput {
                    max_position_size: dec!(100),
                    max_daily_loss: dec!(100),
                    risk_per_trade: dec!(100),
                    max_drawdown: dec!(100),
                    ..RiskSettingsInput::default()
                })
                .unwrap(),
            )
            .await
            .unwrap();
        let uc = Arc::new(use_case(Arc::clone(&store), feed()));

        // each order needs 6,000 of margin; only one fits in 10,000 equity
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let uc = Arc::clone(&uc);
                tokio::spawn(async move { uc.execute(submit_dto("AAPL", "BUY", dec!(60))).await })
            })
            .collect();

        let mut filled = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_filled() {
                filled += 1;
            }
        }
        assert_eq!(filled, 1);
    }
}
