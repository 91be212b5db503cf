//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::application::dto::{
    OrderDto, PositionsDto, RiskSettingsDto, SubmitOrderDto, TradeListingDto, ValidateOrderDto,
    parse_account_id,
};
use crate::application::ports::{EngineStore, EventPublisherPort, PriceFeedPort};
use crate::application::services::{AccountLocks, ExecutionSettings};
use crate::application::use_cases::{
    CancelOrderUseCase, GetPositionsUseCase, ListTradesUseCase, OrderQueries, RiskSettingsUseCase,
    SubmitOrderUseCase, ValidateOrderUseCase,
};
use crate::domain::order_execution::CancelOutcome;
use crate::domain::risk_management::{RiskReport, RiskSettingsInput};
use crate::domain::shared::OrderId;

use super::request::{AccountQuery, TradesQuery};
use super::response::{
    ApiError, CancelOrderResponse, HealthResponse, OrdersResponse, SubmitOrderResponse,
};

/// Application state shared across handlers.
pub struct AppState<S, F, E>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    /// Use case for submitting orders.
    pub submit_order: Arc<SubmitOrderUseCase<S, F, E>>,
    /// Use case for dry-run risk checks.
    pub validate_order: Arc<ValidateOrderUseCase<S, F>>,
    /// Use case for cancelling orders.
    pub cancel_order: Arc<CancelOrderUseCase<S, E>>,
    /// Order lookups.
    pub orders: Arc<OrderQueries<S>>,
    /// Use case for listing positions.
    pub positions: Arc<GetPositionsUseCase<S, F>>,
    /// Use case for listing trades.
    pub trades: Arc<ListTradesUseCase<S>>,
    /// Use case for risk settings.
    pub risk_settings: Arc<RiskSettingsUseCase<S>>,
    /// Application version.
    pub version: String,
}

impl<S, F, E> AppState<S, F, E>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    /// Wire every use case over one store, price feed, and publisher.
    ///
    /// All mutating use cases share a single [`AccountLocks`] registry.
    pub fn new(
        store: Arc<S>,
        price_feed: Arc<F>,
        event_publisher: Arc<E>,
        settings: ExecutionSettings,
        version: impl Into<String>,
    ) -> Self {
        let locks = Arc::new(AccountLocks::new());
        let timeout = settings.dependency_timeout;

        Self {
            submit_order: Arc::new(SubmitOrderUseCase::new(
                Arc::clone(&store),
                Arc::clone(&price_feed),
                Arc::clone(&event_publisher),
                Arc::clone(&locks),
                settings.clone(),
            )),
            validate_order: Arc::new(ValidateOrderUseCase::new(
                Arc::clone(&store),
                Arc::clone(&price_feed),
                settings.clone(),
            )),
            cancel_order: Arc::new(CancelOrderUseCase::new(
                Arc::clone(&store),
                event_publisher,
                Arc::clone(&locks),
                timeout,
            )),
            orders: Arc::new(OrderQueries::new(Arc::clone(&store), timeout)),
            positions: Arc::new(GetPositionsUseCase::new(
                Arc::clone(&store),
                price_feed,
                timeout,
            )),
            trades: Arc::new(ListTradesUseCase::new(Arc::clone(&store), timeout)),
            risk_settings: Arc::new(RiskSettingsUseCase::new(
                store,
                locks,
                settings.default_risk,
                timeout,
            )),
            version: version.into(),
        }
    }
}

impl<S, F, E> Clone for AppState<S, F, E>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    fn clone(&self) -> Self {
        Self {
            submit_order: Arc::clone(&self.submit_order),
            validate_order: Arc::clone(&self.validate_order),
            cancel_order: Arc::clone(&self.cancel_order),
            orders: Arc::clone(&self.orders),
            positions: Arc::clone(&self.positions),
            trades: Arc::clone(&self.trades),
            risk_settings: Arc::clone(&self.risk_settings),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<S, F, E>(state: AppState<S, F, E>) -> Router
where
    S: EngineStore + 'static,
    F: PriceFeedPort + 'static,
    E: EventPublisherPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/orders", post(submit_order).get(list_orders))
        .route("/api/v1/orders/validate", post(validate_order))
        .route("/api/v1/orders/{order_id}", get(get_order))
        .route("/api/v1/orders/{order_id}/cancel", post(cancel_order))
        .route("/api/v1/positions", get(get_positions))
        .route("/api/v1/trades", get(list_trades))
        .route(
            "/api/v1/risk-settings/{account_id}",
            get(get_risk_settings).put(update_risk_settings),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<S, F, E>(State(state): State<AppState<S, F, E>>) -> impl IntoResponse
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Submit order endpoint. A risk rejection answers 400 with the full
/// report so the caller can show every failed rule.
async fn submit_order<S, F, E>(
    State(state): State<AppState<S, F, E>>,
    payload: Result<Json<SubmitOrderDto>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitOrderResponse>), ApiError>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    let Json(request) = payload?;
    tracing::info!(
        account_id = request.account_id.as_deref().unwrap_or_default(),
        symbol = %request.symbol,
        side = %request.side,
        "Submitting order"
    );

    let outcome = state.submit_order.execute(request).await?;
    let status = if outcome.is_filled() {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(SubmitOrderResponse::from_outcome(&outcome))))
}

/// Validate order endpoint. Always answers with a risk report; failures
/// carry a single message and zeroed metrics.
async fn validate_order<S, F, E>(
    State(state): State<AppState<S, F, E>>,
    payload: Result<Json<ValidateOrderDto>, JsonRejection>,
) -> (StatusCode, Json<RiskReport>)
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    let result = match payload {
        Ok(Json(request)) => state.validate_order.execute(request).await,
        Err(rejection) => Err(ApiError::from(rejection).0),
    };

    match result {
        Ok(report) => (StatusCode::OK, Json(report)),
        Err(e) => {
            let code = e.code();
            if !code.is_caller_error() {
                tracing::error!(error = %e, "Order validation failed");
            }
            (
                code.http_status(),
                Json(RiskReport::failed(e.public_message())),
            )
        }
    }
}

/// List orders endpoint.
async fn list_orders<S, F, E>(
    State(state): State<AppState<S, F, E>>,
    query: Result<Query<AccountQuery>, QueryRejection>,
) -> Result<Json<OrdersResponse>, ApiError>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    let Query(query) = query?;
    let account_id = query.account_id()?;
    let orders = state.orders.list(&account_id).await?;
    Ok(Json(OrdersResponse {
        account_id: account_id.to_string(),
        orders,
    }))
}

/// Get order endpoint.
async fn get_order<S, F, E>(
    State(state): State<AppState<S, F, E>>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderDto>, ApiError>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    Ok(Json(state.orders.get(&OrderId::new(order_id)).await?))
}

/// Cancel order endpoint.
async fn cancel_order<S, F, E>(
    State(state): State<AppState<S, F, E>>,
    Path(order_id): Path<String>,
) -> Result<Json<CancelOrderResponse>, ApiError>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    let result = state.cancel_order.execute(&OrderId::new(order_id)).await?;
    let message = match result.outcome {
        CancelOutcome::Cancelled => "Order cancelled",
        CancelOutcome::AlreadyCancelled => "Order was already cancelled",
    };
    Ok(Json(CancelOrderResponse {
        success: true,
        message: message.to_string(),
        order: OrderDto::from_order(&result.order),
    }))
}

/// Get positions endpoint.
async fn get_positions<S, F, E>(
    State(state): State<AppState<S, F, E>>,
    query: Result<Query<AccountQuery>, QueryRejection>,
) -> Result<Json<PositionsDto>, ApiError>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    let Query(query) = query?;
    let account_id = query.account_id()?;
    Ok(Json(state.positions.execute(&account_id).await?))
}

/// List trades endpoint.
async fn list_trades<S, F, E>(
    State(state): State<AppState<S, F, E>>,
    query: Result<Query<TradesQuery>, QueryRejection>,
) -> Result<Json<TradeListingDto>, ApiError>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    let Query(query) = query?;
    let (account_id, filter) = query.into_parts()?;
    Ok(Json(state.trades.execute(&account_id, &filter).await?))
}

/// Get risk settings endpoint.
async fn get_risk_settings<S, F, E>(
    State(state): State<AppState<S, F, E>>,
    Path(account_id): Path<String>,
) -> Result<Json<RiskSettingsDto>, ApiError>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    let account_id = parse_account_id(Some(&account_id))?;
    Ok(Json(state.risk_settings.get(&account_id).await?))
}

/// Update risk settings endpoint. Omitted fields take their default.
async fn update_risk_settings<S, F, E>(
    State(state): State<AppState<S, F, E>>,
    Path(account_id): Path<String>,
    payload: Result<Json<RiskSettingsInput>, JsonRejection>,
) -> Result<Json<RiskSettingsDto>, ApiError>
where
    S: EngineStore,
    F: PriceFeedPort,
    E: EventPublisherPort,
{
    let account_id = parse_account_id(Some(&account_id))?;
    let Json(input) = payload?;
    Ok(Json(state.risk_settings.update(&account_id, input).await?))
}
