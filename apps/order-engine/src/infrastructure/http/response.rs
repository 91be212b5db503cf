//! HTTP response DTOs.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::dto::{OrderDto, PositionDto, SubmitOutcome, TradeDto};
use crate::domain::position_ledger::PositionLedger;
use crate::domain::risk_management::RiskReport;
use crate::domain::shared::Timestamp;
use crate::error::EngineError;

/// Response from order submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOrderResponse {
    /// Whether the order was filled.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// The order in its final state.
    pub order: OrderDto,
    /// The trade, if filled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade: Option<TradeDto>,
    /// Positions touched by the fill.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<PositionDto>,
    /// The risk report the decision was based on.
    pub risk: RiskReport,
    /// Response time.
    pub timestamp: Timestamp,
}

impl SubmitOrderResponse {
    /// Build from a submission outcome.
    #[must_use]
    pub fn from_outcome(outcome: &SubmitOutcome) -> Self {
        let (success, message, trade, positions) = match outcome {
            SubmitOutcome::Filled {
                trade, positions, ..
            } => (
                true,
                format!("Order filled at {}", trade.price()),
                Some(TradeDto::from_trade(trade)),
                positions
                    .iter()
                    .map(|p| {
                        PositionDto::from_position(p, None, PositionLedger::unrealized_pnl(p, None))
                    })
                    .collect(),
            ),
            SubmitOutcome::Rejected { .. } => (
                false,
                outcome
                    .rejection()
                    .map(|e| e.public_message())
                    .unwrap_or_default(),
                None,
                Vec::new(),
            ),
        };

        Self {
            success,
            message,
            order: OrderDto::from_order(outcome.order()),
            trade,
            positions,
            risk: outcome.report().clone(),
            timestamp: Timestamp::now(),
        }
    }
}

/// Response from order cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelOrderResponse {
    /// Always true; failures are error responses.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// The order after the request.
    pub order: OrderDto,
}

/// Response listing an account's orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    /// Account ID.
    pub account_id: String,
    /// Orders, newest first.
    pub orders: Vec<OrderDto>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

/// Error returned by handlers; renders as [`ApiErrorResponse`].
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(error: EngineError) -> Self {
        Self(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(EngineError::invalid_argument(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(EngineError::invalid_argument(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        if !code.is_caller_error() {
            tracing::error!(code = %code, error = %self.0, "Request failed");
        }
        let body = ApiErrorResponse {
            code: code.reason().to_string(),
            message: self.0.public_message(),
        };
        (code.http_status(), Json(body)).into_response()
    }
}
