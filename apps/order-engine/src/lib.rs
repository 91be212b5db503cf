// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Order Engine - Rust Core Library
//!
//! Order execution service: validates orders against per-account risk
//! settings, fills accepted orders at the quoted price, keeps
//! weighted-average positions, and records every fill in an append-only
//! trade journal.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `order_execution`: Order aggregate, status lifecycle
//!   - `risk_management`: Risk settings and the five-check validator
//!   - `position_ledger`: Weighted-average positions, realized/unrealized P/L
//!   - `trade_journal`: Trades, filtering, performance metrics
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`EngineStore`, `PriceFeedPort`)
//!   - `use_cases`: `SubmitOrder`, `ValidateOrder`, `CancelOrder`, queries
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: In-memory store with atomic fill commits
//!   - `price_feed`: Static quote table
//!   - `events`: Structured-log event publisher
//!   - `http`: JSON API over axum

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration with environment interpolation.
pub mod config;

/// Error taxonomy and HTTP status mapping.
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::order_execution::{Order, OrderSide, OrderStatus, OrderType};
pub use domain::position_ledger::{Position, PositionLedger};
pub use domain::risk_management::{RiskReport, RiskSettings, RiskValidator};
pub use domain::shared::{AccountId, Money, OrderId, Quantity, Symbol};
pub use domain::trade_journal::{Trade, TradeFilter, TradeMetrics};

// Application re-exports
pub use application::ports::{EngineStore, EventPublisherPort, PriceFeedPort};
pub use application::services::ExecutionSettings;
pub use application::use_cases::{
    CancelOrderUseCase, GetPositionsUseCase, ListTradesUseCase, OrderQueries,
    RiskSettingsUseCase, SubmitOrderUseCase, ValidateOrderUseCase,
};

// Infrastructure re-exports
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::{InMemoryStore, StaticPriceFeed, TracingEventPublisher};

// Cross-cutting re-exports
pub use config::{Config, ConfigError, load_config};
pub use error::{EngineError, ErrorCode};
