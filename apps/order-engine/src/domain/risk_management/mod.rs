//! Risk Management Bounded Context
//!
//! Validates proposed orders against per-account risk limits before execution.
//!
//! # Key Concepts
//!
//! - **Risk Settings**: Bounded per-account limits, valid by construction
//! - **Risk Validator**: A pure function of order, account snapshot, and settings
//! - **Risk Report**: Every failing check plus exposure metrics

pub mod aggregate;
pub mod errors;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{RiskSettings, RiskSettingsInput};
pub use errors::RiskError;
pub use repository::RiskSettingsRepository;
pub use services::RiskValidator;
pub use value_objects::{
    AccountSnapshot, ProposedOrder, RiskCheck, RiskMetrics, RiskReport, RiskViolation,
};
