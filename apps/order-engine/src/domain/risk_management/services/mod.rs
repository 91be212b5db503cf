//! Risk Management Domain Services

mod risk_validator;

pub use risk_validator::RiskValidator;
