//! Risk Settings Aggregate

mod risk_settings;

pub use risk_settings::{RiskSettings, RiskSettingsInput};
