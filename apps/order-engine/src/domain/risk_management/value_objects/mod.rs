//! Risk Management Value Objects

mod account_snapshot;
mod proposed_order;
mod risk_report;

pub use account_snapshot::AccountSnapshot;
pub use proposed_order::ProposedOrder;
pub use risk_report::{RiskCheck, RiskMetrics, RiskReport, RiskViolation};
