//! Order Execution Value Objects

mod fill_report;
mod order_side;
mod order_status;
mod order_type;
mod reasons;

pub use fill_report::FillReport;
pub use order_side::OrderSide;
pub use order_status::OrderStatus;
pub use order_type::OrderType;
pub use reasons::{CancelReason, RejectReason};
