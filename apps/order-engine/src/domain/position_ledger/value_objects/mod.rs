//! Position Ledger Value Objects

mod fill_effect;
mod mark_price;
mod position_fill;
mod position_status;
mod unrealized_pnl;

pub use fill_effect::FillEffect;
pub use mark_price::MarkPrice;
pub use position_fill::PositionFill;
pub use position_status::PositionStatus;
pub use unrealized_pnl::UnrealizedPnl;
