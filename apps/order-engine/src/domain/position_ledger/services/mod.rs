//! Position Ledger Domain Services

mod position_ledger;

pub use position_ledger::{LedgerUpdate, PositionLedger};
