//! Data models for the post-trade monitor.
//!
//! All money-like fields use `rust_decimal::Decimal`.
//! Models derive `sqlx::FromRow` for database compatibility.

pub mod trade;

pub use trade::{FailureReason, TradeRecord, TradeSide, TradeStatus};
