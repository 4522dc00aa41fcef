//! Data storage and management for the post-trade monitor.
//!
//! This crate provides:
//! - Database client for `PostgreSQL`
//! - The trade data model
//! - The trade repository (store adapter) with typed queries
//! - Schema and index bootstrap for the `trades` table
//! - A seeded synthetic trade generator

pub mod database;
pub mod generator;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

// Re-export commonly used types
pub use database::DatabaseClient;
pub use generator::TradeGenerator;
pub use models::{FailureReason, TradeRecord, TradeSide, TradeStatus};
pub use repositories::trade_repo::{StoreSummary, TradeRepository};
pub use store::TradeStore;
