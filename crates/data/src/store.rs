//! Storage adapter trait for the analytics layer.
//!
//! The report assembler never talks to `PostgreSQL` directly; it receives
//! a snapshot of trades from an implementation of this trait. Timeouts and
//! retries belong to the implementation, not to callers.

use crate::models::TradeRecord;
use async_trait::async_trait;
use post_trade_core::StoreError;

/// Bounded range queries over trade records.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Loads every trade whose trade date falls within the trailing
    /// `window_days` window.
    ///
    /// Returns an empty Vec (not an error) when no trades fall in the
    /// window.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] when the backing store cannot
    /// be reached and [`StoreError::Query`] when a query fails.
    async fn load_trades(&self, window_days: u32) -> Result<Vec<TradeRecord>, StoreError>;
}
