//! Report assembly.
//!
//! One snapshot in, one report out. The six breakdowns are computed
//! independently over the same snapshot; each is total over empty or
//! degenerate input, so no breakdown can blank the others. The only
//! aborting failure is the snapshot load itself.

use post_trade_core::StoreError;
use post_trade_data::{TradeRecord, TradeStore};
use serde::Serialize;

use crate::aggregate::{
    basic_stats, failure_analysis_by_symbol, settlement_delay_analysis, time_based_analysis,
    value_at_risk_analysis, BasicStats, RiskBucketStats, SymbolDelayStats, SymbolFailureStats,
    TimeBreakdown,
};
use crate::correlate::{correlation_analysis, CorrelationMatrix};

/// Default trailing window for analysis runs, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 90;

/// Aggregate report over one snapshot of trades.
///
/// Recomputed per analysis run and discarded after use; building it twice
/// from the same snapshot yields identical values.
#[derive(Debug, Clone, Serialize)]
pub struct TradeReport {
    /// Number of trades in the snapshot the report was built from.
    pub snapshot_size: usize,
    pub basic_stats: BasicStats,
    pub symbol_breakdown: Vec<SymbolFailureStats>,
    pub time_breakdown: TimeBreakdown,
    pub risk_breakdown: Vec<RiskBucketStats>,
    pub delay_breakdown: Vec<SymbolDelayStats>,
    pub correlation_matrix: CorrelationMatrix,
}

impl TradeReport {
    /// Builds the full report from a snapshot of trades.
    #[must_use]
    pub fn build(trades: &[TradeRecord]) -> Self {
        Self {
            snapshot_size: trades.len(),
            basic_stats: basic_stats(trades),
            symbol_breakdown: failure_analysis_by_symbol(trades),
            time_breakdown: time_based_analysis(trades),
            risk_breakdown: value_at_risk_analysis(trades),
            delay_breakdown: settlement_delay_analysis(trades),
            correlation_matrix: correlation_analysis(trades),
        }
    }
}

/// Drives one analysis run: snapshot from the store, report out.
pub struct Analyzer<'a> {
    store: &'a dyn TradeStore,
    window_days: u32,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer over the given store adapter.
    #[must_use]
    pub fn new(store: &'a dyn TradeStore, window_days: u32) -> Self {
        Self { store, window_days }
    }

    /// Loads one snapshot and builds the report.
    ///
    /// # Errors
    /// Returns the underlying [`StoreError`] if the snapshot cannot be
    /// loaded; no partial report is produced in that case.
    pub async fn run(&self) -> Result<TradeReport, StoreError> {
        let trades = self.store.load_trades(self.window_days).await?;
        tracing::info!(
            trades = trades.len(),
            window_days = self.window_days,
            "building trade report"
        );
        Ok(TradeReport::build(&trades))
    }
}
