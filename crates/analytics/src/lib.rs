//! Trade risk aggregation for the post-trade monitor.
//!
//! Turns a snapshot of trade records into descriptive statistics, grouped
//! failure rates, risk-bucket breakdowns, settlement delay metrics, and a
//! correlation matrix. Every aggregation is a pure function: same input
//! rows, same output aggregates, and all of them are total over empty
//! input.

pub mod aggregate;
pub mod correlate;
pub mod format;
pub mod report;
pub mod risk;

pub use aggregate::{
    basic_stats, failure_analysis_by_symbol, settlement_delay_analysis, time_based_analysis,
    value_at_risk_analysis, BasicStats, DailyStats, DateRange, HourlyStats, RiskBucketStats,
    SymbolDelayStats, SymbolFailureStats, TimeBreakdown,
};
pub use correlate::{correlation_analysis, CorrelationMatrix, CORRELATION_COLUMNS};
pub use format::ReportFormatter;
pub use report::{Analyzer, TradeReport, DEFAULT_WINDOW_DAYS};
pub use risk::RiskBucket;
