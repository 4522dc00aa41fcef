//! Aggregation engine.
//!
//! Explicit grouping (key → accumulated counts) followed by a fold per
//! group. Rounding and ordering rules here are observable contract:
//! failure rates round to 3 decimals, delays to 1, VaR sums and means to
//! 2, symbol groups form in ascending symbol order and are then
//! stable-sorted by the requested metric.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use post_trade_data::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::risk::RiskBucket;

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[allow(clippy::cast_precision_loss)]
fn rate(failed: usize, total: usize) -> f64 {
    failed as f64 / total as f64
}

/// Headline statistics over one snapshot.
///
/// `failure_rate`, `avg_trade_size` and `date_range` are `None` for an
/// empty snapshot rather than dividing by zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicStats {
    pub total_trades: usize,
    pub failed_trades: usize,
    pub settled_trades: usize,
    pub failure_rate: Option<f64>,
    pub total_value: Decimal,
    pub avg_trade_size: Option<Decimal>,
    pub date_range: Option<DateRange>,
}

/// First and last trade date in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Per-symbol failure statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolFailureStats {
    pub symbol: String,
    pub total_trades: usize,
    pub failed_trades: usize,
    pub total_var: Decimal,
    pub avg_var: Decimal,
    pub failure_rate: f64,
}

/// Per-hour-of-day statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyStats {
    pub hour: u32,
    pub total_trades: usize,
    pub failed_trades: usize,
    pub failure_rate: f64,
}

/// Per-day-of-week statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub day: String,
    pub total_trades: usize,
    pub failed_trades: usize,
    pub failure_rate: f64,
}

/// Hour-of-day and day-of-week breakdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub hourly: Vec<HourlyStats>,
    pub daily: Vec<DailyStats>,
}

/// Per-risk-bucket statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskBucketStats {
    pub bucket: RiskBucket,
    pub total_trades: usize,
    pub failed_trades: usize,
    pub total_var: Decimal,
    pub failure_rate: f64,
}

/// Per-symbol settlement delay statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolDelayStats {
    pub symbol: String,
    pub avg_delay: f64,
    pub max_delay: f64,
    pub delayed_count: usize,
}

#[derive(Default)]
struct GroupAcc {
    total: usize,
    failed: usize,
    var_sum: Decimal,
}

impl GroupAcc {
    fn push(&mut self, trade: &TradeRecord) {
        self.total += 1;
        if trade.is_failed() {
            self.failed += 1;
        }
        self.var_sum += trade.value_at_risk;
    }
}

/// Computes headline statistics over the snapshot.
#[must_use]
pub fn basic_stats(trades: &[TradeRecord]) -> BasicStats {
    let total = trades.len();
    let failed = trades.iter().filter(|t| t.is_failed()).count();
    let settled = trades.iter().filter(|t| t.is_settled()).count();
    let total_value: Decimal = trades.iter().map(|t| t.value_at_risk).sum();

    let date_range = trades
        .iter()
        .map(|t| t.trade_date)
        .min()
        .zip(trades.iter().map(|t| t.trade_date).max())
        .map(|(start, end)| DateRange { start, end });

    BasicStats {
        total_trades: total,
        failed_trades: failed,
        settled_trades: settled,
        failure_rate: (total > 0).then(|| rate(failed, total)),
        total_value,
        avg_trade_size: (total > 0).then(|| total_value / Decimal::from(total)),
        date_range,
    }
}

/// Per-symbol failure rates, descending by failure rate.
///
/// Groups form in ascending symbol order; the sort is stable, so ties
/// keep that order.
#[must_use]
pub fn failure_analysis_by_symbol(trades: &[TradeRecord]) -> Vec<SymbolFailureStats> {
    let mut groups: BTreeMap<&str, GroupAcc> = BTreeMap::new();
    for trade in trades {
        groups.entry(&trade.symbol).or_default().push(trade);
    }

    let mut rows: Vec<SymbolFailureStats> = groups
        .into_iter()
        .map(|(symbol, acc)| SymbolFailureStats {
            symbol: symbol.to_string(),
            total_trades: acc.total,
            failed_trades: acc.failed,
            total_var: acc.var_sum.round_dp(2),
            avg_var: (acc.var_sum / Decimal::from(acc.total)).round_dp(2),
            failure_rate: round3(rate(acc.failed, acc.total)),
        })
        .collect();

    rows.sort_by(|a, b| b.failure_rate.total_cmp(&a.failure_rate));
    rows
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Failure rates by hour of day and day of week.
///
/// Hours and days with no trades are absent from the output. Hourly rows
/// ascend by hour; daily rows follow Monday..Sunday order.
#[must_use]
pub fn time_based_analysis(trades: &[TradeRecord]) -> TimeBreakdown {
    let mut hourly: BTreeMap<u32, GroupAcc> = BTreeMap::new();
    let mut daily: BTreeMap<u32, GroupAcc> = BTreeMap::new();

    for trade in trades {
        hourly
            .entry(trade.trade_date.hour())
            .or_default()
            .push(trade);
        daily
            .entry(trade.trade_date.weekday().number_from_monday())
            .or_default()
            .push(trade);
    }

    let hourly = hourly
        .into_iter()
        .map(|(hour, acc)| HourlyStats {
            hour,
            total_trades: acc.total,
            failed_trades: acc.failed,
            failure_rate: round3(rate(acc.failed, acc.total)),
        })
        .collect();

    let daily = WEEKDAYS
        .iter()
        .filter_map(|weekday| {
            daily
                .get(&weekday.number_from_monday())
                .map(|acc| DailyStats {
                    day: day_name(*weekday).to_string(),
                    total_trades: acc.total,
                    failed_trades: acc.failed,
                    failure_rate: round3(rate(acc.failed, acc.total)),
                })
        })
        .collect();

    TimeBreakdown { hourly, daily }
}

/// Trade counts and failure rates per risk bucket, in ascending bucket
/// order. Buckets with no trades are absent.
#[must_use]
pub fn value_at_risk_analysis(trades: &[TradeRecord]) -> Vec<RiskBucketStats> {
    let mut buckets: BTreeMap<RiskBucket, GroupAcc> = BTreeMap::new();
    for trade in trades {
        buckets
            .entry(RiskBucket::for_var(trade.value_at_risk))
            .or_default()
            .push(trade);
    }

    buckets
        .into_iter()
        .map(|(bucket, acc)| RiskBucketStats {
            bucket,
            total_trades: acc.total,
            failed_trades: acc.failed,
            total_var: acc.var_sum,
            failure_rate: round3(rate(acc.failed, acc.total)),
        })
        .collect()
}

#[derive(Default)]
struct DelayAcc {
    sum_days: i64,
    max_days: i64,
    count: usize,
}

/// Per-symbol settlement delay statistics, descending by average delay.
///
/// Only trades that actually settled and did so strictly after their
/// expected settlement date are counted.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn settlement_delay_analysis(trades: &[TradeRecord]) -> Vec<SymbolDelayStats> {
    let mut groups: BTreeMap<&str, DelayAcc> = BTreeMap::new();

    for trade in trades {
        let Some(delay) = trade.settlement_delay_days() else {
            continue;
        };
        if delay <= 0 {
            continue;
        }
        let acc = groups.entry(&trade.symbol).or_default();
        acc.sum_days += delay;
        acc.max_days = acc.max_days.max(delay);
        acc.count += 1;
    }

    let mut rows: Vec<SymbolDelayStats> = groups
        .into_iter()
        .map(|(symbol, acc)| SymbolDelayStats {
            symbol: symbol.to_string(),
            avg_delay: round1(acc.sum_days as f64 / acc.count as f64),
            max_delay: round1(acc.max_days as f64),
            delayed_count: acc.count,
        })
        .collect();

    rows.sort_by(|a, b| b.avg_delay.total_cmp(&a.avg_delay));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use post_trade_data::{FailureReason, TradeSide};
    use rust_decimal_macros::dec;

    fn base_date() -> DateTime<Utc> {
        // A Tuesday, 14:30 UTC
        Utc.with_ymd_and_hms(2025, 6, 10, 14, 30, 0).unwrap()
    }

    fn trade(symbol: &str, var: Decimal, failed: bool) -> TradeRecord {
        trade_at(symbol, var, failed, base_date())
    }

    fn trade_at(symbol: &str, var: Decimal, failed: bool, when: DateTime<Utc>) -> TradeRecord {
        let mut record = TradeRecord::new(
            format!("TRD{symbol}{var}{failed}{}", when.timestamp()),
            symbol.to_string(),
            TradeSide::Buy,
            dec!(100),
            dec!(50),
            when,
            when + Duration::days(2),
        );
        record.value_at_risk = var;
        if failed {
            record.mark_failed(FailureReason::BadSettlement);
        } else {
            record.mark_settled(when + Duration::days(2));
        }
        record
    }

    #[test]
    fn test_basic_stats_counts_and_rate() {
        let trades = vec![
            trade("AAPL", dec!(100), true),
            trade("AAPL", dec!(200), false),
            trade("MSFT", dec!(300), false),
            trade("MSFT", dec!(400), true),
        ];
        let stats = basic_stats(&trades);

        assert_eq!(stats.total_trades, 4);
        assert_eq!(stats.failed_trades, 2);
        assert_eq!(stats.settled_trades, 2);
        assert_eq!(stats.failure_rate, Some(0.5));
        assert_eq!(stats.total_value, dec!(1000));
        assert_eq!(stats.avg_trade_size, Some(dec!(250)));
    }

    #[test]
    fn test_basic_stats_empty_input() {
        let stats = basic_stats(&[]);

        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.failure_rate, None);
        assert_eq!(stats.avg_trade_size, None);
        assert!(stats.date_range.is_none());
        assert_eq!(stats.total_value, Decimal::ZERO);
    }

    #[test]
    fn test_basic_stats_date_range() {
        let early = base_date() - Duration::days(5);
        let late = base_date() + Duration::days(3);
        let trades = vec![
            trade_at("AAPL", dec!(1), false, late),
            trade_at("AAPL", dec!(1), false, early),
            trade_at("AAPL", dec!(1), false, base_date()),
        ];

        let range = basic_stats(&trades).date_range.unwrap();
        assert_eq!(range.start, early);
        assert_eq!(range.end, late);
    }

    #[test]
    fn test_symbol_breakdown_totals_sum_to_trade_count() {
        let trades = vec![
            trade("AAPL", dec!(100), true),
            trade("MSFT", dec!(100), false),
            trade("MSFT", dec!(100), false),
            trade("GOOG", dec!(100), true),
            trade("GOOG", dec!(100), false),
        ];

        let rows = failure_analysis_by_symbol(&trades);
        let total: usize = rows.iter().map(|r| r.total_trades).sum();
        assert_eq!(total, trades.len());
    }

    #[test]
    fn test_symbol_breakdown_sorted_by_failure_rate_desc() {
        let trades = vec![
            trade("AAPL", dec!(100), false),
            trade("AAPL", dec!(100), true),  // 0.5
            trade("MSFT", dec!(100), true),  // 1.0
            trade("GOOG", dec!(100), false), // 0.0
        ];

        let rows = failure_analysis_by_symbol(&trades);
        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["MSFT", "AAPL", "GOOG"]);
    }

    #[test]
    fn test_symbol_breakdown_ties_keep_ascending_symbol_order() {
        // All symbols fail at the same rate; stable sort keeps the
        // ascending group order.
        let trades = vec![
            trade("NVDA", dec!(100), true),
            trade("AAPL", dec!(100), true),
            trade("MSFT", dec!(100), true),
        ];

        let rows = failure_analysis_by_symbol(&trades);
        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAPL", "MSFT", "NVDA"]);
    }

    #[test]
    fn test_symbol_breakdown_var_rounding() {
        let trades = vec![
            trade("AAPL", dec!(100.005), false),
            trade("AAPL", dec!(200.001), false),
        ];

        let row = &failure_analysis_by_symbol(&trades)[0];
        assert_eq!(row.total_var, dec!(300.01));
        assert_eq!(row.avg_var, dec!(150.00));
    }

    #[test]
    fn test_time_breakdown_buckets() {
        let monday_9 = Utc.with_ymd_and_hms(2025, 6, 9, 9, 15, 0).unwrap();
        let monday_17 = Utc.with_ymd_and_hms(2025, 6, 9, 17, 45, 0).unwrap();
        let friday_9 = Utc.with_ymd_and_hms(2025, 6, 13, 9, 5, 0).unwrap();

        let trades = vec![
            trade_at("AAPL", dec!(1), true, monday_9),
            trade_at("AAPL", dec!(1), false, monday_17),
            trade_at("MSFT", dec!(1), false, friday_9),
        ];

        let breakdown = time_based_analysis(&trades);

        let hours: Vec<u32> = breakdown.hourly.iter().map(|h| h.hour).collect();
        assert_eq!(hours, [9, 17]);
        assert_eq!(breakdown.hourly[0].total_trades, 2);
        assert_eq!(breakdown.hourly[0].failure_rate, 0.5);

        let days: Vec<&str> = breakdown.daily.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, ["Monday", "Friday"]);
        assert_eq!(breakdown.daily[0].total_trades, 2);
        assert_eq!(breakdown.daily[1].failure_rate, 0.0);
    }

    #[test]
    fn test_time_breakdown_empty_input() {
        let breakdown = time_based_analysis(&[]);
        assert!(breakdown.hourly.is_empty());
        assert!(breakdown.daily.is_empty());
    }

    #[test]
    fn test_var_analysis_example() {
        // Two AAPL trades: one Very Low that failed, one Low that settled.
        let trades = vec![
            trade("AAPL", dec!(500), true),
            trade("AAPL", dec!(2000), false),
        ];

        let rows = value_at_risk_analysis(&trades);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].bucket, RiskBucket::VeryLow);
        assert_eq!(rows[0].total_trades, 1);
        assert_eq!(rows[0].failed_trades, 1);
        assert_eq!(rows[0].failure_rate, 1.0);

        assert_eq!(rows[1].bucket, RiskBucket::Low);
        assert_eq!(rows[1].total_trades, 1);
        assert_eq!(rows[1].failed_trades, 0);
        assert_eq!(rows[1].failure_rate, 0.0);
    }

    #[test]
    fn test_var_analysis_empty_buckets_absent() {
        let trades = vec![trade("AAPL", dec!(60000), false)];
        let rows = value_at_risk_analysis(&trades);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bucket, RiskBucket::VeryHigh);
    }

    #[test]
    fn test_delay_analysis_two_day_delay() {
        let mut record = trade("AAPL", dec!(100), false);
        let actual = record.settlement_date + Duration::days(2);
        record.mark_settled(actual);

        let rows = settlement_delay_analysis(&[record]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "AAPL");
        assert_eq!(rows[0].avg_delay, 2.0);
        assert_eq!(rows[0].max_delay, 2.0);
        assert_eq!(rows[0].delayed_count, 1);
    }

    #[test]
    fn test_delay_analysis_excludes_on_time_and_early() {
        let mut on_time = trade("AAPL", dec!(100), false);
        let expected = on_time.settlement_date;
        on_time.mark_settled(expected);

        let mut early = trade("MSFT", dec!(100), false);
        let expected = early.settlement_date;
        early.mark_settled(expected - Duration::days(1));

        let unsettled = trade("GOOG", dec!(100), true);

        let rows = settlement_delay_analysis(&[on_time, early, unsettled]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_delay_analysis_sorted_by_avg_desc() {
        let mut slow = trade("TSLA", dec!(100), false);
        let expected = slow.settlement_date;
        slow.mark_settled(expected + Duration::days(4));

        let mut quick = trade("AAPL", dec!(100), false);
        let expected = quick.settlement_date;
        quick.mark_settled(expected + Duration::days(1));

        let rows = settlement_delay_analysis(&[quick, slow]);
        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["TSLA", "AAPL"]);
        assert_eq!(rows[0].avg_delay, 4.0);
    }

    #[test]
    fn test_delay_analysis_mean_rounding() {
        // Delays of 1 and 2 days -> mean 1.5
        let mut a = trade("AAPL", dec!(100), false);
        let expected = a.settlement_date;
        a.mark_settled(expected + Duration::days(1));

        let mut b = trade("AAPL", dec!(200), false);
        let expected = b.settlement_date;
        b.mark_settled(expected + Duration::days(2));

        let rows = settlement_delay_analysis(&[a, b]);
        assert_eq!(rows[0].avg_delay, 1.5);
        assert_eq!(rows[0].max_delay, 2.0);
        assert_eq!(rows[0].delayed_count, 2);
    }
}
