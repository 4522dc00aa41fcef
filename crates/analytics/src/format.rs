#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]

use crate::report::TradeReport;

pub struct ReportFormatter;

impl ReportFormatter {
    #[must_use]
    pub fn format(report: &TradeReport) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                  POST-TRADE ANALYSIS REPORT                   \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        // Basic statistics
        let stats = &report.basic_stats;
        output.push_str("Basic Statistics\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("Total Trades:          {}\n", stats.total_trades));
        output.push_str(&format!("Failed Trades:         {}\n", stats.failed_trades));
        output.push_str(&format!("Settled Trades:        {}\n", stats.settled_trades));

        match stats.failure_rate {
            Some(rate) => {
                output.push_str(&format!("Failure Rate:          {:.2}%\n", rate * 100.0));
            }
            None => output.push_str("Failure Rate:          N/A (no trades)\n"),
        }

        output.push_str(&format!(
            "Total Value at Risk:   ${:.2}\n",
            stats.total_value
        ));
        if let Some(range) = &stats.date_range {
            output.push_str(&format!(
                "Date Range:            {} to {}\n",
                range.start.format("%Y-%m-%d %H:%M:%S UTC"),
                range.end.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        output.push('\n');

        // Symbol breakdown
        output.push_str("Failure Rate by Symbol (top 10)\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        if report.symbol_breakdown.is_empty() {
            output.push_str("(no trades)\n");
        } else {
            output.push_str(&format!(
                "{:<8} {:>8} {:>8} {:>12} {:>10}\n",
                "Symbol", "Trades", "Failed", "Total VaR", "Rate"
            ));
            for row in report.symbol_breakdown.iter().take(10) {
                output.push_str(&format!(
                    "{:<8} {:>8} {:>8} {:>12.2} {:>10.3}\n",
                    row.symbol, row.total_trades, row.failed_trades, row.total_var,
                    row.failure_rate
                ));
            }
        }
        output.push('\n');

        // Risk buckets
        output.push_str("Value at Risk Buckets\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        if report.risk_breakdown.is_empty() {
            output.push_str("(no trades)\n");
        } else {
            output.push_str(&format!(
                "{:<10} {:>8} {:>8} {:>14} {:>10}\n",
                "Bucket", "Trades", "Failed", "Total VaR", "Rate"
            ));
            for row in &report.risk_breakdown {
                output.push_str(&format!(
                    "{:<10} {:>8} {:>8} {:>14.2} {:>10.3}\n",
                    row.bucket.as_str(),
                    row.total_trades,
                    row.failed_trades,
                    row.total_var,
                    row.failure_rate
                ));
            }
        }
        output.push('\n');

        // Settlement delays
        output.push_str("Settlement Delays by Symbol\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        if report.delay_breakdown.is_empty() {
            output.push_str("(no delayed settlements)\n");
        } else {
            output.push_str(&format!(
                "{:<8} {:>10} {:>10} {:>10}\n",
                "Symbol", "Avg Days", "Max Days", "Count"
            ));
            for row in &report.delay_breakdown {
                output.push_str(&format!(
                    "{:<8} {:>10.1} {:>10.1} {:>10}\n",
                    row.symbol, row.avg_delay, row.max_delay, row.delayed_count
                ));
            }
        }
        output.push('\n');

        // Correlations against failure
        output.push_str("Correlation with Failure\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        for (name, value) in report.correlation_matrix.failure_correlations() {
            if value.is_nan() {
                output.push_str(&format!("{:<16} N/A\n", name));
            } else {
                output.push_str(&format!("{:<16} {:>8.4}\n", name, value));
            }
        }

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");

        if report.snapshot_size == 0 {
            output.push_str("\n⚠️  No trades fell inside the analysis window.\n\n");
        }

        output
    }
}
