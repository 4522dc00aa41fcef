//! Report CLI command.
//!
//! Loads one snapshot of trades from the trailing window and prints the
//! aggregate risk report, as text or JSON, followed by the current
//! high-risk failed trades.

use anyhow::{Context, Result};
use clap::Args;
use post_trade_analytics::{Analyzer, ReportFormatter};
use post_trade_core::ConfigLoader;
use post_trade_data::{DatabaseClient, TradeRecord, TradeRepository};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Arguments for the report command.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Override the trailing analysis window in days
    #[arg(long)]
    pub window_days: Option<u32>,

    /// Emit the report as JSON instead of formatted text
    #[arg(long)]
    pub json: bool,
}

/// Runs the report command.
///
/// # Errors
/// Returns an error if configuration, database access, or the snapshot
/// load fails.
pub async fn run_report(args: ReportArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let window_days = args.window_days.unwrap_or(config.analysis.window_days);
    let threshold =
        Decimal::from_f64(config.analysis.high_risk_var_threshold).unwrap_or(Decimal::ZERO);

    let client = DatabaseClient::new(&config.database)
        .await
        .context("connecting to trade store")?;
    let repository = TradeRepository::new(client.pool().clone());

    let result = async {
        let report = Analyzer::new(&repository, window_days).run().await?;
        let high_risk = repository.high_risk_failures(threshold).await?;
        anyhow::Ok((report, high_risk))
    }
    .await;
    client.close().await;
    let (report, high_risk) = result.context("building trade report")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", ReportFormatter::format(&report));
        print_high_risk_failures(&high_risk, threshold);
    }

    Ok(())
}

fn print_high_risk_failures(trades: &[TradeRecord], threshold: Decimal) {
    println!("High-Risk Failed Trades (VaR > {threshold})");
    println!("───────────────────────────────────────────────────────────────");
    if trades.is_empty() {
        println!("(none)");
        return;
    }

    println!(
        "{:<16} {:<8} {:>10} {:>12} {:<20}",
        "Trade ID", "Symbol", "Quantity", "VaR", "Reason"
    );
    for trade in trades.iter().take(10) {
        println!(
            "{:<16} {:<8} {:>10} {:>12.2} {:<20}",
            trade.trade_id,
            trade.symbol,
            trade.quantity,
            trade.value_at_risk,
            trade.failure_reason.as_deref().unwrap_or("-")
        );
    }
}
