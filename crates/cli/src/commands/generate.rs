//! Generate CLI command.
//!
//! Inserts synthetic trades so the rest of the stack has data to chew on.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use post_trade_core::ConfigLoader;
use post_trade_data::{DatabaseClient, TradeGenerator, TradeRepository};

/// Arguments for the generate command.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Number of trades to generate (defaults to the configured count)
    #[arg(long)]
    pub count: Option<u32>,

    /// RNG seed for reproducible data
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Runs the generate command.
///
/// # Errors
/// Returns an error if configuration, database access, or insertion
/// fails.
pub async fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;
    let count = args.count.unwrap_or(config.generator.default_count) as usize;

    let mut generator = match args.seed {
        Some(seed) => TradeGenerator::new(seed),
        None => TradeGenerator::from_entropy(),
    };
    let trades = generator.generate(count, Utc::now());

    for trade in &trades {
        trade.validate().context("generated trade failed validation")?;
    }

    let client = DatabaseClient::new(&config.database)
        .await
        .context("connecting to trade store")?;
    let repository = TradeRepository::new(client.pool().clone());

    let mut result = Ok(());
    for chunk in trades.chunks(config.generator.batch_size) {
        if let Err(e) = repository.insert_batch(chunk).await {
            result = Err(e);
            break;
        }
        tracing::info!(inserted = chunk.len(), "inserted trade batch");
    }
    client.close().await;
    result?;

    tracing::info!(count, "synthetic trade generation complete");
    Ok(())
}
