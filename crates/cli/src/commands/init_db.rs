//! Init-db CLI command.
//!
//! Creates the trades table and the indexes the query paths rely on.

use anyhow::{Context, Result};
use clap::Args;
use post_trade_core::ConfigLoader;
use post_trade_data::{schema, DatabaseClient};

/// Arguments for the init-db command.
#[derive(Args, Debug, Clone)]
pub struct InitDbArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,
}

/// Runs the init-db command.
///
/// # Errors
/// Returns an error if configuration, connection, or DDL execution
/// fails.
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;

    let client = DatabaseClient::new(&config.database)
        .await
        .context("connecting to trade store")?;

    let result = match schema::create_schema(client.pool()).await {
        Ok(()) => schema::create_indexes(client.pool()).await,
        Err(e) => Err(e),
    };
    client.close().await;
    result?;

    tracing::info!("database initialization complete");
    Ok(())
}
