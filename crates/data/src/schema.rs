//! Schema and index bootstrap for the `trades` table.

use anyhow::Result;
use sqlx::PgPool;

/// Creates the `trades` table if it does not exist.
///
/// # Errors
/// Returns an error if the DDL statement fails.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS trades (
            trade_id TEXT PRIMARY KEY,
            symbol TEXT NOT NULL,
            side TEXT NOT NULL,
            quantity NUMERIC NOT NULL,
            price NUMERIC NOT NULL,
            trade_currency TEXT NOT NULL,
            trade_date TIMESTAMPTZ NOT NULL,
            settlement_date TIMESTAMPTZ NOT NULL,
            actual_settlement_date TIMESTAMPTZ,
            buyer_id TEXT NOT NULL,
            seller_id TEXT NOT NULL,
            status TEXT NOT NULL,
            failure_reason TEXT,
            value_at_risk NUMERIC NOT NULL,
            is_margin_trade BOOLEAN NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    tracing::info!("trades table ready");
    Ok(())
}

/// Creates the query-path indexes on the `trades` table.
///
/// # Errors
/// Returns an error if any index creation fails.
pub async fn create_indexes(pool: &PgPool) -> Result<()> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_trades_status ON trades(status)",
        "CREATE INDEX IF NOT EXISTS idx_trades_symbol ON trades(symbol)",
        "CREATE INDEX IF NOT EXISTS idx_trades_trade_date ON trades(trade_date)",
        "CREATE INDEX IF NOT EXISTS idx_trades_value ON trades((quantity * price))",
        "CREATE INDEX IF NOT EXISTS idx_trades_buyer ON trades(buyer_id)",
        "CREATE INDEX IF NOT EXISTS idx_trades_seller ON trades(seller_id)",
    ];

    for sql in indexes {
        sqlx::query(sql).execute(pool).await?;
        tracing::info!(index = sql, "created");
    }

    Ok(())
}
