//! Trade repository.
//!
//! Provides operations for storing and querying trade records, and is the
//! store adapter handed to the analytics layer.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::TradeRecord;
use crate::store::TradeStore;
use post_trade_core::StoreError;

const TRADE_COLUMNS: &str = "trade_id, symbol, side, quantity, price, trade_currency, \
     trade_date, settlement_date, actual_settlement_date, buyer_id, seller_id, \
     status, failure_reason, value_at_risk, is_margin_trade";

/// Repository for trade record operations.
#[derive(Debug, Clone)]
pub struct TradeRepository {
    pool: PgPool,
}

impl TradeRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a single trade.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: &TradeRecord) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO trades
                (trade_id, symbol, side, quantity, price, trade_currency,
                 trade_date, settlement_date, actual_settlement_date,
                 buyer_id, seller_id, status, failure_reason,
                 value_at_risk, is_margin_trade)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(&record.trade_id)
        .bind(&record.symbol)
        .bind(&record.side)
        .bind(record.quantity)
        .bind(record.price)
        .bind(&record.trade_currency)
        .bind(record.trade_date)
        .bind(record.settlement_date)
        .bind(record.actual_settlement_date)
        .bind(&record.buyer_id)
        .bind(&record.seller_id)
        .bind(&record.status)
        .bind(&record.failure_reason)
        .bind(record.value_at_risk)
        .bind(record.is_margin_trade)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a batch of trades inside one transaction.
    ///
    /// # Errors
    /// Returns an error if the transaction fails or any insertion fails.
    pub async fn insert_batch(&self, records: &[TradeRecord]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r"
                INSERT INTO trades
                    (trade_id, symbol, side, quantity, price, trade_currency,
                     trade_date, settlement_date, actual_settlement_date,
                     buyer_id, seller_id, status, failure_reason,
                     value_at_risk, is_margin_trade)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                ON CONFLICT (trade_id) DO NOTHING
                ",
            )
            .bind(&record.trade_id)
            .bind(&record.symbol)
            .bind(&record.side)
            .bind(record.quantity)
            .bind(record.price)
            .bind(&record.trade_currency)
            .bind(record.trade_date)
            .bind(record.settlement_date)
            .bind(record.actual_settlement_date)
            .bind(&record.buyer_id)
            .bind(&record.seller_id)
            .bind(&record.status)
            .bind(&record.failure_reason)
            .bind(record.value_at_risk)
            .bind(record.is_margin_trade)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Gets a trade by its identifier.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn get_by_trade_id(&self, trade_id: &str) -> Result<Option<TradeRecord>> {
        let record = sqlx::query_as::<_, TradeRecord>(&format!(
            "SELECT {TRADE_COLUMNS} FROM trades WHERE trade_id = $1"
        ))
        .bind(trade_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Queries recent trades, newest first, optionally filtered by symbol
    /// and/or status.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_recent(
        &self,
        limit: i64,
        symbol: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<TradeRecord>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {TRADE_COLUMNS} FROM trades"));

        let mut has_condition = false;
        if let Some(symbol) = symbol {
            builder.push(" WHERE symbol = ").push_bind(symbol);
            has_condition = true;
        }
        if let Some(status) = status {
            builder.push(if has_condition { " AND " } else { " WHERE " });
            builder.push("status = ").push_bind(status);
        }
        builder.push(" ORDER BY trade_date DESC LIMIT ").push_bind(limit);

        let records = builder
            .build_query_as::<TradeRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Failed trades with value at risk above the threshold, descending
    /// by value at risk.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn high_risk_failures(&self, min_var: Decimal) -> Result<Vec<TradeRecord>> {
        let records = sqlx::query_as::<_, TradeRecord>(&format!(
            r"
            SELECT {TRADE_COLUMNS}
            FROM trades
            WHERE status = 'FAILED' AND value_at_risk > $1
            ORDER BY value_at_risk DESC
            "
        ))
        .bind(min_var)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Store-side summary counts over the whole table.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn summary_counts(&self) -> Result<StoreSummary> {
        let row: (Option<i64>, Option<i64>, Option<Decimal>, Option<DateTime<Utc>>) =
            sqlx::query_as(
                r"
                SELECT
                    COUNT(*) as total_trades,
                    COUNT(*) FILTER (WHERE status = 'FAILED') as failed_trades,
                    SUM(value_at_risk) as total_value_at_risk,
                    MAX(trade_date) as latest_trade_date
                FROM trades
                ",
            )
            .fetch_one(&self.pool)
            .await?;

        let total = row.0.unwrap_or(0);
        let failed = row.1.unwrap_or(0);

        Ok(StoreSummary {
            total_trades: total,
            failed_trades: failed,
            failure_rate: if total > 0 {
                #[allow(clippy::cast_precision_loss)]
                Some(failed as f64 / total as f64)
            } else {
                None
            },
            total_value_at_risk: row.2.unwrap_or(Decimal::ZERO),
            latest_trade_date: row.3,
        })
    }

    /// Loads all trades with a trade date inside the trailing window.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_window(&self, window_days: u32) -> Result<Vec<TradeRecord>, sqlx::Error> {
        sqlx::query_as::<_, TradeRecord>(&format!(
            r"
            SELECT {TRADE_COLUMNS}
            FROM trades
            WHERE trade_date > NOW() - make_interval(days => $1)
            ORDER BY trade_date ASC
            "
        ))
        .bind(i32::try_from(window_days).unwrap_or(i32::MAX))
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl TradeStore for TradeRepository {
    async fn load_trades(&self, window_days: u32) -> Result<Vec<TradeRecord>, StoreError> {
        let records = self.query_window(window_days).await.map_err(|e| match e {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(e.to_string())
            }
            other => StoreError::Query(other.to_string()),
        })?;

        tracing::debug!(
            count = records.len(),
            window_days,
            "loaded trade snapshot"
        );
        Ok(records)
    }
}

/// Store-side aggregate counts for the whole trades table.
#[derive(Debug, Clone)]
pub struct StoreSummary {
    pub total_trades: i64,
    pub failed_trades: i64,
    /// `None` when the table is empty.
    pub failure_rate: Option<f64>,
    pub total_value_at_risk: Decimal,
    pub latest_trade_date: Option<DateTime<Utc>>,
}
