use anyhow::Result;
use post_trade_core::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Owned database client with an explicit lifecycle.
///
/// Constructed once at startup from [`DatabaseConfig`] and passed by
/// reference to whatever needs the pool; there is no process-wide cached
/// connection.
pub struct DatabaseClient {
    pool: PgPool,
}

impl DatabaseClient {
    /// Creates a new database client connected to the configured
    /// `PostgreSQL` database.
    ///
    /// # Errors
    /// Returns an error if the database connection cannot be established.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        Ok(Self { pool })
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Closes the pool, waiting for in-flight connections to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
