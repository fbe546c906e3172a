use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::info;

/// Singleton database wrapper
#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn new(db_url: &str) -> Result<Self> {
        // Ensure the directory exists if it's a file path
        if let Some(path_part) = db_url.strip_prefix("sqlite://") {
            let path = Path::new(path_part);
            if let Some(parent) = path.parent()
                && !parent.exists()
            {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create database directory")?;
            }
        }

        let options = SqliteConnectOptions::from_str(db_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal); // Better for concurrency

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        info!("Connected to database: {}", db_url);

        let db = Self { pool };
        db.init().await?;

        Ok(db)
    }

    /// Initialize database schema
    async fn init(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS prediction_results (
                id TEXT PRIMARY KEY,
                symbol TEXT NOT NULL,
                algorithm TEXT NOT NULL,
                prediction_type TEXT NOT NULL,
                prediction_time TEXT NOT NULL,
                predicted_value TEXT,
                confidence_score TEXT,
                is_anomaly INTEGER
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create prediction_results table")?;

        // Index for the newest-first per-symbol lookups
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_prediction_results_symbol_time
            ON prediction_results (symbol, prediction_time);
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create prediction_results index")?;

        Ok(())
    }
}
