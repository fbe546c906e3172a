use crate::domain::prediction::PredictionResult;
use crate::domain::repositories::PredictionResultRepository;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

pub struct SqlitePredictionResultRepository {
    pool: SqlitePool,
}

impl SqlitePredictionResultRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PredictionResultRepository for SqlitePredictionResultRepository {
    async fn save(&self, result: &PredictionResult) -> Result<PredictionResult> {
        let mut saved = result.clone();
        let id = saved
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();

        sqlx::query(
            r#"
            INSERT INTO prediction_results
                (id, symbol, algorithm, prediction_type, prediction_time,
                 predicted_value, confidence_score, is_anomaly)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&saved.symbol)
        .bind(&saved.algorithm)
        .bind(&saved.prediction_type)
        .bind(saved.prediction_time.to_rfc3339())
        .bind(saved.predicted_value.map(|v| v.to_string())) // Decimal as text
        .bind(saved.confidence_score.map(|v| v.to_string()))
        .bind(saved.is_anomaly)
        .execute(&self.pool)
        .await
        .context("Failed to save prediction result")?;

        info!("Persisted PredictionResult {}", id);
        Ok(saved)
    }

    async fn find_recent_by_symbol(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<PredictionResult>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM prediction_results
            WHERE symbol = ?
            ORDER BY prediction_time DESC
            LIMIT ?
            "#,
        )
        .bind(symbol)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut results = Vec::new();
        for row in rows {
            let prediction_time: String = row.try_get("prediction_time")?;
            let predicted_value: Option<String> = row.try_get("predicted_value")?;
            let confidence_score: Option<String> = row.try_get("confidence_score")?;

            results.push(PredictionResult {
                id: row.try_get("id")?,
                symbol: row.try_get("symbol")?,
                algorithm: row.try_get("algorithm")?,
                prediction_type: row.try_get("prediction_type")?,
                prediction_time: DateTime::parse_from_rfc3339(&prediction_time)
                    .context("Malformed prediction_time in database")?
                    .with_timezone(&Utc),
                predicted_value: predicted_value.and_then(|v| Decimal::from_str(&v).ok()),
                confidence_score: confidence_score.and_then(|v| Decimal::from_str(&v).ok()),
                is_anomaly: row.try_get("is_anomaly")?,
            });
        }
        Ok(results)
    }
}
