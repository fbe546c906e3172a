//! In-memory repository implementation.
//!
//! Thread-safe (`Arc<RwLock>`), async-ready, and ideal for tests or
//! single-instance runs. Data is lost on restart; SQLite persistence lives
//! in `infrastructure::persistence`.

use crate::domain::prediction::PredictionResult;
use crate::domain::repositories::PredictionResultRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryPredictionResultRepository {
    results: Arc<RwLock<Vec<PredictionResult>>>,
}

impl InMemoryPredictionResultRepository {
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryPredictionResultRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionResultRepository for InMemoryPredictionResultRepository {
    async fn save(&self, result: &PredictionResult) -> Result<PredictionResult> {
        let mut saved = result.clone();
        if saved.id.is_none() {
            saved.id = Some(Uuid::new_v4().to_string());
        }
        self.results.write().await.push(saved.clone());
        Ok(saved)
    }

    async fn find_recent_by_symbol(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<PredictionResult>> {
        let results = self.results.read().await;
        let mut matching: Vec<PredictionResult> = results
            .iter()
            .filter(|r| r.symbol == symbol)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.prediction_time.cmp(&a.prediction_time));
        matching.truncate(limit);
        Ok(matching)
    }
}
