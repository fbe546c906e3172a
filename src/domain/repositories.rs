//! Repository traits for prediction persistence.
//!
//! The orchestrator only ever talks to these abstractions; storage lives in
//! `infrastructure` (SQLite for deployments, in-memory for tests and
//! single-instance runs).

use crate::domain::prediction::PredictionResult;
use anyhow::Result;
use async_trait::async_trait;

/// Repository for persisting and retrieving canonical prediction records.
#[async_trait]
pub trait PredictionResultRepository: Send + Sync {
    /// Save a record and return it with its assigned id.
    async fn save(&self, result: &PredictionResult) -> Result<PredictionResult>;

    /// Most recent predictions for a symbol, newest first.
    async fn find_recent_by_symbol(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<PredictionResult>>;
}
