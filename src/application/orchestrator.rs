//! Top-level prediction orchestration.
//!
//! The orchestrator selects a backend, normalizes its payload into the
//! canonical record, applies the anomaly policy, persists through the
//! repository trait, and hands the caller the backend's own payload
//! augmented with persistence metadata. It is also the single point that
//! logs failures before converting them into the caller-facing error kind.

use crate::application::normalizer;
use crate::config::Config;
use crate::domain::anomaly;
use crate::domain::errors::OrchestrationError;
use crate::domain::prediction::{PredictionRequest, PredictionResult};
use crate::domain::repositories::PredictionResultRepository;
use crate::infrastructure::anomaly::BaselineAnomalyScorer;
use crate::infrastructure::cloud::CloudModelClient;
use crate::infrastructure::local_model::LocalModelInvoker;
use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{error, info};

pub struct PredictionOrchestrator {
    config: Arc<Config>,
    repository: Arc<dyn PredictionResultRepository>,
    invoker: LocalModelInvoker,
    cloud: CloudModelClient,
    scorer: BaselineAnomalyScorer,
}

impl PredictionOrchestrator {
    pub fn new(config: Arc<Config>, repository: Arc<dyn PredictionResultRepository>) -> Self {
        Self {
            invoker: LocalModelInvoker::new(config.clone()),
            cloud: CloudModelClient::new(config.clone()),
            scorer: BaselineAnomalyScorer::new(config.clone()),
            config,
            repository,
        }
    }

    /// Run the local model for one (symbol, algorithm) pair, persist the
    /// canonical record, and return the backend payload augmented with the
    /// assigned id and a persistence marker.
    pub async fn run_local_prediction(
        &self,
        symbol: &str,
        algorithm: &str,
        feature: Option<&str>,
    ) -> Result<Map<String, Value>, OrchestrationError> {
        match self.local_prediction(symbol, algorithm, feature).await {
            Ok(payload) => Ok(payload),
            Err(err) => {
                error!(
                    "Local prediction failed for {}/{}: {:#}",
                    symbol, algorithm, err
                );
                Err(OrchestrationError::Local(format!("{err:#}")))
            }
        }
    }

    async fn local_prediction(
        &self,
        symbol: &str,
        algorithm: &str,
        feature: Option<&str>,
    ) -> Result<Map<String, Value>> {
        let request = match feature {
            Some(feature) => PredictionRequest::price(symbol, algorithm).with_feature(feature),
            None => PredictionRequest::price(symbol, algorithm),
        };
        let mut payload = self.invoker.run(&request).await?;

        let normalized = normalizer::normalize(&payload)?;
        let record = PredictionResult {
            id: None,
            symbol: request.symbol,
            algorithm: request.algorithm,
            prediction_type: request.prediction_type.to_string(),
            prediction_time: Utc::now(),
            predicted_value: normalized.predicted_value,
            confidence_score: normalized.confidence_score,
            is_anomaly: anomaly::classify(
                normalized.confidence_score,
                self.config.anomaly_threshold,
            ),
        };

        let saved = self
            .repository
            .save(&record)
            .await
            .context("failed to persist prediction result")?;
        let id = saved
            .id
            .context("repository returned a record without an id")?;
        info!("Persisted prediction {} for {}/{}", id, symbol, algorithm);

        payload.insert("prediction_id".to_string(), Value::String(id));
        payload.insert("saved_to_database".to_string(), Value::Bool(true));
        Ok(payload)
    }

    /// One round trip against the cloud model. The payload is annotated with
    /// request metadata and returned as-is: no normalization, no anomaly
    /// policy, no persistence.
    pub async fn run_cloud_prediction(
        &self,
        symbol: &str,
        algorithm: &str,
        prediction_type: &str,
    ) -> Result<Map<String, Value>, OrchestrationError> {
        match self.cloud.predict(symbol, algorithm).await {
            Ok(mut payload) => {
                payload.insert("symbol".to_string(), json!(symbol));
                payload.insert("algorithm".to_string(), json!(algorithm));
                payload.insert("prediction_type".to_string(), json!(prediction_type));
                payload.insert("prediction_time".to_string(), json!(Utc::now().to_rfc3339()));
                payload.insert("data_source".to_string(), json!("CLOUD"));
                Ok(payload)
            }
            Err(err) => {
                error!(
                    "Cloud prediction failed for {}/{}: {}",
                    symbol, algorithm, err
                );
                Err(OrchestrationError::Cloud(err.to_string()))
            }
        }
    }

    /// Anomaly detection for one symbol. Same annotate-and-return shape as
    /// the cloud path; nothing is persisted.
    pub async fn run_anomaly_detection(
        &self,
        symbol: &str,
        algorithm: &str,
    ) -> Result<Map<String, Value>, OrchestrationError> {
        let mut payload = self.scorer.score(symbol, algorithm);
        payload.insert("symbol".to_string(), json!(symbol));
        payload.insert("algorithm".to_string(), json!(algorithm));
        payload.insert("detection_time".to_string(), json!(Utc::now().to_rfc3339()));
        payload.insert("data_source".to_string(), json!("LOCAL"));
        Ok(payload)
    }
}
