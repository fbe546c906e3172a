//! End-to-end orchestration flow against a scripted fake backend.
//!
//! A small shell script stands in for the python model so the whole
//! launch → capture → parse → normalize → classify → persist path runs for
//! real, with the in-memory repository as the persistence collaborator.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal_macros::dec;
use rustcast::application::orchestrator::PredictionOrchestrator;
use rustcast::config::Config;
use rustcast::domain::errors::OrchestrationError;
use rustcast::domain::prediction::PredictionResult;
use rustcast::domain::repositories::PredictionResultRepository;
use rustcast::infrastructure::InMemoryPredictionResultRepository;
use serde_json::json;
use std::fs;
use std::sync::Arc;

/// Writes a backend script into a scratch directory and returns a config
/// pointing the orchestrator at it.
fn scripted_config(script_body: &str) -> Config {
    let dir = std::env::temp_dir().join(format!("rustcast-e2e-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    let script = dir.join("model.sh");
    fs::write(&script, script_body).unwrap();

    Config {
        local_script_path: script.display().to_string(),
        local_data_path: dir.join("market.csv").display().to_string(),
        python_exec: "sh".to_string(),
        prediction_window: 60,
        anomaly_threshold: dec!(0.5),
        default_feature: "bid_price".to_string(),
        cloud_model_url: "http://127.0.0.1:9/predict".to_string(),
        backend_timeout_secs: 30,
        http_timeout_secs: 5,
        database_url: "sqlite://unused".to_string(),
    }
}

fn orchestrator_with(
    config: Config,
) -> (PredictionOrchestrator, Arc<InMemoryPredictionResultRepository>) {
    let repository = Arc::new(InMemoryPredictionResultRepository::new());
    (
        PredictionOrchestrator::new(Arc::new(config), repository.clone()),
        repository,
    )
}

#[tokio::test]
async fn local_prediction_persists_and_augments_the_payload() -> anyhow::Result<()> {
    let config = scripted_config(
        "#!/bin/sh\necho '{\"predicted_value\": 150.25, \"confidence_score\": 0.42}'\n",
    );
    let (orchestrator, repository) = orchestrator_with(config);

    let payload = orchestrator
        .run_local_prediction("AAPL", "SINGLE_LSTM", None)
        .await?;

    // Backend fields survive, identity keys are back-filled.
    assert_eq!(payload["predicted_value"], json!(150.25));
    assert_eq!(payload["confidence_score"], json!(0.42));
    assert_eq!(payload["symbol"], json!("AAPL"));
    assert_eq!(payload["algorithm"], json!("SINGLE_LSTM"));
    assert_eq!(payload["feature"], json!("bid_price"));

    // Persistence metadata is added.
    assert_eq!(payload["saved_to_database"], json!(true));
    let id = payload["prediction_id"].as_str().expect("assigned id");

    // The canonical record landed with the anomaly policy applied
    // (0.42 < 0.5 threshold).
    let saved = repository.find_recent_by_symbol("AAPL", 50).await?;
    assert_eq!(saved.len(), 1);
    let record = &saved[0];
    assert_eq!(record.id.as_deref(), Some(id));
    assert_eq!(record.symbol, "AAPL");
    assert_eq!(record.algorithm, "SINGLE_LSTM");
    assert_eq!(record.prediction_type, "price_prediction");
    assert_eq!(record.predicted_value, Some(dec!(150.25)));
    assert_eq!(record.confidence_score, Some(dec!(0.42)));
    assert_eq!(record.is_anomaly, Some(true));
    Ok(())
}

#[tokio::test]
async fn confident_prediction_is_not_anomalous() -> anyhow::Result<()> {
    let config = scripted_config(
        "#!/bin/sh\necho '{\"predicted_value\": 150.25, \"confidence_score\": 0.93}'\n",
    );
    let (orchestrator, repository) = orchestrator_with(config);

    orchestrator
        .run_local_prediction("AAPL", "SINGLE_LSTM", None)
        .await?;

    let saved = repository.find_recent_by_symbol("AAPL", 50).await?;
    assert_eq!(saved[0].is_anomaly, Some(false));
    Ok(())
}

#[tokio::test]
async fn missing_confidence_leaves_the_anomaly_flag_unset() -> anyhow::Result<()> {
    let config = scripted_config("#!/bin/sh\necho '{\"predicted_value\": 150.25}'\n");
    let (orchestrator, repository) = orchestrator_with(config);

    orchestrator
        .run_local_prediction("AAPL", "SINGLE_LSTM", None)
        .await?;

    let saved = repository.find_recent_by_symbol("AAPL", 50).await?;
    assert_eq!(saved[0].confidence_score, None);
    // Tri-state: absent, not false.
    assert_eq!(saved[0].is_anomaly, None);
    Ok(())
}

#[tokio::test]
async fn failing_backend_surfaces_exit_code_and_output() {
    let config = scripted_config("#!/bin/sh\necho boom\nexit 1\n");
    let (orchestrator, repository) = orchestrator_with(config);

    let err = orchestrator
        .run_local_prediction("AAPL", "SINGLE_LSTM", None)
        .await
        .unwrap_err();

    match err {
        OrchestrationError::Local(message) => {
            assert!(message.contains("1"), "missing exit code in: {message}");
            assert!(message.contains("boom"), "missing output in: {message}");
        }
        other => panic!("expected local orchestration error, got {other:?}"),
    }

    let saved = repository.find_recent_by_symbol("AAPL", 50).await.unwrap();
    assert!(saved.is_empty());
}

#[tokio::test]
async fn error_key_fails_despite_clean_exit() {
    let config = scripted_config("#!/bin/sh\necho '{\"error\": \"bad input\"}'\n");
    let (orchestrator, repository) = orchestrator_with(config);

    let err = orchestrator
        .run_local_prediction("AAPL", "SINGLE_LSTM", None)
        .await
        .unwrap_err();

    match err {
        OrchestrationError::Local(message) => {
            assert!(message.contains("bad input"), "unexpected message: {message}");
        }
        other => panic!("expected local orchestration error, got {other:?}"),
    }

    let saved = repository.find_recent_by_symbol("AAPL", 50).await.unwrap();
    assert!(saved.is_empty());
}

/// Repository that refuses every save, for exercising the persistence leg
/// of the failure path.
struct FailingRepository;

#[async_trait]
impl PredictionResultRepository for FailingRepository {
    async fn save(&self, _result: &PredictionResult) -> Result<PredictionResult> {
        anyhow::bail!("disk full")
    }

    async fn find_recent_by_symbol(
        &self,
        _symbol: &str,
        _limit: usize,
    ) -> Result<Vec<PredictionResult>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn persistence_failure_wraps_into_the_caller_facing_error() {
    let config = scripted_config(
        "#!/bin/sh\necho '{\"predicted_value\": 150.25, \"confidence_score\": 0.42}'\n",
    );
    let orchestrator = PredictionOrchestrator::new(Arc::new(config), Arc::new(FailingRepository));

    let err = orchestrator
        .run_local_prediction("AAPL", "SINGLE_LSTM", None)
        .await
        .unwrap_err();

    match err {
        OrchestrationError::Local(message) => {
            assert!(message.contains("disk full"), "unexpected message: {message}");
        }
        other => panic!("expected local orchestration error, got {other:?}"),
    }
}

#[tokio::test]
async fn string_valued_payloads_keep_their_precision() -> anyhow::Result<()> {
    let config = scripted_config(
        "#!/bin/sh\necho '{\"predicted_value\": \"123.456000\", \"confidence_score\": \"0.50\"}'\n",
    );
    let (orchestrator, repository) = orchestrator_with(config);

    orchestrator
        .run_local_prediction("AAPL", "SINGLE_LSTM", None)
        .await?;

    let saved = repository.find_recent_by_symbol("AAPL", 50).await?;
    let record = &saved[0];
    assert_eq!(
        record.predicted_value.map(|v| v.to_string()),
        Some("123.456000".to_string())
    );
    // Exactly at the threshold: not anomalous.
    assert_eq!(record.is_anomaly, Some(false));
    Ok(())
}
