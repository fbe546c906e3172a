use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

/// Immutable runtime configuration, read once at startup.
///
/// Every component that needs a setting borrows it from here; nothing
/// re-reads the environment after `from_env` returns.
#[derive(Debug, Clone)]
pub struct Config {
    /// Relative (or absolute) path to the local model script.
    pub local_script_path: String,
    /// Relative (or absolute) path to the dataset handed to the local model.
    pub local_data_path: String,
    /// Interpreter used to launch the local model script.
    pub python_exec: String,
    /// Look-back window handed to every backend.
    pub prediction_window: u32,
    /// Confidence below this value marks a prediction as anomalous.
    pub anomaly_threshold: Decimal,
    /// Feature used by single-feature algorithms when the caller names none.
    pub default_feature: String,
    /// Endpoint for the remote prediction model.
    pub cloud_model_url: String,
    /// Bound on the local model process wait, in seconds.
    pub backend_timeout_secs: u64,
    /// Bound on the cloud round trip, in seconds.
    pub http_timeout_secs: u64,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let local_script_path =
            env::var("RUSTCAST_SCRIPT_PATH").unwrap_or_else(|_| "models/predict.py".to_string());

        let local_data_path =
            env::var("RUSTCAST_DATA_PATH").unwrap_or_else(|_| "data/market.csv".to_string());

        let python_exec = env::var("PYTHON_EXEC").unwrap_or_else(|_| "python".to_string());

        let prediction_window = env::var("PREDICTION_WINDOW")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u32>()
            .context("Failed to parse PREDICTION_WINDOW")?;

        let anomaly_threshold_str =
            env::var("ANOMALY_THRESHOLD").unwrap_or_else(|_| "0.5".to_string());
        let anomaly_threshold = Decimal::from_str(&anomaly_threshold_str)
            .context("Failed to parse ANOMALY_THRESHOLD")?;

        let default_feature =
            env::var("DEFAULT_FEATURE").unwrap_or_else(|_| "bid_price".to_string());

        let cloud_model_url = env::var("CLOUD_MODEL_URL")
            .unwrap_or_else(|_| "http://localhost:9000/predict".to_string());

        let backend_timeout_secs = env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| "600".to_string())
            .parse::<u64>()
            .context("Failed to parse BACKEND_TIMEOUT_SECS")?;

        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("Failed to parse HTTP_TIMEOUT_SECS")?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/rustcast.db".to_string());

        Ok(Config {
            local_script_path,
            local_data_path,
            python_exec,
            prediction_window,
            anomaly_threshold,
            default_feature,
            cloud_model_url,
            backend_timeout_secs,
            http_timeout_secs,
            database_url,
        })
    }
}
