//! Single-shot HTTP client for the remote prediction model.

use crate::config::Config;
use crate::domain::errors::RemoteError;
use reqwest::Client;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Duration;

pub struct CloudModelClient {
    client: Client,
    config: Arc<Config>,
}

impl CloudModelClient {
    /// The client carries explicit request and connect timeouts and no
    /// retry layer: a failed round trip surfaces to the orchestrator as-is.
    pub fn new(config: Arc<Config>) -> Self {
        let client = Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// One POST to the configured endpoint; the response must be a JSON
    /// object.
    pub async fn predict(
        &self,
        symbol: &str,
        algorithm: &str,
    ) -> Result<Map<String, Value>, RemoteError> {
        let request = json!({
            "symbol": symbol,
            "algorithm": algorithm,
            "prediction_window": self.config.prediction_window,
        });

        let response = self
            .client
            .post(&self.config.cloud_model_url)
            .json(&request)
            .send()
            .await
            .map_err(|err| RemoteError::Transport {
                reason: err.to_string(),
            })?
            .error_for_status()
            .map_err(|err| RemoteError::Transport {
                reason: err.to_string(),
            })?;

        let body = response.text().await.map_err(|err| RemoteError::Transport {
            reason: err.to_string(),
        })?;
        if body.trim().is_empty() {
            return Err(RemoteError::EmptyResponse);
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|err| RemoteError::Malformed {
                reason: err.to_string(),
            })?;
        match value {
            Value::Null => Err(RemoteError::EmptyResponse),
            Value::Object(map) => Ok(map),
            other => Err(RemoteError::Malformed {
                reason: format!("expected JSON object, got {other}"),
            }),
        }
    }
}
