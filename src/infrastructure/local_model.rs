//! Launches the local prediction model as a subprocess and parses its JSON
//! result.

use crate::config::Config;
use crate::domain::errors::BackendError;
use crate::domain::prediction::PredictionRequest;
use crate::infrastructure::paths::ModelPaths;
use serde_json::{Map, Value};
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Epochs requested from the model script on every run; training depth is
/// not caller-tunable.
const TRAINING_EPOCHS: u32 = 50;

pub struct LocalModelInvoker {
    config: Arc<Config>,
}

impl LocalModelInvoker {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Run the model script for one request.
    ///
    /// The script's stdout and stderr are folded into a single diagnostic
    /// buffer; only whole-buffer content matters downstream. The wait is
    /// bounded by `backend_timeout_secs` and the child is killed when it
    /// expires.
    pub async fn run(
        &self,
        request: &PredictionRequest,
    ) -> Result<Map<String, Value>, BackendError> {
        let symbol = request.symbol.as_str();
        let algorithm = request.algorithm.as_str();

        let paths = ModelPaths::resolve(
            Path::new(&self.config.local_script_path),
            Path::new(&self.config.local_data_path),
        )
        .map_err(|err| BackendError::Spawn {
            script: self.config.local_script_path.clone(),
            source: std::io::Error::other(format!("{err:#}")),
        })?;

        // Single-feature algorithms fall back to the configured default;
        // resolved here, never inside the subprocess.
        let used_feature = request
            .feature
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(self.config.default_feature.as_str())
            .to_string();

        debug!(
            "Launching model script {} for {}/{} (feature: {})",
            paths.script.display(),
            symbol,
            algorithm,
            used_feature
        );

        let child = Command::new(&self.config.python_exec)
            .arg(&paths.script)
            .arg("--data")
            .arg(&paths.data)
            .arg("--window")
            .arg(self.config.prediction_window.to_string())
            .arg("--epochs")
            .arg(TRAINING_EPOCHS.to_string())
            .arg("--out_dir")
            .arg(&paths.out_dir)
            .arg("--algorithm")
            .arg(algorithm)
            .arg("--feature")
            .arg(&used_feature)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BackendError::Spawn {
                script: paths.script.display().to_string(),
                source,
            })?;

        // Dropping the wait future on timeout kills the child via
        // kill_on_drop.
        let wait = timeout(
            Duration::from_secs(self.config.backend_timeout_secs),
            child.wait_with_output(),
        );
        let output = match wait.await {
            Ok(result) => result.map_err(|source| BackendError::Spawn {
                script: paths.script.display().to_string(),
                source,
            })?,
            Err(_) => {
                return Err(BackendError::TimedOut {
                    timeout_secs: self.config.backend_timeout_secs,
                });
            }
        };

        let mut buffer = String::from_utf8_lossy(&output.stdout).into_owned();
        buffer.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(BackendError::NonZeroExit {
                exit_code: output.status.code().unwrap_or(-1),
                output: buffer,
            });
        }

        let parsed: Value = match serde_json::from_str(buffer.trim()) {
            Ok(value) => value,
            Err(_) => return Err(BackendError::ReportedError { output: buffer }),
        };
        let Value::Object(mut map) = parsed else {
            return Err(BackendError::ReportedError { output: buffer });
        };
        // A clean exit does not clear a backend that says it failed.
        if map.contains_key("error") {
            return Err(BackendError::ReportedError { output: buffer });
        }

        // Back-fill identity keys without overwriting backend values.
        map.entry("algorithm")
            .or_insert_with(|| Value::String(algorithm.to_string()));
        map.entry("symbol")
            .or_insert_with(|| Value::String(symbol.to_string()));
        map.entry("feature")
            .or_insert_with(|| Value::String(used_feature));

        Ok(map)
    }
}
