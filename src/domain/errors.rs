use thiserror::Error;

/// Errors from the local model subprocess.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to launch model process {script}: {source}")]
    Spawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    #[error("model process timed out after {timeout_secs}s")]
    TimedOut { timeout_secs: u64 },

    #[error("model process exit code: {exit_code}, output: {output}")]
    NonZeroExit { exit_code: i32, output: String },

    #[error("model returned error: {output}")]
    ReportedError { output: String },
}

/// Errors from the remote prediction endpoint.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("cloud endpoint request failed: {reason}")]
    Transport { reason: String },

    #[error("cloud endpoint returned empty response")]
    EmptyResponse,

    #[error("cloud endpoint returned malformed response: {reason}")]
    Malformed { reason: String },
}

/// Caller-facing failure of an orchestration run.
///
/// Carries the original message only; component error types stop here.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("local prediction failed: {0}")]
    Local(String),

    #[error("cloud prediction failed: {0}")]
    Cloud(String),

    #[error("anomaly detection failed: {0}")]
    AnomalyDetection(String),
}
