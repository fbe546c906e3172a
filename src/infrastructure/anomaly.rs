//! Baseline anomaly scorer.

use crate::config::Config;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Fixed-score stand-in for the dedicated anomaly model.
///
/// TODO: replace with an invocation of the exported detector once its model
/// artifact ships alongside the prediction scripts.
pub struct BaselineAnomalyScorer {
    config: Arc<Config>,
}

impl BaselineAnomalyScorer {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn score(&self, _symbol: &str, _algorithm: &str) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("is_anomaly".to_string(), Value::Bool(false));
        payload.insert("anomaly_score".to_string(), json!(0.15));
        payload.insert(
            "threshold".to_string(),
            json!(self.config.anomaly_threshold.to_f64().unwrap_or_default()),
        );
        payload
    }
}
