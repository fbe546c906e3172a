//! Converts raw backend payloads into the canonical prediction skeleton.
//!
//! This is the only place allowed to interpret the untyped backend mapping.
//! Identity fields (symbol, algorithm, type, time) belong to the
//! orchestrator, not the payload.

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Canonical skeleton extracted from one raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPrediction {
    pub predicted_value: Option<Decimal>,
    pub confidence_score: Option<Decimal>,
}

pub fn normalize(payload: &Map<String, Value>) -> Result<NormalizedPrediction> {
    Ok(NormalizedPrediction {
        predicted_value: decimal_field(payload, "predicted_value")?,
        confidence_score: decimal_field(payload, "confidence_score")?,
    })
}

/// Backends report numbers as JSON numbers or numeric strings
/// interchangeably. Going through the string representation keeps either
/// form exact; no float round trip.
fn decimal_field(payload: &Map<String, Value>, key: &str) -> Result<Option<Decimal>> {
    let Some(value) = payload.get(key) else {
        return Ok(None);
    };

    let text = match value {
        Value::Null => return Ok(None),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => bail!("field '{}' is not numeric: {}", key, other),
    };

    let parsed = Decimal::from_str(text.trim())
        .with_context(|| format!("failed to parse '{}' as decimal: {}", key, text))?;
    Ok(Some(parsed))
}
