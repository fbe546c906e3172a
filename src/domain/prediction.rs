use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionType {
    Price,
    Anomaly,
}

impl fmt::Display for PredictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionType::Price => write!(f, "price_prediction"),
            PredictionType::Anomaly => write!(f, "anomaly_detection"),
        }
    }
}

/// One prediction request as received from the caller. Constructed per call,
/// never mutated.
#[derive(Debug, Clone)]
pub struct PredictionRequest {
    pub symbol: String,
    pub algorithm: String,
    pub feature: Option<String>,
    pub prediction_type: PredictionType,
}

impl PredictionRequest {
    pub fn price(symbol: impl Into<String>, algorithm: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            algorithm: algorithm.into(),
            feature: None,
            prediction_type: PredictionType::Price,
        }
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }
}

/// The canonical prediction record, independent of which backend produced it.
///
/// `id` is assigned by the repository at save time. `is_anomaly` is `Some`
/// only when the backend reported a numeric confidence score; a missing
/// score must stay `None`, never collapse to `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub id: Option<String>,
    pub symbol: String,
    pub algorithm: String,
    pub prediction_type: String,
    pub prediction_time: DateTime<Utc>,
    pub predicted_value: Option<Decimal>,
    pub confidence_score: Option<Decimal>,
    pub is_anomaly: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_type_labels() {
        assert_eq!(PredictionType::Price.to_string(), "price_prediction");
        assert_eq!(PredictionType::Anomaly.to_string(), "anomaly_detection");
    }

    #[test]
    fn request_builder_defaults_to_no_feature() {
        let request = PredictionRequest::price("AAPL", "SINGLE_LSTM");
        assert!(request.feature.is_none());

        let request = request.with_feature("bid_price");
        assert_eq!(request.feature.as_deref(), Some("bid_price"));
    }
}
