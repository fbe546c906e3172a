use rust_decimal::Decimal;

/// Derive the anomaly flag from a reported confidence score.
///
/// A score strictly below the threshold is anomalous; a score exactly at the
/// threshold is not. When the backend reported no score the flag stays
/// absent — the record keeps its tri-state meaning instead of defaulting to
/// `false`.
pub fn classify(confidence: Option<Decimal>, threshold: Decimal) -> Option<bool> {
    confidence.map(|score| score < threshold)
}
