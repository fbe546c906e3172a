use serde::Serialize;

/// Descriptive metadata for one prediction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub kind: &'static str,
    pub input_shape: &'static str,
}

/// The registry is a data table: adding an algorithm is a new entry here,
/// not a new branch anywhere else. Order is significant for display.
static ALGORITHMS: &[AlgorithmInfo] = &[
    AlgorithmInfo {
        name: "SINGLE_LSTM",
        display_name: "Single-feature LSTM",
        description: "LSTM time-series model over a single feature",
        kind: "deep-learning",
        input_shape: "univariate series",
    },
    AlgorithmInfo {
        name: "SINGLE_TRANSFORMER",
        display_name: "Single-feature Transformer",
        description: "Transformer time-series model over a single feature",
        kind: "deep-learning",
        input_shape: "univariate series",
    },
    AlgorithmInfo {
        name: "SERIAL_LSTM_TRANSFORMER",
        display_name: "Serial hybrid (LSTM then Transformer)",
        description: "LSTM encoder feeding a Transformer in series",
        kind: "deep-learning hybrid",
        input_shape: "univariate or low-dimensional series",
    },
    AlgorithmInfo {
        name: "FUSION_LSTM_TRANSFORMER",
        display_name: "Feature-fusion hybrid with learned positional encoding",
        description: "Multivariate input fused across LSTM and Transformer branches",
        kind: "deep-learning hybrid",
        input_shape: "multivariate series",
    },
];

/// Algorithm identifiers in registry order.
pub fn algorithms() -> Vec<&'static str> {
    ALGORITHMS.iter().map(|info| info.name).collect()
}

/// Metadata for one identifier, matched case-insensitively.
/// Unknown identifiers are "not found", not an error.
pub fn describe(name: &str) -> Option<&'static AlgorithmInfo> {
    ALGORITHMS
        .iter()
        .find(|info| info.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_preserves_registry_order() {
        assert_eq!(
            algorithms(),
            vec![
                "SINGLE_LSTM",
                "SINGLE_TRANSFORMER",
                "SERIAL_LSTM_TRANSFORMER",
                "FUSION_LSTM_TRANSFORMER",
            ]
        );
    }

    #[test]
    fn describe_is_case_insensitive() {
        let lower = describe("single_lstm").expect("known algorithm");
        let upper = describe("SINGLE_LSTM").expect("known algorithm");
        assert_eq!(lower, upper);
        assert_eq!(lower.name, "SINGLE_LSTM");
    }

    #[test]
    fn describe_unknown_is_absent() {
        assert!(describe("unknown").is_none());
    }
}
