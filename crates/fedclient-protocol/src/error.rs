use thiserror::Error;

/// Errors raised while decoding backend payloads.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("round '{round}' is not an object of metrics")]
    InvalidRound { round: String },

    #[error("metric '{metric}' in round '{round}' is not a number")]
    InvalidMetric { round: String, metric: String },

    #[error("expected a JSON object, found {found}")]
    UnexpectedShape { found: &'static str },

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}
