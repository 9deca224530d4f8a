use thiserror::Error;

/// Errors produced while projecting session results into view models.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResultsError {
    #[error("round '{round}' has metrics {found:?}, expected {expected:?}")]
    ShapeMismatch {
        round: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("unknown metric '{0}'")]
    UnknownMetric(String),

    #[error("structure too deep: nesting exceeds {limit} levels")]
    TooDeep { limit: usize },
}
