use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::ROUND_LABEL_PREFIX;
use crate::error::ProtocolError;

/// One completed training run as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub org_name: String,
}

/// Envelope returned by the completed-trainings endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletedTrainings {
    #[serde(default)]
    pub results: Vec<SessionSummary>,
}

/// Descriptive data recorded for a session.
///
/// `model_info` and `dataset_info` are arbitrary nested JSON and are only
/// ever rendered generically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub organisation_name: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub model_info: Value,
    #[serde(default)]
    pub dataset_info: Value,
}

/// Full result payload for one session.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDetail {
    pub session_data: SessionData,
    #[serde(default)]
    pub test_results: TestResults,
}

/// Outcome of the training-result endpoint.
///
/// The backend answers an unknown session with a 200 status and either an
/// empty object or a lone `message` explaining there are no results.
#[derive(Debug, Clone)]
pub enum DetailPayload {
    Missing,
    Found(Box<SessionDetail>),
}

impl DetailPayload {
    /// Classify a decoded response body. Emptiness is judged by key count.
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        match &value {
            Value::Object(map) if map.is_empty() => Ok(Self::Missing),
            Value::Object(map)
                if map.contains_key("message") && !map.contains_key("session_data") =>
            {
                Ok(Self::Missing)
            }
            Value::Object(_) => {
                let detail: SessionDetail = serde_json::from_value(value)?;
                Ok(Self::Found(Box::new(detail)))
            }
            other => Err(ProtocolError::UnexpectedShape {
                found: json_kind(other),
            }),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Label of a training round, normally `"round <n>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundLabel(String);

impl RoundLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Round number when the label has the `round <n>` shape.
    pub fn number(&self) -> Option<u32> {
        let trimmed = self.0.trim();
        let head = trimmed.get(..ROUND_LABEL_PREFIX.len())?;
        if !head.eq_ignore_ascii_case(ROUND_LABEL_PREFIX) {
            return None;
        }
        trimmed[ROUND_LABEL_PREFIX.len()..].trim().parse().ok()
    }
}

impl std::fmt::Display for RoundLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metric snapshot for a single round, in source key order.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub label: RoundLabel,
    pub metrics: Vec<(String, f64)>,
}

impl RoundResult {
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|(metric, _)| metric == name)
            .map(|(_, value)| *value)
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|(name, _)| name.as_str())
    }
}

/// Round-by-round metrics keyed by round label.
///
/// Iteration order is the order of the keys in the source document, which
/// the backend writes chronologically.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct TestResults {
    rounds: Vec<RoundResult>,
}

impl TestResults {
    pub fn from_rounds(rounds: Vec<RoundResult>) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self) -> &[RoundResult] {
        &self.rounds
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoundResult> {
        self.rounds.iter()
    }

    /// The round the table header is derived from.
    pub fn first(&self) -> Option<&RoundResult> {
        self.rounds.first()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

impl TryFrom<Map<String, Value>> for TestResults {
    type Error = ProtocolError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut rounds = Vec::with_capacity(map.len());
        for (round, metrics) in map {
            let Value::Object(metrics) = metrics else {
                return Err(ProtocolError::InvalidRound { round });
            };
            let mut values = Vec::with_capacity(metrics.len());
            for (metric, value) in metrics {
                let Some(number) = value.as_f64() else {
                    return Err(ProtocolError::InvalidMetric { round, metric });
                };
                values.push((metric, number));
            }
            rounds.push(RoundResult {
                label: RoundLabel(round),
                metrics: values,
            });
        }
        Ok(Self::from_rounds(rounds))
    }
}

impl<'a> IntoIterator for &'a TestResults {
    type Item = &'a RoundResult;
    type IntoIter = std::slice::Iter<'a, RoundResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rounds.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
