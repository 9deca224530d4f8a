//! Blocking client for the completed-trainings and training-result endpoints.

use std::time::Duration;

use url::Url;

use fedclient_protocol::{
    CompletedTrainings, DetailPayload, SessionSummary, COMPLETED_TRAININGS_PATH,
    DEFAULT_BACKEND_URL, TRAINING_RESULT_PATH,
};

use crate::http::{build_agent, read_response_bytes};
use crate::ApiError;

/// Backend connection settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Largest response body accepted.
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            max_body_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Source of training results.
///
/// Calls block; the dashboard runs them on the blocking pool.
pub trait TrainingBackend: Send + Sync {
    /// Every completed training session, in server order.
    fn completed_trainings(&self) -> Result<Vec<SessionSummary>, ApiError>;

    /// Full result payload for one session.
    fn training_result(&self, session_id: &str) -> Result<DetailPayload, ApiError>;
}

pub struct ApiClient {
    base_url: Url,
    agent: ureq::Agent,
    max_body_bytes: usize,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: config.base_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            base_url,
            agent: build_agent(config.connect_timeout, config.read_timeout),
            max_body_bytes: config.max_body_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path plus extra path segments against the base URL.
    /// Segments are percent-encoded individually.
    pub fn endpoint(&self, path: &str, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut parts = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?;
            parts.pop_if_empty();
            parts.extend(path.split('/').filter(|s| !s.is_empty()));
            parts.extend(segments);
        }
        Ok(url)
    }

    fn get_json(&self, url: &Url) -> Result<serde_json::Value, ApiError> {
        let response = self.agent.get(url.as_str()).call()?;
        if response.status() != 200 {
            return Err(ApiError::Status {
                code: response.status(),
            });
        }
        let bytes = read_response_bytes(response, self.max_body_bytes)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl TrainingBackend for ApiClient {
    fn completed_trainings(&self) -> Result<Vec<SessionSummary>, ApiError> {
        let url = self.endpoint(COMPLETED_TRAININGS_PATH, &[])?;
        tracing::debug!(url = %url, "Fetching completed trainings");
        let body = self.get_json(&url)?;
        let trainings: CompletedTrainings =
            serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        tracing::debug!(count = trainings.results.len(), "Completed trainings fetched");
        Ok(trainings.results)
    }

    fn training_result(&self, session_id: &str) -> Result<DetailPayload, ApiError> {
        let url = self.endpoint(TRAINING_RESULT_PATH, &[session_id])?;
        tracing::debug!(url = %url, "Fetching training result");
        let body = self.get_json(&url)?;
        Ok(DetailPayload::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::tests::serve_once;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    fn json_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn endpoint_joins_path_and_encodes_segments() {
        let api = client("http://localhost:8000");
        let url = api.endpoint(TRAINING_RESULT_PATH, &["a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/get-training-result/a%20b%2Fc");

        let prefixed = client("http://host/api/");
        let url = prefixed.endpoint(COMPLETED_TRAININGS_PATH, &[]).unwrap();
        assert_eq!(url.as_str(), "http://host/api/get-all-completed-trainings");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::new(&ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn completed_trainings_decodes_results() {
        let body = r#"{"results":[{"session_id":"s-1","org_name":"Acme"}]}"#;
        let base = serve_once(json_response("200 OK", body));
        let trainings = client(&base).completed_trainings().unwrap();
        assert_eq!(
            trainings,
            vec![SessionSummary {
                session_id: "s-1".into(),
                org_name: "Acme".into()
            }]
        );
    }

    #[test]
    fn error_status_is_reported() {
        let base = serve_once(json_response("500 Internal Server Error", "{}"));
        let err = client(&base).completed_trainings().unwrap_err();
        assert!(matches!(err, ApiError::Status { code: 500 }));
    }

    #[test]
    fn empty_detail_is_missing() {
        let base = serve_once(json_response("200 OK", "{}"));
        let payload = client(&base).training_result("unknown").unwrap();
        assert!(payload.is_missing());
    }

    #[test]
    fn no_results_message_is_missing() {
        let base = serve_once(json_response(
            "200 OK",
            r#"{"message": "No training results with this session_id"}"#,
        ));
        let payload = client(&base).training_result("nope").unwrap();
        assert!(payload.is_missing());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let base = serve_once(json_response("200 OK", "not json"));
        let err = client(&base).training_result("s-1").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn unreachable_backend_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = client(&format!("http://{addr}")).completed_trainings().unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
