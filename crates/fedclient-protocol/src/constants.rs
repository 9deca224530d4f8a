/// Backend address used when no configuration overrides it.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Lists every completed training session.
pub const COMPLETED_TRAININGS_PATH: &str = "/get-all-completed-trainings";

/// Detail payload for one session; the session id is appended as a path segment.
pub const TRAINING_RESULT_PATH: &str = "/get-training-result";

/// Prefix of every round label in `test_results`.
pub const ROUND_LABEL_PREFIX: &str = "round";
