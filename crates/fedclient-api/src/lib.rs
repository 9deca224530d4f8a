//! FedClient API - access to the backend's training-result endpoints
//!
//! Provides a blocking HTTP client, the [`TrainingBackend`] seam the
//! dashboard fetches through, and helpers that run fetches off the UI
//! thread and deliver their outcomes tagged with the requesting view's
//! lifetime token.

pub mod client;
pub mod error;
pub mod fetch;
pub mod http;

pub use client::{ApiClient, ApiConfig, TrainingBackend};
pub use error::ApiError;
pub use fetch::{spawn_detail_fetch, spawn_list_fetch, FetchOutcome, FetchResult};
