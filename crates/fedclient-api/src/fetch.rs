//! Fetches run on the blocking pool and report back over a channel.
//!
//! Each outcome carries the [`ViewToken`] of the view that asked for it.
//! The receiver decides whether that view is still mounted; nothing here
//! cancels, retries, or de-duplicates requests.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use fedclient_protocol::{DetailPayload, SessionSummary};
use fedclient_state::ViewToken;

use crate::{ApiError, TrainingBackend};

#[derive(Debug)]
pub enum FetchResult {
    Trainings(Result<Vec<SessionSummary>, ApiError>),
    Detail(Result<DetailPayload, ApiError>),
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub token: ViewToken,
    pub result: FetchResult,
}

/// Request the completed-trainings list for the view identified by `token`.
pub fn spawn_list_fetch(
    backend: Arc<dyn TrainingBackend>,
    token: ViewToken,
    tx: mpsc::UnboundedSender<FetchOutcome>,
) -> JoinHandle<()> {
    tracing::info!(view = %token.view(), generation = token.generation(), "Fetching completed trainings");
    tokio::task::spawn_blocking(move || {
        let result = backend.completed_trainings();
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Failed to fetch completed trainings");
        }
        deliver(&tx, token, FetchResult::Trainings(result));
    })
}

/// Request one session's result payload for the view identified by `token`.
pub fn spawn_detail_fetch(
    backend: Arc<dyn TrainingBackend>,
    session_id: String,
    token: ViewToken,
    tx: mpsc::UnboundedSender<FetchOutcome>,
) -> JoinHandle<()> {
    tracing::info!(session_id = %session_id, generation = token.generation(), "Fetching training result");
    tokio::task::spawn_blocking(move || {
        let result = backend.training_result(&session_id);
        if let Err(e) = &result {
            tracing::warn!(session_id = %session_id, error = %e, "Failed to fetch training result");
        }
        deliver(&tx, token, FetchResult::Detail(result));
    })
}

fn deliver(tx: &mpsc::UnboundedSender<FetchOutcome>, token: ViewToken, result: FetchResult) {
    if tx.send(FetchOutcome { token, result }).is_err() {
        tracing::debug!("Fetch outcome dropped: receiver closed");
    }
}
