//! Completed-trainings list projection.

use fedclient_protocol::SessionSummary;
use url::Url;

use crate::DETAIL_ROUTE_PREFIX;

const SEGMENT_BASE: &str = "http://localhost/";

/// Percent-encode `segment` as a single URL path segment, the same way
/// the backend client encodes session ids.
pub fn encode_path_segment(segment: &str) -> String {
    let Ok(mut url) = Url::parse(SEGMENT_BASE) else {
        return segment.to_string();
    };
    if let Ok(mut parts) = url.path_segments_mut() {
        parts.clear().push(segment);
    }
    url.path().trim_start_matches('/').to_string()
}

/// Client-side route of a session's detail view.
pub fn detail_route(session_id: &str) -> String {
    format!("{DETAIL_ROUTE_PREFIX}{}", encode_path_segment(session_id))
}

/// One card in the results list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCard {
    pub session_id: String,
    pub org_name: String,
}

impl SessionCard {
    pub fn title(&self) -> &str {
        &self.org_name
    }

    pub fn subtitle(&self) -> String {
        format!("SessionID: {}", self.session_id)
    }

    /// Route the card's "Expand" action navigates to.
    pub fn detail_route(&self) -> String {
        detail_route(&self.session_id)
    }
}

impl From<SessionSummary> for SessionCard {
    fn from(summary: SessionSummary) -> Self {
        Self {
            session_id: summary.session_id,
            org_name: summary.org_name,
        }
    }
}

/// The results list: either a single notice or one card per session,
/// in server response order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsListView {
    Empty,
    Cards(Vec<SessionCard>),
}

impl ResultsListView {
    pub fn from_summaries(summaries: Vec<SessionSummary>) -> Self {
        if summaries.is_empty() {
            return Self::Empty;
        }
        Self::Cards(summaries.into_iter().map(SessionCard::from).collect())
    }

    pub fn cards(&self) -> &[SessionCard] {
        match self {
            Self::Empty => &[],
            Self::Cards(cards) => cards,
        }
    }

    pub fn card(&self, index: usize) -> Option<&SessionCard> {
        self.cards().get(index)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Default for ResultsListView {
    fn default() -> Self {
        Self::Empty
    }
}
