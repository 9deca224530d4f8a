//! Dashboard application state.
//!
//! Owns navigation, the per-view load states, and the view lifetime that
//! decides whether an arriving fetch outcome still belongs to the view on
//! screen. Rendering lives in [`crate::dashboard`]; this module has no
//! terminal dependency beyond key codes.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyModifiers};

use fedclient_api::{FetchOutcome, FetchResult};
use fedclient_results::{DetailOptions, ResultsListView, SessionDetailScreen};
use fedclient_state::{ClientIdentity, LoadState, TypedStore, ViewKind, ViewLifetime, ViewToken};

use crate::router::Route;

const CLIENT_IDENTITY_STORE: &str = "client-identity";
const SCROLL_STEP: u16 = 5;
const MAX_HISTORY: usize = 64;

/// A fetch the runtime must start on behalf of the mounted view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    CompletedTrainings(ViewToken),
    TrainingResult { session_id: String, token: ViewToken },
}

pub struct App {
    lifetime: ViewLifetime,
    identity: TypedStore<ClientIdentity>,
    options: DetailOptions,
    backend_label: String,
    route: Route,
    history: Vec<Route>,
    list: LoadState<ResultsListView>,
    list_cursor: usize,
    detail: LoadState<SessionDetailScreen>,
    /// Scroll offset for the detail tree panel.
    detail_scroll: u16,
    last_update: Option<DateTime<Local>>,
    should_quit: bool,
}

impl App {
    pub fn new(identity: ClientIdentity, options: DetailOptions, backend_label: String) -> Self {
        let mut store = TypedStore::new(CLIENT_IDENTITY_STORE);
        if let Err(e) = store.initialize(identity) {
            tracing::warn!(error = %e, "Client identity store already initialized");
        }
        Self {
            lifetime: ViewLifetime::new(),
            identity: store,
            options,
            backend_label,
            route: Route::Home,
            history: Vec::new(),
            list: LoadState::Loading,
            list_cursor: 0,
            detail: LoadState::Loading,
            detail_scroll: 0,
            last_update: None,
            should_quit: false,
        }
    }

    /// Navigate to `route`, keeping the current route in history. Navigating
    /// to the route already shown remounts it without a new history entry.
    pub fn navigate(&mut self, route: Route) -> Option<FetchRequest> {
        if route != self.route {
            let previous = std::mem::replace(&mut self.route, route.clone());
            if self.history.len() == MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(previous);
        }
        tracing::debug!(route = %route, "Navigating");
        self.mount(route)
    }

    /// Return to the previous route. The view is mounted afresh.
    pub fn back(&mut self) -> Option<FetchRequest> {
        let route = self.history.pop()?;
        tracing::debug!(route = %route, "Navigating back");
        self.route = route.clone();
        self.mount(route)
    }

    fn mount(&mut self, route: Route) -> Option<FetchRequest> {
        self.lifetime.teardown();
        match route {
            Route::Results => {
                let token = self.lifetime.mount(ViewKind::ResultsList);
                self.list = LoadState::Loading;
                self.list_cursor = 0;
                Some(FetchRequest::CompletedTrainings(token))
            }
            Route::SessionDetail(session_id) => {
                let token = self.lifetime.mount(ViewKind::SessionDetail(session_id.clone()));
                self.detail = LoadState::Loading;
                self.detail_scroll = 0;
                Some(FetchRequest::TrainingResult { session_id, token })
            }
            Route::Home | Route::About | Route::NotFound(_) => None,
        }
    }

    /// Apply a fetch outcome. Returns `false` when it was discarded as stale.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let FetchOutcome { token, result } = outcome;
        if !self.lifetime.is_current(&token) {
            tracing::debug!(
                view = %token.view(),
                generation = token.generation(),
                "Discarding fetch outcome for a view that is no longer mounted"
            );
            return false;
        }

        match (token.view(), result) {
            (ViewKind::ResultsList, FetchResult::Trainings(result)) => {
                let summaries = result.unwrap_or_default();
                self.list = LoadState::Ready(ResultsListView::from_summaries(summaries));
                self.list_cursor = 0;
            }
            (ViewKind::SessionDetail(_), FetchResult::Detail(result)) => {
                let screen = match result {
                    Ok(payload) => SessionDetailScreen::from_payload(payload, &self.options),
                    Err(_) => SessionDetailScreen::NotFound,
                };
                self.detail = LoadState::Ready(screen);
            }
            (view, _) => {
                tracing::warn!(view = %view, "Fetch outcome does not match the requesting view");
                return false;
            }
        }
        self.last_update = Some(Local::now());
        true
    }

    /// Handle a key press. Returns a fetch request when navigation mounts a view.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<FetchRequest> {
        match (code, modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), _) => {
                self.should_quit = true;
                None
            }
            (KeyCode::Char('h'), _) => self.navigate(Route::Home),
            (KeyCode::Char('r'), _) => self.navigate(Route::Results),
            (KeyCode::Char('a'), _) => self.navigate(Route::About),
            (KeyCode::Backspace, _) | (KeyCode::Esc, _) => self.back(),
            _ => match self.route {
                Route::Results => self.handle_results_key(code),
                Route::SessionDetail(_) => {
                    self.handle_detail_key(code);
                    None
                }
                _ => None,
            },
        }
    }

    fn handle_results_key(&mut self, code: KeyCode) -> Option<FetchRequest> {
        let count = self.list.ready().map(|list| list.cards().len()).unwrap_or(0);
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.list_cursor = self.list_cursor.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.list_cursor + 1 < count {
                    self.list_cursor += 1;
                }
                None
            }
            KeyCode::Enter => {
                let session_id = self
                    .list
                    .ready()
                    .and_then(|list| list.card(self.list_cursor))
                    .map(|card| card.session_id.clone())?;
                self.navigate(Route::SessionDetail(session_id))
            }
            _ => None,
        }
    }

    fn handle_detail_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(SCROLL_STEP),
            KeyCode::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(SCROLL_STEP),
            _ => {}
        }
        let Some(view) = self.detail.ready_mut().and_then(SessionDetailScreen::view_mut) else {
            return;
        };
        match code {
            KeyCode::Char('d') => {
                view.toggle_details();
                self.detail_scroll = 0;
            }
            KeyCode::Char('m') | KeyCode::Right => view.chart.select_next(),
            KeyCode::Char('M') | KeyCode::Left => view.chart.select_previous(),
            _ => {}
        }
    }

    /// Tear down the mounted view and release the scoped stores.
    pub fn shutdown(&mut self) -> Option<ClientIdentity> {
        self.lifetime.teardown();
        self.identity.teardown()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn identity(&self) -> Option<&ClientIdentity> {
        self.identity.get()
    }

    pub fn backend_label(&self) -> &str {
        &self.backend_label
    }

    pub fn list(&self) -> &LoadState<ResultsListView> {
        &self.list
    }

    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    pub fn detail(&self) -> &LoadState<SessionDetailScreen> {
        &self.detail
    }

    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
