//! View lifetime tokens.
//!
//! Every mounted view receives a [`ViewToken`]. Mounting another view or
//! tearing the current one down retires the token, so a response that
//! arrives after navigation can be recognised and dropped instead of
//! overwriting state that now belongs to a different view.

/// Views that own a fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewKind {
    ResultsList,
    SessionDetail(String),
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResultsList => write!(f, "results-list"),
            Self::SessionDetail(id) => write!(f, "session-detail:{id}"),
        }
    }
}

/// Proof that a request was issued by a particular mount of a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewToken {
    view: ViewKind,
    generation: u64,
}

impl ViewToken {
    pub fn view(&self) -> &ViewKind {
        &self.view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Issues and validates view tokens. Only the most recent mount is current.
#[derive(Debug, Default)]
pub struct ViewLifetime {
    generation: u64,
    current: Option<ViewToken>,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `view`, retiring any previously issued token.
    pub fn mount(&mut self, view: ViewKind) -> ViewToken {
        self.generation += 1;
        let token = ViewToken {
            view,
            generation: self.generation,
        };
        tracing::trace!(view = %token.view, generation = token.generation, "View mounted");
        self.current = Some(token.clone());
        token
    }

    /// Tear down the current view without mounting a new one.
    pub fn teardown(&mut self) {
        if let Some(token) = self.current.take() {
            tracing::trace!(view = %token.view, generation = token.generation, "View torn down");
        }
    }

    pub fn is_current(&self, token: &ViewToken) -> bool {
        self.current.as_ref() == Some(token)
    }

    pub fn current(&self) -> Option<&ViewToken> {
        self.current.as_ref()
    }
}

/// Fetch-backed view state.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Loading
    }
}
