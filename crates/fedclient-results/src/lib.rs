//! FedClient Results - projections from backend payloads to view models
//!
//! Turns the completed-trainings list and a session's result payload into
//! renderer-independent view models:
//! - a card list (or an empty-state notice)
//! - a per-round metrics table
//! - a single-metric line chart driven by the current selection
//! - a recursive tree for arbitrarily nested model/dataset configuration

pub mod chart;
pub mod detail;
pub mod error;
pub mod format;
pub mod list;
pub mod table;
pub mod tree;

pub use chart::{MetricOption, MetricsChart, Series, SeriesColor};
pub use detail::{DetailOptions, DetailTrees, DetailsToggle, SessionDetailScreen, SessionDetailView};
pub use error::ResultsError;
pub use format::{capitalize_first, format_value};
pub use list::{detail_route, encode_path_segment, ResultsListView, SessionCard};
pub use table::{RoundTable, TableRow, UnmatchedMetric};
pub use tree::{render_tree, Fragment, KeyedEntry, TreeLimits, TreeLine};

/// Shown instead of the card list when no session is available.
pub const NO_TRAININGS_NOTICE: &str = "No Completed Trainings Available!!";

/// Shown instead of the detail view when the session cannot be loaded.
pub const SESSION_MISSING_NOTICE: &str = "SessionID Does Not exist!!";

/// Client-side route prefix of the session detail view.
pub const DETAIL_ROUTE_PREFIX: &str = "/TrainingResults/details/";
