//! Session detail projection.

use serde_json::Value;

use fedclient_protocol::{DetailPayload, SessionDetail};

use crate::chart::MetricsChart;
use crate::table::RoundTable;
use crate::tree::{render_tree, Fragment, TreeLimits};
use crate::ResultsError;

#[derive(Debug, Clone, Copy, Default)]
pub struct DetailOptions {
    pub limits: TreeLimits,
    /// Reject payloads whose rounds do not share the first round's metric keys.
    pub strict_table: bool,
}

/// Binary visibility of the nested model/dataset trees. Hidden on mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailsToggle {
    visible: bool,
}

impl DetailsToggle {
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn label(&self) -> &'static str {
        if self.visible {
            "Hide Details"
        } else {
            "Show Details"
        }
    }
}

/// Rendered configuration trees. Each degrades independently when too deep.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailTrees {
    pub model_info: Result<Fragment, ResultsError>,
    pub dataset_info: Result<Fragment, ResultsError>,
}

#[derive(Debug, Clone)]
pub struct SessionDetailView {
    pub organisation_name: String,
    pub model_name: String,
    pub table: RoundTable,
    pub chart: MetricsChart,
    pub toggle: DetailsToggle,
    model_info: Value,
    dataset_info: Value,
    limits: TreeLimits,
}

impl SessionDetailView {
    pub fn from_detail(detail: SessionDetail, options: &DetailOptions) -> Result<Self, ResultsError> {
        let table = if options.strict_table {
            RoundTable::strict(&detail.test_results)?
        } else {
            RoundTable::build(&detail.test_results)
        };
        let SessionDetail {
            session_data,
            test_results,
        } = detail;

        Ok(Self {
            organisation_name: session_data.organisation_name,
            model_name: session_data.model_name,
            table,
            chart: MetricsChart::new(test_results),
            toggle: DetailsToggle::default(),
            model_info: session_data.model_info,
            dataset_info: session_data.dataset_info,
            limits: options.limits,
        })
    }

    pub fn toggle_details(&mut self) {
        self.toggle.toggle();
    }

    /// The nested trees, or `None` while the details are hidden.
    pub fn details(&self) -> Option<DetailTrees> {
        if !self.toggle.is_visible() {
            return None;
        }
        Some(DetailTrees {
            model_info: render_tree(&self.model_info, 0, &self.limits),
            dataset_info: render_tree(&self.dataset_info, 0, &self.limits),
        })
    }
}

/// What the detail route shows once its fetch has settled.
#[derive(Debug, Clone)]
pub enum SessionDetailScreen {
    NotFound,
    /// The payload violated the strict table shape.
    Malformed(ResultsError),
    Loaded(Box<SessionDetailView>),
}

impl SessionDetailScreen {
    pub fn from_payload(payload: DetailPayload, options: &DetailOptions) -> Self {
        match payload {
            DetailPayload::Missing => Self::NotFound,
            DetailPayload::Found(detail) => match SessionDetailView::from_detail(*detail, options) {
                Ok(view) => Self::Loaded(Box::new(view)),
                Err(err) => {
                    tracing::warn!(error = %err, "Session results rejected");
                    Self::Malformed(err)
                }
            },
        }
    }

    pub fn view(&self) -> Option<&SessionDetailView> {
        match self {
            Self::Loaded(view) => Some(view),
            _ => None,
        }
    }

    pub fn view_mut(&mut self) -> Option<&mut SessionDetailView> {
        match self {
            Self::Loaded(view) => Some(view),
            _ => None,
        }
    }
}
