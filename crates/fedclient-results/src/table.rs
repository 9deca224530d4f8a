//! Round Results table.
//!
//! Columns come from the first round's metric set. Each later round is
//! re-aligned by metric name, so a round that omits a metric shows an
//! empty cell instead of shifting its neighbours. Metrics that never
//! appear in the first round have no column and are reported separately.
//! [`RoundTable::strict`] refuses any round whose key set or order differs.

use fedclient_protocol::{RoundLabel, TestResults};

use crate::format::{capitalize_first, format_value};
use crate::ResultsError;

/// A metric present in a round but absent from the header round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedMetric {
    pub round: String,
    pub metric: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: RoundLabel,
    pub cells: Vec<Option<f64>>,
}

impl TableRow {
    pub fn display_label(&self) -> String {
        capitalize_first(self.label.as_str())
    }

    pub fn display_cells(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell| cell.map(format_value).unwrap_or_default())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoundTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    pub unmatched: Vec<UnmatchedMetric>,
}

impl RoundTable {
    /// Build the table, re-aligning every round by metric name.
    pub fn build(results: &TestResults) -> Self {
        let columns = header_metrics(results);
        let mut unmatched = Vec::new();

        let rows = results
            .iter()
            .map(|round| {
                for name in round.metric_names() {
                    if !columns.iter().any(|c| c == name) {
                        unmatched.push(UnmatchedMetric {
                            round: round.label.to_string(),
                            metric: name.to_string(),
                        });
                    }
                }
                TableRow {
                    label: round.label.clone(),
                    cells: columns.iter().map(|c| round.metric(c)).collect(),
                }
            })
            .collect();

        if !unmatched.is_empty() {
            tracing::debug!(
                count = unmatched.len(),
                "Round metrics outside the header round were left out of the table"
            );
        }

        Self {
            columns,
            rows,
            unmatched,
        }
    }

    /// Build the table, failing if any round deviates from the header round.
    pub fn strict(results: &TestResults) -> Result<Self, ResultsError> {
        let expected = header_metrics(results);
        for round in results {
            let found: Vec<String> = round.metric_names().map(str::to_string).collect();
            if found != expected {
                return Err(ResultsError::ShapeMismatch {
                    round: round.label.to_string(),
                    expected,
                    found,
                });
            }
        }
        Ok(Self::build(results))
    }

    /// Header labels, starting with the round column.
    pub fn header(&self) -> Vec<String> {
        std::iter::once("Round".to_string())
            .chain(self.columns.iter().map(|c| capitalize_first(c)))
            .collect()
    }

    pub fn is_aligned(&self) -> bool {
        self.unmatched.is_empty() && self.rows.iter().all(|row| row.cells.iter().all(Option::is_some))
    }
}

fn header_metrics(results: &TestResults) -> Vec<String> {
    results
        .first()
        .map(|round| round.metric_names().map(str::to_string).collect())
        .unwrap_or_default()
}
