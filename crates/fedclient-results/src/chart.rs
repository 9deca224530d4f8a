//! Single-metric line chart model.
//!
//! The selectable metrics are the union of every round's metric names (not
//! only the first round's), in first-appearance order. With no selection the
//! chart has no series; otherwise it has exactly one series with one point
//! per round, `None` where the round lacks the metric.

use rand::Rng;

use fedclient_protocol::{RoundLabel, TestResults};

use crate::ResultsError;

pub const METRIC_PLACEHOLDER: &str = "Select a Metric";
const SERIES_ALPHA: f32 = 0.4;

/// Line colour of a series. Chosen at random each time series are built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl SeriesColor {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
            alpha: SERIES_ALPHA,
        }
    }
}

impl std::fmt::Display for SeriesColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }
}

/// An entry of the metric selector. `value == None` is the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricOption {
    pub value: Option<String>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<Option<f64>>,
    pub color: SeriesColor,
}

impl Series {
    /// `(round index, value)` pairs for the rounds that carry the metric.
    pub fn plotted(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(index, point)| point.map(|value| (index as f64, value)))
            .collect()
    }

    /// Runs of consecutive defined points. A round without the metric ends
    /// the current run, so no line is drawn across it.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for (index, point) in self.points.iter().enumerate() {
            match point {
                Some(value) => current.push((index as f64, *value)),
                None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    /// Smallest and largest plotted value.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.points.iter().flatten().fold(None, |bounds, &value| match bounds {
            None => Some((value, value)),
            Some((low, high)) => Some((low.min(value), high.max(value))),
        })
    }

    /// Tooltip text for one point; display only, stored values keep full precision.
    pub fn tooltip(&self, value: f64) -> String {
        format!("{}: {:.3}", self.label, value)
    }
}

#[derive(Debug, Clone)]
pub struct MetricsChart {
    results: TestResults,
    metrics: Vec<String>,
    selected: Option<String>,
}

impl MetricsChart {
    pub fn new(results: TestResults) -> Self {
        let mut metrics: Vec<String> = Vec::new();
        for round in &results {
            for name in round.metric_names() {
                if !metrics.iter().any(|m| m == name) {
                    metrics.push(name.to_string());
                }
            }
        }
        Self {
            results,
            metrics,
            selected: None,
        }
    }

    /// Metric names offered for selection.
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    /// Selector entries: the placeholder followed by every metric.
    pub fn options(&self) -> Vec<MetricOption> {
        std::iter::once(MetricOption {
            value: None,
            label: METRIC_PLACEHOLDER.to_string(),
        })
        .chain(self.metrics.iter().map(|metric| MetricOption {
            value: Some(metric.clone()),
            label: metric.to_uppercase(),
        }))
        .collect()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a metric, or clear the selection with `None`.
    pub fn select(&mut self, metric: Option<&str>) -> Result<(), ResultsError> {
        match metric {
            None => self.selected = None,
            Some(name) if self.metrics.iter().any(|m| m == name) => {
                self.selected = Some(name.to_string());
            }
            Some(name) => return Err(ResultsError::UnknownMetric(name.to_string())),
        }
        Ok(())
    }

    /// Move the selection forward through the options, wrapping via the placeholder.
    pub fn select_next(&mut self) {
        let position = self.selected_position();
        let next = (position + 1) % (self.metrics.len() + 1);
        self.selected = self.option_at(next);
    }

    /// Move the selection backward through the options, wrapping via the placeholder.
    pub fn select_previous(&mut self) {
        let count = self.metrics.len() + 1;
        let position = self.selected_position();
        let previous = (position + count - 1) % count;
        self.selected = self.option_at(previous);
    }

    /// Index of the current selection within [`MetricsChart::options`].
    pub fn selected_position(&self) -> usize {
        self.selected
            .as_ref()
            .and_then(|s| self.metrics.iter().position(|m| m == s))
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    /// X-axis labels, one per round in round order.
    pub fn labels(&self) -> Vec<&RoundLabel> {
        self.results.iter().map(|round| &round.label).collect()
    }

    /// Series for the current selection, with a fresh random colour.
    pub fn datasets(&self) -> Vec<Series> {
        self.datasets_with(&mut rand::thread_rng())
    }

    pub fn datasets_with(&self, rng: &mut impl Rng) -> Vec<Series> {
        let Some(metric) = self.selected.as_deref() else {
            return Vec::new();
        };
        vec![Series {
            label: metric.to_string(),
            points: self.results.iter().map(|round| round.metric(metric)).collect(),
            color: SeriesColor::random(rng),
        }]
    }

    fn option_at(&self, position: usize) -> Option<String> {
        position
            .checked_sub(1)
            .and_then(|index| self.metrics.get(index))
            .cloned()
    }
}
