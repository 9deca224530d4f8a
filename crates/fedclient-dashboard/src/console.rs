//! Plain-text rendering for the `list` and `show` commands.

use std::io::Write;

use fedclient_api::TrainingBackend;
use fedclient_protocol::DetailPayload;
use fedclient_results::{
    DetailOptions, Fragment, ResultsError, ResultsListView, RoundTable, SessionDetailScreen,
    SessionDetailView, NO_TRAININGS_NOTICE, SESSION_MISSING_NOTICE,
};

pub fn write_list(out: &mut impl Write, view: &ResultsListView) -> std::io::Result<()> {
    match view {
        ResultsListView::Empty => writeln!(out, "{NO_TRAININGS_NOTICE}"),
        ResultsListView::Cards(cards) => {
            for card in cards {
                writeln!(out, "{}", card.title())?;
                writeln!(out, "  {}", card.subtitle())?;
                writeln!(out, "  {}", card.detail_route())?;
            }
            Ok(())
        }
    }
}

/// Write a session's results. `metric` selects the series printed under
/// the table; `details` includes the configuration trees.
pub fn write_detail(
    out: &mut impl Write,
    screen: &mut SessionDetailScreen,
    metric: Option<&str>,
    details: bool,
) -> anyhow::Result<()> {
    let view = match screen {
        SessionDetailScreen::NotFound => {
            writeln!(out, "{SESSION_MISSING_NOTICE}")?;
            return Ok(());
        }
        SessionDetailScreen::Malformed(err) => {
            writeln!(out, "{SESSION_MISSING_NOTICE}")?;
            writeln!(out, "  {err}")?;
            return Ok(());
        }
        SessionDetailScreen::Loaded(view) => view,
    };

    view.chart.select(metric)?;

    writeln!(out, "Organisation: {}", view.organisation_name)?;
    writeln!(out, "Model: {}", view.model_name)?;
    writeln!(out)?;
    writeln!(out, "Round Results")?;
    write_table(out, &view.table)?;

    write_series(out, view)?;

    if details {
        view.toggle_details();
    }
    if let Some(trees) = view.details() {
        writeln!(out)?;
        write_tree(out, "Model Information", &trees.model_info)?;
        write_tree(out, "Dataset Information", &trees.dataset_info)?;
    }
    Ok(())
}

fn write_table(out: &mut impl Write, table: &RoundTable) -> std::io::Result<()> {
    let header = table.header();
    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.display_label()];
            cells.extend(row.display_cells());
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.len());
        }
    }

    write_row(out, &header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths)?;
    for cells in &body {
        write_row(out, cells, &widths)?;
    }
    if table.is_aligned() {
        return Ok(());
    }
    if table.unmatched.is_empty() {
        writeln!(out, "note: some rounds lack metrics")?;
    }
    for unmatched in &table.unmatched {
        writeln!(
            out,
            "note: metric '{}' in {} has no column",
            unmatched.metric, unmatched.round
        )?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, cells: &[String], widths: &[usize]) -> std::io::Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}

fn write_series(out: &mut impl Write, view: &SessionDetailView) -> std::io::Result<()> {
    let Some(series) = view.chart.datasets().into_iter().next() else {
        return Ok(());
    };
    writeln!(out)?;
    writeln!(out, "{}", series.label.to_uppercase())?;
    for (label, point) in view.chart.labels().into_iter().zip(&series.points) {
        match point {
            Some(value) => writeln!(out, "  {label}: {value:.3}")?,
            None => writeln!(out, "  {label}: (no value)")?,
        }
    }
    Ok(())
}

fn write_tree(
    out: &mut impl Write,
    title: &str,
    tree: &Result<Fragment, ResultsError>,
) -> std::io::Result<()> {
    writeln!(out, "{title}")?;
    match tree {
        Ok(fragment) => {
            for line in fragment.lines() {
                writeln!(out, "  {line}")?;
            }
        }
        Err(err) => writeln!(out, "  {err}")?,
    }
    Ok(())
}

/// Fetch the completed-trainings list. Failures degrade to the empty notice.
pub fn list_command(backend: &dyn TrainingBackend) -> ResultsListView {
    match backend.completed_trainings() {
        Ok(summaries) => ResultsListView::from_summaries(summaries),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch completed trainings");
            ResultsListView::Empty
        }
    }
}

/// Fetch one session. Failures degrade to the missing-session notice.
pub fn show_command(
    backend: &dyn TrainingBackend,
    session_id: &str,
    options: &DetailOptions,
) -> SessionDetailScreen {
    match backend.training_result(session_id) {
        Ok(payload) => SessionDetailScreen::from_payload(payload, options),
        Err(e) => {
            tracing::warn!(session_id = %session_id, error = %e, "Failed to fetch training result");
            SessionDetailScreen::from_payload(DetailPayload::Missing, options)
        }
    }
}
