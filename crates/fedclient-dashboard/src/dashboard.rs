//! Terminal dashboard for browsing completed training sessions.
//!
//! A ratatui front end over [`App`]. Fetches run on the blocking pool and
//! report back over a channel; the loop redraws on every tick and applies
//! outcomes as they arrive.
//!
//! Launch with `fedclient` or `fedclient tui --route /Results`.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState, Paragraph,
        Row, Table, Wrap,
    },
    Frame, Terminal,
};
use tokio::sync::mpsc;

use fedclient_api::{spawn_detail_fetch, spawn_list_fetch, FetchOutcome, TrainingBackend};
use fedclient_results::{
    Fragment, ResultsError, ResultsListView, Series, SessionDetailScreen, SessionDetailView,
    NO_TRAININGS_NOTICE, SESSION_MISSING_NOTICE,
};
use fedclient_protocol::RoundLabel;
use fedclient_state::LoadState;

use crate::app::{App, FetchRequest};
use crate::router::Route;

const WELCOME_TITLE: &str = "Welcome to FedClient";
const WELCOME_TEXT: &str = "This is Client Application to simulate Federated Learning";

/// Series drawn for the current selection. Colours are picked once per
/// selection so the line does not change colour on every tick.
#[derive(Default)]
struct SeriesCache {
    key: Option<(String, Option<String>)>,
    series: Vec<Series>,
}

impl SeriesCache {
    fn series_for(&mut self, route: &Route, view: &SessionDetailView) -> &[Series] {
        let key = (route.path(), view.chart.selected().map(str::to_string));
        if self.key.as_ref() != Some(&key) {
            self.series = view.chart.datasets();
            self.key = Some(key);
        }
        &self.series
    }
}

struct Dashboard {
    app: App,
    series: SeriesCache,
}

impl Dashboard {
    fn render(&mut self, frame: &mut Frame) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Page
                Constraint::Length(3), // Key hints
            ])
            .split(frame.area());

        self.render_status_bar(frame, outer[0]);
        match self.app.route().clone() {
            Route::Home => self.render_home(frame, outer[1]),
            Route::Results => self.render_results(frame, outer[1]),
            route @ Route::SessionDetail(_) => self.render_detail(frame, outer[1], &route),
            Route::About => self.render_about(frame, outer[1]),
            Route::NotFound(path) => self.render_not_found(frame, outer[1], &path),
        }
        self.render_footer(frame, outer[2]);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" FedClient ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let updated = self
            .app
            .last_update()
            .map(|ts| ts.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        let status_line = Line::from(vec![
            Span::styled("  Page: ", Style::default().fg(Color::Gray)),
            Span::styled(self.app.route().title(), Style::default().fg(Color::White)),
            Span::styled("  |  Route: ", Style::default().fg(Color::Gray)),
            Span::styled(self.app.route().path(), Style::default().fg(Color::LightCyan)),
            Span::styled("  |  Backend: ", Style::default().fg(Color::Gray)),
            Span::styled(self.app.backend_label(), Style::default().fg(Color::Magenta)),
            Span::styled("  |  Updated: ", Style::default().fg(Color::Gray)),
            Span::styled(updated, Style::default().fg(Color::Green)),
        ]);

        frame.render_widget(Paragraph::new(status_line).block(block), area);
    }

    fn render_home(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Home ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {WELCOME_TITLE}"),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {WELCOME_TEXT}"),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
        ];

        match self.app.identity() {
            Some(identity) if !identity.is_unregistered() => {
                lines.push(field_line("Client", identity.client_name.clone()));
                lines.push(field_line("Client ID", identity.client_id.clone()));
                if let Some(path) = &identity.data_path {
                    lines.push(field_line("Data path", path.display().to_string()));
                }
            }
            _ => lines.push(Line::from(Span::styled(
                "  Client not registered. Set [client] in the config file.",
                Style::default().fg(Color::DarkGray),
            ))),
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Completed Trainings ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue));

        let cards = match self.app.list() {
            LoadState::Loading => {
                frame.render_widget(notice("Loading...", Color::DarkGray).block(block), area);
                return;
            }
            LoadState::Ready(ResultsListView::Empty) => {
                frame.render_widget(notice(NO_TRAININGS_NOTICE, Color::Yellow).block(block), area);
                return;
            }
            LoadState::Ready(ResultsListView::Cards(cards)) => cards,
        };

        let items: Vec<ListItem> = cards
            .iter()
            .map(|card| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        format!("  {}", card.title()),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", card.subtitle()),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.app.list_cursor()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_detail(&mut self, frame: &mut Frame, area: Rect, route: &Route) {
        let block = Block::default()
            .title(" Training Details ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue));

        let view = match self.app.detail() {
            LoadState::Loading => {
                frame.render_widget(notice("Loading...", Color::DarkGray).block(block), area);
                return;
            }
            LoadState::Ready(SessionDetailScreen::NotFound) => {
                frame.render_widget(notice(SESSION_MISSING_NOTICE, Color::Red).block(block), area);
                return;
            }
            LoadState::Ready(SessionDetailScreen::Malformed(err)) => {
                let lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("  {SESSION_MISSING_NOTICE}"),
                        Style::default().fg(Color::Red),
                    )),
                    Line::from(Span::styled(format!("  {err}"), Style::default().fg(Color::DarkGray))),
                ];
                frame.render_widget(Paragraph::new(lines).block(block), area);
                return;
            }
            LoadState::Ready(SessionDetailScreen::Loaded(view)) => view,
        };

        let table_height = (view.table.rows.len() as u16).saturating_add(3).min(12);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),            // Identity
                Constraint::Length(table_height), // Round table
                Constraint::Min(8),               // Chart + details
            ])
            .split(area);

        render_identity(frame, rows[0], view);
        render_round_table(frame, rows[1], view);

        let detail_trees = view.details();
        let bottom = if detail_trees.is_some() {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(rows[2])
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(100)])
                .split(rows[2])
        };

        let series = self.series.series_for(route, view);
        render_chart(frame, bottom[0], view, series);

        if let Some(trees) = detail_trees {
            let mut lines = tree_section("Model Information", &trees.model_info);
            lines.push(Line::from(""));
            lines.extend(tree_section("Dataset Information", &trees.dataset_info));
            let block = Block::default()
                .title(format!(" {} ", view.toggle.label()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow));
            let paragraph = Paragraph::new(lines)
                .block(block)
                .scroll((self.app.detail_scroll(), 0));
            frame.render_widget(paragraph, bottom[1]);
        }
    }

    fn render_about(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" About ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White));
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  FedClient",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from("  Browse completed federated training sessions, their per-round"),
            Line::from("  test metrics, and the model and dataset configuration they ran with."),
        ];
        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
    }

    fn render_not_found(&self, frame: &mut Frame, area: Rect, path: &str) {
        let block = Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Error 404...",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  No such Page Available",
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(format!("  {path}"), Style::default().fg(Color::DarkGray))),
            Line::from(""),
            Line::from(Span::styled(
                "  Press h to go back home",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.app.route() {
            Route::Results => "Up/Down select  |  Enter expand  |  ",
            Route::SessionDetail(_) => "m/M metric  |  d details  |  PgUp/PgDn scroll  |  ",
            _ => "",
        };
        let line = Line::from(Span::styled(
            format!("  {hints}h home  |  r results  |  a about  |  Esc back  |  q quit"),
            Style::default().fg(Color::DarkGray),
        ));
        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

fn field_line(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label}: "), Style::default().fg(Color::Gray)),
        Span::styled(value.into(), Style::default().fg(Color::White)),
    ])
}

fn notice(text: &str, color: Color) -> Paragraph<'_> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {text}"), Style::default().fg(color))),
    ])
}

fn render_identity(frame: &mut Frame, area: Rect, view: &SessionDetailView) {
    let lines = vec![
        field_line("Organisation", view.organisation_name.clone()),
        field_line("Model", view.model_name.clone()),
    ];
    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_round_table(frame: &mut Frame, area: Rect, view: &SessionDetailView) {
    let header_cells = view.table.header();
    let widths: Vec<Constraint> = header_cells
        .iter()
        .map(|_| Constraint::Ratio(1, header_cells.len().max(1) as u32))
        .collect();

    let header = Row::new(header_cells)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = view
        .table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.display_label()];
            cells.extend(row.display_cells());
            Row::new(cells)
        })
        .collect();

    let title = if view.table.is_aligned() {
        " Round Results ".to_string()
    } else if view.table.unmatched.is_empty() {
        " Round Results (some rounds lack metrics) ".to_string()
    } else {
        format!(" Round Results ({} unmatched) ", view.table.unmatched.len())
    };
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(table, area);
}

fn render_chart(frame: &mut Frame, area: Rect, view: &SessionDetailView, series: &[Series]) {
    let chart_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4), Constraint::Length(2)])
        .split(area);

    frame.render_widget(Paragraph::new(metric_selector(view)), chart_area[0]);

    let block = Block::default()
        .title(" Metrics Overview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let Some(series) = series.first() else {
        frame.render_widget(
            notice("Select a metric with m / M", Color::DarkGray).block(block),
            chart_area[1],
        );
        return;
    };

    let points = series.plotted();
    let segments = series.segments();
    let labels: Vec<String> = view.chart.labels().into_iter().map(axis_label).collect();
    let x_max = labels.len().saturating_sub(1).max(1) as f64;
    let (low, high) = padded_bounds(series.value_bounds());
    let color = Color::Rgb(series.color.r, series.color.g, series.color.b);

    // One dataset per run of defined rounds; a lone point has no line to draw.
    let datasets: Vec<Dataset> = segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let dataset = Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(if segment.len() > 1 {
                    GraphType::Line
                } else {
                    GraphType::Scatter
                })
                .style(Style::default().fg(color))
                .data(segment);
            if index == 0 {
                dataset.name(series.label.clone())
            } else {
                dataset
            }
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([low, high])
                .labels(vec![format!("{low:.3}"), format!("{high:.3}")]),
        );
    frame.render_widget(chart, chart_area[1]);

    let tooltips: Vec<String> = points.iter().map(|&(_, value)| series.tooltip(value)).collect();
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            tooltips.join("  "),
            Style::default().fg(Color::DarkGray),
        )))
        .wrap(Wrap { trim: true }),
        chart_area[2],
    );
}

/// Compact x-axis label: the round number when the label carries one.
fn axis_label(label: &RoundLabel) -> String {
    label
        .number()
        .map(|number| number.to_string())
        .unwrap_or_else(|| label.to_string())
}

fn metric_selector(view: &SessionDetailView) -> Line<'static> {
    let selected = view.chart.selected_position();
    let mut spans = vec![Span::styled(" Metric: ", Style::default().fg(Color::Gray))];
    for (position, option) in view.chart.options().into_iter().enumerate() {
        let style = if position == selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", option.label), style));
    }
    Line::from(spans)
}

fn padded_bounds(bounds: Option<(f64, f64)>) -> (f64, f64) {
    match bounds {
        None => (0.0, 1.0),
        Some((low, high)) if (high - low).abs() < f64::EPSILON => (low - 0.5, high + 0.5),
        Some((low, high)) => {
            let pad = (high - low) * 0.05;
            (low - pad, high + pad)
        }
    }
}

fn tree_section(title: &str, tree: &Result<Fragment, ResultsError>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!(" {title}"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))];
    match tree {
        Ok(fragment) => lines.extend(
            fragment
                .lines()
                .into_iter()
                .map(|line| Line::from(format!("  {line}"))),
        ),
        Err(err) => lines.push(Line::from(Span::styled(
            format!("  {err}"),
            Style::default().fg(Color::Red),
        ))),
    }
    lines
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn dispatch(
    request: FetchRequest,
    backend: &Arc<dyn TrainingBackend>,
    tx: &mpsc::UnboundedSender<FetchOutcome>,
) {
    match request {
        FetchRequest::CompletedTrainings(token) => {
            spawn_list_fetch(Arc::clone(backend), token, tx.clone());
        }
        FetchRequest::TrainingResult { session_id, token } => {
            spawn_detail_fetch(Arc::clone(backend), session_id, token, tx.clone());
        }
    }
}

/// Run the dashboard event loop until the user quits.
pub async fn run_dashboard(
    app: App,
    backend: Arc<dyn TrainingBackend>,
    tick_rate: Duration,
    initial_route: Route,
) -> Result<(), anyhow::Error> {
    use std::io::IsTerminal;
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(anyhow::anyhow!(
            "Dashboard requires a terminal (TTY). Use `fedclient list` or `fedclient show` instead."
        ));
    }

    // Set up panic hook to restore terminal.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut dashboard = Dashboard {
        app,
        series: SeriesCache::default(),
    };

    let result = event_loop(&mut terminal, &mut dashboard, &backend, tick_rate, initial_route);

    restore_terminal(&mut terminal)?;
    if let Some(identity) = dashboard.app.shutdown() {
        tracing::debug!(client_id = %identity.client_id, "Client identity store released");
    }
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    dashboard: &mut Dashboard,
    backend: &Arc<dyn TrainingBackend>,
    tick_rate: Duration,
    initial_route: Route,
) -> Result<(), anyhow::Error> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();
    if let Some(request) = dashboard.app.navigate(initial_route) {
        dispatch(request, backend, &tx);
    }

    while !dashboard.app.should_quit() {
        while let Ok(outcome) = rx.try_recv() {
            dashboard.app.apply(outcome);
        }

        terminal.draw(|frame| dashboard.render(frame))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    if let Some(request) =
                        dashboard.app.handle_key(key_event.code, key_event.modifiers)
                    {
                        dispatch(request, backend, &tx);
                    }
                }
            }
        }
    }
    Ok(())
}
