//! Dashboard TUI state and rendering.
//!
//! Four views over one loaded bundle: the form-plus-prediction overview, the
//! ranked coefficient table, the synthetic diagnostic charts, and key help.
//! Every field change re-runs the align-and-predict pass synchronously; the
//! bundle itself is immutable for the life of the dashboard.

use consumo::bundle::ModelBundle;
use consumo::diagnostics::DiagnosticSeries;
use consumo::record::{bounds, CustomerRecord, DeviceType, NetworkType, PaymentMethod, PlanType, Region};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Dataset, Gauge, GraphType, Paragraph, Row, Table, Tabs,
    },
    Frame,
};
use std::path::PathBuf;

/// Active tab in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum DashboardTab {
    #[default]
    Overview,
    Coefficients,
    Diagnostics,
    Help,
}

impl DashboardTab {
    pub(crate) fn titles() -> Vec<&'static str> {
        vec![
            "Overview [1]",
            "Coefficients [2]",
            "Diagnostics [3]",
            "Help [4]",
        ]
    }

    pub(crate) fn index(self) -> usize {
        match self {
            DashboardTab::Overview => 0,
            DashboardTab::Coefficients => 1,
            DashboardTab::Diagnostics => 2,
            DashboardTab::Help => 3,
        }
    }

    pub(crate) fn from_index(index: usize) -> Self {
        match index {
            0 => DashboardTab::Overview,
            1 => DashboardTab::Coefficients,
            2 => DashboardTab::Diagnostics,
            _ => DashboardTab::Help,
        }
    }
}

/// One editable row of the customer form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Age,
    Tenure,
    Recharge,
    Calls,
    Sms,
    Support,
    Speed,
    Roaming,
    Device,
    Plan,
    Network,
    Region,
    Payment,
}

impl FormField {
    fn label(self) -> &'static str {
        match self {
            FormField::Age => "Customer Age",
            FormField::Tenure => "Tenure (months)",
            FormField::Recharge => "Monthly Recharge",
            FormField::Calls => "Call Minutes",
            FormField::Sms => "SMS Count",
            FormField::Support => "Support Calls",
            FormField::Speed => "Internet Speed (Mbps)",
            FormField::Roaming => "Roaming Usage (GB)",
            FormField::Device => "Device Type",
            FormField::Plan => "Plan Type",
            FormField::Network => "Network Type",
            FormField::Region => "Region",
            FormField::Payment => "Payment Method",
        }
    }

    fn value_text(self, record: &CustomerRecord) -> String {
        match self {
            FormField::Age => format!("{:.0}", record.customer_age),
            FormField::Tenure => format!("{:.0}", record.tenure_months),
            FormField::Recharge => format!("{:.0}", record.monthly_recharge),
            FormField::Calls => format!("{:.0}", record.call_minutes),
            FormField::Sms => format!("{:.0}", record.sms_count),
            FormField::Support => format!("{:.0}", record.support_calls),
            FormField::Speed => format!("{:.0}", record.internet_speed_mbps),
            FormField::Roaming => format!("{:.1}", record.roaming_usage_gb),
            FormField::Device => record.device_type.to_string(),
            FormField::Plan => record.plan_type.to_string(),
            FormField::Network => record.network_type.to_string(),
            FormField::Region => record.region.to_string(),
            FormField::Payment => record.payment_method.to_string(),
        }
    }

    /// Step a numeric field or cycle a choice field by `direction` (+1/-1).
    fn adjust(self, record: &mut CustomerRecord, direction: i32) {
        let delta = direction as f32;
        match self {
            FormField::Age => record.customer_age += delta,
            FormField::Tenure => record.tenure_months += delta,
            FormField::Recharge => record.monthly_recharge += 50.0 * delta,
            FormField::Calls => record.call_minutes += 10.0 * delta,
            FormField::Sms => record.sms_count += 5.0 * delta,
            FormField::Support => record.support_calls += delta,
            FormField::Roaming => record.roaming_usage_gb += 0.5 * delta,
            FormField::Speed => {
                record.internet_speed_mbps = cycle(
                    &bounds::INTERNET_SPEED_CHOICES,
                    record.internet_speed_mbps,
                    direction,
                );
            }
            FormField::Device => {
                record.device_type = cycle(&DeviceType::ALL, record.device_type, direction);
            }
            FormField::Plan => {
                record.plan_type = cycle(&PlanType::ALL, record.plan_type, direction);
            }
            FormField::Network => {
                record.network_type = cycle(&NetworkType::ALL, record.network_type, direction);
            }
            FormField::Region => {
                record.region = cycle(&Region::ALL, record.region, direction);
            }
            FormField::Payment => {
                record.payment_method = cycle(&PaymentMethod::ALL, record.payment_method, direction);
            }
        }
        *record = record.clamped();
    }
}

/// Next element of `all` in `direction`, wrapping at both ends.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, direction: i32) -> T {
    let len = all.len() as i32;
    let pos = all.iter().position(|v| *v == current).unwrap_or(0) as i32;
    all[(pos + direction).rem_euclid(len) as usize]
}

/// Dashboard application state
pub(crate) struct App {
    bundle: ModelBundle,
    artifacts_dir: PathBuf,
    record: CustomerRecord,
    fields: Vec<FormField>,
    selected: usize,
    current_tab: DashboardTab,
    prediction: Option<f32>,
    diagnostics: Option<DiagnosticSeries>,
    ranked: Vec<(String, f32)>,
    status: Option<String>,
    pub(crate) should_quit: bool,
}

impl App {
    pub(crate) fn new(bundle: ModelBundle, artifacts_dir: PathBuf) -> Self {
        let mut fields = vec![
            FormField::Age,
            FormField::Tenure,
            FormField::Recharge,
            FormField::Calls,
            FormField::Sms,
            FormField::Support,
            FormField::Speed,
            FormField::Roaming,
            FormField::Device,
            FormField::Plan,
            FormField::Network,
            FormField::Region,
        ];
        if bundle.schema().has_field("payment_method") {
            fields.push(FormField::Payment);
        }
        let ranked = bundle.ranked_coefficients().unwrap_or_default();

        let mut app = Self {
            bundle,
            artifacts_dir,
            record: CustomerRecord::default(),
            fields,
            selected: 0,
            current_tab: DashboardTab::default(),
            prediction: None,
            diagnostics: None,
            ranked,
            status: None,
            should_quit: false,
        };
        app.refresh_prediction();
        app
    }

    /// Re-run the align-and-predict pass for the current record.
    fn refresh_prediction(&mut self) {
        match self.bundle.predict(&self.record) {
            Ok(prediction) => {
                let seed = u64::from(prediction.to_bits());
                self.prediction = Some(prediction);
                self.diagnostics = Some(DiagnosticSeries::synthesize(prediction, seed));
                self.status = None;
            }
            Err(e) => {
                self.prediction = None;
                self.diagnostics = None;
                self.status = Some(e.to_string());
            }
        }
    }

    fn next_tab(&mut self) {
        let next = (self.current_tab.index() + 1) % DashboardTab::titles().len();
        self.current_tab = DashboardTab::from_index(next);
    }

    fn prev_tab(&mut self) {
        let len = DashboardTab::titles().len();
        let prev = (self.current_tab.index() + len - 1) % len;
        self.current_tab = DashboardTab::from_index(prev);
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.fields.len();
    }

    fn select_prev(&mut self) {
        self.selected = (self.selected + self.fields.len() - 1) % self.fields.len();
    }

    fn adjust_selected(&mut self, direction: i32) {
        self.fields[self.selected].adjust(&mut self.record, direction);
        self.refresh_prediction();
    }

    fn reset(&mut self) {
        self.record = CustomerRecord::default();
        self.refresh_prediction();
    }

    pub(crate) fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.next_tab(),
            KeyCode::BackTab => self.prev_tab(),
            KeyCode::Char('1') => self.current_tab = DashboardTab::Overview,
            KeyCode::Char('2') => self.current_tab = DashboardTab::Coefficients,
            KeyCode::Char('3') => self.current_tab = DashboardTab::Diagnostics,
            KeyCode::Char('4') | KeyCode::Char('?') => self.current_tab = DashboardTab::Help,
            KeyCode::Char('r') => self.reset(),
            KeyCode::Down | KeyCode::Char('j') if self.current_tab == DashboardTab::Overview => {
                self.select_next();
            }
            KeyCode::Up | KeyCode::Char('k') if self.current_tab == DashboardTab::Overview => {
                self.select_prev();
            }
            KeyCode::Left | KeyCode::Char('h') if self.current_tab == DashboardTab::Overview => {
                self.adjust_selected(-1);
            }
            KeyCode::Right | KeyCode::Char('l') if self.current_tab == DashboardTab::Overview => {
                self.adjust_selected(1);
            }
            _ => {}
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the dashboard
pub(crate) fn ui(f: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_tabs(f, chunks[0], app);

    match app.current_tab {
        DashboardTab::Overview => render_overview(f, chunks[1], app),
        DashboardTab::Coefficients => render_coefficients(f, chunks[1], app),
        DashboardTab::Diagnostics => render_diagnostics(f, chunks[1], app),
        DashboardTab::Help => render_help(f, chunks[1]),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_tabs(f: &mut Frame<'_>, area: Rect, app: &App) {
    let titles: Vec<Line<'_>> = DashboardTab::titles().iter().map(|t| Line::from(*t)).collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Data Usage Prediction Dashboard "),
        )
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn render_overview(f: &mut Frame<'_>, area: Rect, app: &App) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_form(f, halves[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Prediction
            Constraint::Length(6), // Metric gauges
            Constraint::Min(0),    // Bundle info
        ])
        .split(halves[1]);

    render_prediction(f, right[0], app);
    render_metrics(f, right[1], app);
    render_bundle_info(f, right[2], app);
}

fn render_form(f: &mut Frame<'_>, area: Rect, app: &App) {
    let rows: Vec<Row<'_>> = app
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let marker = if i == app.selected { "› " } else { "  " };
            let style = if i == app.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{marker}{}", field.label())),
                Cell::from(field.value_text(&app.record)),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(26), Constraint::Min(10)])
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Customer Attributes "),
        );

    f.render_widget(table, area);
}

fn render_prediction(f: &mut Frame<'_>, area: Rect, app: &App) {
    let mut lines = Vec::new();
    match app.prediction {
        Some(prediction) => {
            let style = if prediction < 0.0 {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(Span::styled(
                format!("{prediction:.2} GB"),
                style,
            )));
            if prediction < 0.0 {
                lines.push(Line::from(Span::styled(
                    "below zero: the linear model is unconstrained",
                    Style::default().fg(Color::Yellow),
                )));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "unavailable",
                Style::default().fg(Color::Red),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Predicted Monthly Data Usage "),
    );
    f.render_widget(paragraph, area);
}

fn render_metrics(f: &mut Frame<'_>, area: Rect, app: &App) {
    let Some(metrics) = app.bundle.metrics() else {
        let paragraph = Paragraph::new("No metrics recorded in model artifact")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(" Model Fit "));
        f.render_widget(paragraph, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    let r2 = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(f64::from(metrics.r_squared).clamp(0.0, 1.0))
        .label(format!("R² {:.2}", metrics.r_squared));
    f.render_widget(r2, rows[0]);

    let adjusted = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(f64::from(metrics.adjusted_r_squared).clamp(0.0, 1.0))
        .label(format!("Adjusted R² {:.2}", metrics.adjusted_r_squared));
    f.render_widget(adjusted, rows[1]);
}

fn render_bundle_info(f: &mut Frame<'_>, area: Rect, app: &App) {
    let payment = if app.bundle.schema().has_field("payment_method") {
        "yes"
    } else {
        "no"
    };
    let lines = vec![
        info_line("Artifacts:  ", app.artifacts_dir.display().to_string()),
        info_line("Features:   ", app.bundle.n_features().to_string()),
        info_line(
            "Intercept:  ",
            format!("{:.2}", app.bundle.model().intercept()),
        ),
        info_line("Payment:    ", format!("{payment} (schema-driven)")),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Bundle "));
    f.render_widget(paragraph, area);
}

fn info_line(key: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(key, Style::default().fg(Color::Cyan)),
        Span::raw(value),
    ])
}

fn render_coefficients(f: &mut Frame<'_>, area: Rect, app: &App) {
    let header = Row::new(vec![
        Cell::from("Feature").style(Style::default().fg(Color::Cyan)),
        Cell::from("Coefficient").style(Style::default().fg(Color::Cyan)),
    ])
    .height(1)
    .bottom_margin(1);

    let rows: Vec<Row<'_>> = app
        .ranked
        .iter()
        .map(|(column, coefficient)| {
            let value_style = if *coefficient < 0.0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![
                Cell::from(column.as_str()),
                Cell::from(format!("{coefficient:>10.4}")).style(value_style),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Min(28), Constraint::Length(12)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Coefficients (sorted by |value|) "),
        );

    f.render_widget(table, area);
}

fn render_diagnostics(f: &mut Frame<'_>, area: Rect, app: &App) {
    let Some(series) = &app.diagnostics else {
        let paragraph = Paragraph::new("No prediction available to illustrate")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(" Diagnostics "));
        f.render_widget(paragraph, area);
        return;
    };

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_residual_chart(f, halves[0], series);
    render_qq_chart(f, halves[1], series);
}

fn render_residual_chart(f: &mut Frame<'_>, area: Rect, series: &DiagnosticSeries) {
    let x_max = series
        .residuals_vs_fitted
        .last()
        .map_or(1.0, |(x, _)| *x)
        .max(1.0);
    let y_max = (series.residual_extent() * 1.2).max(1.0);
    let zero_line = [(0.0, 0.0), (x_max, 0.0)];

    let datasets = vec![
        Dataset::default()
            .name("residuals")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Cyan))
            .data(&series.residuals_vs_fitted),
        Dataset::default()
            .name("zero")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&zero_line),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Residuals vs Fitted "),
        )
        .x_axis(
            Axis::default()
                .title("Fitted (GB)")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(axis_labels(0.0, x_max)),
        )
        .y_axis(
            Axis::default()
                .title("Residual")
                .style(Style::default().fg(Color::Gray))
                .bounds([-y_max, y_max])
                .labels(axis_labels(-y_max, y_max)),
        );

    f.render_widget(chart, area);
}

fn render_qq_chart(f: &mut Frame<'_>, area: Rect, series: &DiagnosticSeries) {
    let x_max = series
        .normal_qq
        .iter()
        .map(|(t, _)| t.abs())
        .fold(1.0, f64::max)
        * 1.1;
    let y_max = series
        .normal_qq
        .iter()
        .map(|(_, r)| r.abs())
        .fold(1.0, f64::max)
        * 1.1;

    let datasets = vec![Dataset::default()
        .name("quantiles")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Magenta))
        .data(&series.normal_qq)];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(" Normal Q-Q "))
        .x_axis(
            Axis::default()
                .title("Theoretical quantile")
                .style(Style::default().fg(Color::Gray))
                .bounds([-x_max, x_max])
                .labels(axis_labels(-x_max, x_max)),
        )
        .y_axis(
            Axis::default()
                .title("Ordered residual")
                .style(Style::default().fg(Color::Gray))
                .bounds([-y_max, y_max])
                .labels(axis_labels(-y_max, y_max)),
        );

    f.render_widget(chart, area);
}

fn axis_labels(lo: f64, hi: f64) -> Vec<String> {
    let mid = (lo + hi) / 2.0;
    vec![
        format!("{lo:.1}"),
        format!("{mid:.1}"),
        format!("{hi:.1}"),
    ]
}

fn render_help(f: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(""),
        help_line("Up/Down, j/k", "select form field"),
        help_line("Left/Right, h/l", "adjust value (step or cycle)"),
        help_line("Tab / BackTab", "next / previous view"),
        help_line("1-4", "jump to view"),
        help_line("r", "reset form to defaults"),
        help_line("q, Esc", "quit"),
        Line::from(""),
        Line::from("  Numeric fields clamp to their bounds; the speed field"),
        Line::from("  cycles its choice set. Every change re-runs the model."),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(paragraph, area);
}

fn help_line(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {keys:<18}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(action),
    ])
}

fn render_status_bar(f: &mut Frame<'_>, area: Rect, app: &App) {
    let line = match &app.status {
        Some(status) => Line::from(Span::styled(
            format!(" prediction failed: {status} "),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            format!(
                " {} │ ↑/↓ field  ←/→ adjust  Tab views  r reset  q quit ",
                app.artifacts_dir.display()
            ),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use consumo::demo::{write_demo_bundle, DemoVariant};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::TempDir;

    fn test_app(variant: DemoVariant) -> App {
        let dir = TempDir::new().unwrap();
        write_demo_bundle(dir.path(), variant).unwrap();
        let bundle = ModelBundle::load(dir.path()).unwrap();
        App::new(bundle, dir.path().to_path_buf())
    }

    fn select_field(app: &mut App, field: FormField) {
        let target = app.fields.iter().position(|f| *f == field).unwrap();
        app.selected = target;
    }

    #[test]
    fn test_tab_index_roundtrip() {
        for tab in [
            DashboardTab::Overview,
            DashboardTab::Coefficients,
            DashboardTab::Diagnostics,
            DashboardTab::Help,
        ] {
            assert_eq!(DashboardTab::from_index(tab.index()), tab);
        }
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let mut app = test_app(DemoVariant::Core);
        for _ in 0..DashboardTab::titles().len() {
            app.on_key(KeyCode::Tab);
        }
        assert_eq!(app.current_tab, DashboardTab::Overview);
        app.on_key(KeyCode::BackTab);
        assert_eq!(app.current_tab, DashboardTab::Help);
    }

    #[test]
    fn test_payment_row_is_schema_driven() {
        let core = test_app(DemoVariant::Core);
        assert_eq!(core.fields.len(), 12);
        assert!(!core.fields.contains(&FormField::Payment));

        let payment = test_app(DemoVariant::Payment);
        assert_eq!(payment.fields.len(), 13);
        assert!(payment.fields.contains(&FormField::Payment));
    }

    #[test]
    fn test_initial_prediction_is_available() {
        let app = test_app(DemoVariant::Core);
        assert!(app.prediction.is_some());
        assert!(app.diagnostics.is_some());
        assert!(app.status.is_none());
        assert!(app.prediction.unwrap() >= 0.0);
    }

    #[test]
    fn test_recharge_step_raises_prediction() {
        let mut app = test_app(DemoVariant::Core);
        select_field(&mut app, FormField::Recharge);
        let before = app.prediction.unwrap();
        app.on_key(KeyCode::Right);
        assert_eq!(app.record.monthly_recharge, 550.0);
        assert!(app.prediction.unwrap() > before);
    }

    #[test]
    fn test_numeric_field_clamps_at_lower_bound() {
        let mut app = test_app(DemoVariant::Core);
        select_field(&mut app, FormField::Age);
        for _ in 0..20 {
            app.on_key(KeyCode::Left);
        }
        assert_eq!(app.record.customer_age, 18.0);
    }

    #[test]
    fn test_speed_cycles_through_choices() {
        let mut app = test_app(DemoVariant::Core);
        select_field(&mut app, FormField::Speed);
        app.on_key(KeyCode::Right);
        assert_eq!(app.record.internet_speed_mbps, 20.0);
        app.on_key(KeyCode::Left);
        app.on_key(KeyCode::Left);
        assert_eq!(app.record.internet_speed_mbps, 200.0);
    }

    #[test]
    fn test_enum_field_cycles() {
        let mut app = test_app(DemoVariant::Core);
        select_field(&mut app, FormField::Device);
        app.on_key(KeyCode::Right);
        assert_eq!(app.record.device_type, DeviceType::Ios);
        app.on_key(KeyCode::Right);
        app.on_key(KeyCode::Right);
        assert_eq!(app.record.device_type, DeviceType::Android);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut app = test_app(DemoVariant::Core);
        select_field(&mut app, FormField::Recharge);
        app.on_key(KeyCode::Right);
        app.on_key(KeyCode::Right);
        assert_ne!(app.record, CustomerRecord::default());

        app.on_key(KeyCode::Char('r'));
        assert_eq!(app.record, CustomerRecord::default());
        assert!(app.prediction.is_some());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app(DemoVariant::Core);
        app.on_key(KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = test_app(DemoVariant::Core);
        app.on_key(KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_all_tabs_no_panic() {
        for variant in [DemoVariant::Core, DemoVariant::Payment] {
            let mut app = test_app(variant);
            let backend = TestBackend::new(120, 40);
            let mut terminal = Terminal::new(backend).unwrap();
            for tab in 0..DashboardTab::titles().len() {
                app.current_tab = DashboardTab::from_index(tab);
                terminal.draw(|f| ui(f, &app)).unwrap();
            }
        }
    }

    #[test]
    fn test_render_survives_small_terminal() {
        let app = test_app(DemoVariant::Core);
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();
    }

    #[test]
    fn test_overview_frame_shows_prediction_unit() {
        let app = test_app(DemoVariant::Core);
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect();
        assert!(content.contains("GB"));
    }
}
