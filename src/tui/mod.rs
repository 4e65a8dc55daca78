//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for choosing the observation start date
//! and the display smoothing toggle, then renders the KPI row and the three
//! macro charts. Changing either setting reruns the whole pipeline, fetches
//! included; nothing is cached between interactions.

use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{RunOutput, run_dashboard};
use crate::cli::ViewArgs;
use crate::data::FredClient;
use crate::domain::{
    COL_CPI_YOY, COL_REAL10Y, COL_UNEMPLOYMENT, DashboardConfig, SeriesId, default_start_date,
};
use crate::error::AppError;
use crate::io::export::EXPORT_FILE_NAME;
use crate::report::{chart_title, format_metric, kpi_row};

mod plotters_chart;

use plotters_chart::SeriesPlottersChart;

/// Start the TUI.
///
/// The credential gate runs before the terminal is put into raw mode, so a
/// missing API key surfaces as a normal error message, not a mangled screen.
pub fn run(args: ViewArgs) -> Result<(), AppError> {
    let client = FredClient::from_env()?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(client, args.config())?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

const FIELD_START_DATE: usize = 0;
const FIELD_SMOOTHING: usize = 1;

struct App {
    config: DashboardConfig,
    date_input: String,
    selected_field: usize,
    editing_date: bool,
    status: String,
    client: FredClient,
    run: Option<RunOutput>,
}

impl App {
    fn new(client: FredClient, config: DashboardConfig) -> Result<Self, AppError> {
        let mut app = Self {
            date_input: config.start_date.to_string(),
            config,
            selected_field: FIELD_START_DATE,
            editing_date: false,
            status: "Fetching data from FRED...".to_string(),
            client,
            run: None,
        };
        app.refresh()?;
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        if self.editing_date {
            return self.handle_date_edit(code);
        }

        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_SMOOTHING {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                if self.selected_field == FIELD_SMOOTHING {
                    self.config.smooth = !self.config.smooth;
                    // Settings changes rerun the whole pipeline.
                    self.refresh()?;
                    self.status = format!(
                        "smoothing: {}",
                        if self.config.smooth { "on" } else { "off" }
                    );
                }
            }
            KeyCode::Enter => {
                if self.selected_field == FIELD_START_DATE {
                    self.editing_date = true;
                    self.status =
                        "Editing start date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
                }
            }
            KeyCode::Char('r') => {
                self.refresh()?;
            }
            KeyCode::Char('e') => {
                self.export();
            }
            _ => {}
        }

        Ok(false)
    }

    fn handle_date_edit(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Esc => {
                self.editing_date = false;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_date = false;
                self.apply_date_input()?;
            }
            KeyCode::Backspace => {
                self.date_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' {
                    self.date_input.push(c);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn apply_date_input(&mut self) -> Result<(), AppError> {
        let trimmed = self.date_input.trim();
        if trimmed.is_empty() {
            self.config.start_date = default_start_date();
        } else {
            let date = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
                Ok(date) => date,
                Err(e) => {
                    self.status = format!("Invalid date '{trimmed}': {e}");
                    return Ok(());
                }
            };
            self.config.start_date = date;
        }
        self.date_input = self.config.start_date.to_string();
        self.refresh()
    }

    /// Rerun the full pipeline: three fetches, transforms, panel, display copy.
    fn refresh(&mut self) -> Result<(), AppError> {
        self.status = "Fetching data from FRED...".to_string();
        let run = run_dashboard(&self.client, &self.config)?;
        let n = run.panel.n_rows();
        self.run = Some(run);
        self.status = format!("Loaded {n} monthly rows.");
        Ok(())
    }

    fn export(&mut self) {
        let Some(run) = &self.run else {
            self.status = "No data to export.".to_string();
            return;
        };
        match crate::io::export::write_workbook(Path::new(EXPORT_FILE_NAME), run) {
            Ok(()) => self.status = format!("Wrote {EXPORT_FILE_NAME}."),
            Err(err) => self.status = format!("Export failed: {err}"),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("macrodash", Style::default().fg(Color::Cyan)),
            Span::raw(" — CPI (YoY), Unemployment, Real Rates | source: FRED"),
        ]));

        lines.push(Line::from(Span::styled(
            format!(
                "start: {} | smoothing: {}",
                self.config.start_date,
                if self.config.smooth { "3-month MA (display only)" } else { "off" },
            ),
            Style::default().fg(Color::Gray),
        )));

        let kpi_line = match self.run.as_ref().and_then(|r| kpi_row(&r.display)) {
            Some(kpi) => format!(
                "{}: CPI YoY {} | Unemployment {} | Real 10Y {}",
                kpi.date,
                format_metric(kpi.cpi_yoy),
                format_metric(kpi.unemployment),
                format_metric(kpi.real10y),
            ),
            None => "No data available yet for the selected period.".to_string(),
        };
        lines.push(Line::from(Span::styled(
            kpi_line,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(area);

        let charts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(chunks[0]);

        self.draw_series_chart(frame, charts[0], COL_CPI_YOY);
        self.draw_series_chart(frame, charts[1], COL_UNEMPLOYMENT);
        self.draw_series_chart(frame, charts[2], COL_REAL10Y);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_series_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, column: &str) {
        let block = Block::default().title(chart_title(column)).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let points = self
            .run
            .as_ref()
            .map(|r| r.display.column_points(column))
            .unwrap_or_default();

        let Some((line, x_bounds, y_bounds)) = chart_series(&points) else {
            let msg = Paragraph::new(format!("No data to display for {}.", chart_title(column)))
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let widget = SeriesPlottersChart {
            line: &line,
            x_bounds,
            y_bounds,
            x_label: "",
            y_label: "%",
            fmt_x: fmt_axis_year,
            fmt_y: fmt_axis_pct,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let date_label = if self.editing_date {
            format!("{}_", self.date_input)
        } else {
            self.config.start_date.to_string()
        };

        let items = vec![
            ListItem::new(format!("Start date: {date_label}")),
            ListItem::new(format!(
                "Smoothing:  {}",
                if self.config.smooth { "on (3-month MA)" } else { "off" }
            )),
            ListItem::new(format!(
                "Series:     {} (CPI index), {} (U-3), {} (10Y TIPS real yield)",
                SeriesId::Cpi.fred_id(),
                SeriesId::Unemployment.fred_id(),
                SeriesId::Real10y.fred_id(),
            )),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ toggle  Enter edit date  r refresh  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build the line series and padded bounds for one chart.
///
/// Returns `None` when there is nothing meaningful to draw.
fn chart_series(points: &[(NaiveDate, f64)]) -> Option<(Vec<(f64, f64)>, [f64; 2], [f64; 2])> {
    if points.is_empty() {
        return None;
    }

    let line: Vec<(f64, f64)> = points
        .iter()
        .map(|&(date, v)| (year_fraction(date), v))
        .collect();

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in &line {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return None;
    }

    // Degenerate ranges (single point, flat series) still need drawable bounds.
    if x_max - x_min < 1e-9 {
        x_min -= 0.5;
        x_max += 0.5;
    }
    let y_pad = ((y_max - y_min).abs() * 0.05).max(1e-9);
    Some((line, [x_min, x_max], [y_min - y_pad, y_max + y_pad]))
}

/// Month-resolution x coordinate: calendar year plus elapsed fraction.
fn year_fraction(date: NaiveDate) -> f64 {
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
    date.year() as f64 + date.ordinal0() as f64 / days_in_year
}

fn fmt_axis_year(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_pct(v: f64) -> String {
    format!("{v:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn year_fraction_is_monotonic_over_a_year() {
        let a = year_fraction(d(2024, 1, 31));
        let b = year_fraction(d(2024, 6, 30));
        let c = year_fraction(d(2024, 12, 31));
        assert!(a < b && b < c);
        assert!(c < 2025.0);
        assert!((year_fraction(d(2024, 1, 1)) - 2024.0).abs() < 1e-12);
    }

    #[test]
    fn chart_series_pads_degenerate_bounds() {
        let (line, x_bounds, y_bounds) = chart_series(&[(d(2024, 3, 31), 2.0)]).unwrap();
        assert_eq!(line.len(), 1);
        assert!(x_bounds[1] > x_bounds[0]);
        assert!(y_bounds[1] > y_bounds[0]);
    }

    #[test]
    fn chart_series_empty_input_is_none() {
        assert!(chart_series(&[]).is_none());
    }
}
