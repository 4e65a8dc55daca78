//! Reporting utilities: KPI extraction and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use chrono::NaiveDate;

use crate::app::pipeline::RunOutput;
use crate::domain::{
    COL_CPI, COL_CPI_YOY, COL_REAL10Y, COL_UNEMPLOYMENT, DashboardConfig, Panel, SeriesId,
};

/// Headline metrics: the latest panel row at which every column is present.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiRow {
    pub date: NaiveDate,
    pub cpi_yoy: Option<f64>,
    pub unemployment: Option<f64>,
    pub real10y: Option<f64>,
}

/// Extract the KPI row from a panel (normally the display copy).
///
/// Returns `None` when no fully-populated row exists yet, e.g. inside the
/// first year of data where CPI YoY cannot be computed.
pub fn kpi_row(panel: &Panel) -> Option<KpiRow> {
    let (date, _) = panel.last_complete_row()?;
    let i = panel.dates.iter().position(|d| *d == date)?;
    let get = |name: &str| panel.column(name).and_then(|c| c.values[i]);
    Some(KpiRow {
        date,
        cpi_yoy: get(COL_CPI_YOY),
        unemployment: get(COL_UNEMPLOYMENT),
        real10y: get(COL_REAL10Y),
    })
}

/// Format a metric value as `12.34 %`, or `-` when absent.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2} %"),
        None => "-".to_string(),
    }
}

/// Format the full report: header, KPI row, and the tail of the panel.
pub fn format_report(run: &RunOutput, config: &DashboardConfig, rows: usize) -> String {
    let mut out = String::new();

    out.push_str("=== macrodash - Macro Dashboard (FRED-based) ===\n");
    out.push_str(&format!(
        "Start: {} | smoothing: {}\n",
        config.start_date,
        if config.smooth { "3-month MA (display only)" } else { "off" },
    ));
    out.push_str(&format!(
        "Series: {} ({}), {} ({}), {} ({})\n",
        SeriesId::Cpi.fred_id(),
        SeriesId::Cpi.display_name(),
        SeriesId::Unemployment.fred_id(),
        SeriesId::Unemployment.display_name(),
        SeriesId::Real10y.fred_id(),
        SeriesId::Real10y.display_name(),
    ));

    out.push('\n');
    match kpi_row(&run.display) {
        Some(kpi) => {
            out.push_str(&format!("Latest ({}):\n", kpi.date));
            out.push_str(&format!("  CPI YoY:         {}\n", format_metric(kpi.cpi_yoy)));
            out.push_str(&format!(
                "  Unemployment:    {}\n",
                format_metric(kpi.unemployment)
            ));
            out.push_str(&format!("  Real 10Y yield:  {}\n", format_metric(kpi.real10y)));
        }
        None => {
            out.push_str("No data available yet for the selected period.\n");
        }
    }

    out.push('\n');
    out.push_str(&format_panel_tail(&run.display, rows));
    out
}

/// Render the last `rows` rows of a panel as an aligned text table.
pub fn format_panel_tail(panel: &Panel, rows: usize) -> String {
    let mut out = String::new();

    if panel.is_empty() {
        out.push_str("(empty panel)\n");
        return out;
    }

    out.push_str(&format!("{:<12}", "date"));
    for col in &panel.columns {
        out.push_str(&format!(" {:>12}", col.name));
    }
    out.push('\n');

    let start = panel.n_rows().saturating_sub(rows);
    for i in start..panel.n_rows() {
        out.push_str(&format!("{:<12}", panel.dates[i].to_string()));
        for col in &panel.columns {
            match col.values[i] {
                Some(v) => out.push_str(&format!(" {v:>12.2}")),
                None => out.push_str(&format!(" {:>12}", "-")),
            }
        }
        out.push('\n');
    }

    out
}

/// Plain chart titles, shared by the TUI and any future frontends.
pub fn chart_title(column: &str) -> &'static str {
    match column {
        COL_CPI_YOY => "CPI YoY (computed from CPIAUCSL)",
        COL_UNEMPLOYMENT => "Unemployment Rate (UNRATE)",
        COL_REAL10Y => "10-Year Real Yield (DFII10 monthly average)",
        COL_CPI => "CPI Index (CPIAUCSL)",
        _ => "Series",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PanelColumn;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn panel() -> Panel {
        Panel {
            dates: vec![d(2024, 1, 31), d(2024, 2, 29)],
            columns: vec![
                PanelColumn {
                    name: COL_CPI.into(),
                    values: vec![Some(300.0), Some(301.0)],
                },
                PanelColumn {
                    name: COL_CPI_YOY.into(),
                    values: vec![Some(3.1), None],
                },
                PanelColumn {
                    name: COL_UNEMPLOYMENT.into(),
                    values: vec![Some(3.9), Some(4.0)],
                },
                PanelColumn {
                    name: COL_REAL10Y.into(),
                    values: vec![Some(1.75), Some(1.8)],
                },
            ],
        }
    }

    #[test]
    fn format_metric_two_decimals_with_percent_suffix() {
        assert_eq!(format_metric(Some(3.14159)), "3.14 %");
        assert_eq!(format_metric(Some(-0.5)), "-0.50 %");
        assert_eq!(format_metric(None), "-");
    }

    #[test]
    fn kpi_row_takes_latest_complete_row() {
        // The February row is incomplete (no YoY), so January wins.
        let kpi = kpi_row(&panel()).unwrap();
        assert_eq!(kpi.date, d(2024, 1, 31));
        assert_eq!(kpi.cpi_yoy, Some(3.1));
        assert_eq!(kpi.unemployment, Some(3.9));
    }

    #[test]
    fn kpi_row_absent_when_no_complete_row_exists() {
        let mut p = panel();
        p.columns[1].values = vec![None, None];
        assert!(kpi_row(&p).is_none());
    }

    #[test]
    fn panel_tail_renders_missing_cells_as_dash() {
        let text = format_panel_tail(&panel(), 10);
        assert!(text.contains("2024-02-29"));
        assert!(text.lines().last().unwrap().contains('-'));
        assert!(text.contains("CPI_YoY"));
    }

    #[test]
    fn panel_tail_handles_empty_panel() {
        let text = format_panel_tail(&Panel::default(), 5);
        assert!(text.contains("empty"));
    }
}
