//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a render pass
//! - exported to spreadsheets
//! - inspected in tests without fixture machinery

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The three FRED series tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesId {
    /// CPI index, seasonally adjusted (1982-84=100). Monthly.
    Cpi,
    /// U-3 unemployment rate, percent. Monthly.
    Unemployment,
    /// 10-year TIPS real yield, percent. Daily.
    Real10y,
}

impl SeriesId {
    pub const ALL: [SeriesId; 3] = [SeriesId::Cpi, SeriesId::Unemployment, SeriesId::Real10y];

    /// FRED series identifier used in API requests.
    pub fn fred_id(self) -> &'static str {
        match self {
            SeriesId::Cpi => "CPIAUCSL",
            SeriesId::Unemployment => "UNRATE",
            SeriesId::Real10y => "DFII10",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SeriesId::Cpi => "CPI index",
            SeriesId::Unemployment => "Unemployment rate",
            SeriesId::Real10y => "10Y real yield",
        }
    }

    /// How the raw series is reduced to one value per month.
    ///
    /// Index- and rate-like series take the last observation of the month;
    /// the daily yield is averaged.
    pub fn agg_mode(self) -> AggMode {
        match self {
            SeriesId::Cpi | SeriesId::Unemployment => AggMode::Last,
            SeriesId::Real10y => AggMode::Mean,
        }
    }
}

/// Monthly aggregation rule for `transform::monthly::monthlyize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggMode {
    /// Last non-missing observation within the month.
    Last,
    /// Arithmetic mean of non-missing observations within the month.
    Mean,
}

/// A single dated value. `None` means the source reported "no data" for that
/// date; missing values are preserved, never coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// An ordered-by-date sequence of observations for one source field.
///
/// Invariants (enforced by `from_observations`): dates strictly ascending,
/// no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    obs: Vec<Observation>,
}

impl Series {
    pub fn empty() -> Self {
        Self { obs: Vec::new() }
    }

    /// Build a series from raw observations: sorts ascending by date and
    /// deduplicates, keeping the later entry for a repeated date.
    pub fn from_observations(mut obs: Vec<Observation>) -> Self {
        obs.sort_by_key(|o| o.date);
        let mut deduped: Vec<Observation> = Vec::with_capacity(obs.len());
        for o in obs {
            match deduped.last_mut() {
                Some(last) if last.date == o.date => *last = o,
                _ => deduped.push(o),
            }
        }
        Self { obs: deduped }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.obs
    }

    pub fn is_empty(&self) -> bool {
        self.obs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.obs.len()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.obs.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.obs.last().map(|o| o.date)
    }

    /// True when the dates are exactly consecutive month-end markers.
    pub fn is_monthly(&self) -> bool {
        self.obs.windows(2).all(|w| {
            w[0].date == month_end(w[0].date)
                && w[1].date == month_end(w[1].date)
                && next_month_end(w[0].date) == w[1].date
        }) && self.obs.iter().all(|o| o.date == month_end(o.date))
    }
}

/// One named column of a panel, parallel to the panel's date vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// The combined monthly dataset: row key is a month-end date, columns are the
/// tracked quantities. Every retained row has at least one present value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<PanelColumn>,
}

/// Panel column names, in sheet/chart order.
pub const COL_CPI: &str = "CPI";
pub const COL_CPI_YOY: &str = "CPI_YoY";
pub const COL_UNEMPLOYMENT: &str = "Unemployment";
pub const COL_REAL10Y: &str = "Real10Y";

impl Panel {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn n_rows(&self) -> usize {
        self.dates.len()
    }

    pub fn column(&self, name: &str) -> Option<&PanelColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// (date, value) pairs of a column's non-missing cells, for charting.
    pub fn column_points(&self, name: &str) -> Vec<(NaiveDate, f64)> {
        let Some(col) = self.column(name) else {
            return Vec::new();
        };
        self.dates
            .iter()
            .zip(&col.values)
            .filter_map(|(d, v)| v.map(|v| (*d, v)))
            .collect()
    }

    /// The latest row where every column is present, if any.
    ///
    /// This mirrors the KPI semantics of the dashboard: headline numbers are
    /// only shown for a date at which all tracked quantities exist.
    pub fn last_complete_row(&self) -> Option<(NaiveDate, Vec<f64>)> {
        for i in (0..self.dates.len()).rev() {
            let row: Option<Vec<f64>> = self.columns.iter().map(|c| c.values[i]).collect();
            if let Some(values) = row {
                return Some((self.dates[i], values));
            }
        }
        None
    }
}

/// Immutable per-render configuration. Built once from CLI arguments or TUI
/// state and passed into the pipeline; the core never reads ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Inclusive observation start date for every fetch.
    pub start_date: NaiveDate,
    /// Apply a trailing 3-month moving average to charts/KPIs (display only;
    /// the exported panel is never smoothed).
    pub smooth: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            smooth: false,
        }
    }
}

/// Default observation start, matching the dashboard's historical baseline.
pub fn default_start_date() -> NaiveDate {
    // 2000-01-01 is always a valid date.
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Last calendar day of `date`'s month. The canonical key for monthly periods.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (y, m) = (date.year(), date.month());
    let (ny, nm) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

/// Month-end of the month following `date`'s month.
pub fn next_month_end(date: NaiveDate) -> NaiveDate {
    let (y, m) = (date.year(), date.month());
    let (ny, nm) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .map(month_end)
        .unwrap_or(date)
}
