//! Shared dashboard pipeline used by the TUI and the CLI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> monthly normalization -> YoY derivation -> panel join -> display copy
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::SeriesSource;
use crate::domain::{
    COL_CPI, COL_CPI_YOY, COL_REAL10Y, COL_UNEMPLOYMENT, DashboardConfig, Panel, Series, SeriesId,
};
use crate::error::AppError;
use crate::transform::{assemble, monthlyize, smooth, yoy_from_index};

/// All computed outputs of a single render pass.
///
/// `panel` is the canonical dataset (spreadsheet export reads it); `display`
/// is the view copy behind charts and KPIs, smoothed when the config says so.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub panel: Panel,
    pub display: Panel,
    pub cpi_monthly: Series,
    pub unemployment_monthly: Series,
    pub real10y_monthly: Series,
}

/// Execute the full pipeline: three sequential fetches, per-series monthly
/// normalization, CPI YoY derivation, outer join, display copy.
///
/// Everything is recomputed from scratch on every call; a single fetch
/// failure aborts the whole pass.
pub fn run_dashboard(
    source: &dyn SeriesSource,
    config: &DashboardConfig,
) -> Result<RunOutput, AppError> {
    // 1) Fetch raw series.
    let cpi_raw = source.fetch(SeriesId::Cpi, config.start_date)?;
    let unemployment_raw = source.fetch(SeriesId::Unemployment, config.start_date)?;
    let real10y_raw = source.fetch(SeriesId::Real10y, config.start_date)?;

    // 2) Normalize each to monthly frequency per its aggregation rule.
    let cpi_monthly = monthlyize(&cpi_raw, SeriesId::Cpi.agg_mode());
    let unemployment_monthly = monthlyize(&unemployment_raw, SeriesId::Unemployment.agg_mode());
    let real10y_monthly = monthlyize(&real10y_raw, SeriesId::Real10y.agg_mode());

    // 3) Derive CPI year-over-year from the raw index; the calculator
    //    re-normalizes to monthly itself.
    let cpi_yoy = yoy_from_index(&cpi_raw);

    // 4) Outer-join into the canonical panel.
    let panel = assemble(&[
        (COL_CPI, &cpi_monthly),
        (COL_CPI_YOY, &cpi_yoy),
        (COL_UNEMPLOYMENT, &unemployment_monthly),
        (COL_REAL10Y, &real10y_monthly),
    ]);

    // 5) Display copy, optionally smoothed. The canonical panel stays as-is.
    let display = smooth(&panel, config.smooth);

    Ok(RunOutput {
        panel,
        display,
        cpi_monthly,
        unemployment_monthly,
        real10y_monthly,
    })
}
