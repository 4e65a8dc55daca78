//! Spreadsheet export: one workbook, four sheets.
//!
//! Sheet 1 is the combined monthly panel; sheets 2-4 are the raw monthly
//! series. The export always reads the canonical panel, never the smoothed
//! display copy.

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::app::pipeline::RunOutput;
use crate::domain::{COL_CPI, COL_REAL10Y, COL_UNEMPLOYMENT, Panel, Series};
use crate::error::AppError;

/// Default artifact name offered to the operator.
pub const EXPORT_FILE_NAME: &str = "macro_dashboard_data.xlsx";

/// MIME type of the exported artifact.
pub const EXPORT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Build the four-sheet workbook in memory.
pub fn workbook_bytes(run: &RunOutput) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();

    write_panel_sheet(workbook.add_worksheet(), "macro_panel", &run.panel).map_err(xlsx_err)?;
    write_series_sheet(workbook.add_worksheet(), "cpi_index", COL_CPI, &run.cpi_monthly)
        .map_err(xlsx_err)?;
    write_series_sheet(
        workbook.add_worksheet(),
        "unemployment",
        COL_UNEMPLOYMENT,
        &run.unemployment_monthly,
    )
    .map_err(xlsx_err)?;
    write_series_sheet(
        workbook.add_worksheet(),
        "real10y",
        COL_REAL10Y,
        &run.real10y_monthly,
    )
    .map_err(xlsx_err)?;

    workbook.save_to_buffer().map_err(xlsx_err)
}

/// Write the workbook to `path`.
pub fn write_workbook(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let bytes = workbook_bytes(run)?;
    std::fs::write(path, bytes).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to write spreadsheet '{}': {e}", path.display()),
        )
    })
}

fn write_panel_sheet(
    sheet: &mut Worksheet,
    name: &str,
    panel: &Panel,
) -> Result<(), XlsxError> {
    sheet.set_name(name)?;
    sheet.write_string(0, 0, "date")?;
    for (c, col) in panel.columns.iter().enumerate() {
        sheet.write_string(0, c as u16 + 1, col.name.as_str())?;
    }
    for (r, date) in panel.dates.iter().enumerate() {
        let row = r as u32 + 1;
        sheet.write_string(row, 0, date.to_string())?;
        for (c, col) in panel.columns.iter().enumerate() {
            // Missing cells stay blank.
            if let Some(v) = col.values[r] {
                sheet.write_number(row, c as u16 + 1, v)?;
            }
        }
    }
    Ok(())
}

fn write_series_sheet(
    sheet: &mut Worksheet,
    name: &str,
    column: &str,
    series: &Series,
) -> Result<(), XlsxError> {
    sheet.set_name(name)?;
    sheet.write_string(0, 0, "date")?;
    sheet.write_string(0, 1, column)?;
    for (r, obs) in series.observations().iter().enumerate() {
        let row = r as u32 + 1;
        sheet.write_string(row, 0, obs.date.to_string())?;
        if let Some(v) = obs.value {
            sheet.write_number(row, 1, v)?;
        }
    }
    Ok(())
}

fn xlsx_err(e: XlsxError) -> AppError {
    AppError::new(2, format!("Failed to build spreadsheet: {e}"))
}
