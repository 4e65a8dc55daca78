//! Panel assembly (outer join by month-end date) and the display-only
//! smoothing transform.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::domain::{Panel, PanelColumn, Series};

/// Trailing window used by the display smoothing transform.
pub const SMOOTH_WINDOW: usize = 3;

/// Full outer join of named monthly series into one panel.
///
/// The row set is the union of all input dates (ascending, unique); any
/// (date, column) pair not covered by an input is explicitly missing. Rows
/// where every column is missing are dropped, so series with different start
/// dates or reporting lags coexist without truncation to a common range.
pub fn assemble(inputs: &[(&str, &Series)]) -> Panel {
    let mut date_set: BTreeSet<NaiveDate> = BTreeSet::new();
    for (_, series) in inputs {
        for obs in series.observations() {
            date_set.insert(obs.date);
        }
    }
    let dates: Vec<NaiveDate> = date_set.into_iter().collect();

    let mut columns = Vec::with_capacity(inputs.len());
    for (name, series) in inputs {
        let by_date: HashMap<NaiveDate, Option<f64>> = series
            .observations()
            .iter()
            .map(|o| (o.date, o.value))
            .collect();
        let values = dates
            .iter()
            .map(|d| by_date.get(d).copied().flatten())
            .collect();
        columns.push(PanelColumn {
            name: (*name).to_string(),
            values,
        });
    }

    // Drop rows where every column is missing.
    let keep: Vec<usize> = (0..dates.len())
        .filter(|&i| columns.iter().any(|c| c.values[i].is_some()))
        .collect();

    Panel {
        dates: keep.iter().map(|&i| dates[i]).collect(),
        columns: columns
            .into_iter()
            .map(|c| PanelColumn {
                name: c.name,
                values: keep.iter().map(|&i| c.values[i]).collect(),
            })
            .collect(),
    }
}

/// Display transform: trailing 3-row moving average per column.
///
/// Returns an independent copy; the canonical panel handed to the exporter is
/// never mutated. With `enabled == false` the panel is returned unchanged.
pub fn smooth(panel: &Panel, enabled: bool) -> Panel {
    if !enabled {
        return panel.clone();
    }
    Panel {
        dates: panel.dates.clone(),
        columns: panel
            .columns
            .iter()
            .map(|c| PanelColumn {
                name: c.name.clone(),
                values: rolling_mean(&c.values, SMOOTH_WINDOW),
            })
            .collect(),
    }
}

/// Trailing moving average. The first `window - 1` rows are missing, as is
/// any row whose window contains a missing value.
fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let mut sum = 0.0;
            for v in &values[i + 1 - window..=i] {
                match v {
                    Some(v) => sum += v,
                    None => return None,
                }
            }
            Some(sum / window as f64)
        })
        .collect()
}
