//! Year-over-year percent change for index-level series.

use crate::domain::{AggMode, Observation, Series};
use crate::transform::monthly::monthlyize;

/// Trailing 12-month percent change: `(v[i] / v[i-12] - 1) * 100`.
///
/// The input is re-normalized to monthly frequency (last-of-month rule) if it
/// is not already strictly month-end spaced; callers don't have to pre-align.
/// The first 12 rows are missing by construction, as is any row where either
/// operand is missing or the quotient is non-finite.
pub fn yoy_from_index(series: &Series) -> Series {
    if series.is_empty() {
        return Series::empty();
    }

    let resampled;
    let monthly = if series.is_monthly() {
        series
    } else {
        resampled = monthlyize(series, AggMode::Last);
        &resampled
    };

    let obs = monthly.observations();
    let out = obs
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let value = if i >= 12 {
                match (obs[i - 12].value, o.value) {
                    (Some(prev), Some(cur)) => {
                        Some((cur / prev - 1.0) * 100.0).filter(|v| v.is_finite())
                    }
                    _ => None,
                }
            } else {
                None
            };
            Observation::new(o.date, value)
        })
        .collect();

    Series::from_observations(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::{month_end, next_month_end};

    fn monthly_series(start: (i32, u32), values: &[Option<f64>]) -> Series {
        let mut date = month_end(NaiveDate::from_ymd_opt(start.0, start.1, 1).unwrap());
        let mut obs = Vec::new();
        for &v in values {
            obs.push(Observation::new(date, v));
            date = next_month_end(date);
        }
        Series::from_observations(obs)
    }

    #[test]
    fn first_twelve_rows_are_missing() {
        let values: Vec<Option<f64>> = (0..15).map(|i| Some(100.0 + i as f64)).collect();
        let s = monthly_series((2020, 1), &values);
        let yoy = yoy_from_index(&s);
        assert_eq!(yoy.len(), 15);
        assert!(yoy.observations()[..12].iter().all(|o| o.value.is_none()));
        assert!(yoy.observations()[12..].iter().all(|o| o.value.is_some()));
    }

    #[test]
    fn computes_percent_change_against_value_twelve_months_back() {
        // 100, 101, ..., 112 over 13 consecutive months.
        let values: Vec<Option<f64>> = (0..13).map(|i| Some(100.0 + i as f64)).collect();
        let s = monthly_series((2020, 1), &values);
        let yoy = yoy_from_index(&s);
        let last = yoy.observations()[12].value.unwrap();
        assert!((last - 12.0).abs() < 1e-12);
    }

    #[test]
    fn missing_operand_on_either_side_yields_missing() {
        let mut values: Vec<Option<f64>> = (0..26).map(|i| Some(100.0 + i as f64)).collect();
        values[2] = None; // prior-year operand for row 14
        values[20] = None; // current operand for row 20
        let s = monthly_series((2020, 1), &values);
        let yoy = yoy_from_index(&s);
        assert_eq!(yoy.observations()[14].value, None);
        assert_eq!(yoy.observations()[20].value, None);
        assert!(yoy.observations()[13].value.is_some());
    }

    #[test]
    fn non_monthly_input_is_renormalized_first() {
        // Two observations per month; only the last of each month should feed
        // the percent-change calculation.
        let mut obs = Vec::new();
        for i in 0..13 {
            let (y, m) = (2020 + (i / 12) as i32, (i % 12) as u32 + 1);
            obs.push(Observation::new(
                NaiveDate::from_ymd_opt(y, m, 3).unwrap(),
                Some(1.0),
            ));
            obs.push(Observation::new(
                NaiveDate::from_ymd_opt(y, m, 20).unwrap(),
                Some(100.0 + i as f64),
            ));
        }
        let s = Series::from_observations(obs);
        let yoy = yoy_from_index(&s);
        assert_eq!(yoy.len(), 13);
        let last = yoy.observations()[12].value.unwrap();
        assert!((last - 12.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(yoy_from_index(&Series::empty()).is_empty());
    }

    #[test]
    fn zero_base_yields_missing_not_infinite() {
        let mut values: Vec<Option<f64>> = (0..13).map(|i| Some(100.0 + i as f64)).collect();
        values[0] = Some(0.0);
        let s = monthly_series((2020, 1), &values);
        let yoy = yoy_from_index(&s);
        assert_eq!(yoy.observations()[12].value, None);
    }
}
