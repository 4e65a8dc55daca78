//! Frequency normalization: arbitrary-frequency series -> one value per
//! calendar month, keyed by month-end date.

use crate::domain::{AggMode, Observation, Series, month_end, next_month_end};

/// Resample `series` to monthly frequency.
///
/// The output covers every month from the first to the last observed month;
/// a month with no usable source data carries a missing value rather than
/// being omitted. `Last` takes the chronologically last non-missing
/// observation of the month, `Mean` averages the non-missing ones.
///
/// An empty input yields an empty output.
pub fn monthlyize(series: &Series, how: AggMode) -> Series {
    let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
        return Series::empty();
    };

    let obs = series.observations();
    let end = month_end(last);
    let mut cur = month_end(first);
    let mut out = Vec::new();
    let mut i = 0;

    loop {
        let mut last_value: Option<f64> = None;
        let mut sum = 0.0;
        let mut n = 0usize;

        while i < obs.len() && month_end(obs[i].date) == cur {
            if let Some(v) = obs[i].value {
                last_value = Some(v);
                sum += v;
                n += 1;
            }
            i += 1;
        }

        let value = match how {
            AggMode::Last => last_value,
            AggMode::Mean => {
                if n > 0 {
                    Some(sum / n as f64)
                } else {
                    None
                }
            }
        };
        out.push(Observation::new(cur, value));

        if cur == end {
            break;
        }
        cur = next_month_end(cur);
    }

    Series::from_observations(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(points: &[(i32, u32, u32, Option<f64>)]) -> Series {
        Series::from_observations(
            points
                .iter()
                .map(|&(y, m, day, v)| Observation::new(d(y, m, day), v))
                .collect(),
        )
    }

    #[test]
    fn last_takes_chronologically_last_observation_per_month() {
        let s = series(&[
            (2024, 1, 5, Some(100.0)),
            (2024, 1, 20, Some(101.0)),
            (2024, 2, 10, Some(102.0)),
        ]);
        let m = monthlyize(&s, AggMode::Last);
        assert_eq!(m.len(), 2);
        assert_eq!(
            m.observations()[0],
            Observation::new(d(2024, 1, 31), Some(101.0))
        );
        assert_eq!(
            m.observations()[1],
            Observation::new(d(2024, 2, 29), Some(102.0))
        );
    }

    #[test]
    fn last_skips_missing_trailing_values() {
        // Matches the resample-last semantics of the data frame world: the
        // monthly value is the last *non-missing* observation of the month.
        let s = series(&[(2024, 1, 5, Some(100.0)), (2024, 1, 20, None)]);
        let m = monthlyize(&s, AggMode::Last);
        assert_eq!(m.observations()[0].value, Some(100.0));
    }

    #[test]
    fn mean_averages_non_missing_values() {
        let s = series(&[
            (2024, 1, 2, Some(1.0)),
            (2024, 1, 3, Some(2.0)),
            (2024, 1, 4, None),
            (2024, 1, 5, Some(3.0)),
        ]);
        let m = monthlyize(&s, AggMode::Mean);
        assert_eq!(m.observations()[0].value, Some(2.0));
    }

    #[test]
    fn month_with_only_missing_values_yields_missing() {
        let s = series(&[(2024, 1, 2, None), (2024, 1, 3, None)]);
        let m = monthlyize(&s, AggMode::Mean);
        assert_eq!(m.len(), 1);
        assert_eq!(m.observations()[0].value, None);

        let m = monthlyize(&s, AggMode::Last);
        assert_eq!(m.observations()[0].value, None);
    }

    #[test]
    fn gap_months_are_present_with_missing_values() {
        let s = series(&[(2024, 1, 15, Some(1.0)), (2024, 4, 15, Some(4.0))]);
        let m = monthlyize(&s, AggMode::Last);
        let values: Vec<_> = m.observations().iter().map(|o| o.value).collect();
        assert_eq!(values, vec![Some(1.0), None, None, Some(4.0)]);
        assert_eq!(m.observations()[1].date, d(2024, 2, 29));
        assert_eq!(m.observations()[2].date, d(2024, 3, 31));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(monthlyize(&Series::empty(), AggMode::Last).is_empty());
        assert!(monthlyize(&Series::empty(), AggMode::Mean).is_empty());
    }

    #[test]
    fn output_is_month_end_keyed_and_monthly_spaced() {
        let s = series(&[
            (2023, 11, 3, Some(1.0)),
            (2023, 12, 29, Some(2.0)),
            (2024, 2, 1, Some(3.0)),
        ]);
        let m = monthlyize(&s, AggMode::Last);
        assert!(m.is_monthly());
        assert_eq!(m.first_date(), Some(d(2023, 11, 30)));
        assert_eq!(m.last_date(), Some(d(2024, 2, 29)));
    }
}
