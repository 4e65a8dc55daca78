//! FRED API integration for the dashboard's macro series.
//!
//! One GET per series against the observations endpoint, bounded by a single
//! request timeout. There is no retry logic: a failed fetch aborts the whole
//! render pass.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{Observation, Series, SeriesId};
use crate::error::AppError;

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can produce a raw observation series for a date range.
///
/// The pipeline only depends on this trait, so tests substitute an in-memory
/// source and never touch the network.
pub trait SeriesSource {
    /// Fetch `series` from `start` (inclusive) to the present.
    ///
    /// An empty observation set is valid and yields an empty `Series`.
    fn fetch(&self, series: SeriesId, start: NaiveDate) -> Result<Series, AppError>;
}

#[derive(Debug)]
pub struct FredClient {
    client: Client,
    api_key: String,
}

impl FredClient {
    /// Build a client from the environment (`.env` is honored).
    ///
    /// A missing or blank `FRED_API_KEY` fails here, before any network
    /// activity, with an operator-facing setup message.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(AppError::missing_credential)?;
        Self::with_api_key(api_key)
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::fetch_failed(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }
}

impl SeriesSource for FredClient {
    fn fetch(&self, series: SeriesId, start: NaiveDate) -> Result<Series, AppError> {
        let series_id = series.fred_id();
        let start_str = start.to_string();

        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("observation_start", start_str.as_str()),
            ])
            .send()
            .map_err(|e| AppError::fetch_failed(format!("FRED request for {series_id} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::fetch_failed(format!(
                "FRED request for {series_id} failed with status {}.",
                resp.status()
            )));
        }

        let body: ObservationsResponse = resp.json().map_err(|e| {
            AppError::fetch_failed(format!("Failed to parse FRED response for {series_id}: {e}"))
        })?;

        parse_observations(series_id, body)
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

fn parse_observations(series_id: &str, body: ObservationsResponse) -> Result<Series, AppError> {
    let mut obs = Vec::with_capacity(body.observations.len());
    for raw in body.observations {
        let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d").map_err(|e| {
            AppError::fetch_failed(format!("Invalid FRED date '{}' in {series_id}: {e}", raw.date))
        })?;
        // FRED marks "no data" with a "." sentinel. Those rows are kept as
        // missing observations, never dropped and never coerced to zero.
        obs.push(Observation::new(date, parse_value(&raw.value)));
    }
    Ok(Series::from_observations(obs))
}

fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_maps_sentinels_to_missing() {
        assert_eq!(parse_value("3.25"), Some(3.25));
        assert_eq!(parse_value(" 251.107 "), Some(251.107));
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("not-a-number"), None);
        assert_eq!(parse_value("inf"), None);
    }

    #[test]
    fn parse_observations_keeps_missing_rows_and_dedups() {
        let body = ObservationsResponse {
            observations: vec![
                RawObservation {
                    date: "2024-01-02".into(),
                    value: "1.80".into(),
                },
                RawObservation {
                    date: "2024-01-03".into(),
                    value: ".".into(),
                },
                RawObservation {
                    date: "2024-01-02".into(),
                    value: "1.85".into(),
                },
            ],
        };
        let series = parse_observations("DFII10", body).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.observations()[0].value, Some(1.85));
        assert_eq!(series.observations()[1].value, None);
    }

    #[test]
    fn parse_observations_rejects_bad_dates() {
        let body = ObservationsResponse {
            observations: vec![RawObservation {
                date: "01/02/2024".into(),
                value: "1.0".into(),
            }],
        };
        let err = parse_observations("UNRATE", body).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn parse_observations_accepts_empty_payload() {
        let body = ObservationsResponse {
            observations: Vec::new(),
        };
        let series = parse_observations("CPIAUCSL", body).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn missing_credential_blocks_client_construction() {
        // Serialize around the env var: this is the only test that touches it.
        unsafe { std::env::remove_var("FRED_API_KEY") };
        let err = FredClient::from_env().unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("FRED_API_KEY"));
    }
}
