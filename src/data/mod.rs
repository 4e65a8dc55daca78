//! Remote data access.
//!
//! `fred` talks to the FRED observations endpoint and normalizes payloads
//! into `domain::Series`. The `SeriesSource` trait is the seam that lets the
//! pipeline run against a mock in tests.

pub mod fred;

pub use fred::{FredClient, SeriesSource};
