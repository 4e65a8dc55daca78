//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - tracked FRED series and their aggregation rules (`SeriesId`, `AggMode`)
//! - time-indexed observations (`Observation`, `Series`)
//! - the joined monthly dataset (`Panel`, `PanelColumn`)
//! - per-render configuration (`DashboardConfig`)

pub mod types;

pub use types::*;
