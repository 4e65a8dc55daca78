//! Input/output helpers.
//!
//! - spreadsheet export of the monthly panel and per-series sheets (`export`)

pub mod export;

pub use export::*;
