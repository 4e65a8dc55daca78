//! The series pipeline core.
//!
//! - monthly resampling with per-series aggregation rules (`monthly`)
//! - year-over-year percent change for index series (`yoy`)
//! - outer join into the combined panel + display smoothing (`panel`)
//!
//! Everything here is a pure function of its inputs; nothing holds state
//! across invocations.

pub mod monthly;
pub mod panel;
pub mod yoy;

pub use monthly::*;
pub use panel::*;
pub use yoy::*;
