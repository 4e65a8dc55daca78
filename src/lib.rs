//! `macro-dashboard` library crate.
//!
//! The binary (`macrodash`) is a thin wrapper around this library so that:
//!
//! - the series pipeline is testable without spawning processes or a terminal
//! - modules are reusable (e.g., future GUI/daemon, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod transform;
pub mod tui;
