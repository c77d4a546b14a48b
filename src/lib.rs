//! `trial-sheets` library crate.
//!
//! The binary (`trials`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the extractor can be reused on rows from other sources
//! - code stays easy to navigate as the project grows

pub mod analysis;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod extract;
pub mod io;
pub mod plot;
pub mod report;
