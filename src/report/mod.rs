//! Human-readable run reports.
//!
//! We keep formatting code in one place so:
//! - the extraction/analysis code stays clean and testable
//! - output changes are localized

pub mod format;

pub use format::*;
