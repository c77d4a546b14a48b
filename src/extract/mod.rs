//! Trial table extraction.
//!
//! Responsibilities:
//!
//! - classify rows (key / trial value / ignored) and accumulate columns
//! - apply the row policy to malformed rows (skip or abort)
//! - assemble the rectangular, zero-padded `TrialTable`

pub mod error;
pub mod extractor;
pub mod table;

pub use error::*;
pub use extractor::*;
pub use table::*;
