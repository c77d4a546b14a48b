//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the cell classifier (`Cell`)
//! - raw input rows (`RawRow`)
//! - run configuration (`RowPolicy`, `RunConfig`, `OutputDirs`)

pub mod cell;
pub mod types;

pub use cell::*;
pub use types::*;
