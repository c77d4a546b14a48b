//! Input/output helpers.
//!
//! - tab-delimited ingest (`ingest`)
//! - `.xlsx` table export (`export`)
//! - diagnostics JSON (`diagnostics`)
//! - input discovery + output naming (`paths`)

pub mod diagnostics;
pub mod export;
pub mod ingest;
pub mod paths;

pub use diagnostics::*;
pub use export::*;
pub use ingest::*;
pub use paths::*;
