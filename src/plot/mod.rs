//! Plotting.
//!
//! - terminal scatter (`ascii`)
//! - SVG figures (`figures`)

pub mod ascii;
pub mod figures;

pub use ascii::*;
pub use figures::*;
