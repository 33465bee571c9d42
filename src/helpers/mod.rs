//! Helpers
//!
//! Small shared utilities.

mod fs;

pub use fs::*;
