//! Utilities

pub mod export;
