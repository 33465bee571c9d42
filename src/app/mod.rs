//! Application
//!
//! CLI definitions and the command runner.

pub mod application;
pub mod cli;
