//! Wire Protocol
//!
//! JSON framing and the known driver commands for the control channel.

pub mod commands;
pub mod envelope;
