//! Client Constants
//!
//! Centralized defaults for the driver connection.

/// Default driver host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default driver control port
pub const DEFAULT_PORT: u16 = 55472;

/// Default per-command response timeout in milliseconds
pub const COMMAND_TIMEOUT_MS: u64 = 5000;

/// Interval between periodic status polls in milliseconds
pub const STATUS_POLL_INTERVAL_MS: u64 = 5000;
