//! Error types for the configurator
//!
//! Centralized error handling using snafu for ergonomic error definitions.
//! The command client keeps its own operation-scoped error enums; everything
//! above it converges on [`Error`].

use snafu::Snafu;

use crate::client::{CommandError, ConnectError, DisconnectError};

/// Main error type for the application
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (file operations, network, etc.)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Opening the driver channel failed
    #[snafu(display("Connection error: {source}"))]
    Connect { source: ConnectError },

    /// Closing the driver channel failed
    #[snafu(display("Disconnect error: {source}"))]
    Disconnect { source: DisconnectError },

    /// A driver command failed
    #[snafu(display("Command error: {source}"))]
    Command { source: CommandError },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

impl From<ConnectError> for Error {
    fn from(source: ConnectError) -> Self {
        Error::Connect { source }
    }
}

impl From<DisconnectError> for Error {
    fn from(source: DisconnectError) -> Self {
        Error::Disconnect { source }
    }
}

impl From<CommandError> for Error {
    fn from(source: CommandError) -> Self {
        Error::Command { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
