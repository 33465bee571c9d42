//! Command Line Interface
//!
//! Argument definitions for the configurator binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::client::ClientOptions;
use crate::connection::Endpoint;
use crate::constants::{COMMAND_TIMEOUT_MS, DEFAULT_HOST, DEFAULT_PORT};

/// Configuration client for the StoryTablet driver
#[derive(Debug, Parser)]
#[command(name = "tablet-configurator", version, about)]
pub struct Cli {
    /// Driver host
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Driver control port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Per-command response timeout in milliseconds
    #[arg(long = "timeout-ms", default_value_t = COMMAND_TIMEOUT_MS)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query the driver's tablet status
    Status,

    /// Show the connected device and the active config
    Show,

    /// Export the active config to a file
    Export {
        /// Output path (defaults to config.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write compact JSON instead of pretty
        #[arg(long)]
        compact: bool,
    },

    /// Update the mapping area and submit the config to the driver
    SetMapping {
        #[arg(long)]
        x: u16,
        #[arg(long)]
        y: u16,
        #[arg(long)]
        width: u16,
        #[arg(long)]
        height: u16,
    },

    /// Ask the driver process to stop
    Stop,

    /// Stay connected and print pushed driver events until Ctrl-C
    Watch,
}

impl Cli {
    /// Endpoint selected by the global flags
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    /// Client options selected by the global flags
    pub fn options(&self) -> ClientOptions {
        ClientOptions {
            command_timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}
