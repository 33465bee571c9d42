//! Config Export
//!
//! Serialize a tablet configuration for saving to disk. Pretty output is
//! indented with four spaces, matching the files the driver itself reads.

use std::path::Path;

use serde::Serialize;

use crate::domain::TabletConfig;
use crate::error::{Error, Result};

/// Default export file name when none is supplied
pub const DEFAULT_EXPORT_NAME: &str = "config.json";

/// Render a config as JSON text
pub fn render_config(config: &TabletConfig, pretty: bool) -> Result<String> {
    if !pretty {
        return Ok(serde_json::to_string(config)?);
    }

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    config.serialize(&mut serializer)?;

    String::from_utf8(out).map_err(|err| Error::Invalid {
        message: format!("Rendered config is not UTF-8: {err}"),
    })
}

/// Render a config and write it to `path`
pub async fn export_config(config: &TabletConfig, path: &Path, pretty: bool) -> Result<()> {
    let content = render_config(config, pretty)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}
