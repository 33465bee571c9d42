//! Application
//!
//! Wires the CLI commands to a driver session.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::app::cli::{Cli, Command};
use crate::client::{ClientEvent, CommandClient};
use crate::constants::STATUS_POLL_INTERVAL_MS;
use crate::domain::Area;
use crate::services::{DriverSession, StatusMonitor};
use crate::utils::export::{self, DEFAULT_EXPORT_NAME};

/// Run one CLI command to completion
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = Arc::new(CommandClient::with_options(cli.endpoint(), cli.options()));
    let session = DriverSession::new(Arc::clone(&client));

    match cli.command {
        Command::Status => {
            client.connect().await?;
            let status = session.refresh_status().await?;
            println!("{status}");
            session.shutdown()?;
        }

        Command::Show => {
            session.initialize().await?;
            let device = session.device().context("driver sent no device")?;
            let config = session.config().context("driver sent no config")?;

            println!("Device:   {}", device.name);
            println!("Area:     {}", device.area);
            println!("Pressure: 0..{}", device.max_pressure);
            println!();
            println!("Mapping:  {}  ({})", config.mapping, config.mapping.aspect_label());
            println!("Screen:   {}", config.screen);
            println!("Hover:    {}", if config.hover_enabled { "on" } else { "off" });

            session.shutdown()?;
        }

        Command::Export { output, compact } => {
            session.initialize().await?;
            let config = session.config().context("driver sent no config")?;

            let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_NAME));
            export::export_config(&config, &path, !compact).await?;
            println!("Exported config to {}", path.display());

            session.shutdown()?;
        }

        Command::SetMapping {
            x,
            y,
            width,
            height,
        } => {
            session.initialize().await?;
            let device = session.device().context("driver sent no device")?;
            let mut config = session.config().context("driver sent no config")?;

            let requested = Area::new(x, y, width, height);
            let clamped = requested.clamp_within(&device.area);
            if clamped != requested {
                tracing::warn!("Mapping clamped to the device area: {clamped}");
            }

            config.mapping = clamped;
            if session.update_config(&config).await? {
                println!("Mapping set to {clamped}");
            } else {
                println!("Driver rejected the new mapping");
            }

            session.shutdown()?;
        }

        Command::Stop => {
            client.connect().await?;
            let stopping = session.stop_driver().await?;
            println!(
                "{}",
                if stopping {
                    "Driver is stopping"
                } else {
                    "Driver refused to stop"
                }
            );
            // The driver may drop the channel before we get to close it.
            let _ = session.shutdown();
        }

        Command::Watch => {
            let (events_tx, events_rx) = crossbeam_channel::unbounded();
            client.set_event_sender(events_tx);

            session.initialize().await?;
            let monitor = StatusMonitor::spawn(
                Arc::clone(&client),
                Duration::from_millis(STATUS_POLL_INTERVAL_MS),
            );

            println!("Watching driver events, Ctrl-C to stop");
            let printer = tokio::task::spawn_blocking(move || {
                for event in events_rx.iter() {
                    match event {
                        ClientEvent::Message(envelope) => {
                            println!("<- id={} {}", envelope.id, envelope.data);
                        }
                        ClientEvent::Malformed { reason, .. } => {
                            println!("!! dropped frame: {reason}");
                        }
                        ClientEvent::Disconnected { reason } => {
                            println!("xx channel closed: {reason}");
                            break;
                        }
                    }
                }
            });

            tokio::signal::ctrl_c().await?;
            monitor.stop();
            if client.connected() {
                session.shutdown()?;
            }
            let _ = printer.await;
        }
    }

    Ok(())
}
