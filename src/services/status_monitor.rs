//! Status Monitor
//!
//! Periodic liveness polling of the driver. The monitor issues `GetStatus`
//! on a fixed interval and keeps the latest answer; readiness of the rest of
//! the session never waits on it.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::client::CommandClient;
use crate::protocol::commands::{self, DriverStatus, StatusResult};
use crate::protocol::envelope::CommandParams;

/// Handle to a background status poller
pub struct StatusMonitor {
    latest: Arc<Mutex<Option<DriverStatus>>>,
    handle: JoinHandle<()>,
}

impl StatusMonitor {
    /// Start polling `GetStatus` every `interval`
    pub fn spawn(client: Arc<CommandClient>, interval: Duration) -> Self {
        let latest = Arc::new(Mutex::new(None));
        let poll_latest = Arc::clone(&latest);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if !client.connected() {
                    continue;
                }

                match client
                    .send_command(commands::GET_STATUS, CommandParams::new())
                    .await
                {
                    Ok(response) => match commands::decode::<StatusResult>(&response) {
                        Ok(result) => {
                            if result.status != DriverStatus::Connected {
                                tracing::warn!("Tablet is not connected (status {})", result.status);
                            }
                            *poll_latest.lock() = Some(result.status);
                        }
                        Err(err) => tracing::warn!("Bad GetStatus payload: {err}"),
                    },
                    Err(err) => tracing::debug!("Status poll failed: {err}"),
                }
            }
        });

        Self { latest, handle }
    }

    /// Most recent status answer, if any poll completed yet
    pub fn latest(&self) -> Option<DriverStatus> {
        *self.latest.lock()
    }

    /// Stop polling
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for StatusMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl std::fmt::Debug for StatusMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusMonitor")
            .field("latest", &self.latest())
            .finish()
    }
}
