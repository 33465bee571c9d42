//! Driver Session
//!
//! Connection bootstrap and the high-level operations an editor needs. A
//! session is ready once the device descriptor and the active configuration
//! have both been fetched, in that order.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;

use crate::client::CommandClient;
use crate::domain::{Device, TabletConfig};
use crate::error::Result;
use crate::protocol::commands::{
    self, ConfigResult, DeviceResult, DriverStatus, StatusResult, StopResult, UpdateResult,
};
use crate::protocol::envelope::CommandParams;

/// A bootstrapped connection to the driver with cached snapshots
pub struct DriverSession {
    client: Arc<CommandClient>,
    device: Mutex<Option<Device>>,
    config: Mutex<Option<TabletConfig>>,
}

impl DriverSession {
    /// Create a session over an existing client
    pub fn new(client: Arc<CommandClient>) -> Self {
        Self {
            client,
            device: Mutex::new(None),
            config: Mutex::new(None),
        }
    }

    /// The underlying command client
    pub fn client(&self) -> &Arc<CommandClient> {
        &self.client
    }

    /// Connect and fetch the device descriptor, then the active config.
    ///
    /// Both snapshots are cached on the session; the session counts as ready
    /// only after both round trips complete.
    pub async fn initialize(&self) -> Result<()> {
        self.client.connect().await?;

        let device = self.fetch::<DeviceResult>(commands::GET_DEVICE).await?.device;
        tracing::debug!("Device: {}", device.name);
        *self.device.lock() = Some(device);

        let config = self.fetch::<ConfigResult>(commands::GET_CONFIG).await?.config;
        *self.config.lock() = Some(config);

        Ok(())
    }

    /// Last fetched device descriptor
    pub fn device(&self) -> Option<Device> {
        self.device.lock().clone()
    }

    /// Last known driver configuration
    pub fn config(&self) -> Option<TabletConfig> {
        self.config.lock().clone()
    }

    /// One status round trip
    pub async fn refresh_status(&self) -> Result<DriverStatus> {
        Ok(self.fetch::<StatusResult>(commands::GET_STATUS).await?.status)
    }

    /// Submit a new configuration to the driver.
    ///
    /// The cached config is replaced only if the driver accepts it.
    pub async fn update_config(&self, config: &TabletConfig) -> Result<bool> {
        let mut params = CommandParams::new();
        params.insert("config".to_owned(), serde_json::to_value(config)?);

        let response = self.client.send_command(commands::UPDATE_CONFIG, params).await?;
        let result: UpdateResult = commands::decode(&response)?;

        if result.updated {
            *self.config.lock() = Some(config.clone());
        } else {
            tracing::warn!("Driver rejected the submitted config");
        }
        Ok(result.updated)
    }

    /// Ask the driver process to stop
    pub async fn stop_driver(&self) -> Result<bool> {
        let result: StopResult = self.fetch(commands::STOP).await?;
        Ok(result.stopping)
    }

    /// Close the channel
    pub fn shutdown(&self) -> Result<()> {
        self.client.disconnect()?;
        Ok(())
    }

    async fn fetch<T: DeserializeOwned>(&self, command: &str) -> Result<T> {
        let response = self.client.send_command(command, CommandParams::new()).await?;
        Ok(serde_json::from_value::<T>(response.data)?)
    }
}

impl std::fmt::Debug for DriverSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverSession")
            .field("client", &self.client)
            .field("device", &self.device.lock().as_ref().map(|d| d.name.clone()))
            .finish()
    }
}
