//! Driver Commands
//!
//! Known command names and their typed result payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{Device, TabletConfig};
use crate::protocol::envelope::ResponseEnvelope;

/// Query the tablet connection status
pub const GET_STATUS: &str = "GetStatus";

/// Fetch the device descriptor
pub const GET_DEVICE: &str = "GetDevice";

/// Fetch the active configuration
pub const GET_CONFIG: &str = "GetConfig";

/// Replace the active configuration
pub const UPDATE_CONFIG: &str = "UpdateConfig";

/// Ask the driver process to shut down
pub const STOP: &str = "Stop";

/// Tablet connection state as reported by the driver
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum DriverStatus {
    NotConnected,
    Connected,
    Error,
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverStatus::NotConnected => write!(f, "NotConnected"),
            DriverStatus::Connected => write!(f, "Connected"),
            DriverStatus::Error => write!(f, "Error"),
        }
    }
}

/// `GetStatus` result payload
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct StatusResult {
    pub status: DriverStatus,
}

/// `GetDevice` result payload
#[derive(Clone, Debug, Deserialize)]
pub struct DeviceResult {
    pub device: Device,
}

/// `GetConfig` result payload
#[derive(Clone, Debug, Deserialize)]
pub struct ConfigResult {
    pub config: TabletConfig,
}

/// `UpdateConfig` result payload
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct UpdateResult {
    pub updated: bool,
}

/// `Stop` result payload
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct StopResult {
    pub stopping: bool,
}

/// Decode a response payload into a typed result
pub fn decode<T: DeserializeOwned>(envelope: &ResponseEnvelope) -> Result<T, serde_json::Error> {
    serde_json::from_value(envelope.data.clone())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_status_result() {
        let envelope = ResponseEnvelope {
            id: 0,
            data: json!({ "status": "Connected" }),
        };

        let result: StatusResult = decode(&envelope).expect("decode");
        assert_eq!(result.status, DriverStatus::Connected);
    }

    #[test]
    fn test_decode_rejects_unknown_status() {
        let envelope = ResponseEnvelope {
            id: 0,
            data: json!({ "status": "Sleeping" }),
        };

        assert!(decode::<StatusResult>(&envelope).is_err());
    }

    #[test]
    fn test_decode_update_result() {
        let envelope = ResponseEnvelope {
            id: 4,
            data: json!({ "updated": true }),
        };

        let result: UpdateResult = decode(&envelope).expect("decode");
        assert!(result.updated);
    }
}
