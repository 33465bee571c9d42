//! Device - Tablet Device Descriptor
//!
//! What the driver reports about the attached tablet. The `area` describes
//! the digitizer bounds every mapping must stay within.

use serde::{Deserialize, Serialize};

use crate::domain::Area;

/// A tablet device as reported by `GetDevice`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Device {
    /// Human-readable device name
    pub name: String,
    /// USB identification and setup report
    pub info: DeviceInfo,
    /// Full digitizer area in tablet coordinates
    pub area: Area,
    /// Maximum pen pressure value
    pub max_pressure: u16,
}

/// USB-level identification for the device
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeviceInfo {
    pub vendor: u16,
    pub product: u16,
    pub usage: u16,
    pub usage_page: u16,
    /// Feature report sent once to switch the tablet into full mode
    pub init_features: Vec<u8>,
}
