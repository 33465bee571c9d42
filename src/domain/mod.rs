//! Domain Model
//!
//! The payloads carried over the driver control channel: device descriptors
//! and tablet configurations. The transport layer passes these through
//! opaquely; typing happens at the edges.

pub mod area;
pub mod device;
pub mod tablet_config;

pub use area::Area;
pub use device::{Device, DeviceInfo};
pub use tablet_config::{ButtonBinding, ButtonMode, TabletConfig};
