//! Services
//!
//! Higher-level driver workflows built on the command client.

pub mod session;
pub mod status_monitor;

pub use session::DriverSession;
pub use status_monitor::StatusMonitor;
