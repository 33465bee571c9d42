//! Driver Control Channel
//!
//! Request/response correlation over the driver's WebSocket endpoint, plus
//! the push events the client emits outside the request cycle.

mod command_client;
mod events;

#[cfg(test)]
pub(crate) mod testing;

pub use command_client::{
    ClientOptions, CommandClient, CommandError, ConnectError, ConnectionState, DisconnectError,
};
pub use events::ClientEvent;
