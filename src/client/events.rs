//! Client Events
//!
//! Push notifications emitted by the command client: decoded frames,
//! malformed-frame diagnostics, and channel teardown.

use std::sync::Arc;

use crate::protocol::envelope::ResponseEnvelope;

/// Events pushed by the command client
#[derive(Clone, Debug)]
pub enum ClientEvent {
    /// A frame decoded successfully. Emitted for every inbound envelope,
    /// whether or not it matched a pending command.
    Message(ResponseEnvelope),

    /// An inbound frame could not be decoded and was dropped
    Malformed {
        /// Raw frame text
        raw: Arc<str>,
        /// Why decoding failed
        reason: Arc<str>,
    },

    /// The channel went away, by request or by failure
    Disconnected {
        /// Human-readable cause
        reason: Arc<str>,
    },
}
