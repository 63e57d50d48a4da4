//! Message types for actor communication.
//!
//! These enums define the protocol between the transport and ticker
//! threads and the session loop, plus the wire frame the service sends.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event name carrying one streamed token.
pub const CHAT_TOKEN_EVENT: &str = "chatToken";

/// Events from the transport thread.
///
/// Tokens are sent in the order they arrived on the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A connection to the service was established.
    Connected,

    /// The connection was lost or closed by the peer.
    Disconnected {
        /// Human readable cause.
        reason: String,
    },

    /// One token arrived.
    Token(String),
}

/// One newline-delimited JSON frame from the service.
///
/// ```json
/// {"event": "chatToken", "data": "Hel"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFrame {
    /// Event name.
    pub event: String,
    /// Event payload, shape depends on the event.
    #[serde(default)]
    pub data: Value,
}

impl WireFrame {
    /// Build a `chatToken` frame.
    pub fn chat_token(token: impl Into<String>) -> Self {
        Self {
            event: CHAT_TOKEN_EVENT.to_string(),
            data: Value::String(token.into()),
        }
    }
}

/// What a call to [`crate::actor::StreamSession::poll`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The transport connected.
    Connected,

    /// The transport disconnected; queued tokens keep draining.
    Disconnected {
        /// Human readable cause.
        reason: String,
    },

    /// A token was queued. Pending queue length after ingestion.
    Ingested(usize),

    /// A tick released this token onto the display.
    Released(String),

    /// The transport thread is gone and will send nothing more.
    TransportClosed,
}
