//! Wire formats of the chat and playlist sockets.
//!
//! Outbound chat frames are serialized [`ResponseRecord`]s, one per frame:
//! `{"action": "message" | "welcome" | "exit", "message": "..."}`.
//!
//! [`ResponseRecord`]: crate::dialogue::ResponseRecord

use serde::{Deserialize, Serialize};

/// Sent by the client to confirm it received an exit record.
pub const EXIT_ACK: &str = "exit-ack";

/// Client -> Server chat frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatInbound {
    #[serde(alias = "text")]
    pub message: String,
}

/// Extracts the user text of a chat frame. Frames that are not a JSON
/// object with a message are taken verbatim.
pub fn inbound_text(frame: &str) -> String {
    match serde_json::from_str::<ChatInbound>(frame) {
        Ok(inbound) => inbound.message,
        Err(_) => frame.to_string(),
    }
}

/// Server -> Client playlist socket frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaylistUpdated {
    pub updated_playlist_id: i64,
}
