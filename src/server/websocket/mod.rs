//! WebSocket endpoints: the chat socket that drives a dialogue session and
//! the playlist socket that announces playlist changes.

mod chat_handler;
pub mod messages;
mod playlist_events;
mod session_registry;

pub use chat_handler::chat_ws_handler;
pub use playlist_events::{playlist_ws_handler, PlaylistEvents};
pub use session_registry::{ChatSession, SessionRegistry};
