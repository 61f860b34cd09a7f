//! Playlist change notifications.
//!
//! Chat turns and REST calls that mutate a playlist publish its id here;
//! every `/v1/playlist/ws` socket forwards the ids to its client.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::debug;

use super::messages::PlaylistUpdated;
use crate::server::state::GuardedPlaylistEvents;

const CHANNEL_CAPACITY: usize = 64;

pub struct PlaylistEvents {
    sender: broadcast::Sender<i64>,
}

impl Default for PlaylistEvents {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }
}

impl PlaylistEvents {
    /// Announces that `playlist_id` changed. Returns how many sockets
    /// were listening.
    pub fn notify(&self, playlist_id: i64) -> usize {
        self.sender.send(playlist_id).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<i64> {
        self.sender.subscribe()
    }
}

pub async fn playlist_ws_handler(
    ws: WebSocketUpgrade,
    State(events): State<GuardedPlaylistEvents>,
) -> Response {
    let updates = events.subscribe();
    ws.on_upgrade(move |socket| forward_updates(socket, updates))
}

async fn forward_updates(socket: WebSocket, mut updates: broadcast::Receiver<i64>) {
    let (mut ws_sink, mut ws_stream) = socket.split();
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(playlist_id) => {
                    let frame = PlaylistUpdated { updated_playlist_id: playlist_id };
                    let Ok(json) = serde_json::to_string(&frame) else { continue };
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    debug!("Playlist socket lagged behind by {} updates", n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = ws_stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
    debug!("Playlist socket closed");
}
