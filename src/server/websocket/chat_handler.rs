//! Chat socket: one dialogue session per connection.
//!
//! The session gets a welcome record when it is created. Every text frame
//! is a turn whose records are sent back in order. After an exit record the
//! client's `exit-ack` closes the socket; closing or dropping the
//! connection releases the session either way.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, error};
use uuid::Uuid;

use super::messages::{inbound_text, EXIT_ACK};
use super::session_registry::ChatSession;
use crate::dialogue::ResponseRecord;
use crate::server::metrics::{record_dialogue_turn, set_active_sessions, set_catalog_songs};
use crate::server::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct ChatParams {
    pub session_id: Option<String>,
}

/// Route handler for `GET /v1/chat/ws`. A missing session id gets a fresh
/// random one.
pub async fn chat_ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ChatParams>,
    State(state): State<ServerState>,
) -> Response {
    let session_id = params
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    debug!("Chat socket upgrade for session {}", session_id);
    ws.on_upgrade(move |socket| handle_socket(socket, session_id, state))
}

async fn handle_socket(socket: WebSocket, session_id: String, state: ServerState) {
    let (session, created) = state.sessions.open(&session_id).await;
    set_active_sessions(state.sessions.count().await);

    let (ws_sink, ws_stream) = socket.split();
    let (outgoing_tx, outgoing_rx) = mpsc::channel::<ResponseRecord>(32);
    let outgoing_handle = tokio::spawn(forward_outgoing(ws_sink, outgoing_rx));

    if created {
        let _ = outgoing_tx.send(ResponseRecord::welcome()).await;
    }

    process_incoming(ws_stream, &session, &outgoing_tx, &state).await;

    // Closing the channel lets the forwarder flush and send a close frame.
    drop(outgoing_tx);
    if let Err(e) = outgoing_handle.await {
        error!("Chat forwarder for session {} failed: {}", session_id, e);
    }

    state.sessions.release(&session_id).await;
    set_active_sessions(state.sessions.count().await);
}

/// Forward records from the outgoing channel to the WebSocket.
async fn forward_outgoing(
    mut ws_sink: futures::stream::SplitSink<WebSocket, Message>,
    mut outgoing_rx: mpsc::Receiver<ResponseRecord>,
) {
    while let Some(record) = outgoing_rx.recv().await {
        match serde_json::to_string(&record) {
            Ok(json) => {
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    return;
                }
            }
            Err(e) => {
                error!("Failed to serialize chat record: {}", e);
            }
        }
    }
    let _ = ws_sink.send(Message::Close(None)).await;
}

async fn process_incoming(
    mut ws_stream: futures::stream::SplitStream<WebSocket>,
    session: &ChatSession,
    outgoing_tx: &mpsc::Sender<ResponseRecord>,
    state: &ServerState,
) {
    while let Some(result) = ws_stream.next().await {
        match result {
            Ok(Message::Text(frame)) => {
                let text = inbound_text(frame.as_str());
                if text.trim() == EXIT_ACK {
                    if session.exit_requested() {
                        debug!("Session {} acknowledged exit", session.id());
                        break;
                    }
                    debug!("Ignoring exit-ack without a pending exit");
                    continue;
                }

                let turn = session.handle(&text).await;
                record_dialogue_turn(turn.outcome.as_str());
                if turn.playlist_changed {
                    state
                        .playlist_events
                        .notify(state.config.dialogue.playlist_id);
                    if let Ok(count) = state.catalog_store.songs_count() {
                        set_catalog_songs(count);
                    }
                }
                for record in turn.records {
                    if outgoing_tx.send(record).await.is_err() {
                        return;
                    }
                }
            }
            Ok(Message::Close(_)) => {
                debug!("Received close frame");
                break;
            }
            Ok(_) => {
                debug!("Ignoring non-text chat frame");
            }
            Err(e) => {
                debug!("WebSocket error: {}", e);
                break;
            }
        }
    }
}
