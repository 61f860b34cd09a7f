//! HTTP and WebSocket clients for end-to-end tests
//!
//! Tests talk to the server only through these helpers so that route or
//! frame format changes are fixed in one place.

use super::constants::*;
use futures::{SinkExt, StreamExt};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

fn ws_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.replacen("http://", "ws://", 1), path)
}

/// HTTP client for the REST endpoints
pub struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn post(&self, path: &str) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("POST request failed")
    }

    /// GET / (server stats)
    pub async fn home(&self) -> Value {
        self.get("/").await.json().await.expect("Invalid stats JSON")
    }

    /// Polls the server stats until `active_sessions` reaches `expected`.
    pub async fn wait_for_active_sessions(&self, expected: u64) -> bool {
        let deadline = std::time::Instant::now() + Duration::from_millis(WS_FRAME_TIMEOUT_MS);
        while std::time::Instant::now() < deadline {
            if self.home().await["active_sessions"] == expected {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
        }
        false
    }

    /// GET /v1/songs
    pub async fn songs(&self) -> Response {
        self.get("/v1/songs").await
    }

    /// POST /v1/seed
    pub async fn seed(&self) -> Response {
        self.post("/v1/seed").await
    }

    /// GET /v1/playlist/{id}
    pub async fn playlist(&self, playlist_id: i64) -> Response {
        self.get(&format!("/v1/playlist/{}", playlist_id)).await
    }

    /// Song ids of the playlist, in playlist order.
    pub async fn playlist_song_ids(&self, playlist_id: i64) -> Vec<i64> {
        let body: Value = self
            .playlist(playlist_id)
            .await
            .json()
            .await
            .expect("Invalid playlist JSON");
        body["songs"]
            .as_array()
            .expect("Playlist without songs")
            .iter()
            .filter_map(|song| song["id"].as_i64())
            .collect()
    }

    /// GET /v1/playlist/{id}/songs_not_in?search=
    pub async fn songs_not_in(&self, playlist_id: i64, search: &str) -> Response {
        self.client
            .get(format!(
                "{}/v1/playlist/{}/songs_not_in",
                self.base_url, playlist_id
            ))
            .query(&[("search", search)])
            .send()
            .await
            .expect("GET request failed")
    }

    /// POST /v1/playlist/{id}/add/{song_id}
    pub async fn add_song(&self, playlist_id: i64, song_id: i64) -> Response {
        self.post(&format!("/v1/playlist/{}/add/{}", playlist_id, song_id))
            .await
    }

    /// POST /v1/playlist/{id}/remove/{song_id}
    pub async fn remove_song(&self, playlist_id: i64, song_id: i64) -> Response {
        self.post(&format!("/v1/playlist/{}/remove/{}", playlist_id, song_id))
            .await
    }

    /// POST /v1/playlist/{id}/clear
    pub async fn clear_playlist(&self, playlist_id: i64) -> Response {
        self.post(&format!("/v1/playlist/{}/clear", playlist_id))
            .await
    }
}

/// A connected chat socket for one session
pub struct ChatSocket {
    ws: WsStream,
}

impl ChatSocket {
    pub async fn connect(base_url: &str, session_id: &str) -> Self {
        let url = ws_url(base_url, &format!("/v1/chat/ws?session_id={}", session_id));
        let (ws, _) = connect_async(url)
            .await
            .expect("Failed to connect chat socket");
        Self { ws }
    }

    /// Sends a plain text frame.
    pub async fn send(&mut self, text: &str) {
        self.ws
            .send(Message::Text(text.into()))
            .await
            .expect("Failed to send chat frame");
    }

    /// Sends a JSON frame `{"message": text}`.
    pub async fn send_json(&mut self, text: &str) {
        let frame = json!({ "message": text }).to_string();
        self.send(&frame).await;
    }

    /// Next chat record, skipping control frames.
    pub async fn next_record(&mut self) -> Value {
        loop {
            let frame = tokio::time::timeout(
                Duration::from_millis(WS_FRAME_TIMEOUT_MS),
                self.ws.next(),
            )
            .await
            .expect("Timeout waiting for chat record")
            .expect("Chat socket closed")
            .expect("Chat socket error");

            match frame {
                Message::Text(text) => {
                    return serde_json::from_str(text.as_str()).expect("Invalid chat record")
                }
                Message::Close(_) => panic!("Chat socket closed while waiting for a record"),
                _ => continue,
            }
        }
    }

    pub async fn next_message(&mut self) -> String {
        let record = self.next_record().await;
        record["message"]
            .as_str()
            .expect("Record without message")
            .to_string()
    }

    /// Reads `count` records and returns their messages.
    pub async fn messages(&mut self, count: usize) -> Vec<String> {
        let mut messages = Vec::with_capacity(count);
        for _ in 0..count {
            messages.push(self.next_message().await);
        }
        messages
    }

    pub async fn expect_welcome(&mut self) {
        let record = self.next_record().await;
        assert_eq!(record["action"], "welcome");
    }

    /// Returns true when the server closes the socket before the timeout.
    pub async fn wait_for_close(&mut self) -> bool {
        let deadline = Duration::from_millis(WS_FRAME_TIMEOUT_MS);
        let closed = tokio::time::timeout(deadline, async {
            loop {
                match self.ws.next().await {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => return true,
                    Some(Ok(_)) => continue,
                }
            }
        })
        .await;
        closed.unwrap_or(false)
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }
}

/// A connected playlist update socket
pub struct PlaylistSocket {
    ws: WsStream,
}

impl PlaylistSocket {
    pub async fn connect(base_url: &str) -> Self {
        let (ws, _) = connect_async(ws_url(base_url, "/v1/playlist/ws"))
            .await
            .expect("Failed to connect playlist socket");
        Self { ws }
    }

    /// Waits for the next `updated_playlist_id` notification.
    pub async fn next_update(&mut self) -> i64 {
        loop {
            let frame = tokio::time::timeout(
                Duration::from_millis(WS_FRAME_TIMEOUT_MS),
                self.ws.next(),
            )
            .await
            .expect("Timeout waiting for playlist update")
            .expect("Playlist socket closed")
            .expect("Playlist socket error");

            if let Message::Text(text) = frame {
                let value: Value =
                    serde_json::from_str(text.as_str()).expect("Invalid playlist update");
                return value["updated_playlist_id"]
                    .as_i64()
                    .expect("Update without playlist id");
            }
        }
    }
}
