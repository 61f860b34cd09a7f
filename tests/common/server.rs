//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own catalogue and a scripted
//! classifier that tests can teach answers to.

use super::constants::*;
use super::fixtures::create_test_catalog;
use pezzottify_assistant::catalog_store::SqliteCatalogStore;
use pezzottify_assistant::classifier::{Classification, Entity, ScriptedClassifier};
use pezzottify_assistant::dialogue::DialogueSettings;
use pezzottify_assistant::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with an isolated catalogue
///
/// When dropped, the server shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Catalogue store for direct database access in tests
    pub store: Arc<SqliteCatalogStore>,

    pub classifier: Arc<ScriptedClassifier>,

    _temp_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if the catalogue cannot be created, the port cannot be bound
    /// or the server does not become ready in time.
    pub async fn spawn() -> Self {
        let (temp_dir, store) = create_test_catalog().expect("Failed to create test catalog");
        let store = Arc::new(store);
        let classifier = Arc::new(ScriptedClassifier::new());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port,
            metrics_port: 0,
            frontend_dir_path: None,
            dialogue: DialogueSettings {
                playlist_id: PLAYLIST_ID,
                hint_probability: 0.0,
                ..Default::default()
            },
        };
        let app = make_app(config, store.clone(), classifier.clone());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            store,
            classifier,
            _temp_dir: temp_dir,
            _shutdown_tx: Some(shutdown_tx),
        };
        server.wait_for_ready().await;
        server
    }

    /// Teaches the classifier how to classify `text`.
    pub fn script(&self, text: &str, intent: &str, confidence: f64, entities: &[(&str, &str)]) {
        let entities = entities.iter().map(|(k, v)| Entity::new(*k, *v)).collect();
        self.classifier
            .insert(text, Classification::new(intent, confidence, entities));
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
