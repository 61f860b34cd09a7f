//! Chat sessions by id.
//!
//! Each session owns a [`DialogueEngine`] behind an async mutex, so turns of
//! one session never interleave while different sessions run independently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::dialogue::{DialogueEngine, DialogueSettings, ResponseAction, TurnResult};
use crate::server::state::{GuardedCatalogStore, GuardedClassifier};

pub struct ChatSession {
    id: String,
    engine: Mutex<DialogueEngine>,
    exit_requested: AtomicBool,
    /// Open sockets using this session. Only touched under the registry
    /// write lock.
    connections: AtomicUsize,
}

impl ChatSession {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Runs one turn, waiting for any turn already in progress.
    pub async fn handle(&self, text: &str) -> TurnResult {
        let mut engine = self.engine.lock().await;
        let result = engine.dispatch(text).await;
        if result
            .records
            .iter()
            .any(|r| r.action == ResponseAction::Exit)
        {
            self.exit_requested.store(true, Ordering::SeqCst);
        }
        result
    }

    /// Whether an exit record was sent and the client may now acknowledge it.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested.load(Ordering::SeqCst)
    }
}

pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<ChatSession>>>,
    catalog_store: GuardedCatalogStore,
    classifier: GuardedClassifier,
    settings: DialogueSettings,
}

impl SessionRegistry {
    pub fn new(
        catalog_store: GuardedCatalogStore,
        classifier: GuardedClassifier,
        settings: DialogueSettings,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            catalog_store,
            classifier,
            settings,
        }
    }

    /// Returns the session with `id`, creating it if needed, and counts one
    /// more connection on it. The flag is true when the session was created
    /// by this call.
    pub async fn open(&self, id: &str) -> (Arc<ChatSession>, bool) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get(id) {
            let connections = session.connections.fetch_add(1, Ordering::SeqCst) + 1;
            debug!("Resuming chat session {} ({} connections)", id, connections);
            return (session.clone(), false);
        }

        let engine = DialogueEngine::new(
            self.catalog_store.clone(),
            self.classifier.clone(),
            self.settings.clone(),
        );
        let session = Arc::new(ChatSession {
            id: id.to_string(),
            engine: Mutex::new(engine),
            exit_requested: AtomicBool::new(false),
            connections: AtomicUsize::new(1),
        });
        sessions.insert(id.to_string(), session.clone());
        info!("Opened chat session {} ({} active)", id, sessions.len());
        (session, true)
    }

    pub async fn get(&self, id: &str) -> Option<Arc<ChatSession>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Gives back one connection. The session and its conversation state
    /// are dropped with the last one; returns true when that happened.
    pub async fn release(&self, id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get(id) else {
            return false;
        };
        if session.connections.fetch_sub(1, Ordering::SeqCst) > 1 {
            debug!("Chat session {} still has open connections", id);
            return false;
        }
        sessions.remove(id);
        info!("Released chat session {} ({} active)", id, sessions.len());
        true
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
