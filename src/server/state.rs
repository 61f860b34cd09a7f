use axum::extract::FromRef;

use crate::catalog_store::CatalogStore;
use crate::classifier::IntentClassifier;
use std::sync::Arc;
use std::time::Instant;

use super::websocket::{PlaylistEvents, SessionRegistry};
use super::ServerConfig;

pub type GuardedCatalogStore = Arc<dyn CatalogStore>;
pub type GuardedClassifier = Arc<dyn IntentClassifier>;
pub type GuardedSessionRegistry = Arc<SessionRegistry>;
pub type GuardedPlaylistEvents = Arc<PlaylistEvents>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog_store: GuardedCatalogStore,
    pub classifier: GuardedClassifier,
    pub sessions: GuardedSessionRegistry,
    pub playlist_events: GuardedPlaylistEvents,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        catalog_store: GuardedCatalogStore,
        classifier: GuardedClassifier,
    ) -> ServerState {
        let sessions = Arc::new(SessionRegistry::new(
            catalog_store.clone(),
            classifier.clone(),
            config.dialogue.clone(),
        ));
        ServerState {
            config,
            start_time: Instant::now(),
            catalog_store,
            classifier,
            sessions,
            playlist_events: Arc::new(PlaylistEvents::default()),
            hash: env!("GIT_HASH").to_string(),
        }
    }
}

impl FromRef<ServerState> for GuardedCatalogStore {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog_store.clone()
    }
}

impl FromRef<ServerState> for GuardedClassifier {
    fn from_ref(input: &ServerState) -> Self {
        input.classifier.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for GuardedSessionRegistry {
    fn from_ref(input: &ServerState) -> Self {
        input.sessions.clone()
    }
}

impl FromRef<ServerState> for GuardedPlaylistEvents {
    fn from_ref(input: &ServerState) -> Self {
        input.playlist_events.clone()
    }
}
