//! Pezzottify Assistant Library
//!
//! A conversational assistant that edits a music playlist: it answers
//! catalogue questions, adds and removes songs, and recommends or generates
//! playlists from free-text requests.

pub mod catalog_store;
pub mod catalog_tools;
pub mod classifier;
pub mod config;
pub mod dialogue;
pub mod search;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use catalog_store::{CatalogStore, SqliteCatalogStore};
pub use classifier::{IntentClassifier, NullClassifier, RasaClassifier, ScriptedClassifier};
pub use dialogue::{DialogueEngine, DialogueSettings};
pub use server::{run_server, RequestsLoggingLevel, ServerConfig};
