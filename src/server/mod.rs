pub mod config;
mod http_layers;
mod metered_classifier;
pub mod metrics;
mod playlist_routes;
pub mod server;
pub mod state;
pub mod websocket;

pub use config::ServerConfig;
pub use http_layers::*;
pub use metered_classifier::MeteredClassifier;
pub use playlist_routes::{ClearPlaylistResponse, SeedResponse};
pub use server::{make_app, run_server};
