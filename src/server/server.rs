use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration};

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tracing::info;

use super::metrics::metrics_handler;
use super::playlist_routes::make_playlist_routes;
use super::websocket::{chat_ws_handler, playlist_ws_handler};
use super::{log_requests, state::*, MeteredClassifier, ServerConfig};

#[derive(Serialize, Deserialize, Debug)]
pub struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub version: String,
    pub active_sessions: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.sessions.count().await,
    };
    Json(stats)
}

/// Builds the application router. The classifier is wrapped so that its
/// latency is recorded.
pub fn make_app(
    config: ServerConfig,
    catalog_store: GuardedCatalogStore,
    classifier: GuardedClassifier,
) -> Router {
    let classifier: GuardedClassifier = Arc::new(MeteredClassifier::new(classifier));
    let state = ServerState::new(config, catalog_store, classifier);

    let ws_routes: Router = Router::new()
        .route("/chat/ws", get(chat_ws_handler))
        .route("/playlist/ws", get(playlist_ws_handler))
        .with_state(state.clone());

    let home_router: Router = match state.config.frontend_dir_path.clone() {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .nest("/v1", make_playlist_routes(state.clone()).merge(ws_routes))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(
    config: ServerConfig,
    catalog_store: GuardedCatalogStore,
    classifier: GuardedClassifier,
) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, catalog_store, classifier);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    let metrics_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;

    info!("Ready to serve at port {}!", port);
    info!("Metrics available at port {}!", metrics_port);

    let main_server = async { axum::serve(listener, app).await };
    let metrics_server = async { axum::serve(metrics_listener, make_metrics_app()).await };
    tokio::try_join!(main_server, metrics_server)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::{CatalogStore, SqliteCatalogStore};
    use crate::classifier::NullClassifier;
    use crate::server::RequestsLoggingLevel;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt; // for `oneshot`

    fn test_app() -> (Router, Arc<SqliteCatalogStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SqliteCatalogStore::new(dir.path().join("catalog.db")).unwrap());
        store.seed_demo(1).unwrap();
        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, store.clone(), Arc::new(NullClassifier));
        (app, store, dir)
    }

    async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0d 00:00:00");
        assert_eq!(format_uptime(Duration::from_secs(90_061)), "1d 01:01:01");
    }

    #[tokio::test]
    async fn home_reports_stats() {
        let (app, _store, _dir) = test_app();
        let (status, body) = send(&app, "GET", "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["active_sessions"], 0);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn playlist_add_and_remove_report_missing_changes() {
        let (app, store, _dir) = test_app();
        let outside = store.search_not_in_playlist(1, "", 1).unwrap()[0].id;

        let (status, body) = send(&app, "POST", &format!("/v1/playlist/1/add/{outside}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], outside);

        let (status, _) = send(&app, "POST", &format!("/v1/playlist/1/add/{outside}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "POST", &format!("/v1/playlist/1/remove/{outside}")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "POST", &format!("/v1/playlist/1/remove/{outside}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn playlist_listing_and_search() {
        let (app, _store, _dir) = test_app();

        let (status, body) = send(&app, "GET", "/v1/playlist/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "My Favorite Songs");
        assert_eq!(body["songs"].as_array().unwrap().len(), 5);

        let (status, _) = send(&app, "GET", "/v1/playlist/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&app, "GET", "/v1/playlist/1/songs_not_in").await;
        assert_eq!(body.as_array().unwrap().len(), 10);

        let (_, body) = send(&app, "GET", "/v1/playlist/1/songs_not_in?search=zzzz").await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_and_seed() {
        let (app, store, _dir) = test_app();

        let (status, body) = send(&app, "POST", "/v1/playlist/1/clear").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removed"], 5);
        assert!(store.playlist_songs(1).unwrap().is_empty());

        let (status, body) = send(&app, "POST", "/v1/seed").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["songs"], store.songs_count().unwrap());
        assert_eq!(store.playlist_songs(1).unwrap().len(), 5);

        let (_, body) = send(&app, "GET", "/v1/songs").await;
        assert_eq!(body.as_array().unwrap().len(), store.songs_count().unwrap());
    }

    #[tokio::test]
    async fn frontend_dir_replaces_stats_page() {
        let (_, store, dir) = test_app();
        let frontend = dir.path().join("frontend");
        std::fs::create_dir(&frontend).unwrap();
        std::fs::write(frontend.join("index.html"), "<h1>playlist</h1>").unwrap();

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            frontend_dir_path: Some(frontend.to_string_lossy().to_string()),
            ..Default::default()
        };
        let app = make_app(config, store, Arc::new(NullClassifier));

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>playlist</h1>");

        let (status, _) = send(&app, "GET", "/v1/playlist/1").await;
        assert_eq!(status, StatusCode::OK);
    }
}
