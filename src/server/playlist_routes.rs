//! REST surface over the catalogue and playlists, for the playlist viewer.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::metrics::set_catalog_songs;
use super::state::ServerState;
use crate::catalog_store::PlaylistWithSongs;

const SONGS_NOT_IN_LIMIT: usize = 10;

#[derive(Deserialize, Debug, Default)]
struct SongsNotInParams {
    #[serde(default)]
    search: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ClearPlaylistResponse {
    pub removed: usize,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SeedResponse {
    pub songs: usize,
}

fn internal_error(err: anyhow::Error) -> Response {
    error!("Catalog request failed: {:#}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response()
}

async fn get_songs(State(state): State<ServerState>) -> Response {
    match state.catalog_store.all() {
        Ok(songs) => Json(songs).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_playlist(State(state): State<ServerState>, Path(id): Path<i64>) -> Response {
    let store = &state.catalog_store;
    let playlist = match store.playlist(id) {
        Ok(Some(playlist)) => playlist,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(err) => return internal_error(err),
    };
    match store.playlist_songs(id) {
        Ok(songs) => Json(PlaylistWithSongs { playlist, songs }).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn get_songs_not_in_playlist(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(params): Query<SongsNotInParams>,
) -> Response {
    match state
        .catalog_store
        .search_not_in_playlist(id, params.search.trim(), SONGS_NOT_IN_LIMIT)
    {
        Ok(songs) => Json(songs).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn add_song(
    State(state): State<ServerState>,
    Path((id, song_id)): Path<(i64, i64)>,
) -> Response {
    match state.catalog_store.add(id, song_id) {
        Ok(Some(song)) => {
            state.playlist_events.notify(id);
            Json(song).into_response()
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => internal_error(err),
    }
}

async fn remove_song(
    State(state): State<ServerState>,
    Path((id, song_id)): Path<(i64, i64)>,
) -> Response {
    match state.catalog_store.remove(id, song_id) {
        Ok(Some(song)) => {
            state.playlist_events.notify(id);
            Json(song).into_response()
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => internal_error(err),
    }
}

async fn clear_playlist(State(state): State<ServerState>, Path(id): Path<i64>) -> Response {
    match state.catalog_store.clear(id) {
        Ok(removed) => {
            state.playlist_events.notify(id);
            Json(ClearPlaylistResponse { removed }).into_response()
        }
        Err(err) => internal_error(err),
    }
}

async fn seed(State(state): State<ServerState>) -> Response {
    let playlist_id = state.config.dialogue.playlist_id;
    match state.catalog_store.seed_demo(playlist_id) {
        Ok(songs) => {
            info!("Seeded demo catalogue with {} songs", songs);
            set_catalog_songs(songs);
            state.playlist_events.notify(playlist_id);
            Json(SeedResponse { songs }).into_response()
        }
        Err(err) => internal_error(err),
    }
}

pub fn make_playlist_routes(state: ServerState) -> Router {
    Router::new()
        .route("/songs", get(get_songs))
        .route("/seed", post(seed))
        .route("/playlist/{id}", get(get_playlist))
        .route("/playlist/{id}/songs_not_in", get(get_songs_not_in_playlist))
        .route("/playlist/{id}/add/{song_id}", post(add_song))
        .route("/playlist/{id}/remove/{song_id}", post(remove_song))
        .route("/playlist/{id}/clear", post(clear_playlist))
        .with_state(state)
}
