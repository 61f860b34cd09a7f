//! Test catalogue fixtures

use super::constants::*;
use anyhow::Result;
use pezzottify_assistant::catalog_store::{CatalogStore, NewSong, SqliteCatalogStore};
use tempfile::TempDir;

fn song(title: &str, artist: &str, album: &str, year: i32) -> NewSong {
    NewSong {
        title: title.to_string(),
        artist: artist.to_string(),
        album: Some(album.to_string()),
        year: Some(year),
        duration_sec: Some(240),
        ..Default::default()
    }
}

/// Creates a catalogue whose song ids match the constants, plus an empty
/// playlist.
pub fn create_test_catalog() -> Result<(TempDir, SqliteCatalogStore)> {
    let dir = TempDir::new()?;
    let store = SqliteCatalogStore::new(dir.path().join("catalog.db"))?;

    let songs = [
        (SHAPE_OF_YOU_ID, song("Shape of You", "Ed Sheeran", "Divide", 2017)),
        (PERFECT_ID, song("Perfect", "Ed Sheeran", "Divide", 2017)),
        (HEY_JUDE_BEATLES_ID, song("Hey Jude", "The Beatles", "Hey Jude", 1968)),
        (HEY_JUDE_PICKETT_ID, song("Hey Jude", "Wilson Pickett", "Hey Jude", 1969)),
        (HEY_JUDE_ELVIS_ID, song("Hey Jude", "Elvis Presley", "Elvis Now", 1972)),
        (THRILLER_ID, song("Thriller", "Michael Jackson", "Thriller", 1982)),
        (LEVITATING_ID, song("Levitating", "Dua Lipa", "Future Nostalgia", 2020)),
    ];
    for (expected_id, song) in songs.iter() {
        let id = store.insert_song(song)?;
        anyhow::ensure!(id == *expected_id, "unexpected id {} for {}", id, song.title);
    }
    store.ensure_playlist(PLAYLIST_ID, PLAYLIST_NAME)?;

    Ok((dir, store))
}
