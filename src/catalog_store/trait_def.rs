//! CatalogStore trait definition.
//!
//! The dialogue engine and the HTTP routes only talk to the catalogue
//! through this trait, so tests can run against a throwaway SQLite file
//! and the server never depends on the concrete backend.

use super::demo_data::{DEMO_PLAYLIST_NAME, DEMO_PLAYLIST_SIZE, DEMO_SONGS};
use super::models::{NewSong, Playlist, Song, SongQuery};
use anyhow::Result;

/// Trait for catalogue storage backends.
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Song Lookup
    // =========================================================================

    fn get_song(&self, id: i64) -> Result<Option<Song>>;

    /// Songs whose provided fields are all exactly equal to the query,
    /// in ascending id order.
    fn find_exact(&self, query: &SongQuery) -> Result<Vec<Song>>;

    /// Fuzzy pre-filter: songs whose normalized title contains any query
    /// token of two or more characters, narrowed by the optional
    /// artist/album (case-insensitive) and year filters. Returns at most
    /// `limit` rows: titles containing the whole query first, then by the
    /// number of matched tokens, then lowest ids. Scoring is left to the
    /// caller.
    fn find_fuzzy(&self, query: &SongQuery, limit: usize) -> Result<Vec<Song>>;

    /// Case-insensitive substring match on the title.
    fn by_title(&self, title: &str) -> Result<Vec<Song>>;

    /// Case-insensitive substring match on the artist.
    fn by_artist(&self, artist: &str) -> Result<Vec<Song>>;

    /// Case-insensitive substring match on the album.
    fn by_album(&self, album: &str) -> Result<Vec<Song>>;

    /// Distinct artist names, alphabetically.
    fn artist_names(&self) -> Result<Vec<String>>;

    fn all(&self) -> Result<Vec<Song>>;

    fn songs_count(&self) -> Result<usize>;

    /// Songs not in the playlist whose title or artist contains `search`
    /// (case-insensitive). An empty search matches everything.
    fn search_not_in_playlist(
        &self,
        playlist_id: i64,
        search: &str,
        limit: usize,
    ) -> Result<Vec<Song>>;

    // =========================================================================
    // Playlists
    // =========================================================================

    fn playlist(&self, playlist_id: i64) -> Result<Option<Playlist>>;

    /// Songs of the playlist in playlist order.
    fn playlist_songs(&self, playlist_id: i64) -> Result<Vec<Song>>;

    /// Creates the playlist if it does not exist yet.
    fn ensure_playlist(&self, playlist_id: i64, name: &str) -> Result<()>;

    /// Appends a song. Returns `None` when the song does not exist or is
    /// already part of the playlist.
    fn add(&self, playlist_id: i64, song_id: i64) -> Result<Option<Song>>;

    /// Returns `None` when the song was not in the playlist.
    fn remove(&self, playlist_id: i64, song_id: i64) -> Result<Option<Song>>;

    /// Empties the playlist, returning how many songs were removed.
    fn clear(&self, playlist_id: i64) -> Result<usize>;

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a song, computing its normalized title. Returns the new id.
    fn insert_song(&self, song: &NewSong) -> Result<i64>;

    /// Deletes every song and playlist.
    fn reset(&self) -> Result<()>;

    /// Replaces the catalogue with the demo dataset and a default playlist
    /// holding its first few songs. Returns the number of songs inserted.
    fn seed_demo(&self, playlist_id: i64) -> Result<usize> {
        self.reset()?;
        let mut ids = Vec::with_capacity(DEMO_SONGS.len());
        for song in DEMO_SONGS.iter() {
            ids.push(self.insert_song(&song.to_new_song())?);
        }
        self.ensure_playlist(playlist_id, DEMO_PLAYLIST_NAME)?;
        for id in ids.iter().take(DEMO_PLAYLIST_SIZE) {
            self.add(playlist_id, *id)?;
        }
        Ok(ids.len())
    }
}
