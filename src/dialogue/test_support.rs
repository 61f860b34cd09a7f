use crate::catalog_store::{
    AudioFeatures, CatalogStore, NewSong, Playlist, Song, SongQuery, SqliteCatalogStore,
};
use anyhow::{bail, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

pub struct TestSong(NewSong);

impl TestSong {
    pub fn new(title: &str, artist: &str) -> Self {
        TestSong(NewSong {
            title: title.to_string(),
            artist: artist.to_string(),
            ..Default::default()
        })
    }

    pub fn album(mut self, album: &str) -> Self {
        self.0.album = Some(album.to_string());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.0.year = Some(year);
        self
    }

    pub fn duration(mut self, seconds: u32) -> Self {
        self.0.duration_sec = Some(seconds);
        self
    }

    pub fn tempo(mut self, bpm: f64) -> Self {
        self.0.tempo = Some(bpm);
        self
    }

    pub fn features(mut self, valence: f64, energy: f64, danceability: f64, instrumentalness: f64) -> Self {
        self.0.features = AudioFeatures {
            valence: Some(valence),
            energy: Some(energy),
            danceability: Some(danceability),
            instrumentalness: Some(instrumentalness),
        };
        self
    }
}

/// Fresh store holding `songs` (ids 1..=n in order) and an empty playlist 1.
pub fn store_with(songs: &[TestSong]) -> (SqliteCatalogStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = SqliteCatalogStore::new(temp_dir.path().join("catalog.db")).unwrap();
    for song in songs {
        store.insert_song(&song.0).unwrap();
    }
    store.ensure_playlist(1, "Test").unwrap();
    (store, temp_dir)
}

pub fn ids(songs: &[Song]) -> Vec<i64> {
    songs.iter().map(|s| s.id).collect()
}

/// SQLite store whose playlist writes can be made to fail mid-turn.
pub struct FlakyStore {
    inner: SqliteCatalogStore,
    failing_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: SqliteCatalogStore) -> Self {
        FlakyStore {
            inner,
            failing_writes: AtomicBool::new(false),
        }
    }

    pub fn set_failing_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    fn check_writes(&self) -> Result<()> {
        if self.failing_writes.load(Ordering::SeqCst) {
            bail!("database is locked");
        }
        Ok(())
    }
}

impl CatalogStore for FlakyStore {
    fn get_song(&self, id: i64) -> Result<Option<Song>> {
        self.inner.get_song(id)
    }

    fn find_exact(&self, query: &SongQuery) -> Result<Vec<Song>> {
        self.inner.find_exact(query)
    }

    fn find_fuzzy(&self, query: &SongQuery, limit: usize) -> Result<Vec<Song>> {
        self.inner.find_fuzzy(query, limit)
    }

    fn by_title(&self, title: &str) -> Result<Vec<Song>> {
        self.inner.by_title(title)
    }

    fn by_artist(&self, artist: &str) -> Result<Vec<Song>> {
        self.inner.by_artist(artist)
    }

    fn by_album(&self, album: &str) -> Result<Vec<Song>> {
        self.inner.by_album(album)
    }

    fn artist_names(&self) -> Result<Vec<String>> {
        self.inner.artist_names()
    }

    fn all(&self) -> Result<Vec<Song>> {
        self.inner.all()
    }

    fn songs_count(&self) -> Result<usize> {
        self.inner.songs_count()
    }

    fn search_not_in_playlist(&self, playlist_id: i64, search: &str, limit: usize) -> Result<Vec<Song>> {
        self.inner.search_not_in_playlist(playlist_id, search, limit)
    }

    fn playlist(&self, playlist_id: i64) -> Result<Option<Playlist>> {
        self.inner.playlist(playlist_id)
    }

    fn playlist_songs(&self, playlist_id: i64) -> Result<Vec<Song>> {
        self.inner.playlist_songs(playlist_id)
    }

    fn ensure_playlist(&self, playlist_id: i64, name: &str) -> Result<()> {
        self.inner.ensure_playlist(playlist_id, name)
    }

    fn add(&self, playlist_id: i64, song_id: i64) -> Result<Option<Song>> {
        self.check_writes()?;
        self.inner.add(playlist_id, song_id)
    }

    fn remove(&self, playlist_id: i64, song_id: i64) -> Result<Option<Song>> {
        self.check_writes()?;
        self.inner.remove(playlist_id, song_id)
    }

    fn clear(&self, playlist_id: i64) -> Result<usize> {
        self.check_writes()?;
        self.inner.clear(playlist_id)
    }

    fn insert_song(&self, song: &NewSong) -> Result<i64> {
        self.inner.insert_song(song)
    }

    fn reset(&self) -> Result<()> {
        self.inner.reset()
    }
}
