//! Catalogue models shared by the store, the dialogue engine and the
//! HTTP layer.

use serde::{Deserialize, Serialize};

/// Acoustic descriptors of a song, each in `[0, 1]` when present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    #[serde(default)]
    pub valence: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub danceability: Option<f64>,
    #[serde(default)]
    pub instrumentalness: Option<f64>,
}

/// A song as stored in the catalogue. Ascending `id` is catalogue order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub year: Option<i32>,
    pub duration_sec: Option<u32>,
    /// Beats per minute.
    pub tempo: Option<f64>,
    pub normalized_title: Option<String>,
    #[serde(flatten)]
    pub features: AudioFeatures,
}

impl Song {
    pub fn duration_minutes(&self) -> Option<f64> {
        self.duration_sec.map(|s| s as f64 / 60.0)
    }
}

/// A song about to be inserted; the store assigns the id and computes
/// the normalized title.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub duration_sec: Option<u32>,
    #[serde(default)]
    pub tempo: Option<f64>,
    #[serde(flatten)]
    pub features: AudioFeatures,
}

/// Song description used for exact and fuzzy lookups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SongQuery {
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<i32>,
}

impl SongQuery {
    pub fn title(title: impl Into<String>) -> Self {
        SongQuery {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_artist(mut self, artist: Option<String>) -> Self {
        self.artist = artist;
        self
    }

    pub fn with_album(mut self, album: Option<String>) -> Self {
        self.album = album;
        self
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Playlist together with its songs in playlist order, as served over HTTP.
#[derive(Clone, Debug, Serialize)]
pub struct PlaylistWithSongs {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub songs: Vec<Song>,
}
