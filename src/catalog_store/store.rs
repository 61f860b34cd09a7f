//! SQLite-backed catalogue store.

use super::models::{AudioFeatures, NewSong, Playlist, Song, SongQuery};
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use crate::search::{normalize_text, query_tokens};
use crate::sqlite_persistence::migrate_if_needed;
use anyhow::{anyhow, Context, Result};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

const SONG_COLUMNS: &str = "s.id, s.title, s.artist, s.album, s.year, s.duration_sec, s.tempo, \
     s.normalized_title, s.valence, s.energy, s.danceability, s.instrumentalness";

/// SQLite-backed catalogue store. Cloning shares the same connection.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let mut conn = Connection::open_with_flags(
            db_path.as_ref(),
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open catalog database {:?}", db_path.as_ref()))?;

        migrate_if_needed(&mut conn, CATALOG_VERSIONED_SCHEMAS)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let song_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM songs", [], |r| r.get(0))
            .unwrap_or(0);
        let playlist_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM playlists", [], |r| r.get(0))
            .unwrap_or(0);
        info!(
            "Opened catalog: {} songs, {} playlists",
            song_count, playlist_count
        );

        Ok(SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Catalog connection mutex poisoned"))
    }

    // =========================================================================
    // Internal Helper Methods
    // =========================================================================

    /// Parse a Song from a row selected with `SONG_COLUMNS`.
    fn parse_song_row(row: &rusqlite::Row) -> rusqlite::Result<Song> {
        Ok(Song {
            id: row.get(0)?,
            title: row.get(1)?,
            artist: row.get(2)?,
            album: row.get(3)?,
            year: row.get(4)?,
            duration_sec: row.get(5)?,
            tempo: row.get(6)?,
            normalized_title: row.get(7)?,
            features: AudioFeatures {
                valence: row.get(8)?,
                energy: row.get(9)?,
                danceability: row.get(10)?,
                instrumentalness: row.get(11)?,
            },
        })
    }

    fn query_songs(conn: &Connection, sql: &str, values: Vec<Value>) -> Result<Vec<Song>> {
        let mut stmt = conn.prepare_cached(sql)?;
        let songs = stmt
            .query_map(params_from_iter(values), Self::parse_song_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(songs)
    }

    fn get_song_with(conn: &Connection, id: i64) -> Result<Option<Song>> {
        let song = conn
            .query_row(
                &format!("SELECT {SONG_COLUMNS} FROM songs s WHERE s.id = ?1"),
                params![id],
                Self::parse_song_row,
            )
            .optional()?;
        Ok(song)
    }

    fn like_pattern(s: &str) -> String {
        format!("%{}%", s.to_lowercase())
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn get_song(&self, id: i64) -> Result<Option<Song>> {
        let conn = self.conn()?;
        Self::get_song_with(&conn, id)
    }

    fn find_exact(&self, query: &SongQuery) -> Result<Vec<Song>> {
        let mut clauses = vec!["s.title = ?".to_string()];
        let mut values = vec![Value::Text(query.title.clone())];
        if let Some(artist) = &query.artist {
            clauses.push("s.artist = ?".into());
            values.push(Value::Text(artist.clone()));
        }
        if let Some(album) = &query.album {
            clauses.push("s.album = ?".into());
            values.push(Value::Text(album.clone()));
        }
        if let Some(year) = query.year {
            clauses.push("s.year = ?".into());
            values.push(Value::Integer(year as i64));
        }

        let sql = format!(
            "SELECT {SONG_COLUMNS} FROM songs s WHERE {} ORDER BY s.id",
            clauses.join(" AND ")
        );
        let conn = self.conn()?;
        Self::query_songs(&conn, &sql, values)
    }

    fn find_fuzzy(&self, query: &SongQuery, limit: usize) -> Result<Vec<Song>> {
        let normalized = normalize_text(&query.title);
        let tokens = query_tokens(&normalized);
        if tokens.is_empty() {
            return Ok(vec![]);
        }
        let token_patterns: Vec<Value> = tokens
            .iter()
            .map(|t| Value::Text(format!("%{t}%")))
            .collect();

        let token_clause = vec!["s.normalized_title LIKE ?"; tokens.len()].join(" OR ");
        let mut clauses = vec![format!("({token_clause})")];
        let mut values = token_patterns.clone();
        if let Some(artist) = &query.artist {
            clauses.push("LOWER(s.artist) = ?".into());
            values.push(Value::Text(artist.to_lowercase()));
        }
        if let Some(album) = &query.album {
            clauses.push("LOWER(s.album) = ?".into());
            values.push(Value::Text(album.to_lowercase()));
        }
        if let Some(year) = query.year {
            clauses.push("s.year = ?".into());
            values.push(Value::Integer(year as i64));
        }

        // Common tokens ("of", "you") match many titles, so the LIMIT must
        // keep the closest rows rather than the lowest ids.
        let matched_tokens = vec!["(s.normalized_title LIKE ?)"; tokens.len()].join(" + ");
        values.push(Value::Text(format!("%{normalized}%")));
        values.extend(token_patterns);
        values.push(Value::Integer(limit as i64));

        let sql = format!(
            "SELECT {SONG_COLUMNS} FROM songs s WHERE {} \
             ORDER BY (s.normalized_title LIKE ?) DESC, ({matched_tokens}) DESC, s.id \
             LIMIT ?",
            clauses.join(" AND ")
        );
        let conn = self.conn()?;
        let songs = Self::query_songs(&conn, &sql, values)?;
        debug!(
            "Fuzzy pre-filter for '{}' kept {} candidates",
            query.title,
            songs.len()
        );
        Ok(songs)
    }

    fn by_title(&self, title: &str) -> Result<Vec<Song>> {
        let conn = self.conn()?;
        Self::query_songs(
            &conn,
            &format!("SELECT {SONG_COLUMNS} FROM songs s WHERE LOWER(s.title) LIKE ? ORDER BY s.id"),
            vec![Value::Text(Self::like_pattern(title))],
        )
    }

    fn by_artist(&self, artist: &str) -> Result<Vec<Song>> {
        let conn = self.conn()?;
        Self::query_songs(
            &conn,
            &format!("SELECT {SONG_COLUMNS} FROM songs s WHERE LOWER(s.artist) LIKE ? ORDER BY s.id"),
            vec![Value::Text(Self::like_pattern(artist))],
        )
    }

    fn by_album(&self, album: &str) -> Result<Vec<Song>> {
        let conn = self.conn()?;
        Self::query_songs(
            &conn,
            &format!("SELECT {SONG_COLUMNS} FROM songs s WHERE LOWER(s.album) LIKE ? ORDER BY s.id"),
            vec![Value::Text(Self::like_pattern(album))],
        )
    }

    fn artist_names(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached("SELECT DISTINCT artist FROM songs ORDER BY artist")?;
        let names = stmt
            .query_map([], |r| r.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    fn all(&self) -> Result<Vec<Song>> {
        let conn = self.conn()?;
        Self::query_songs(
            &conn,
            &format!("SELECT {SONG_COLUMNS} FROM songs s ORDER BY s.id"),
            vec![],
        )
    }

    fn songs_count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM songs", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    fn search_not_in_playlist(
        &self,
        playlist_id: i64,
        search: &str,
        limit: usize,
    ) -> Result<Vec<Song>> {
        let conn = self.conn()?;
        Self::query_songs(
            &conn,
            &format!(
                "SELECT {SONG_COLUMNS} FROM songs s \
                 WHERE s.id NOT IN (SELECT song_id FROM playlist_songs WHERE playlist_id = ?1) \
                 AND (LOWER(s.title) LIKE ?2 OR LOWER(s.artist) LIKE ?2) \
                 ORDER BY s.id LIMIT ?3"
            ),
            vec![
                Value::Integer(playlist_id),
                Value::Text(Self::like_pattern(search)),
                Value::Integer(limit as i64),
            ],
        )
    }

    fn playlist(&self, playlist_id: i64) -> Result<Option<Playlist>> {
        let conn = self.conn()?;
        let playlist = conn
            .query_row(
                "SELECT id, name, description FROM playlists WHERE id = ?1",
                params![playlist_id],
                |row| {
                    Ok(Playlist {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(playlist)
    }

    fn playlist_songs(&self, playlist_id: i64) -> Result<Vec<Song>> {
        let conn = self.conn()?;
        Self::query_songs(
            &conn,
            &format!(
                "SELECT {SONG_COLUMNS} FROM playlist_songs ps \
                 JOIN songs s ON s.id = ps.song_id \
                 WHERE ps.playlist_id = ?1 ORDER BY ps.position"
            ),
            vec![Value::Integer(playlist_id)],
        )
    }

    fn ensure_playlist(&self, playlist_id: i64, name: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO playlists (id, name) VALUES (?1, ?2)",
            params![playlist_id, name],
        )?;
        Ok(())
    }

    fn add(&self, playlist_id: i64, song_id: i64) -> Result<Option<Song>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let Some(song) = Self::get_song_with(&tx, song_id)? else {
            return Ok(None);
        };
        let playlist_exists = tx
            .query_row(
                "SELECT 1 FROM playlists WHERE id = ?1",
                params![playlist_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !playlist_exists {
            return Ok(None);
        }

        let next_position: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM playlist_songs WHERE playlist_id = ?1",
            params![playlist_id],
            |r| r.get(0),
        )?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO playlist_songs (playlist_id, song_id, position) VALUES (?1, ?2, ?3)",
            params![playlist_id, song_id, next_position],
        )?;
        tx.commit()?;

        Ok(if inserted == 1 { Some(song) } else { None })
    }

    fn remove(&self, playlist_id: i64, song_id: i64) -> Result<Option<Song>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let song = Self::get_song_with(&tx, song_id)?;
        let removed = tx.execute(
            "DELETE FROM playlist_songs WHERE playlist_id = ?1 AND song_id = ?2",
            params![playlist_id, song_id],
        )?;
        tx.commit()?;
        Ok(if removed > 0 { song } else { None })
    }

    fn clear(&self, playlist_id: i64) -> Result<usize> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM playlist_songs WHERE playlist_id = ?1",
            params![playlist_id],
        )?;
        Ok(removed)
    }

    fn insert_song(&self, song: &NewSong) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO songs (title, artist, album, year, duration_sec, tempo, normalized_title, \
             valence, energy, danceability, instrumentalness) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                song.title,
                song.artist,
                song.album,
                song.year,
                song.duration_sec,
                song.tempo,
                normalize_text(&song.title),
                song.features.valence,
                song.features.energy,
                song.features.danceability,
                song.features.instrumentalness,
            ],
        )
        .with_context(|| format!("Failed to insert song '{}'", song.title))?;
        Ok(conn.last_insert_rowid())
    }

    fn reset(&self) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM playlist_songs", [])?;
        tx.execute("DELETE FROM playlists", [])?;
        tx.execute("DELETE FROM songs", [])?;
        tx.commit()?;
        Ok(())
    }
}
