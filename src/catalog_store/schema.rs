//! SQLite schema of the song catalogue and its playlists.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, ForeignKey, SqlType, Table, VersionedSchema};
use rusqlite::Connection;

const SONGS_TABLE_V0: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("artist", &SqlType::Text, non_null = true),
        sqlite_column!("album", &SqlType::Text),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("duration_sec", &SqlType::Integer),
        sqlite_column!("tempo", &SqlType::Real),
        sqlite_column!("normalized_title", &SqlType::Text),
    ],
    indices: &[
        ("idx_songs_normalized_title", "normalized_title"),
        ("idx_songs_artist", "artist"),
        ("idx_songs_album", "album"),
    ],
    unique_constraints: &[],
};

/// V1 adds the acoustic features used by mood and activity filtering.
const SONGS_TABLE_V1: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("artist", &SqlType::Text, non_null = true),
        sqlite_column!("album", &SqlType::Text),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("duration_sec", &SqlType::Integer),
        sqlite_column!("tempo", &SqlType::Real),
        sqlite_column!("normalized_title", &SqlType::Text),
        sqlite_column!("valence", &SqlType::Real),
        sqlite_column!("energy", &SqlType::Real),
        sqlite_column!("danceability", &SqlType::Real),
        sqlite_column!("instrumentalness", &SqlType::Real),
    ],
    indices: &[
        ("idx_songs_normalized_title", "normalized_title"),
        ("idx_songs_artist", "artist"),
        ("idx_songs_album", "album"),
    ],
    unique_constraints: &[],
};

const PLAYLISTS_TABLE: Table = Table {
    name: "playlists",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("description", &SqlType::Text),
    ],
    indices: &[],
    unique_constraints: &[],
};

const PLAYLIST_SONGS_TABLE: Table = Table {
    name: "playlist_songs",
    columns: &[
        sqlite_column!(
            "playlist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "playlists",
                foreign_column: "id",
                cascade_on_delete: true,
            })
        ),
        sqlite_column!(
            "song_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "songs",
                foreign_column: "id",
                cascade_on_delete: true,
            })
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_playlist_songs_playlist", "playlist_id")],
    unique_constraints: &[&["playlist_id", "song_id"]],
};

fn migrate_v0_to_v1(conn: &Connection) -> anyhow::Result<()> {
    for column in ["valence", "energy", "danceability", "instrumentalness"] {
        conn.execute(&format!("ALTER TABLE songs ADD COLUMN {column} REAL"), [])?;
    }
    Ok(())
}

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[
    VersionedSchema {
        version: 0,
        tables: &[SONGS_TABLE_V0, PLAYLISTS_TABLE, PLAYLIST_SONGS_TABLE],
        migration: None,
    },
    VersionedSchema {
        version: 1,
        tables: &[SONGS_TABLE_V1, PLAYLISTS_TABLE, PLAYLIST_SONGS_TABLE],
        migration: Some(migrate_v0_to_v1),
    },
];
