//! Offline catalogue maintenance: bulk import and the lookup tables the
//! NLU service is trained with.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::catalog_store::{CatalogStore, NewSong};
use crate::search::normalize_text;

lazy_static! {
    static ref NOISE_CHARS: Regex = Regex::new(r"[^\w\s'\-()]").unwrap();
}

/// Inserts every song of a JSON array file. Returns the number inserted.
pub fn import_songs(store: &dyn CatalogStore, path: &Path) -> Result<usize> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read songs file: {:?}", path))?;
    let songs: Vec<NewSong> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse songs file: {:?}", path))?;

    let mut inserted = 0;
    for song in &songs {
        if song.title.trim().is_empty() || song.artist.trim().is_empty() {
            warn!("Skipping song without title or artist: {:?}", song);
            continue;
        }
        store.insert_song(song)?;
        inserted += 1;
    }
    info!("Imported {} of {} songs from {:?}", inserted, songs.len(), path);
    Ok(inserted)
}

/// Strips punctuation from a raw name and folds whitespace runs, line
/// breaks included, into single spaces. Names too short or purely numeric
/// to be useful as lookup entries are dropped.
pub fn clean_entry(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.chars().count() <= 2 || raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let stripped = NOISE_CHARS.replace_all(raw, "");
    let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Training data file in the NLU service's format.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NluFile {
    pub version: String,
    pub nlu: Vec<NluLookup>,
}

/// A lookup table whose examples are a `- entry` list in one string.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NluLookup {
    pub lookup: String,
    pub examples: String,
}

pub const NLU_FORMAT_VERSION: &str = "3.1";

#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    pub file_name: &'static str,
    pub lookup: &'static str,
    pub entries: Vec<String>,
}

impl LookupTable {
    fn new(file_name: &'static str, lookup: &'static str) -> Self {
        LookupTable {
            file_name,
            lookup,
            entries: vec![],
        }
    }

    fn push(&mut self, entry: String) {
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    pub fn to_nlu(&self) -> NluFile {
        let examples = self
            .entries
            .iter()
            .map(|entry| format!("- {}\n", entry))
            .collect();
        NluFile {
            version: NLU_FORMAT_VERSION.to_string(),
            nlu: vec![NluLookup {
                lookup: self.lookup.to_string(),
                examples,
            }],
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.to_nlu())
            .with_context(|| format!("Failed to serialize {} lookup table", self.lookup))
    }
}

/// Song, artist and album lookup tables. Song titles are listed together
/// with their normalized form.
pub fn build_lookup_tables(store: &dyn CatalogStore) -> Result<Vec<LookupTable>> {
    let songs = store.all()?;

    let mut titles = LookupTable::new("all_songs.yml", "song");
    for song in &songs {
        if let Some(title) = clean_entry(&song.title) {
            titles.push(title);
            let normalized = song
                .normalized_title
                .clone()
                .unwrap_or_else(|| normalize_text(&song.title));
            if !normalized.is_empty() {
                titles.push(normalized);
            }
        }
    }

    let mut artists = LookupTable::new("all_artists.yml", "artist");
    for artist in store.artist_names()? {
        if let Some(artist) = clean_entry(&artist) {
            artists.push(artist);
        }
    }

    let mut albums = LookupTable::new("all_albums.yml", "album");
    for album in songs.iter().filter_map(|s| s.album.as_deref()) {
        if let Some(album) = clean_entry(album) {
            albums.push(album);
        }
    }

    Ok(vec![titles, artists, albums])
}

pub fn write_lookup_tables(store: &dyn CatalogStore, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    let mut written = vec![];
    for table in build_lookup_tables(store)? {
        let path = dir.join(table.file_name);
        fs::write(&path, table.to_yaml()?).with_context(|| format!("Failed to write {:?}", path))?;
        info!("Wrote {} {} entries to {:?}", table.entries.len(), table.lookup, path);
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::SqliteCatalogStore;
    use tempfile::TempDir;

    fn store_with(songs: &[(&str, &str, Option<&str>)]) -> (SqliteCatalogStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SqliteCatalogStore::new(dir.path().join("catalog.db")).unwrap();
        for (title, artist, album) in songs {
            store
                .insert_song(&NewSong {
                    title: title.to_string(),
                    artist: artist.to_string(),
                    album: album.map(str::to_string),
                    ..Default::default()
                })
                .unwrap();
        }
        (store, dir)
    }

    #[test]
    fn clean_entry_filters_and_strips() {
        assert_eq!(clean_entry("Don't Stop Me Now!"), Some("Don't Stop Me Now".to_string()));
        assert_eq!(clean_entry("  (I Can't Get No) Satisfaction. "), Some("(I Can't Get No) Satisfaction".to_string()));
        assert_eq!(clean_entry("Up"), None);
        assert_eq!(clean_entry("1999"), None);
        assert_eq!(clean_entry("???"), None);
        assert_eq!(
            clean_entry("Bohemian\nRhapsody  \t(Live)"),
            Some("Bohemian Rhapsody (Live)".to_string())
        );
    }

    #[test]
    fn lookup_tables_cover_songs_artists_albums() {
        let (store, _dir) = store_with(&[
            ("Café del Mar", "Energy 52", Some("Café del Mar")),
            ("Hey Jude", "The Beatles", Some("Hey Jude")),
            ("Hey Jude", "Wilson Pickett", None),
            ("22", "Taylor Swift", Some("Red")),
        ]);

        let tables = build_lookup_tables(&store).unwrap();

        assert_eq!(
            tables[0].entries,
            vec!["Café del Mar", "cafe del mar", "Hey Jude", "hey jude"]
        );
        assert_eq!(
            tables[1].entries,
            vec!["Energy 52", "Taylor Swift", "The Beatles", "Wilson Pickett"]
        );
        assert_eq!(tables[2].entries, vec!["Café del Mar", "Hey Jude", "Red"]);
    }

    fn read_nlu(path: &Path) -> NluFile {
        serde_yaml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn yaml_layout() {
        let table = LookupTable {
            file_name: "all_artists.yml",
            lookup: "artist",
            entries: vec!["Adele".into(), "Queen: Live".into()],
        };

        let yaml = table.to_yaml().unwrap();
        let parsed: NluFile = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.version, "3.1");
        assert_eq!(parsed.nlu.len(), 1);
        assert_eq!(parsed.nlu[0].lookup, "artist");
        assert_eq!(parsed.nlu[0].examples, "- Adele\n- Queen: Live\n");
    }

    #[test]
    fn export_writes_three_files() {
        let (store, _dir) = store_with(&[("Bohemian Rhapsody", "Queen", Some("A Night at the Opera"))]);
        let out = TempDir::new().unwrap();

        let written = write_lookup_tables(&store, &out.path().join("nlu")).unwrap();

        assert_eq!(written.len(), 3);
        let songs = read_nlu(&out.path().join("nlu/all_songs.yml"));
        assert_eq!(songs.nlu[0].lookup, "song");
        assert_eq!(
            songs.nlu[0].examples,
            "- Bohemian Rhapsody\n- bohemian rhapsody\n"
        );
    }

    #[test]
    fn export_keeps_multiline_titles_inside_their_entry() {
        let (store, _dir) = store_with(&[("Bohemian\nRhapsody", "Queen", None)]);
        let out = TempDir::new().unwrap();

        write_lookup_tables(&store, out.path()).unwrap();

        let songs = read_nlu(&out.path().join("all_songs.yml"));
        let lines: Vec<&str> = songs.nlu[0].examples.lines().collect();
        assert_eq!(lines, vec!["- Bohemian Rhapsody", "- bohemian rhapsody"]);
    }

    #[test]
    fn import_reads_json_array() {
        let (store, dir) = store_with(&[]);
        let path = dir.path().join("songs.json");
        fs::write(
            &path,
            r#"[
                {"title": "Weightless", "artist": "Marconi Union", "year": 2011, "energy": 0.08},
                {"title": "", "artist": "Nobody"},
                {"title": "Clair de Lune", "artist": "Claude Debussy"}
            ]"#,
        )
        .unwrap();

        assert_eq!(import_songs(&store, &path).unwrap(), 2);
        let songs = store.all().unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].year, Some(2011));
        assert_eq!(songs[0].features.energy, Some(0.08));
    }

    #[test]
    fn import_reports_malformed_file() {
        let (store, dir) = store_with(&[]);
        let path = dir.path().join("songs.json");
        fs::write(&path, "{not json").unwrap();

        let err = import_songs(&store, &path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse songs file"));
    }
}
