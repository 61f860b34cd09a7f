//! Exact-then-fuzzy song lookup against the catalogue.

use crate::catalog_store::{CatalogStore, Song, SongQuery};
use crate::search::{best_match, normalize_text, similarity_score};
use anyhow::Result;
use tracing::debug;

/// Rows pulled from the normalized-title index before scoring.
pub const FUZZY_CANDIDATE_LIMIT: usize = 50;
/// Minimum similarity (0..=100) for a fuzzy candidate to survive.
pub const FUZZY_CUTOFF: u8 = 70;
/// Maximum number of candidates offered for clarification.
pub const MAX_MATCHES: usize = 10;
/// Minimum similarity for the fuzzy artist-name fallback.
pub const ARTIST_CUTOFF: u8 = 75;

#[derive(Clone, Debug, PartialEq)]
pub enum MatchResult {
    Exact(Song),
    /// Two or more candidates, ascending id.
    Ambiguous(Vec<Song>),
    NotFound,
}

impl MatchResult {
    /// The single best song: the exact match, or the lowest-id candidate.
    pub fn first(self) -> Option<Song> {
        match self {
            MatchResult::Exact(song) => Some(song),
            MatchResult::Ambiguous(songs) => songs.into_iter().next(),
            MatchResult::NotFound => None,
        }
    }

    pub fn into_songs(self) -> Vec<Song> {
        match self {
            MatchResult::Exact(song) => vec![song],
            MatchResult::Ambiguous(songs) => songs,
            MatchResult::NotFound => vec![],
        }
    }
}

/// Resolves a song description.
///
/// Exact equality on every provided field wins. Several exact rows with an
/// artist resolve to the lowest id; without an artist they are offered for
/// clarification. Otherwise the normalized title is scored against a
/// bounded candidate set and everything under [`FUZZY_CUTOFF`] is dropped.
/// A single fuzzy survivor counts as exact.
pub fn find_song(store: &dyn CatalogStore, query: &SongQuery) -> Result<MatchResult> {
    if query.title.trim().is_empty() {
        return Ok(MatchResult::NotFound);
    }

    let mut exact = store.find_exact(query)?;
    match exact.len() {
        0 => {}
        1 => return Ok(MatchResult::Exact(exact.remove(0))),
        _ if query.artist.is_some() => return Ok(MatchResult::Exact(exact.remove(0))),
        _ => {
            exact.truncate(MAX_MATCHES);
            return Ok(MatchResult::Ambiguous(exact));
        }
    }

    let normalized_query = normalize_text(&query.title);
    let mut scored: Vec<(u8, Song)> = store
        .find_fuzzy(query, FUZZY_CANDIDATE_LIMIT)?
        .into_iter()
        .filter_map(|song| {
            let candidate = song
                .normalized_title
                .clone()
                .unwrap_or_else(|| normalize_text(&song.title));
            let score = similarity_score(&normalized_query, &candidate);
            (score >= FUZZY_CUTOFF).then_some((score, song))
        })
        .collect();

    debug!(
        "Fuzzy match for '{}' kept {} candidates",
        query.title,
        scored.len()
    );

    // Best scores first for the cap, then back to catalogue order.
    scored.sort_by(|(a_score, a), (b_score, b)| b_score.cmp(a_score).then(a.id.cmp(&b.id)));
    let mut songs: Vec<Song> = scored
        .into_iter()
        .take(MAX_MATCHES)
        .map(|(_, song)| song)
        .collect();
    songs.sort_by_key(|s| s.id);

    Ok(match songs.len() {
        0 => MatchResult::NotFound,
        1 => MatchResult::Exact(songs.remove(0)),
        _ => MatchResult::Ambiguous(songs),
    })
}

/// Songs by an artist: case-insensitive substring first, then the closest
/// known artist name when nothing matched.
pub fn find_artist_songs(store: &dyn CatalogStore, name: &str) -> Result<Vec<Song>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(vec![]);
    }
    let songs = store.by_artist(name)?;
    if !songs.is_empty() {
        return Ok(songs);
    }

    let artists = store.artist_names()?;
    let normalized: Vec<String> = artists.iter().map(|a| normalize_text(a)).collect();
    let Some((best, score)) = best_match(
        &normalize_text(name),
        normalized.iter().map(String::as_str),
        ARTIST_CUTOFF,
    ) else {
        return Ok(vec![]);
    };

    let Some(index) = normalized.iter().position(|n| n == best) else {
        return Ok(vec![]);
    };
    debug!(
        "Artist '{}' resolved to '{}' (score {})",
        name, artists[index], score
    );
    Ok(store
        .by_artist(&artists[index])?
        .into_iter()
        .filter(|s| s.artist == artists[index])
        .collect())
}
