//! Playlist-based recommendations.

use crate::catalog_store::Song;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;

/// Sampling draws from the lowest-id `count * WINDOW_FACTOR` candidates.
pub const WINDOW_FACTOR: usize = 5;

/// Picks up to `count` songs from `pool` that share an artist or album with
/// the playlist without duplicating one of its titles. An empty playlist
/// lets the whole pool through. The result is in ascending id order.
pub fn recommend<R: Rng + ?Sized>(
    playlist: &[Song],
    pool: Vec<Song>,
    count: usize,
    rng: &mut R,
) -> Vec<Song> {
    let candidates = if playlist.is_empty() {
        pool
    } else {
        let artists: HashSet<&str> = playlist.iter().map(|s| s.artist.as_str()).collect();
        let albums: HashSet<&str> = playlist.iter().filter_map(|s| s.album.as_deref()).collect();
        let titles: HashSet<&str> = playlist.iter().map(|s| s.title.as_str()).collect();
        let ids: HashSet<i64> = playlist.iter().map(|s| s.id).collect();

        pool.into_iter()
            .filter(|s| !ids.contains(&s.id) && !titles.contains(s.title.as_str()))
            .filter(|s| {
                artists.contains(s.artist.as_str())
                    || s.album.as_deref().is_some_and(|a| albums.contains(a))
            })
            .collect()
    };
    sample_window(candidates, count, rng)
}

/// Uniformly samples `count` songs (all of them if fewer) from the
/// lowest-id window of `candidates`.
pub fn sample_window<R: Rng + ?Sized>(mut candidates: Vec<Song>, count: usize, rng: &mut R) -> Vec<Song> {
    candidates.sort_by_key(|s| s.id);
    candidates.truncate(count.saturating_mul(WINDOW_FACTOR));

    let mut picked: Vec<Song> = candidates.choose_multiple(rng, count).cloned().collect();
    picked.sort_by_key(|s| s.id);
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::AudioFeatures;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn song(id: i64, title: &str, artist: &str, album: Option<&str>) -> Song {
        Song {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.map(str::to_string),
            year: None,
            duration_sec: None,
            tempo: None,
            normalized_title: None,
            features: AudioFeatures::default(),
        }
    }

    fn ids(songs: &[Song]) -> Vec<i64> {
        songs.iter().map(|s| s.id).collect()
    }

    #[test]
    fn keeps_artist_or_album_overlap_and_drops_playlist_titles() {
        let playlist = vec![song(1, "Shape of You", "Ed Sheeran", Some("Divide"))];
        let pool = vec![
            song(1, "Shape of You", "Ed Sheeran", Some("Divide")),
            song(2, "Perfect", "Ed Sheeran", Some("Divide")),
            song(3, "Shape of You", "Cover Band", Some("Covers")),
            song(4, "Galway Girl", "Someone Else", Some("Divide")),
            song(5, "Levitating", "Dua Lipa", Some("Future Nostalgia")),
            song(6, "Shape of You", "Ed Sheeran", Some("Live")),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let picked = recommend(&playlist, pool, 10, &mut rng);
        assert_eq!(ids(&picked), vec![2, 4]);
    }

    #[test]
    fn empty_playlist_passes_pool_through() {
        let pool: Vec<Song> = (1..=3).map(|i| song(i, &format!("s{i}"), "a", None)).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let picked = recommend(&[], pool, 10, &mut rng);
        assert_eq!(ids(&picked), vec![1, 2, 3]);
    }

    #[test]
    fn samples_from_lowest_id_window_in_id_order() {
        let pool: Vec<Song> = (1..=100).rev().map(|i| song(i, &format!("s{i}"), "a", None)).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let picked = sample_window(pool, 3, &mut rng);

        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|s| s.id <= 15));
        assert!(picked.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn same_seed_gives_same_sample() {
        let pool: Vec<Song> = (1..=50).map(|i| song(i, &format!("s{i}"), "a", None)).collect();
        let a = sample_window(pool.clone(), 4, &mut StdRng::seed_from_u64(9));
        let b = sample_window(pool, 4, &mut StdRng::seed_from_u64(9));
        assert_eq!(ids(&a), ids(&b));
    }
}
