//! Mood and activity vocabularies mapped onto acoustic feature thresholds.

use crate::catalog_store::Song;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    Valence,
    Energy,
    Danceability,
    Instrumentalness,
    Tempo,
}

impl Feature {
    fn value(self, song: &Song) -> Option<f64> {
        match self {
            Feature::Valence => song.features.valence,
            Feature::Energy => song.features.energy,
            Feature::Danceability => song.features.danceability,
            Feature::Instrumentalness => song.features.instrumentalness,
            Feature::Tempo => song.tempo,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Threshold {
    Above(Feature, f64),
    Below(Feature, f64),
}

impl Threshold {
    /// A song missing the referenced feature never qualifies.
    fn holds(&self, song: &Song) -> bool {
        match *self {
            Threshold::Above(feature, limit) => feature.value(song).is_some_and(|v| v > limit),
            Threshold::Below(feature, limit) => feature.value(song).is_some_and(|v| v < limit),
        }
    }
}

/// A named mood or activity: every threshold must hold, and picking it
/// stretches or shrinks the generated playlist by `minutes_modifier`.
#[derive(Debug)]
pub struct FeatureProfile {
    pub names: &'static [&'static str],
    pub thresholds: &'static [Threshold],
    pub minutes_modifier: i32,
}

impl FeatureProfile {
    pub fn matches(&self, song: &Song) -> bool {
        self.thresholds.iter().all(|t| t.holds(song))
    }
}

use Feature::*;
use Threshold::*;

pub const MOODS: &[FeatureProfile] = &[
    FeatureProfile {
        names: &["happy", "cheerful", "upbeat"],
        thresholds: &[Above(Valence, 0.6), Above(Energy, 0.5)],
        minutes_modifier: 0,
    },
    FeatureProfile {
        names: &["sad", "melancholic"],
        thresholds: &[Below(Valence, 0.4), Below(Energy, 0.5)],
        minutes_modifier: 0,
    },
    FeatureProfile {
        names: &["energetic", "hype"],
        thresholds: &[Above(Energy, 0.7)],
        minutes_modifier: -10,
    },
    FeatureProfile {
        names: &["chill", "relaxed", "calm"],
        thresholds: &[Below(Energy, 0.5), Below(Tempo, 110.0)],
        minutes_modifier: 15,
    },
    FeatureProfile {
        names: &["romantic"],
        thresholds: &[Above(Valence, 0.5), Below(Energy, 0.6)],
        minutes_modifier: 0,
    },
    FeatureProfile {
        names: &["angry", "aggressive"],
        thresholds: &[Above(Energy, 0.7), Below(Valence, 0.4)],
        minutes_modifier: 0,
    },
];

pub const ACTIVITIES: &[FeatureProfile] = &[
    FeatureProfile {
        names: &["gym", "workout", "training"],
        thresholds: &[Above(Energy, 0.8)],
        minutes_modifier: -15,
    },
    FeatureProfile {
        names: &["study", "studying", "focus", "work"],
        thresholds: &[Above(Instrumentalness, 0.5), Below(Energy, 0.6)],
        minutes_modifier: 30,
    },
    FeatureProfile {
        names: &["party", "dancing"],
        thresholds: &[Above(Danceability, 0.7), Above(Energy, 0.6)],
        minutes_modifier: 30,
    },
    FeatureProfile {
        names: &["running", "jogging"],
        thresholds: &[Above(Tempo, 140.0), Above(Energy, 0.7)],
        minutes_modifier: 0,
    },
    FeatureProfile {
        names: &["sleep", "sleeping"],
        thresholds: &[Below(Energy, 0.3), Below(Tempo, 90.0)],
        minutes_modifier: 15,
    },
    FeatureProfile {
        names: &["driving", "road trip"],
        thresholds: &[Above(Energy, 0.5), Above(Valence, 0.5)],
        minutes_modifier: 0,
    },
];

pub const DEFAULT_MINUTES: i32 = 60;
pub const LONG_MINUTES: i32 = 75;
pub const SHORT_MINUTES: i32 = 30;
pub const MIN_MINUTES: i32 = 15;
pub const MAX_MINUTES: i32 = 120;
/// Assumed song length when no candidate has a known duration.
pub const FALLBACK_SONG_MINUTES: f64 = 3.5;

fn lookup(table: &'static [FeatureProfile], word: &str) -> Option<&'static FeatureProfile> {
    let word = word.trim().to_lowercase();
    table.iter().find(|p| p.names.contains(&word.as_str()))
}

/// The set of profiles a description asked for. Songs qualify only when
/// every selected profile matches.
#[derive(Debug, Default)]
pub struct FeatureFilter {
    profiles: Vec<&'static FeatureProfile>,
    /// Words that matched no mood or activity.
    pub unknown: Vec<String>,
}

impl FeatureFilter {
    pub fn from_words<'a>(
        moods: impl IntoIterator<Item = &'a str>,
        activities: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut filter = FeatureFilter::default();
        for (table, word) in moods
            .into_iter()
            .map(|w| (MOODS, w))
            .chain(activities.into_iter().map(|w| (ACTIVITIES, w)))
        {
            match lookup(table, word) {
                Some(profile) => filter.profiles.push(profile),
                None => filter.unknown.push(word.to_string()),
            }
        }
        filter
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn matches(&self, song: &Song) -> bool {
        self.profiles.iter().all(|p| p.matches(song))
    }

    pub fn apply(&self, songs: Vec<Song>) -> Vec<Song> {
        songs.into_iter().filter(|s| self.matches(s)).collect()
    }

    fn minutes_modifier(&self) -> i32 {
        self.profiles.iter().map(|p| p.minutes_modifier).sum()
    }
}

/// Playlist length in minutes for a `duration` entity ("long", "short",
/// "45 minutes", "2 hours") adjusted by the selected profiles.
pub fn target_minutes(duration: Option<&str>, filter: &FeatureFilter) -> i32 {
    let base = duration.map_or(DEFAULT_MINUTES, parse_duration_minutes);
    (base + filter.minutes_modifier()).clamp(MIN_MINUTES, MAX_MINUTES)
}

fn parse_duration_minutes(value: &str) -> i32 {
    let value = value.trim().to_lowercase();
    match value.as_str() {
        "long" => return LONG_MINUTES,
        "short" => return SHORT_MINUTES,
        _ => {}
    }
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<i32>() {
        Ok(n) if value.contains("hour") => n.saturating_mul(60),
        Ok(n) => n,
        Err(_) => DEFAULT_MINUTES,
    }
}

/// How many songs fill `minutes`, given the candidates' average length.
pub fn song_count_for(minutes: i32, candidates: &[Song]) -> usize {
    let known: Vec<f64> = candidates.iter().filter_map(Song::duration_minutes).collect();
    let average = if known.is_empty() {
        FALLBACK_SONG_MINUTES
    } else {
        known.iter().sum::<f64>() / known.len() as f64
    };
    ((minutes as f64 / average).round() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::AudioFeatures;

    fn song(valence: f64, energy: f64, danceability: f64, instrumentalness: f64, tempo: f64) -> Song {
        Song {
            id: 1,
            title: "t".into(),
            artist: "a".into(),
            album: None,
            year: None,
            duration_sec: None,
            tempo: Some(tempo),
            normalized_title: None,
            features: AudioFeatures {
                valence: Some(valence),
                energy: Some(energy),
                danceability: Some(danceability),
                instrumentalness: Some(instrumentalness),
            },
        }
    }

    #[test]
    fn mood_filter_is_a_conjunction() {
        let happy_party = song(0.9, 0.8, 0.8, 0.0, 120.0);
        let happy_only = song(0.9, 0.55, 0.3, 0.0, 120.0);

        let filter = FeatureFilter::from_words(["happy"], ["party"]);
        assert!(filter.matches(&happy_party));
        assert!(!filter.matches(&happy_only));

        let happy = FeatureFilter::from_words(["happy"], []);
        assert!(happy.matches(&happy_only));
    }

    #[test]
    fn missing_features_fail_predicates() {
        let mut unknown = song(0.9, 0.9, 0.9, 0.0, 120.0);
        unknown.features.energy = None;
        let filter = FeatureFilter::from_words(["energetic"], []);
        assert!(!filter.matches(&unknown));
    }

    #[test]
    fn unknown_words_are_reported_and_ignored() {
        let filter = FeatureFilter::from_words(["Happy", "grumpy"], ["knitting"]);
        assert_eq!(filter.unknown, vec!["grumpy", "knitting"]);
        assert!(!filter.is_empty());

        let empty = FeatureFilter::from_words(["grumpy"], []);
        assert!(empty.is_empty());
        assert!(empty.matches(&song(0.0, 0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn target_minutes_combines_duration_and_modifiers() {
        let none = FeatureFilter::default();
        assert_eq!(target_minutes(None, &none), 60);
        assert_eq!(target_minutes(Some("long"), &none), 75);
        assert_eq!(target_minutes(Some("short"), &none), 30);
        assert_eq!(target_minutes(Some("45 minutes"), &none), 45);
        assert_eq!(target_minutes(Some("3 hours"), &none), 120);
        assert_eq!(target_minutes(Some("whatever"), &none), 60);

        let study = FeatureFilter::from_words([], ["study"]);
        assert_eq!(target_minutes(Some("long"), &study), 105);
        let gym = FeatureFilter::from_words(["energetic"], ["gym"]);
        assert_eq!(target_minutes(Some("short"), &gym), 15);
    }

    #[test]
    fn song_count_uses_average_duration() {
        let mut a = song(0.5, 0.5, 0.5, 0.0, 100.0);
        a.duration_sec = Some(240);
        let mut b = a.clone();
        b.duration_sec = Some(360);
        assert_eq!(song_count_for(60, &[a, b]), 12);
        assert_eq!(song_count_for(60, &[]), 17);
        assert_eq!(song_count_for(15, &[song(0.5, 0.5, 0.5, 0.0, 100.0)]), 4);
    }
}
