//! Built-in demo dataset used by `/seed`, `POST /v1/seed` and
//! `cli-catalog seed`.

use super::models::{AudioFeatures, NewSong};

pub const DEMO_PLAYLIST_NAME: &str = "My Favorite Songs";

/// How many of the demo songs start out in the default playlist.
pub const DEMO_PLAYLIST_SIZE: usize = 5;

pub struct DemoSong {
    pub title: &'static str,
    pub artist: &'static str,
    pub album: &'static str,
    pub year: i32,
    pub duration_sec: u32,
    pub tempo: f64,
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    pub instrumentalness: f64,
}

impl DemoSong {
    pub fn to_new_song(&self) -> NewSong {
        NewSong {
            title: self.title.to_string(),
            artist: self.artist.to_string(),
            album: Some(self.album.to_string()),
            year: Some(self.year),
            duration_sec: Some(self.duration_sec),
            tempo: Some(self.tempo),
            features: AudioFeatures {
                valence: Some(self.valence),
                energy: Some(self.energy),
                danceability: Some(self.danceability),
                instrumentalness: Some(self.instrumentalness),
            },
        }
    }
}

macro_rules! demo_song {
    ($title:expr, $artist:expr, $album:expr, $year:expr, $duration:expr, $tempo:expr,
     $valence:expr, $energy:expr, $dance:expr, $instr:expr) => {
        DemoSong {
            title: $title,
            artist: $artist,
            album: $album,
            year: $year,
            duration_sec: $duration,
            tempo: $tempo,
            valence: $valence,
            energy: $energy,
            danceability: $dance,
            instrumentalness: $instr,
        }
    };
}

pub const DEMO_SONGS: &[DemoSong] = &[
    demo_song!("Shape of You", "Ed Sheeran", "Divide", 2017, 233, 96.0, 0.93, 0.65, 0.83, 0.0),
    demo_song!("Blinding Lights", "The Weeknd", "After Hours", 2020, 200, 171.0, 0.33, 0.73, 0.51, 0.0),
    demo_song!("Levitating", "Dua Lipa", "Future Nostalgia", 2020, 203, 103.0, 0.92, 0.82, 0.70, 0.0),
    demo_song!("Bad Guy", "Billie Eilish", "When We All Fall Asleep", 2019, 194, 135.0, 0.56, 0.43, 0.70, 0.13),
    demo_song!("Watermelon Sugar", "Harry Styles", "Fine Line", 2019, 174, 95.0, 0.56, 0.82, 0.55, 0.0),
    demo_song!("Perfect", "Ed Sheeran", "Divide", 2017, 263, 95.0, 0.17, 0.45, 0.60, 0.0),
    demo_song!("Castle on the Hill", "Ed Sheeran", "Divide", 2017, 261, 135.0, 0.47, 0.83, 0.46, 0.0),
    demo_song!("Save Your Tears", "The Weeknd", "After Hours", 2020, 216, 118.0, 0.64, 0.83, 0.68, 0.0),
    demo_song!("In Your Eyes", "The Weeknd", "After Hours", 2020, 238, 100.0, 0.72, 0.72, 0.67, 0.0),
    demo_song!("Don't Start Now", "Dua Lipa", "Future Nostalgia", 2020, 183, 124.0, 0.68, 0.79, 0.79, 0.0),
    demo_song!("Physical", "Dua Lipa", "Future Nostalgia", 2020, 194, 147.0, 0.75, 0.84, 0.65, 0.0),
    demo_song!("When the Party's Over", "Billie Eilish", "When We All Fall Asleep", 2019, 196, 80.0, 0.20, 0.11, 0.37, 0.0),
    demo_song!("Bury a Friend", "Billie Eilish", "When We All Fall Asleep", 2019, 193, 120.0, 0.20, 0.39, 0.91, 0.02),
    demo_song!("Adore You", "Harry Styles", "Fine Line", 2019, 207, 99.0, 0.57, 0.77, 0.68, 0.01),
    demo_song!("Falling", "Harry Styles", "Fine Line", 2019, 240, 110.0, 0.06, 0.27, 0.57, 0.0),
    demo_song!("Weightless", "Marconi Union", "Weightless", 2011, 480, 60.0, 0.05, 0.08, 0.21, 0.93),
    demo_song!("Clair de Lune", "Claude Debussy", "Suite bergamasque", 1905, 300, 66.0, 0.04, 0.02, 0.22, 0.91),
    demo_song!("Lose Yourself", "Eminem", "8 Mile", 2002, 326, 171.0, 0.06, 0.74, 0.69, 0.0),
    demo_song!("Till I Collapse", "Eminem", "The Eminem Show", 2002, 297, 171.0, 0.10, 0.85, 0.55, 0.0),
    demo_song!("Uptown Funk", "Mark Ronson", "Uptown Special", 2014, 270, 115.0, 0.93, 0.61, 0.86, 0.0),
    demo_song!("Thriller", "Michael Jackson", "Thriller", 1982, 357, 118.0, 0.82, 0.77, 0.77, 0.0),
    demo_song!("Billie Jean", "Michael Jackson", "Thriller", 1982, 294, 117.0, 0.85, 0.52, 0.92, 0.02),
    demo_song!("Someone Like You", "Adele", "21", 2011, 285, 135.0, 0.29, 0.32, 0.56, 0.0),
    demo_song!("Rolling in the Deep", "Adele", "21", 2011, 228, 105.0, 0.52, 0.77, 0.73, 0.0),
];
