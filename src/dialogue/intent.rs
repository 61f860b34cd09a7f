//! Intents understood by the assistant and the entity types they read.

/// Entity type names as produced by the classifier.
pub mod entity {
    pub const SONG: &str = "song";
    pub const ARTIST: &str = "artist";
    pub const ALBUM: &str = "album";
    pub const POSITION: &str = "position";
    pub const NUMBER: &str = "number";
    pub const MOOD: &str = "mood";
    pub const ACTIVITY: &str = "activity";
    pub const DURATION: &str = "duration";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    AskSongReleaseDate,
    AskSongsOfArtist,
    AskArtistOfSong,
    AskAlbumReleaseDate,
    AskAlbumOfSong,
    AskAlbumsOfArtist,
    AddSongToPlaylist,
    RemoveSongFromPlaylist,
    ListSongsInPlaylist,
    EmptyPlaylist,
    RemoveFromPlaylistPosition,
    SongReleaseDatePosition,
    RecommendSongsBasedOnPlaylist,
    GeneratePlaylistBasedOnDescription,
    AddAllRecommendedSongs,
    AddPositionRecommendedSongs,
    AddAllExceptRecommendedSongs,
    AddNoneRecommendedSongs,
    Greet,
    LearnAboutSystem,
}

impl Intent {
    pub const ALL: &'static [Intent] = &[
        Intent::AskSongReleaseDate,
        Intent::AskSongsOfArtist,
        Intent::AskArtistOfSong,
        Intent::AskAlbumReleaseDate,
        Intent::AskAlbumOfSong,
        Intent::AskAlbumsOfArtist,
        Intent::AddSongToPlaylist,
        Intent::RemoveSongFromPlaylist,
        Intent::ListSongsInPlaylist,
        Intent::EmptyPlaylist,
        Intent::RemoveFromPlaylistPosition,
        Intent::SongReleaseDatePosition,
        Intent::RecommendSongsBasedOnPlaylist,
        Intent::GeneratePlaylistBasedOnDescription,
        Intent::AddAllRecommendedSongs,
        Intent::AddPositionRecommendedSongs,
        Intent::AddAllExceptRecommendedSongs,
        Intent::AddNoneRecommendedSongs,
        Intent::Greet,
        Intent::LearnAboutSystem,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Intent::AskSongReleaseDate => "ask_song_release_date",
            Intent::AskSongsOfArtist => "ask_songs_of_artist",
            Intent::AskArtistOfSong => "ask_artist_of_song",
            Intent::AskAlbumReleaseDate => "ask_album_release_date",
            Intent::AskAlbumOfSong => "ask_album_of_song",
            Intent::AskAlbumsOfArtist => "ask_albums_of_artist",
            Intent::AddSongToPlaylist => "add_song_to_playlist",
            Intent::RemoveSongFromPlaylist => "remove_song_from_playlist",
            Intent::ListSongsInPlaylist => "list_songs_in_playlist",
            Intent::EmptyPlaylist => "empty_playlist",
            Intent::RemoveFromPlaylistPosition => "remove_from_playlist_position",
            Intent::SongReleaseDatePosition => "song_release_date_position",
            Intent::RecommendSongsBasedOnPlaylist => "recommend_songs_based_on_playlist",
            Intent::GeneratePlaylistBasedOnDescription => "generate_playlist_based_on_description",
            Intent::AddAllRecommendedSongs => "add_all_recommended_songs",
            Intent::AddPositionRecommendedSongs => "add_position_recommended_songs",
            Intent::AddAllExceptRecommendedSongs => "add_all_except_recommended_songs",
            Intent::AddNoneRecommendedSongs => "add_none_recommended_songs",
            Intent::Greet => "greet",
            Intent::LearnAboutSystem => "learn_about_system",
        }
    }

    /// `None` for names without a handler, including the classifier's own
    /// fallback intent.
    pub fn from_name(name: &str) -> Option<Intent> {
        Intent::ALL.iter().copied().find(|i| i.name() == name)
    }

    /// Intents that answer an open recommendation offer.
    pub fn is_recommendation_selection(&self) -> bool {
        matches!(
            self,
            Intent::AddAllRecommendedSongs
                | Intent::AddPositionRecommendedSongs
                | Intent::AddAllExceptRecommendedSongs
                | Intent::AddNoneRecommendedSongs
        )
    }
}
