//! Per-session dialogue engine.
//!
//! A turn first goes to whichever sub-dialogue is open. Otherwise slash
//! commands are matched literally and everything else is classified and
//! dispatched on its intent, gated by a confidence threshold.

use super::command::{parse_song_args, Command};
use super::error::DialogueError;
use super::intent::{entity, Intent};
use super::lexicon::{number_word_to_count, ordinal_to_index, resolve_window};
use super::matcher::{find_artist_songs, find_song, MatchResult, FUZZY_CUTOFF};
use super::mood::{song_count_for, target_minutes, FeatureFilter};
use super::recommend::recommend;
use super::response::{ResponseQueue, ResponseRecord};
use super::state::ConversationState;
use crate::catalog_store::{CatalogStore, Song, SongQuery};
use crate::classifier::{Classification, IntentClassifier};
use crate::search::{normalize_text, similarity_score};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, warn};

const GENERIC_FAILURE: &str = "Something went wrong while handling your request. Please try again.";
const EXIT_HINT: &str = "You can enter 'exit' to cancel.";

#[derive(Clone, Debug, PartialEq)]
pub struct DialogueSettings {
    /// Classifications at or below this confidence are not acted upon.
    pub confidence_threshold: f64,
    /// The playlist every conversation edits.
    pub playlist_id: i64,
    pub recommendation_count: usize,
    /// Invalid clarification answers in a row before giving up; 0 never
    /// gives up.
    pub max_clarification_retries: u32,
    /// Chance of suggesting an example question after a song is added.
    pub hint_probability: f64,
    /// Songs shown by a playlist listing before it is cut short.
    pub max_listed_songs: usize,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        DialogueSettings {
            confidence_threshold: 0.7,
            playlist_id: 1,
            recommendation_count: 10,
            max_clarification_retries: 3,
            hint_probability: 0.0,
            max_listed_songs: 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Command,
    Intent,
    SubDialogue,
    LowConfidence,
    /// A recoverable problem such as an unknown song or position.
    Rejected,
    /// Catalogue or classifier failure; state was rolled back.
    Failed,
}

impl TurnOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnOutcome::Command => "command",
            TurnOutcome::Intent => "intent",
            TurnOutcome::SubDialogue => "sub_dialogue",
            TurnOutcome::LowConfidence => "low_confidence",
            TurnOutcome::Rejected => "rejected",
            TurnOutcome::Failed => "failed",
        }
    }
}

#[derive(Debug)]
pub struct TurnResult {
    pub records: Vec<ResponseRecord>,
    pub outcome: TurnOutcome,
    /// Whether the playlist was mutated during the turn.
    pub playlist_changed: bool,
}

pub struct DialogueEngine {
    store: Arc<dyn CatalogStore>,
    classifier: Arc<dyn IntentClassifier>,
    settings: DialogueSettings,
    state: ConversationState,
    rng: StdRng,
    playlist_changed: bool,
}

impl DialogueEngine {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        classifier: Arc<dyn IntentClassifier>,
        settings: DialogueSettings,
    ) -> Self {
        DialogueEngine {
            store,
            classifier,
            settings,
            state: ConversationState::default(),
            rng: StdRng::from_os_rng(),
            playlist_changed: false,
        }
    }

    /// Replaces the random source, for reproducible sampling.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn welcome(&self) -> ResponseRecord {
        ResponseRecord::welcome()
    }

    /// Runs one turn and returns its records in order.
    pub async fn dispatch(&mut self, text: &str) -> TurnResult {
        self.state.collapse_completed();
        let snapshot = self.state.clone();
        self.playlist_changed = false;

        let mut out = ResponseQueue::default();
        let outcome = match self.run_turn(text.trim(), &mut out).await {
            Ok(outcome) => outcome,
            Err(err) if err.is_fatal() => {
                warn!("Turn failed, rolling back conversation state: {}", err);
                self.state = snapshot;
                out.push(GENERIC_FAILURE);
                TurnOutcome::Failed
            }
            Err(err) => {
                let outcome = match err {
                    DialogueError::LowConfidence { confidence } => {
                        debug!("Ignoring classification with confidence {}", confidence);
                        TurnOutcome::LowConfidence
                    }
                    _ => TurnOutcome::Rejected,
                };
                out.push(err.to_string());
                outcome
            }
        };

        debug!(
            outcome = outcome.as_str(),
            records = out.len(),
            playlist_changed = self.playlist_changed,
            "Turn finished"
        );
        TurnResult {
            records: out.into_records(),
            outcome,
            playlist_changed: self.playlist_changed,
        }
    }

    async fn run_turn(&mut self, text: &str, out: &mut ResponseQueue) -> Result<TurnOutcome, DialogueError> {
        if self.state.add_song().is_active() {
            self.continue_clarification(text, out)?;
            return Ok(TurnOutcome::SubDialogue);
        }

        if let Some(command) = Command::parse(text) {
            if self.state.recommend().is_active() {
                self.state.decline_selection();
                out.push("Okay, leaving the recommendations aside.");
            }
            self.run_command(command, out)?;
            return Ok(TurnOutcome::Command);
        }

        let classification = self.classifier.classify(text).await?;
        debug!(
            classifier = self.classifier.name(),
            intent = ?classification.intent_name(),
            confidence = classification.confidence(),
            entities = ?classification.entities,
            "Classified message"
        );
        if classification.confidence() <= self.settings.confidence_threshold {
            return Err(DialogueError::LowConfidence {
                confidence: classification.confidence(),
            });
        }

        let intent = classification.intent_name().and_then(Intent::from_name);
        if self.state.recommend().is_active() {
            self.continue_selection(intent, &classification, out)?;
            return Ok(TurnOutcome::SubDialogue);
        }
        self.run_intent(intent, &classification, out)?;
        Ok(TurnOutcome::Intent)
    }

    // =========================================================================
    // Commands and intents
    // =========================================================================

    fn run_command(&mut self, command: Command, out: &mut ResponseQueue) -> Result<(), DialogueError> {
        match command {
            Command::Hello => out.push_record(ResponseRecord::welcome()),
            Command::Help => self.learn_about_system(out),
            Command::Exit => out.push_record(ResponseRecord::goodbye()),
            Command::Parrot(rest) => out.push(format!("Parroting: {}", rest)),
            Command::Seed => {
                self.store.seed_demo(self.settings.playlist_id)?;
                self.playlist_changed = true;
                out.push("Demo seeding finished");
            }
            Command::Add(args) => match parse_song_args(&args) {
                Some(song) => {
                    let query = SongQuery::title(song.title).with_artist(song.artist);
                    self.start_add_song(query, out)?;
                }
                None => out.push("Usage: /add <title> by <artist>, /add <artist>: <title> or /add <title>"),
            },
            Command::Remove(args) => match parse_song_args(&args) {
                Some(song) => self.remove_by_title(&song.title, song.artist.as_deref(), out)?,
                None => out.push("Please provide the song details to remove."),
            },
            Command::View => self.view_playlist(out)?,
            Command::Clear => self.clear_playlist(out)?,
            Command::Recommend => self.start_recommendation(None, out)?,
        }
        Ok(())
    }

    fn run_intent(
        &mut self,
        intent: Option<Intent>,
        c: &Classification,
        out: &mut ResponseQueue,
    ) -> Result<(), DialogueError> {
        let Some(intent) = intent else {
            out.push("I'm not able to handle your intent at the moment.");
            return Ok(());
        };

        match intent {
            Intent::AskSongReleaseDate
            | Intent::AskSongsOfArtist
            | Intent::AskArtistOfSong
            | Intent::AskAlbumReleaseDate
            | Intent::AskAlbumOfSong
            | Intent::AskAlbumsOfArtist => {
                let answer = self.answer_question(intent, c)?;
                out.push(answer);
            }
            Intent::AddSongToPlaylist => match c.entity(entity::SONG) {
                Some(title) => {
                    let query = SongQuery::title(title)
                        .with_artist(c.entity(entity::ARTIST).map(str::to_string))
                        .with_album(c.entity(entity::ALBUM).map(str::to_string));
                    self.start_add_song(query, out)?;
                }
                None => out.push("I'm not able to process your request at the moment."),
            },
            Intent::RemoveSongFromPlaylist => match c.entity(entity::SONG) {
                Some(title) => self.remove_by_title(title, c.entity(entity::ARTIST), out)?,
                None => out.push("Please provide the song details to remove."),
            },
            Intent::ListSongsInPlaylist => self.view_playlist(out)?,
            Intent::EmptyPlaylist => self.clear_playlist(out)?,
            Intent::RemoveFromPlaylistPosition => self.remove_at_position(c, out)?,
            Intent::SongReleaseDatePosition => self.release_date_at_position(c, out)?,
            Intent::RecommendSongsBasedOnPlaylist => self.start_recommendation(Some(c), out)?,
            Intent::GeneratePlaylistBasedOnDescription => self.generate_playlist(c, out)?,
            Intent::AddAllRecommendedSongs
            | Intent::AddPositionRecommendedSongs
            | Intent::AddAllExceptRecommendedSongs
            | Intent::AddNoneRecommendedSongs => {
                out.push("I'm not able to handle your intent at the moment.")
            }
            Intent::Greet => out.push_record(ResponseRecord::welcome()),
            Intent::LearnAboutSystem => self.learn_about_system(out),
        }
        Ok(())
    }

    fn answer_question(&self, intent: Intent, c: &Classification) -> Result<String, DialogueError> {
        let song_query = || -> Option<SongQuery> {
            c.entity(entity::SONG).map(|title| {
                SongQuery::title(title).with_artist(c.entity(entity::ARTIST).map(str::to_string))
            })
        };

        let answer = match intent {
            Intent::AskSongReleaseDate => {
                let query = song_query().ok_or(DialogueError::NoInformation)?;
                find_song(self.store.as_ref(), &query)?
                    .first()
                    .and_then(|song| {
                        song.year.map(|year| {
                            format!(
                                "The song '{}' by {} was released in {}.",
                                song.title, song.artist, year
                            )
                        })
                    })
            }
            Intent::AskArtistOfSong => {
                let query = song_query().ok_or(DialogueError::NoInformation)?;
                find_song(self.store.as_ref(), &query)?.first().map(|song| {
                    format!("The artist of the song '{}' is {}.", song.title, song.artist)
                })
            }
            Intent::AskAlbumOfSong => {
                let query = song_query().ok_or(DialogueError::NoInformation)?;
                let albums = unique_albums(&find_song(self.store.as_ref(), &query)?.into_songs());
                (!albums.is_empty()).then(|| {
                    format!(
                        "The albums that feature the song {} are: {}",
                        query.title,
                        albums.join(", ")
                    )
                })
            }
            Intent::AskSongsOfArtist => {
                let artist = c.entity(entity::ARTIST).ok_or(DialogueError::NoInformation)?;
                let songs = find_artist_songs(self.store.as_ref(), artist)?;
                (!songs.is_empty()).then(|| {
                    let titles: Vec<&str> = songs.iter().map(|s| s.title.as_str()).collect();
                    format!("The songs by {} are: {}.", artist, titles.join(", "))
                })
            }
            Intent::AskAlbumsOfArtist => {
                let artist = c.entity(entity::ARTIST).ok_or(DialogueError::NoInformation)?;
                let albums = unique_albums(&find_artist_songs(self.store.as_ref(), artist)?);
                (!albums.is_empty())
                    .then(|| format!("The albums by {} are: {}", artist, albums.join(", ")))
            }
            Intent::AskAlbumReleaseDate => {
                let album = c.entity(entity::ALBUM).ok_or(DialogueError::NoInformation)?;
                self.store
                    .by_album(album)?
                    .into_iter()
                    .find_map(|song| Some((song.album?, song.year?)))
                    .map(|(name, year)| format!("The album '{}' was released in {}.", name, year))
            }
            _ => None,
        };
        answer.ok_or(DialogueError::NoInformation)
    }

    fn learn_about_system(&self, out: &mut ResponseQueue) {
        out.push("You can try commands such as these");
        out.push(Command::NAMES.join("\n"));
        out.push("Or you can try to initiate one of these intents using natural language:");
        let intents: Vec<String> = Intent::ALL
            .iter()
            .map(|i| i.name().replace('_', " "))
            .collect();
        out.push(intents.join("\n"));
        out.push("For example: Add the song Thriller by Michael Jackson to my playlist");
    }

    // =========================================================================
    // Add-song sub-dialogue
    // =========================================================================

    fn start_add_song(&mut self, query: SongQuery, out: &mut ResponseQueue) -> Result<(), DialogueError> {
        match find_song(self.store.as_ref(), &query)? {
            MatchResult::Exact(song) => {
                self.add_to_playlist(&song, out)?;
            }
            MatchResult::Ambiguous(candidates) => {
                let by = query
                    .artist
                    .as_deref()
                    .map(|a| format!(" by {}", a))
                    .unwrap_or_default();
                out.push(format!(
                    "I found several songs matching '{}'{}. Could you clarify which one you mean by entering the index?",
                    query.title, by
                ));
                for (i, song) in candidates.iter().enumerate() {
                    out.push(format!("{}. {}", i + 1, describe(song)));
                }
                self.state.await_clarification(candidates);
            }
            MatchResult::NotFound => {
                return Err(DialogueError::NotFound {
                    title: query.title,
                    artist: query.artist,
                });
            }
        }
        Ok(())
    }

    fn continue_clarification(&mut self, text: &str, out: &mut ResponseQueue) -> Result<(), DialogueError> {
        if text.eq_ignore_ascii_case("exit") {
            self.state.cancel_clarification();
            out.push("Song addition cancelled.");
            return Ok(());
        }

        let candidates = self.state.add_song().candidates();
        let selection = match text.parse::<i64>() {
            Ok(n) if n >= 1 && (n as usize) <= candidates.len() => Ok(n as usize - 1),
            Ok(_) => Err(DialogueError::InvalidSelection { numeric: true }),
            Err(_) => match ordinal_to_index(text) {
                Some(index) => resolve_window(candidates.len(), Some(index), None)
                    .map(|w| w.start)
                    .ok_or(DialogueError::InvalidSelection { numeric: true }),
                None => Err(DialogueError::InvalidSelection { numeric: false }),
            },
        };

        match selection {
            Ok(index) => {
                let song = candidates[index].clone();
                self.state.clarification_completed();
                self.add_to_playlist(&song, out)?;
            }
            Err(err) => {
                let failed = self.state.clarification_failed();
                let limit = self.settings.max_clarification_retries;
                if limit > 0 && failed >= limit {
                    self.state.cancel_clarification();
                    out.push("Too many invalid selections. Song addition cancelled.");
                } else {
                    out.push(err.to_string());
                    out.push(EXIT_HINT);
                }
            }
        }
        Ok(())
    }

    /// Adds one song, confirming it and maybe suggesting a question.
    fn add_to_playlist(&mut self, song: &Song, out: &mut ResponseQueue) -> Result<(), DialogueError> {
        match self.store.add(self.settings.playlist_id, song.id)? {
            Some(added) => {
                self.playlist_changed = true;
                out.push(format!(
                    "Song '{}' by '{}' has been added to your playlist.",
                    added.title, added.artist
                ));
                self.maybe_hint(&added, out);
            }
            None => out.push("The song couldn't be added. Please try again."),
        }
        Ok(())
    }

    fn maybe_hint(&mut self, song: &Song, out: &mut ResponseQueue) {
        let probability = self.settings.hint_probability.clamp(0.0, 1.0);
        if !self.rng.random_bool(probability) {
            return;
        }
        let questions = [
            format!("When was the song '{}' released?", song.title),
            format!("What songs does '{}' have?", song.artist),
            format!("Which album is the song '{}' from?", song.title),
        ];
        if let Some(question) = questions.choose(&mut self.rng) {
            out.push(format!("Did you know you can ask me questions like: {}", question));
        }
    }

    // =========================================================================
    // Playlist operations
    // =========================================================================

    fn view_playlist(&self, out: &mut ResponseQueue) -> Result<(), DialogueError> {
        let songs = self.store.playlist_songs(self.settings.playlist_id)?;
        if songs.is_empty() {
            out.push("Your playlist is empty.");
            return Ok(());
        }
        out.push("Your playlist includes:");
        for song in songs.iter().take(self.settings.max_listed_songs) {
            out.push(format!("{} by {}", song.title, song.artist));
        }
        if songs.len() > self.settings.max_listed_songs {
            out.push("... and more songs are in your playlist.");
        }
        Ok(())
    }

    fn clear_playlist(&mut self, out: &mut ResponseQueue) -> Result<(), DialogueError> {
        self.store.clear(self.settings.playlist_id)?;
        self.playlist_changed = true;
        out.push("Playlist cleared.");
        Ok(())
    }

    /// Removes the playlist song best matching a title: normalized equality
    /// first, then fuzzy similarity.
    fn remove_by_title(
        &mut self,
        title: &str,
        artist: Option<&str>,
        out: &mut ResponseQueue,
    ) -> Result<(), DialogueError> {
        let wanted = normalize_text(title);
        let songs: Vec<Song> = self
            .store
            .playlist_songs(self.settings.playlist_id)?
            .into_iter()
            .filter(|s| artist.map_or(true, |a| s.artist.eq_ignore_ascii_case(a)))
            .collect();

        let mut matches: Vec<&Song> = songs
            .iter()
            .filter(|s| normalize_text(&s.title) == wanted)
            .collect();
        if matches.is_empty() {
            matches = songs
                .iter()
                .filter(|s| similarity_score(&wanted, &normalize_text(&s.title)) >= FUZZY_CUTOFF)
                .collect();
        }

        let song = match matches.as_slice() {
            [] => {
                return Err(DialogueError::NotFound {
                    title: title.to_string(),
                    artist: artist.map(str::to_string),
                })
            }
            [song] => *song,
            several => {
                return Err(DialogueError::Ambiguous {
                    title: title.to_string(),
                    matches: several.len(),
                })
            }
        };

        match self.store.remove(self.settings.playlist_id, song.id)? {
            Some(removed) => {
                self.playlist_changed = true;
                out.push(format!(
                    "Song '{}' by '{}' removed from playlist.",
                    removed.title, removed.artist
                ));
            }
            None => out.push("The song couldn't be removed. Please try again."),
        }
        Ok(())
    }

    fn remove_at_position(&mut self, c: &Classification, out: &mut ResponseQueue) -> Result<(), DialogueError> {
        let songs = self.store.playlist_songs(self.settings.playlist_id)?;
        let window = selection_window(songs.len(), c)?.ok_or(DialogueError::UnresolvedPosition)?;

        let mut removed = Vec::new();
        for song in &songs[window] {
            if let Some(song) = self.store.remove(self.settings.playlist_id, song.id)? {
                self.playlist_changed = true;
                removed.push(song);
            }
        }

        match removed.as_slice() {
            [song] => out.push(format!(
                "Song {} by {} removed from your playlist",
                song.title, song.artist
            )),
            songs => {
                out.push("Removed songs from your playlist:");
                push_song_list(out, songs, false);
            }
        }
        Ok(())
    }

    fn release_date_at_position(&self, c: &Classification, out: &mut ResponseQueue) -> Result<(), DialogueError> {
        let position = c
            .entity(entity::POSITION)
            .ok_or(DialogueError::UnresolvedPosition)?;
        let index = ordinal_to_index(position).ok_or(DialogueError::UnresolvedPosition)?;
        let songs = self.store.playlist_songs(self.settings.playlist_id)?;
        let window = resolve_window(songs.len(), Some(index), None).ok_or(DialogueError::UnresolvedPosition)?;

        let song = &songs[window.start];
        let year = song.year.ok_or(DialogueError::NoInformation)?;
        out.push(format!("{} by {} was released in {}.", song.title, song.artist, year));
        Ok(())
    }

    // =========================================================================
    // Recommendations
    // =========================================================================

    fn start_recommendation(
        &mut self,
        c: Option<&Classification>,
        out: &mut ResponseQueue,
    ) -> Result<(), DialogueError> {
        let filter = feature_filter(c);
        report_unknown_words(&filter, out);

        let playlist = self.store.playlist_songs(self.settings.playlist_id)?;
        let pool = filter.apply(self.store.all()?);
        let offered = recommend(&playlist, pool, self.settings.recommendation_count, &mut self.rng);
        if offered.is_empty() {
            out.push("I couldn't find any songs to recommend based on your playlist.");
            return Ok(());
        }

        out.push("Recommendations based on your playlist: ");
        push_song_list(out, &offered, true);
        self.state.await_selection(offered);
        Ok(())
    }

    fn continue_selection(
        &mut self,
        intent: Option<Intent>,
        c: &Classification,
        out: &mut ResponseQueue,
    ) -> Result<(), DialogueError> {
        let offered = self.state.recommend().offered().to_vec();

        let chosen: Vec<Song> = match intent {
            Some(Intent::AddAllRecommendedSongs) => match c.entity(entity::ARTIST) {
                Some(artist) => offered
                    .into_iter()
                    .filter(|s| s.artist.eq_ignore_ascii_case(artist))
                    .collect(),
                None => offered,
            },
            Some(Intent::AddPositionRecommendedSongs) => {
                let window = self.offered_window(offered.len(), c)?;
                offered[window].to_vec()
            }
            Some(Intent::AddAllExceptRecommendedSongs) => {
                if c.entity(entity::POSITION).is_some() || c.entity(entity::NUMBER).is_some() {
                    let window = self.offered_window(offered.len(), c)?;
                    offered
                        .into_iter()
                        .enumerate()
                        .filter(|(i, _)| !window.contains(i))
                        .map(|(_, s)| s)
                        .collect()
                } else if let Some(artist) = c.entity(entity::ARTIST) {
                    offered
                        .into_iter()
                        .filter(|s| !s.artist.eq_ignore_ascii_case(artist))
                        .collect()
                } else {
                    self.state.decline_selection();
                    return Err(DialogueError::UnresolvedPosition);
                }
            }
            Some(Intent::AddNoneRecommendedSongs) => {
                self.state.selection_completed();
                out.push("Understood. Is there something else I can help you with?");
                return Ok(());
            }
            _ => {
                self.state.decline_selection();
                out.push("Did not understand. Aborting recommendations.");
                return Ok(());
            }
        };

        self.state.selection_completed();
        self.add_songs(&chosen, out)
    }

    /// Window over the offered list; an unresolved one closes the offer.
    fn offered_window(&mut self, len: usize, c: &Classification) -> Result<Range<usize>, DialogueError> {
        match selection_window(len, c) {
            Ok(Some(window)) => Ok(window),
            Ok(None) => {
                self.state.decline_selection();
                Err(DialogueError::UnresolvedPosition)
            }
            Err(err) => {
                self.state.decline_selection();
                Err(err)
            }
        }
    }

    fn add_songs(&mut self, songs: &[Song], out: &mut ResponseQueue) -> Result<(), DialogueError> {
        let mut added = Vec::with_capacity(songs.len());
        for song in songs {
            if let Some(song) = self.store.add(self.settings.playlist_id, song.id)? {
                self.playlist_changed = true;
                added.push(song);
            }
        }
        out.push("Added songs:");
        push_song_list(out, &added, true);
        Ok(())
    }

    /// Replaces the playlist with songs fitting the described moods,
    /// activities and length.
    fn generate_playlist(&mut self, c: &Classification, out: &mut ResponseQueue) -> Result<(), DialogueError> {
        let filter = feature_filter(Some(c));
        report_unknown_words(&filter, out);

        let pool = filter.apply(self.store.all()?);
        if pool.is_empty() {
            out.push("I couldn't find songs matching that description.");
            return Ok(());
        }

        let minutes = target_minutes(c.entity(entity::DURATION), &filter);
        let count = song_count_for(minutes, &pool);
        let picked = recommend(&[], pool, count, &mut self.rng);

        self.store.clear(self.settings.playlist_id)?;
        self.playlist_changed = true;
        let mut added = Vec::with_capacity(picked.len());
        for song in &picked {
            if let Some(song) = self.store.add(self.settings.playlist_id, song.id)? {
                added.push(song);
            }
        }

        out.push(format!(
            "I created a playlist of {} songs (about {} minutes) based on your description.",
            added.len(),
            minutes
        ));
        out.push("The playlist now contains the songs:");
        push_song_list(out, &added, false);
        Ok(())
    }
}

/// Resolves the position/number entities into a window over `len` items.
/// `Ok(None)` when neither entity is present.
fn selection_window(len: usize, c: &Classification) -> Result<Option<Range<usize>>, DialogueError> {
    let position = c
        .entity(entity::POSITION)
        .map(|w| ordinal_to_index(w).ok_or(DialogueError::UnresolvedPosition))
        .transpose()?;
    let count = c
        .entity(entity::NUMBER)
        .map(|w| number_word_to_count(w).ok_or(DialogueError::UnresolvedCount))
        .transpose()?;
    if position.is_none() && count.is_none() {
        return Ok(None);
    }
    resolve_window(len, position, count)
        .map(Some)
        .ok_or(DialogueError::UnresolvedPosition)
}

fn feature_filter(c: Option<&Classification>) -> FeatureFilter {
    match c {
        Some(c) => FeatureFilter::from_words(c.entities_of(entity::MOOD), c.entities_of(entity::ACTIVITY)),
        None => FeatureFilter::default(),
    }
}

fn report_unknown_words(filter: &FeatureFilter, out: &mut ResponseQueue) {
    for word in &filter.unknown {
        out.push(format!("I don't know how to pick songs for '{}', ignoring it.", word));
    }
}

fn unique_albums(songs: &[Song]) -> Vec<String> {
    let mut albums: Vec<String> = Vec::new();
    for album in songs.iter().filter_map(|s| s.album.as_ref()) {
        if !albums.contains(album) {
            albums.push(album.clone());
        }
    }
    albums
}

/// "Title by Artist (Album) - Year", leaving out unknown parts.
fn describe(song: &Song) -> String {
    let mut line = format!("{} by {}", song.title, song.artist);
    if let Some(album) = &song.album {
        line.push_str(&format!(" ({})", album));
    }
    if let Some(year) = song.year {
        line.push_str(&format!(" - {}", year));
    }
    line
}

fn push_song_list(out: &mut ResponseQueue, songs: &[Song], indexed: bool) {
    if songs.is_empty() {
        out.push("No songs found.");
        return;
    }
    for (i, song) in songs.iter().enumerate() {
        if indexed {
            out.push(format!("{}: {}", i + 1, describe(song)));
        } else {
            out.push(describe(song));
        }
    }
}
