use crate::classifier::ClassifierError;
use thiserror::Error;

/// Everything that can stop a turn from doing what was asked.
///
/// Only [`DialogueError::Catalog`] and [`DialogueError::Classifier`] are
/// fatal: the engine rolls the conversation state back and answers with a
/// generic failure. The other variants become the user-facing reply.
#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("{}", not_found_message(title, artist.as_deref()))]
    NotFound {
        title: String,
        artist: Option<String>,
    },

    #[error("{matches} songs in your playlist match '{title}'. Please be more specific.")]
    Ambiguous { title: String, matches: usize },

    #[error("I'm sorry, I didn't understand that. (too low confidence score)")]
    LowConfidence { confidence: f64 },

    #[error("{}", if *numeric { "Please select a valid song number from the list." } else { "Please select a song by entering the number next to the song title." })]
    InvalidSelection { numeric: bool },

    #[error("Did not understand which position you meant.")]
    UnresolvedPosition,

    #[error("Did not understand how many songs you meant.")]
    UnresolvedCount,

    #[error("I couldn't find the information you're looking for.")]
    NoInformation,

    #[error("Catalog error: {0}")]
    Catalog(#[from] anyhow::Error),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),
}

impl DialogueError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DialogueError::Catalog(_) | DialogueError::Classifier(_))
    }
}

fn not_found_message(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(artist) => format!(
            "Sorry, I couldn't find any matches for '{title}' by {artist}. Please double-check the details."
        ),
        None => format!("I couldn't find a song matching '{title}'. Please double-check the details."),
    }
}
