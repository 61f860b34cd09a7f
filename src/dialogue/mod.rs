//! Conversation handling: commands, intents and the sub-dialogues that
//! span several turns.

mod command;
mod engine;
mod error;
mod intent;
mod lexicon;
mod matcher;
mod mood;
mod recommend;
mod response;
mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use command::{parse_song_args, Command, SongArgs};
pub use engine::{DialogueEngine, DialogueSettings, TurnOutcome, TurnResult};
pub use error::DialogueError;
pub use intent::{entity, Intent};
pub use matcher::{find_song, MatchResult};
pub use response::{ResponseAction, ResponseRecord};
pub use state::{AddSongDialogue, ConversationState, RecommendDialogue};
