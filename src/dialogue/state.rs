//! Per-session conversation state: the add-song clarification and the
//! recommendation selection sub-dialogues.

use crate::catalog_store::Song;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum AddSongDialogue {
    #[default]
    Idle,
    AwaitingClarification {
        candidates: Vec<Song>,
    },
    ClarificationRetry {
        candidates: Vec<Song>,
        failed_attempts: u32,
    },
    Completed,
}

impl AddSongDialogue {
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            AddSongDialogue::AwaitingClarification { .. } | AddSongDialogue::ClarificationRetry { .. }
        )
    }

    pub fn candidates(&self) -> &[Song] {
        match self {
            AddSongDialogue::AwaitingClarification { candidates }
            | AddSongDialogue::ClarificationRetry { candidates, .. } => candidates,
            _ => &[],
        }
    }

    pub fn failed_attempts(&self) -> u32 {
        match self {
            AddSongDialogue::ClarificationRetry { failed_attempts, .. } => *failed_attempts,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RecommendDialogue {
    #[default]
    Idle,
    AwaitingSelection {
        offered: Vec<Song>,
    },
    Completed,
}

impl RecommendDialogue {
    pub fn is_active(&self) -> bool {
        matches!(self, RecommendDialogue::AwaitingSelection { .. })
    }

    pub fn offered(&self) -> &[Song] {
        match self {
            RecommendDialogue::AwaitingSelection { offered } => offered,
            _ => &[],
        }
    }
}

/// The only sticky memory of a chat session.
///
/// Opening one sub-dialogue always closes the other, so at most one of
/// them is ever non-idle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversationState {
    add_song: AddSongDialogue,
    recommend: RecommendDialogue,
}

impl ConversationState {
    pub fn add_song(&self) -> &AddSongDialogue {
        &self.add_song
    }

    pub fn recommend(&self) -> &RecommendDialogue {
        &self.recommend
    }

    pub fn is_idle(&self) -> bool {
        self.add_song == AddSongDialogue::Idle && self.recommend == RecommendDialogue::Idle
    }

    /// `Completed` only lives for the turn that produced it.
    pub fn collapse_completed(&mut self) {
        if self.add_song == AddSongDialogue::Completed {
            self.add_song = AddSongDialogue::Idle;
        }
        if self.recommend == RecommendDialogue::Completed {
            self.recommend = RecommendDialogue::Idle;
        }
    }

    pub fn await_clarification(&mut self, candidates: Vec<Song>) {
        self.recommend = RecommendDialogue::Idle;
        self.add_song = AddSongDialogue::AwaitingClarification { candidates };
    }

    /// Records one more invalid clarification answer and returns how many
    /// there have been in a row.
    pub fn clarification_failed(&mut self) -> u32 {
        let failed_attempts = self.add_song.failed_attempts() + 1;
        let candidates = match std::mem::take(&mut self.add_song) {
            AddSongDialogue::AwaitingClarification { candidates }
            | AddSongDialogue::ClarificationRetry { candidates, .. } => candidates,
            _ => vec![],
        };
        self.add_song = AddSongDialogue::ClarificationRetry {
            candidates,
            failed_attempts,
        };
        failed_attempts
    }

    pub fn clarification_completed(&mut self) {
        self.add_song = AddSongDialogue::Completed;
    }

    pub fn cancel_clarification(&mut self) {
        self.add_song = AddSongDialogue::Idle;
    }

    pub fn await_selection(&mut self, offered: Vec<Song>) {
        self.add_song = AddSongDialogue::Idle;
        self.recommend = RecommendDialogue::AwaitingSelection { offered };
    }

    pub fn selection_completed(&mut self) {
        self.recommend = RecommendDialogue::Completed;
    }

    pub fn decline_selection(&mut self) {
        self.recommend = RecommendDialogue::Idle;
    }
}
