//! One restorable snapshot of the buffer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::{FinalizedSnapshot, Progress};

/// Why a checkpoint was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointTag {
    /// Debounced keystrokes.
    Typing,
    /// Large single edit (paste, cut, replace-all).
    Paste,
    /// State just before an AI correction was applied.
    PreAi,
    /// State after a typo fix.
    AiCorrected,
    /// State after a finalize or bulk correction.
    Finalized,
    /// State after a whole-buffer enhance.
    Enhanced,
    /// State after the mini-scripts tidied the text.
    ScriptFix,
    /// Dictated text was appended.
    Transcription,
    /// Progress was reset or the buffer cleared.
    Reset,
    /// Explicit save point.
    Manual,
}

/// Full session state at one moment: text, offsets and finalized set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: u64,
    pub text: String,
    pub progress: Progress,
    pub finalized: FinalizedSnapshot,
    pub timestamp: DateTime<Utc>,
    pub tags: Vec<CheckpointTag>,
}

impl Checkpoint {
    pub fn committed(&self) -> usize {
        self.progress.committed
    }

    pub fn corrected(&self) -> usize {
        self.progress.corrected
    }

    pub fn has_tag(&self, tag: CheckpointTag) -> bool {
        self.tags.contains(&tag)
    }

    /// `true` when recording `text`/`committed`/`tags` again would add nothing.
    pub(crate) fn same_as(&self, text: &str, committed: usize, tags: &[CheckpointTag]) -> bool {
        self.text == text && self.progress.committed == committed && self.tags == tags
    }
}
