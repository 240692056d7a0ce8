//! Pipeline status and the shared view the front end reads.
//!
//! [`PipelineStatus`] is what the status bar shows.  [`SessionView`] is a
//! snapshot of everything a front end renders: buffer text, progress offsets,
//! status, unknown words and undo availability.
//!
//! [`SharedView`] is a type alias for `Arc<Mutex<SessionView>>` — cheap to
//! clone and safe to share across threads.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::pipeline::offsets::Progress;

// ---------------------------------------------------------------------------
// PipelineStatus
// ---------------------------------------------------------------------------

/// Externally observable status of an editing session.
///
/// ```text
/// idle ──keystroke──▶ typing ──debounce──▶ {dict_check | ai_fixing |
///                                           ai_finalizing | script_fix}
///                                           ──▶ done ──timer──▶ idle
/// idle ──record──▶ recording ──stop──▶ transcribing ──text──▶ idle
/// any ──failure──▶ error ──timer──▶ idle
/// auto-correct off ──▶ paused
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    #[default]
    Idle,
    Typing,
    DictCheck,
    AiFixing,
    AiFinalizing,
    ScriptFix,
    Done,
    Recording,
    Transcribing,
    Paused,
    Error,
}

impl PipelineStatus {
    /// Returns `true` while a job or a capture is in progress.
    ///
    /// ```
    /// use live_proofer::pipeline::PipelineStatus;
    ///
    /// assert!(!PipelineStatus::Idle.is_busy());
    /// assert!(PipelineStatus::DictCheck.is_busy());
    /// assert!(PipelineStatus::AiFinalizing.is_busy());
    /// assert!(PipelineStatus::Recording.is_busy());
    /// assert!(!PipelineStatus::Done.is_busy());
    /// assert!(!PipelineStatus::Error.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            PipelineStatus::DictCheck
                | PipelineStatus::AiFixing
                | PipelineStatus::AiFinalizing
                | PipelineStatus::Recording
                | PipelineStatus::Transcribing
        )
    }

    /// A short human-readable label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStatus::Idle => "Idle",
            PipelineStatus::Typing => "Typing",
            PipelineStatus::DictCheck => "Checking",
            PipelineStatus::AiFixing => "Fixing",
            PipelineStatus::AiFinalizing => "Finalizing",
            PipelineStatus::ScriptFix => "Tidying",
            PipelineStatus::Done => "Done",
            PipelineStatus::Recording => "Recording",
            PipelineStatus::Transcribing => "Transcribing",
            PipelineStatus::Paused => "Paused",
            PipelineStatus::Error => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// SessionView
// ---------------------------------------------------------------------------

/// Everything a front end needs to render one editing session.
///
/// Held behind [`SharedView`].  The session driver overwrites it after every
/// state change; renderers only read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionView {
    /// Current buffer contents.
    pub text: String,

    /// Stage offsets into `text` (characters).
    pub progress: Progress,

    /// Current status.
    pub status: PipelineStatus,

    /// Words flagged by the last dictionary check.
    pub unknown_words: Vec<String>,

    /// Number of distinct finalized sentences.
    pub finalized_count: usize,

    /// Whether automatic correction is enabled.
    pub auto_correct: bool,

    pub can_undo: bool,
    pub can_redo: bool,

    /// Position of the current checkpoint and number of checkpoints.
    pub history_index: usize,
    pub history_len: usize,

    /// Message to display when `status == PipelineStatus::Error`.
    pub error_message: Option<String>,
}

// ---------------------------------------------------------------------------
// SharedView
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionView`].
///
/// Lock with `.lock().unwrap()` for a short critical section; do **not** hold
/// the lock across `.await` points.
pub type SharedView = Arc<Mutex<SessionView>>;

/// Construct a new [`SharedView`] wrapping an empty [`SessionView`].
pub fn new_shared_view() -> SharedView {
    Arc::new(Mutex::new(SessionView::default()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
