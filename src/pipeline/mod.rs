//! Incremental correction pipeline.
//!
//! Everything here is either pure (stage selection, offset arithmetic, the
//! finalized cache) or a thin async executor ([`JobRunner`]).  The mutable
//! session that ties them together lives in [`crate::session`].
//!
//! # Architecture
//!
//! ```text
//!            buffer text ──────────────────────────────┐
//!                                                      ▼
//! Progress {committed ≤ corrected, checked ≤ checking} ─▶ select_action()
//! FinalizedSet (content-addressed)  ───────────────────▶      │
//!                                                             ▼
//!        FastForward / ScriptFix / SkipCheck   (applied in place, no I/O)
//!        DictCheck / TypoFix / Finalize / Bulk ─▶ CorrectionJob
//!                                                     │
//!                                   JobRunner::run()  ▼  (tokio task)
//!                                                 JobOutcome ─▶ session
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use live_proofer::pipeline::{select_action, Action, FinalizedSet, Progress, StageFlags};
//!
//! let mut finalized = FinalizedSet::new();
//! finalized.add("Hello world.");
//!
//! let action = select_action(
//!     "Hello world. more",
//!     &Progress::default(),
//!     &finalized,
//!     &StageFlags::default(),
//! );
//! assert_eq!(action, Action::FastForward { to: 13 });
//! ```

pub mod finalized;
pub mod job;
pub mod offsets;
pub mod runner;
pub mod select;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use finalized::{FinalizedSet, FinalizedSnapshot};
pub use job::{CorrectionJob, JobError, JobKind, JobOutcome, JobOutput, PendingCorrection};
pub use offsets::Progress;
pub use runner::JobRunner;
pub use select::{dict_chunk_end, select_action, Action, StageFlags};
pub use state::{new_shared_view, PipelineStatus, SessionView, SharedView};
