//! Undo / redo history.
//!
//! * [`Checkpoint`] — text, progress offsets and finalized-set snapshot at one
//!   moment, tagged with why it was recorded.
//! * [`HistoryStore`] — bounded linear list with a cursor; new checkpoints
//!   truncate the redo branch.
//!
//! AI corrections are recorded as a `pre_ai` / `ai_corrected` (or
//! `finalized`) pair so one undo reverts exactly one correction.

pub mod checkpoint;
pub mod store;

pub use checkpoint::{Checkpoint, CheckpointTag};
pub use store::{HistoryStore, DEFAULT_CAPACITY};
