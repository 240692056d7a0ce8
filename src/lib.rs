//! Live proofreader: incremental spelling, grammar and sentence
//! finalization over a buffer the user keeps editing.
//!
//! * [`text`] — sentence blocks and small offset helpers.
//! * [`dictionary`] — word lists and the unknown-word checker worker.
//! * [`llm`] — AI correction backends.
//! * [`pipeline`] — progress offsets, finalized sentences, stage selection
//!   and job execution.
//! * [`history`] — undo/redo checkpoints.
//! * [`session`] — the editing session and its async driver.
//! * [`config`] — settings and application paths.

pub mod config;
pub mod dictionary;
pub mod history;
pub mod llm;
pub mod pipeline;
pub mod session;
pub mod text;
