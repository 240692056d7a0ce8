//! Jobs handed to external capabilities and the bookkeeping that makes
//! their late results safe to apply.

use std::ops::Range;

use thiserror::Error;

use crate::llm::CorrectionOp;
use crate::pipeline::state::PipelineStatus;

// ---------------------------------------------------------------------------
// JobKind
// ---------------------------------------------------------------------------

/// What an outstanding job is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    DictCheck,
    TypoFix,
    Finalize,
    Bulk,
    Enhance,
}

impl JobKind {
    /// AI operation for this job, `None` for the dictionary check.
    pub fn op(&self) -> Option<CorrectionOp> {
        match self {
            JobKind::DictCheck => None,
            JobKind::TypoFix => Some(CorrectionOp::FixTypos),
            JobKind::Finalize => Some(CorrectionOp::Finalize),
            JobKind::Bulk => Some(CorrectionOp::FixAndFinalize),
            JobKind::Enhance => Some(CorrectionOp::Enhance),
        }
    }

    /// Status shown while the job is in flight.
    pub fn status(&self) -> PipelineStatus {
        match self {
            JobKind::DictCheck => PipelineStatus::DictCheck,
            JobKind::TypoFix | JobKind::Enhance => PipelineStatus::AiFixing,
            JobKind::Finalize | JobKind::Bulk => PipelineStatus::AiFinalizing,
        }
    }
}

// ---------------------------------------------------------------------------
// CorrectionJob / PendingCorrection
// ---------------------------------------------------------------------------

/// A unit of work for the [`JobRunner`](crate::pipeline::JobRunner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionJob {
    pub id: u64,
    pub kind: JobKind,
    pub text: String,
    pub language: String,
}

/// Session-side record of the single job in flight.
///
/// `expected` is the exact range content at submission; a result is only
/// applied when the buffer still holds it there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCorrection {
    pub id: u64,
    pub kind: JobKind,
    pub range: Range<usize>,
    pub expected: String,
}

// ---------------------------------------------------------------------------
// JobOutcome
// ---------------------------------------------------------------------------

/// Successful payload of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutput {
    UnknownWords(Vec<String>),
    Corrected(String),
}

/// Why a job produced no usable result.
///
/// Carries only a message: every failure is handled the same way
/// (fail-open), the text is for the status line and the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("Dictionary check failed: {0}")]
    Dictionary(String),

    #[error("AI correction failed: {0}")]
    Llm(String),

    #[error("Correction timed out")]
    Timeout,
}

/// Result of running one [`CorrectionJob`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub id: u64,
    pub kind: JobKind,
    pub result: Result<JobOutput, JobError>,
}

impl JobOutcome {
    pub fn ok(job: &CorrectionJob, output: JobOutput) -> Self {
        Self {
            id: job.id,
            kind: job.kind,
            result: Ok(output),
        }
    }

    pub fn failed(job: &CorrectionJob, error: JobError) -> Self {
        Self {
            id: job.id,
            kind: job.kind,
            result: Err(error),
        }
    }
}
