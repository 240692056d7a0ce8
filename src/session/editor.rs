//! The editing session: one buffer, its progress offsets, finalized set,
//! undo history, timers and the single in-flight correction.
//!
//! [`EditSession`] is synchronous and deterministic: every time-dependent
//! method takes `now`, and no method performs I/O.  Jobs leave through
//! [`TickOutcome::Submitted`] and results come back through
//! [`EditSession::apply_outcome`]; the async plumbing lives in
//! [`crate::session::driver`].
//!
//! # Flow
//!
//! ```text
//! apply_edit ──▶ pull offsets back to the first changed word
//!            ──▶ drop the pending job if its range was touched
//!            ──▶ typing checkpoint (debounced) or paste checkpoint (large)
//!
//! tick ──▶ timers ──▶ [job pending? debounce?] ──▶ select_action
//!            FastForward / ScriptFix / SkipCheck   applied here
//!            DictCheck / TypoFix / Finalize / Bulk  → Submitted(job)
//!
//! apply_outcome ──▶ id + range content still match? ──▶ apply or fail open
//! ```

use std::ops::Range;
use std::time::Instant;

use crate::config::{AppConfig, PipelineConfig};
use crate::history::{CheckpointTag, HistoryStore};
use crate::pipeline::{
    select_action, Action, CorrectionJob, FinalizedSet, FinalizedSnapshot, JobError, JobKind,
    JobOutcome, JobOutput, PendingCorrection, PipelineStatus, Progress, SessionView, StageFlags,
};
use crate::text::{
    self, align_offsets, byte_offset, char_len, char_slice, common_prefix_len, whitespace_frame,
};

use super::persist::SessionState;
use super::timers::{NamedTimers, TimerKind};

// ---------------------------------------------------------------------------
// TickOutcome / ResetMode
// ---------------------------------------------------------------------------

/// What one call to [`EditSession::tick`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A job is already in flight.
    Busy,
    /// Inside the debounce window, or audio capture is running.
    Skipped,
    /// Offsets or text changed locally (fast-forward, script fix, skip).
    Advanced,
    /// A job must be run; hand it to the runner.
    Submitted(CorrectionJob),
    /// Nothing to do.
    Idle,
}

/// How [`EditSession::reset`] treats the existing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Forget all progress and finalized sentences; process everything again.
    Reprocess,
    /// Treat the whole buffer as done.
    MarkDone,
}

// ---------------------------------------------------------------------------
// EditSession
// ---------------------------------------------------------------------------

pub struct EditSession {
    text: String,
    progress: Progress,
    finalized: FinalizedSet,
    history: HistoryStore,
    timers: NamedTimers,
    pending: Option<PendingCorrection>,
    next_job_id: u64,
    status: PipelineStatus,
    unknown_words: Vec<String>,
    error_message: Option<String>,
    last_keystroke: Option<Instant>,
    auto_correct: bool,
    ai_available: bool,
    config: PipelineConfig,
}

impl EditSession {
    /// Create an empty session.  AI stages run only when the backend is
    /// configured and auto-correct is on.
    pub fn new(config: &AppConfig) -> Self {
        let mut session = Self {
            text: String::new(),
            progress: Progress::default(),
            finalized: FinalizedSet::new(),
            history: HistoryStore::new(config.history.capacity),
            timers: NamedTimers::new(),
            pending: None,
            next_job_id: 1,
            status: PipelineStatus::Idle,
            unknown_words: Vec::new(),
            error_message: None,
            last_keystroke: None,
            auto_correct: config.pipeline.auto_correct,
            ai_available: config.llm.is_enabled(),
            config: config.pipeline.clone(),
        };
        session.status = session.idle_status();
        session.record(vec![CheckpointTag::Manual]);
        session
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn finalized(&self) -> &FinalizedSet {
        &self.finalized
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn status(&self) -> PipelineStatus {
        self.status
    }

    pub fn pending(&self) -> Option<&PendingCorrection> {
        self.pending.as_ref()
    }

    pub fn unknown_words(&self) -> &[String] {
        &self.unknown_words
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// `true` when AI stages may run.
    pub fn ai_active(&self) -> bool {
        self.auto_correct && self.ai_available
    }

    /// Snapshot for renderers.
    pub fn view(&self) -> SessionView {
        SessionView {
            text: self.text.clone(),
            progress: self.progress,
            status: self.status,
            unknown_words: self.unknown_words.clone(),
            finalized_count: self.finalized.len(),
            auto_correct: self.ai_active(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            history_index: self.history.index(),
            history_len: self.history.len(),
            error_message: self.error_message.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Replace the buffer with `new_text` typed by the user.
    pub fn apply_edit(&mut self, new_text: &str, now: Instant) {
        if new_text == self.text {
            return;
        }

        let diverge = common_prefix_len(&self.text, new_text);
        let anchor = edit_anchor(&self.text, new_text, diverge);
        let delta = char_len(new_text) as isize - char_len(&self.text) as isize;
        let large = delta.unsigned_abs() >= self.config.large_edit_chars;

        if let Some(pending) = &self.pending {
            // Continuing the word the range ends on also changes that word.
            if diverge < pending.range.end || anchor < pending.range.end {
                log::debug!(
                    "session: edit at {diverge} invalidates {:?} job {}",
                    pending.kind,
                    pending.id
                );
                self.pending = None;
            }
        }

        if large {
            self.flush_typing_checkpoint();
        }

        self.text = new_text.to_string();
        self.progress.pull_back(anchor);
        self.progress.clamp(char_len(&self.text));
        self.refresh_unknown_words();
        self.last_keystroke = Some(now);

        if !self.is_capturing() {
            self.status = PipelineStatus::Typing;
        }

        if large {
            log::debug!("session: large edit ({delta:+} chars), checkpointing");
            self.record(vec![CheckpointTag::Paste]);
        } else {
            self.timers.arm(
                TimerKind::TypingCheckpoint,
                now + self.config.typing_checkpoint_duration(),
            );
        }
    }

    /// Type `line` at the end of the buffer, separated by a space.
    pub fn append(&mut self, line: &str, now: Instant) {
        if line.is_empty() {
            return;
        }
        let mut new_text = self.text.clone();
        if !new_text.is_empty() && !new_text.ends_with(char::is_whitespace) {
            new_text.push(' ');
        }
        new_text.push_str(line);
        self.apply_edit(&new_text, now);
    }

    /// Audio capture started.
    pub fn begin_recording(&mut self) {
        self.status = PipelineStatus::Recording;
    }

    /// Audio capture stopped; speech-to-text is running.
    pub fn begin_transcribing(&mut self) {
        self.status = PipelineStatus::Transcribing;
    }

    /// Capture ended without text.
    pub fn cancel_capture(&mut self) {
        if self.is_capturing() {
            self.status = self.idle_status();
        }
    }

    /// Append dictated text at the end of the buffer.
    ///
    /// Transcribed text is trusted spelling-wise: when `checked` / `corrected`
    /// already reached the old end they move to the new end, so the next tick
    /// goes straight to finalization.
    pub fn insert_transcription(&mut self, transcript: &str) {
        let addition = transcript.trim();
        if addition.is_empty() {
            self.cancel_capture();
            return;
        }

        self.flush_typing_checkpoint();

        let old_len = char_len(&self.text);
        let checked_to_end = self.progress.checked >= old_len;
        let corrected_to_end = self.progress.corrected >= old_len;

        if !self.text.is_empty() && !self.text.ends_with(char::is_whitespace) {
            self.text.push(' ');
        }
        self.text.push_str(addition);
        let new_len = char_len(&self.text);

        if checked_to_end {
            self.progress.checked = new_len;
        }
        if corrected_to_end {
            self.progress.corrected = new_len;
        }
        self.progress.normalize();

        log::debug!("session: inserted {} transcribed chars", new_len - old_len);
        self.status = self.idle_status();
        self.record(vec![CheckpointTag::Transcription]);
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance the pipeline by at most one step.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        self.fire_timers(now);

        if self.pending.is_some() {
            return TickOutcome::Busy;
        }
        if self.is_capturing() {
            return TickOutcome::Skipped;
        }
        if let Some(last) = self.last_keystroke {
            if now.saturating_duration_since(last) < self.config.debounce_duration() {
                return TickOutcome::Skipped;
            }
        }

        let action = select_action(&self.text, &self.progress, &self.finalized, &self.stage_flags());
        match action {
            Action::FastForward { to } => {
                log::debug!("session: fast-forward {} → {to}", self.progress.committed);
                self.progress.commit_to(to);
                TickOutcome::Advanced
            }
            Action::ScriptFix { range, replacement } => {
                self.apply_script_fix(range, &replacement);
                TickOutcome::Advanced
            }
            Action::SkipCheck { to } => {
                let start = self.progress.checked.max(self.progress.committed);
                let blank = char_slice(&self.text, start, to).trim().is_empty();
                if blank || !self.ai_active() {
                    self.mark_clean(start, to);
                } else {
                    self.progress.checked = self.progress.checked.max(to);
                    self.progress.normalize();
                }
                TickOutcome::Advanced
            }
            Action::DictCheck { range } => {
                self.progress.checking = self.progress.checking.max(range.end);
                TickOutcome::Submitted(self.submit(JobKind::DictCheck, range))
            }
            Action::TypoFix { range } => TickOutcome::Submitted(self.submit(JobKind::TypoFix, range)),
            Action::Finalize { range } => {
                TickOutcome::Submitted(self.submit(JobKind::Finalize, range))
            }
            Action::Bulk { range } => TickOutcome::Submitted(self.submit(JobKind::Bulk, range)),
            Action::Idle => {
                if !matches!(self.status, PipelineStatus::Done | PipelineStatus::Error) {
                    self.status = self.idle_status();
                }
                TickOutcome::Idle
            }
        }
    }

    // -----------------------------------------------------------------------
    // Job results
    // -----------------------------------------------------------------------

    /// Apply a finished job if it is still current.
    ///
    /// Returns a follow-up job when a dictionary check flagged words and AI
    /// is active (the typo fix runs on the same range straight away).
    pub fn apply_outcome(&mut self, outcome: JobOutcome, now: Instant) -> Option<CorrectionJob> {
        if self.pending.as_ref().map(|p| p.id) != Some(outcome.id) {
            log::debug!("session: discarding stale {:?} result {}", outcome.kind, outcome.id);
            return None;
        }
        let pending = self.pending.take()?;

        let len = char_len(&self.text);
        let range = pending.range.clone();
        if range.end > len || char_slice(&self.text, range.start, range.end) != pending.expected {
            log::debug!("session: range {range:?} changed under job {}, discarding", pending.id);
            self.status = self.idle_status();
            return None;
        }

        match (pending.kind, outcome.result) {
            (_, Err(e)) => {
                self.fail_open(&pending, &e, now);
                None
            }
            (JobKind::DictCheck, Ok(JobOutput::UnknownWords(words))) => {
                self.on_unknown_words(&pending, words)
            }
            (kind, Ok(JobOutput::Corrected(corrected))) if kind != JobKind::DictCheck => {
                if corrected.trim().is_empty() && !pending.expected.trim().is_empty() {
                    self.fail_open(&pending, &JobError::Llm("empty response".into()), now);
                } else {
                    self.apply_correction(&pending, &corrected, now);
                }
                None
            }
            (kind, Ok(_)) => {
                log::warn!("session: {kind:?} job {} returned the wrong output type", pending.id);
                self.fail_open(&pending, &JobError::Llm("unexpected output".into()), now);
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Step back one checkpoint.  Returns `false` when there is none.
    pub fn undo(&mut self, now: Instant) -> bool {
        self.flush_typing_checkpoint();
        let Some(checkpoint) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(&checkpoint.text, checkpoint.progress, &checkpoint.finalized, now);
        true
    }

    /// Step forward one checkpoint.  Returns `false` when there is none.
    pub fn redo(&mut self, now: Instant) -> bool {
        self.flush_typing_checkpoint();
        let Some(checkpoint) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(&checkpoint.text, checkpoint.progress, &checkpoint.finalized, now);
        true
    }

    /// Restore checkpoint `index`.  Returns `false` when out of range.
    pub fn jump_to(&mut self, index: usize, now: Instant) -> bool {
        self.flush_typing_checkpoint();
        let Some(checkpoint) = self.history.jump_to(index).cloned() else {
            return false;
        };
        self.restore(&checkpoint.text, checkpoint.progress, &checkpoint.finalized, now);
        true
    }

    // -----------------------------------------------------------------------
    // Controls
    // -----------------------------------------------------------------------

    pub fn reset(&mut self, mode: ResetMode) {
        self.flush_typing_checkpoint();
        self.abort_pending();
        match mode {
            ResetMode::Reprocess => {
                self.progress = Progress::default();
                self.finalized.clear();
            }
            ResetMode::MarkDone => {
                self.progress = Progress::at(char_len(&self.text));
            }
        }
        self.unknown_words.clear();
        self.last_keystroke = None;
        self.clear_transient_status();
        self.record(vec![CheckpointTag::Reset]);
    }

    /// Empty the buffer and forget all progress.  History is kept, so the
    /// old text can be brought back with undo.
    pub fn clear(&mut self) {
        self.flush_typing_checkpoint();
        self.abort_pending();
        self.text.clear();
        self.progress = Progress::default();
        self.finalized.clear();
        self.unknown_words.clear();
        self.last_keystroke = None;
        self.clear_transient_status();
        self.record(vec![CheckpointTag::Reset]);
    }

    pub fn set_auto_correct(&mut self, enabled: bool) {
        self.auto_correct = enabled;
        if !self.ai_active() {
            if let Some(pending) = &self.pending {
                if pending.kind != JobKind::DictCheck {
                    log::debug!("session: auto-correct off, dropping {:?} job", pending.kind);
                    self.pending = None;
                }
            }
        }
        if matches!(
            self.status,
            PipelineStatus::Idle
                | PipelineStatus::Paused
                | PipelineStatus::AiFixing
                | PipelineStatus::AiFinalizing
        ) && self.pending.is_none()
        {
            self.status = self.idle_status();
        }
    }

    /// Submit a whole-buffer enhance job, superseding any job in flight.
    ///
    /// Runs even while auto-correct is paused, but needs an AI backend.
    pub fn request_enhance(&mut self) -> Option<CorrectionJob> {
        if !self.ai_available {
            log::warn!("session: enhance requested but no AI backend is configured");
            return None;
        }
        if self.text.trim().is_empty() {
            return None;
        }
        self.flush_typing_checkpoint();
        self.abort_pending();
        let len = char_len(&self.text);
        Some(self.submit(JobKind::Enhance, 0..len))
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        SessionState {
            text: self.text.clone(),
            progress: self.progress,
            finalized: self.finalized.snapshot(),
            history: self.history.clone(),
        }
    }

    /// Replace everything with a saved state.  Any pending job is dropped.
    pub fn restore_state(&mut self, state: SessionState) {
        self.abort_pending();
        self.timers.cancel_all();
        self.text = state.text;
        self.progress = state.progress;
        self.progress.clamp(char_len(&self.text));
        self.finalized.restore(&state.finalized);
        self.history = state.history;
        self.unknown_words.clear();
        self.last_keystroke = None;
        self.clear_transient_status();
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn stage_flags(&self) -> StageFlags {
        StageFlags {
            ai: self.ai_active(),
            script_fix: self.config.script_fix,
            dictionary_check: self.config.dictionary_check,
            min_chunk_words: self.config.min_chunk_words,
        }
    }

    fn idle_status(&self) -> PipelineStatus {
        if self.ai_active() {
            PipelineStatus::Idle
        } else {
            PipelineStatus::Paused
        }
    }

    fn is_capturing(&self) -> bool {
        matches!(self.status, PipelineStatus::Recording | PipelineStatus::Transcribing)
    }

    fn clear_transient_status(&mut self) {
        self.timers.cancel(TimerKind::ErrorClear);
        self.timers.cancel(TimerKind::DoneClear);
        self.error_message = None;
        if !self.is_capturing() {
            self.status = self.idle_status();
        }
    }

    fn abort_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::debug!("session: dropping {:?} job {}", pending.kind, pending.id);
        }
    }

    fn record(&mut self, tags: Vec<CheckpointTag>) -> bool {
        self.history
            .checkpoint(&self.text, self.progress, self.finalized.snapshot(), tags)
    }

    fn flush_typing_checkpoint(&mut self) {
        if self.timers.cancel(TimerKind::TypingCheckpoint) {
            self.record(vec![CheckpointTag::Typing]);
        }
    }

    fn fire_timers(&mut self, now: Instant) {
        for kind in self.timers.poll(now) {
            match kind {
                TimerKind::TypingCheckpoint => {
                    self.record(vec![CheckpointTag::Typing]);
                }
                TimerKind::ErrorClear => {
                    if self.status == PipelineStatus::Error {
                        self.status = self.idle_status();
                        self.error_message = None;
                    }
                }
                TimerKind::DoneClear => {
                    if self.status == PipelineStatus::Done {
                        self.status = self.idle_status();
                    }
                }
            }
        }
    }

    fn submit(&mut self, kind: JobKind, range: Range<usize>) -> CorrectionJob {
        let expected = char_slice(&self.text, range.start, range.end).to_string();
        let id = self.next_job_id;
        self.next_job_id += 1;

        log::debug!("session: submit {kind:?} job {id} over {range:?}");
        self.pending = Some(PendingCorrection {
            id,
            kind,
            range,
            expected: expected.clone(),
        });
        self.status = kind.status();

        CorrectionJob {
            id,
            kind,
            text: expected,
            language: self.config.language.clone(),
        }
    }

    /// `[start, end)` needs no correction: mark it checked, and corrected too
    /// when that keeps the corrected zone contiguous.
    fn mark_clean(&mut self, start: usize, end: usize) {
        if self.progress.corrected >= start {
            self.progress.corrected = self.progress.corrected.max(end);
        }
        self.progress.checked = self.progress.checked.max(end);
        self.progress.normalize();
    }

    fn on_unknown_words(
        &mut self,
        pending: &PendingCorrection,
        words: Vec<String>,
    ) -> Option<CorrectionJob> {
        let range = pending.range.clone();
        if words.is_empty() {
            self.mark_clean(range.start, range.end);
            self.status = self.idle_status();
            return None;
        }

        log::debug!("session: unknown words in {range:?}: {words:?}");
        for word in words {
            if !self.unknown_words.contains(&word) {
                self.unknown_words.push(word);
            }
        }

        if self.ai_active() {
            return Some(self.submit(JobKind::TypoFix, range));
        }
        self.progress.checked = self.progress.checked.max(range.end);
        self.progress.normalize();
        self.status = self.idle_status();
        None
    }

    fn apply_correction(&mut self, pending: &PendingCorrection, corrected: &str, now: Instant) {
        let (lead, _, trail) = whitespace_frame(&pending.expected);
        let replacement = format!("{lead}{}{trail}", corrected.trim());
        let range = pending.range.clone();

        self.flush_typing_checkpoint();
        self.record(vec![CheckpointTag::PreAi]);

        let new_end = self.replace_range(range.clone(), &replacement);
        log::info!(
            "session: {:?} applied over {range:?} ({} → {} chars)",
            pending.kind,
            range.len(),
            new_end - range.start
        );

        match pending.kind {
            JobKind::TypoFix => {
                self.progress.corrected = self.progress.corrected.max(new_end);
                self.progress.checked = self.progress.checked.max(new_end);
                self.progress.normalize();
                self.status = self.idle_status();
                self.record(vec![CheckpointTag::AiCorrected]);
            }
            JobKind::Finalize | JobKind::Bulk => {
                self.add_finalized(&replacement);
                self.progress.commit_to(new_end);
                self.finish(now);
                self.record(vec![CheckpointTag::Finalized]);
            }
            JobKind::Enhance => {
                self.add_finalized(&replacement);
                self.progress = Progress::at(char_len(&self.text));
                self.unknown_words.clear();
                self.finish(now);
                self.record(vec![CheckpointTag::Enhanced]);
            }
            JobKind::DictCheck => {}
        }
        self.refresh_unknown_words();
    }

    fn fail_open(&mut self, pending: &PendingCorrection, error: &JobError, now: Instant) {
        let end = pending.range.end;
        log::warn!(
            "session: {:?} job {} failed, leaving {:?} as is: {error}",
            pending.kind,
            pending.id,
            pending.range
        );

        match pending.kind {
            JobKind::DictCheck => self.mark_clean(pending.range.start, end),
            JobKind::TypoFix => {
                self.progress.corrected = self.progress.corrected.max(end);
                self.progress.checked = self.progress.checked.max(end);
                self.progress.normalize();
            }
            JobKind::Finalize | JobKind::Bulk => self.progress.commit_to(end),
            JobKind::Enhance => {}
        }

        self.status = PipelineStatus::Error;
        self.error_message = Some(error.to_string());
        self.timers
            .arm(TimerKind::ErrorClear, now + self.config.error_clear_duration());
    }

    fn finish(&mut self, now: Instant) {
        self.status = PipelineStatus::Done;
        self.timers
            .arm(TimerKind::DoneClear, now + self.config.done_clear_duration());
    }

    fn add_finalized(&mut self, accepted: &str) {
        for block in text::split(accepted) {
            if !block.is_separator {
                self.finalized.add(block.normalized());
            }
        }
    }

    /// Replace characters `[range)` with `replacement`, re-mapping offsets.
    /// Returns the new end of the replaced range.
    fn replace_range(&mut self, range: Range<usize>, replacement: &str) -> usize {
        let from = byte_offset(&self.text, range.start);
        let to = byte_offset(&self.text, range.end);
        self.text.replace_range(from..to, replacement);

        let new_len = char_len(replacement);
        self.progress.remap(range.start, range.end, new_len);
        self.progress.clamp(char_len(&self.text));
        range.start + new_len
    }

    fn apply_script_fix(&mut self, range: Range<usize>, replacement: &str) {
        let original = char_slice(&self.text, range.start, range.end).to_string();
        let table = align_offsets(&original, replacement);
        let delta = char_len(replacement) as isize - char_len(&original) as isize;

        self.flush_typing_checkpoint();

        let from = byte_offset(&self.text, range.start);
        let to = byte_offset(&self.text, range.end);
        self.text.replace_range(from..to, replacement);
        self.progress.map_each(|o| {
            if o <= range.start {
                o
            } else if o >= range.end {
                o.saturating_add_signed(delta)
            } else {
                range.start + table[o - range.start]
            }
        });
        self.progress.clamp(char_len(&self.text));

        log::debug!("session: script fix over {range:?} ({delta:+} chars)");
        self.status = PipelineStatus::ScriptFix;
        self.record(vec![CheckpointTag::ScriptFix]);
    }

    fn restore(
        &mut self,
        text: &str,
        progress: Progress,
        finalized: &FinalizedSnapshot,
        now: Instant,
    ) {
        self.abort_pending();
        self.text = text.to_string();
        self.progress = progress;
        self.progress.clamp(char_len(&self.text));
        self.finalized.restore(finalized);
        self.refresh_unknown_words();
        // Give the user a debounce window before the pipeline reconsiders
        // the restored text.
        self.last_keystroke = Some(now);
        self.clear_transient_status();
    }

    fn refresh_unknown_words(&mut self) {
        if self.unknown_words.is_empty() {
            return;
        }
        let lower = self.text.to_lowercase();
        self.unknown_words.retain(|w| lower.contains(w.as_str()));
    }
}

/// Where to pull progress back to after an edit that diverges at `diverge`.
///
/// When the change touches a word (typing onto or deleting from it), the
/// whole word has to be re-checked, so the anchor moves to its start.
fn edit_anchor(old: &str, new: &str, diverge: usize) -> usize {
    let is_word = |c: char| c.is_alphanumeric() || matches!(c, '\'' | '’' | '-');
    let prefix: Vec<char> = old.chars().take(diverge).collect();

    let before_is_word = prefix.last().is_some_and(|c| is_word(*c));
    let after_is_word =
        old.chars().nth(diverge).is_some_and(is_word) || new.chars().nth(diverge).is_some_and(is_word);
    if !(before_is_word && after_is_word) {
        return diverge;
    }

    let mut anchor = prefix.len();
    while anchor > 0 && is_word(prefix[anchor - 1]) {
        anchor -= 1;
    }
    anchor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
