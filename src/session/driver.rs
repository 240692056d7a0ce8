//! Session driver — owns an [`EditSession`] and runs its jobs.
//!
//! [`SessionDriver`] is the only owner of the session.  Front ends talk to it
//! through [`SessionCommand`]s on a `tokio::sync::mpsc` channel and read the
//! published [`SessionView`] from a [`SharedView`].
//!
//! # Loop
//!
//! ```text
//! tokio::select! {
//!   SessionCommand (mpsc)   ─▶ edit / undo / reset / enhance / ...
//!   JobOutcome     (mpsc)   ─▶ EditSession::apply_outcome ─▶ maybe a follow-up job
//!   interval tick           ─▶ EditSession::tick          ─▶ maybe a job
//! }
//! every job ─▶ tokio::spawn(JobRunner::run) ─▶ JobOutcome back into the loop
//! after every branch ─▶ publish SessionView
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::pipeline::{new_shared_view, CorrectionJob, JobOutcome, JobRunner, SessionView, SharedView};

use super::editor::{EditSession, ResetMode, TickOutcome};

// ---------------------------------------------------------------------------
// SessionCommand
// ---------------------------------------------------------------------------

/// Requests accepted by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// The user changed the buffer; carries the full new text.
    Edit(String),
    /// Text typed at the end of the buffer.
    Append(String),
    BeginRecording,
    BeginTranscribing,
    /// Speech-to-text finished; append the transcript.
    InsertTranscription(String),
    CancelRecording,
    Undo,
    Redo,
    JumpTo(usize),
    Reset(ResetMode),
    Clear,
    SetAutoCorrect(bool),
    Enhance,
    /// Replace the word list for a language in the checker worker.
    SetDictionary { language: String, words: Vec<String> },
    /// Write the session state as JSON to the given path.
    Save(PathBuf),
}

// ---------------------------------------------------------------------------
// SessionDriver
// ---------------------------------------------------------------------------

pub struct SessionDriver {
    session: EditSession,
    runner: JobRunner,
    view: SharedView,
    tick: Duration,
}

impl SessionDriver {
    pub fn new(session: EditSession, runner: JobRunner, view: SharedView, tick: Duration) -> Self {
        Self {
            session,
            runner,
            view,
            tick,
        }
    }

    /// Run until `commands` is closed.
    pub async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) {
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<JobOutcome>();
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.publish();

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    if let Some(job) = self.handle_command(command) {
                        self.spawn_job(job, &outcome_tx);
                    }
                }
                Some(outcome) = outcome_rx.recv() => {
                    if let Some(job) = self.session.apply_outcome(outcome, Instant::now()) {
                        self.spawn_job(job, &outcome_tx);
                    }
                }
                _ = interval.tick() => {
                    if let TickOutcome::Submitted(job) = self.session.tick(Instant::now()) {
                        self.spawn_job(job, &outcome_tx);
                    }
                }
            }
            self.publish();
        }

        log::info!("session: command channel closed, driver shutting down");
        self.runner.checker().shutdown();
    }

    // -----------------------------------------------------------------------
    // Command handling
    // -----------------------------------------------------------------------

    fn handle_command(&mut self, command: SessionCommand) -> Option<CorrectionJob> {
        let now = Instant::now();
        match command {
            SessionCommand::Edit(text) => self.session.apply_edit(&text, now),
            SessionCommand::Append(line) => self.session.append(&line, now),
            SessionCommand::BeginRecording => self.session.begin_recording(),
            SessionCommand::BeginTranscribing => self.session.begin_transcribing(),
            SessionCommand::InsertTranscription(text) => self.session.insert_transcription(&text),
            SessionCommand::CancelRecording => self.session.cancel_capture(),
            SessionCommand::Undo => {
                if !self.session.undo(now) {
                    log::debug!("session: nothing to undo");
                }
            }
            SessionCommand::Redo => {
                if !self.session.redo(now) {
                    log::debug!("session: nothing to redo");
                }
            }
            SessionCommand::JumpTo(index) => {
                if !self.session.jump_to(index, now) {
                    log::warn!("session: no checkpoint {index}");
                }
            }
            SessionCommand::Reset(mode) => self.session.reset(mode),
            SessionCommand::Clear => self.session.clear(),
            SessionCommand::SetAutoCorrect(enabled) => self.session.set_auto_correct(enabled),
            SessionCommand::Enhance => return self.session.request_enhance(),
            SessionCommand::SetDictionary { language, words } => {
                log::info!("session: loading {} words for {language}", words.len());
                self.runner.checker().set_dictionary(&language, words);
            }
            SessionCommand::Save(path) => match self.session.state().save_to(&path) {
                Ok(()) => log::info!("session: saved to {}", path.display()),
                Err(e) => log::error!("session: failed to save {}: {e:#}", path.display()),
            },
        }
        None
    }

    fn spawn_job(&self, job: CorrectionJob, outcome_tx: &mpsc::UnboundedSender<JobOutcome>) {
        let runner = self.runner.clone();
        let tx = outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = runner.run(job).await;
            // The driver may have shut down meanwhile; the result is moot then.
            let _ = tx.send(outcome);
        });
    }

    fn publish(&self) {
        *self.view.lock().unwrap() = self.session.view();
    }
}

// ---------------------------------------------------------------------------
// SessionHandle
// ---------------------------------------------------------------------------

/// Owning handle to a spawned [`SessionDriver`].
///
/// Dropping the handle aborts the driver task.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use live_proofer::config::AppConfig;
/// use live_proofer::dictionary::{UnknownWordChecker, WordListStore};
/// use live_proofer::llm::ApiCorrector;
/// use live_proofer::pipeline::JobRunner;
/// use live_proofer::session::{EditSession, SessionCommand, SessionHandle};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = AppConfig::default();
/// let checker = UnknownWordChecker::spawn(&WordListStore::new(), config.pipeline.dict_timeout());
/// let runner = JobRunner::new(
///     Arc::new(ApiCorrector::from_config(&config.llm)),
///     checker,
///     config.pipeline.ai_timeout(),
/// );
/// let handle = SessionHandle::spawn(EditSession::new(&config), runner, config.pipeline.tick_duration());
///
/// handle.send(SessionCommand::Edit("helo wrld".into())).await?;
/// tokio::time::sleep(Duration::from_secs(2)).await;
/// println!("{}", handle.view().text);
/// # Ok(())
/// # }
/// ```
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
    view: SharedView,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Spawn the driver on the current tokio runtime.
    pub fn spawn(session: EditSession, runner: JobRunner, tick: Duration) -> Self {
        let view = new_shared_view();
        let (tx, rx) = mpsc::channel(64);
        let driver = SessionDriver::new(session, runner, view.clone(), tick);
        let task = tokio::spawn(driver.run(rx));
        Self { tx, view, task }
    }

    pub async fn send(&self, command: SessionCommand) -> Result<()> {
        self.tx
            .send(command)
            .await
            .map_err(|_| anyhow!("session driver has stopped"))
    }

    /// Latest published view.
    pub fn view(&self) -> SessionView {
        self.view.lock().unwrap().clone()
    }

    pub fn shared_view(&self) -> SharedView {
        self.view.clone()
    }

    /// Close the command channel and wait for the driver to drain it.
    pub async fn shutdown(mut self) {
        let (closed, _) = mpsc::channel(1);
        drop(std::mem::replace(&mut self.tx, closed));
        if let Err(e) = (&mut self.task).await {
            log::warn!("session: driver task ended abnormally: {e}");
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
