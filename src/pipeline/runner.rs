//! Job runner — executes one [`CorrectionJob`] against the dictionary worker
//! or the AI backend.
//!
//! ```text
//! CorrectionJob
//!   ├─ DictCheck → UnknownWordChecker::check   (worker-side timeout)
//!   └─ AI kinds  → LlmCorrector::correct        (tokio::time::timeout)
//!        └─▶ JobOutcome { id, kind, result }
//! ```
//!
//! The runner never touches session state; the session decides whether the
//! outcome is still applicable.

use std::sync::Arc;
use std::time::Duration;

use crate::dictionary::UnknownWordChecker;
use crate::llm::LlmCorrector;

use super::job::{CorrectionJob, JobError, JobOutcome, JobOutput};

/// Cheap-to-clone executor for correction jobs.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use live_proofer::config::AppConfig;
/// use live_proofer::dictionary::{UnknownWordChecker, WordListStore};
/// use live_proofer::llm::ApiCorrector;
/// use live_proofer::pipeline::JobRunner;
///
/// let config = AppConfig::default();
/// let checker = UnknownWordChecker::spawn(&WordListStore::new(), Duration::from_secs(2));
/// let runner = JobRunner::new(
///     Arc::new(ApiCorrector::from_config(&config.llm)),
///     checker,
///     Duration::from_secs(30),
/// );
/// ```
#[derive(Clone)]
pub struct JobRunner {
    llm: Arc<dyn LlmCorrector>,
    checker: UnknownWordChecker,
    ai_timeout: Duration,
}

impl JobRunner {
    pub fn new(llm: Arc<dyn LlmCorrector>, checker: UnknownWordChecker, ai_timeout: Duration) -> Self {
        Self {
            llm,
            checker,
            ai_timeout,
        }
    }

    pub fn checker(&self) -> &UnknownWordChecker {
        &self.checker
    }

    /// Run `job` to completion.  Never panics; every failure becomes an
    /// `Err` in the outcome.
    pub async fn run(&self, job: CorrectionJob) -> JobOutcome {
        log::debug!("runner: job {} ({:?}, {} bytes)", job.id, job.kind, job.text.len());

        let Some(op) = job.kind.op() else {
            return match self.checker.check(&job.text, &job.language).await {
                Ok(words) => JobOutcome::ok(&job, JobOutput::UnknownWords(words)),
                Err(e) => {
                    log::warn!("runner: dictionary check {} failed: {e}", job.id);
                    JobOutcome::failed(&job, JobError::Dictionary(e.to_string()))
                }
            };
        };

        let call = self.llm.correct(op, &job.text, &job.language);
        match tokio::time::timeout(self.ai_timeout, call).await {
            Err(_) => {
                log::warn!("runner: {op} job {} timed out after {:?}", job.id, self.ai_timeout);
                JobOutcome::failed(&job, JobError::Timeout)
            }
            Ok(Err(e)) => {
                log::warn!("runner: {op} job {} failed: {e}", job.id);
                JobOutcome::failed(&job, JobError::Llm(e.to_string()))
            }
            Ok(Ok(text)) => {
                log::debug!("runner: {op} job {} → {:?}", job.id, text);
                JobOutcome::ok(&job, JobOutput::Corrected(text))
            }
        }
    }
}

impl std::fmt::Debug for JobRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRunner")
            .field("ai_timeout", &self.ai_timeout)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::job::JobKind;
    use crate::dictionary::WordListStore;
    use crate::llm::{CorrectionOp, LlmError};
    use async_trait::async_trait;

    struct OkLlm(String);

    #[async_trait]
    impl LlmCorrector for OkLlm {
        async fn correct(&self, _: CorrectionOp, _: &str, _: &str) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    struct FailLlm;

    #[async_trait]
    impl LlmCorrector for FailLlm {
        async fn correct(&self, _: CorrectionOp, _: &str, _: &str) -> Result<String, LlmError> {
            Err(LlmError::Status(500))
        }
    }

    struct SlowLlm;

    #[async_trait]
    impl LlmCorrector for SlowLlm {
        async fn correct(&self, _: CorrectionOp, text: &str, _: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(text.to_string())
        }
    }

    fn checker() -> UnknownWordChecker {
        let mut store = WordListStore::new();
        store.replace("en", ["hello", "world"]);
        UnknownWordChecker::spawn(&store, Duration::from_secs(2))
    }

    fn job(kind: JobKind, text: &str) -> CorrectionJob {
        CorrectionJob {
            id: 7,
            kind,
            text: text.into(),
            language: "en".into(),
        }
    }

    #[tokio::test]
    async fn dictionary_job_returns_unknown_words() {
        let runner = JobRunner::new(Arc::new(FailLlm), checker(), Duration::from_secs(1));
        let outcome = runner.run(job(JobKind::DictCheck, "hello wrld")).await;
        assert_eq!(outcome.id, 7);
        assert_eq!(outcome.result, Ok(JobOutput::UnknownWords(vec!["wrld".into()])));
    }

    #[tokio::test]
    async fn ai_job_returns_corrected_text() {
        let runner = JobRunner::new(
            Arc::new(OkLlm("hello world".into())),
            checker(),
            Duration::from_secs(1),
        );
        let outcome = runner.run(job(JobKind::TypoFix, "helo wrld")).await;
        assert_eq!(outcome.kind, JobKind::TypoFix);
        assert_eq!(outcome.result, Ok(JobOutput::Corrected("hello world".into())));
    }

    #[tokio::test]
    async fn ai_failure_is_reported() {
        let runner = JobRunner::new(Arc::new(FailLlm), checker(), Duration::from_secs(1));
        let outcome = runner.run(job(JobKind::Finalize, "x")).await;
        assert!(matches!(outcome.result, Err(JobError::Llm(msg)) if msg.contains("500")));
    }

    #[tokio::test]
    async fn ai_timeout_is_reported() {
        let runner = JobRunner::new(Arc::new(SlowLlm), checker(), Duration::from_millis(100));
        let outcome = runner.run(job(JobKind::Bulk, "x")).await;
        assert_eq!(outcome.result, Err(JobError::Timeout));
    }

    #[tokio::test]
    async fn stalled_dictionary_times_out() {
        let (stalled, _rx) = UnknownWordChecker::stalled(Duration::from_millis(20));
        let runner = JobRunner::new(Arc::new(FailLlm), stalled, Duration::from_secs(1));
        let outcome = runner.run(job(JobKind::DictCheck, "anything")).await;
        assert!(matches!(outcome.result, Err(JobError::Dictionary(_))));
    }
}
