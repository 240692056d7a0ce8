//! Unknown-word checker worker.
//!
//! # Design
//!
//! The checker is an actor on a **dedicated OS thread** (`dict-checker`) that
//! owns its own copy of the per-language word sets.  The async side talks to
//! it through an unbounded `tokio::sync::mpsc` channel:
//!
//! ```text
//! UnknownWordChecker::check(text, lang)
//!   └─▶ CheckerMessage::Check(CheckRequest { id, text, language, reply })
//!         worker: find_unknown_words(...)
//!   ◀── CheckResponse { id, unknown_words }   (oneshot, correlated by id)
//! ```
//!
//! Every round-trip is bounded by a timeout; callers treat a timeout or a
//! dead worker as "chunk checked" so editing never blocks on the dictionary.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use super::store::{WordListStore, WordSet};
use super::tokenize::{find_unknown_words, normalize_token};

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// One check request.  `reply` receives exactly one [`CheckResponse`].
#[derive(Debug)]
pub struct CheckRequest {
    pub id: u64,
    pub text: String,
    pub language: String,
    pub reply: oneshot::Sender<CheckResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResponse {
    pub id: u64,
    pub unknown_words: Vec<String>,
}

/// Messages accepted by the worker thread.
#[derive(Debug)]
pub enum CheckerMessage {
    /// Replace the word set for `language` (idempotent).
    SetDictionary { language: String, words: Vec<String> },
    Check(CheckRequest),
    Shutdown,
}

// ---------------------------------------------------------------------------
// CheckError
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("dictionary check timed out")]
    Timeout,

    #[error("dictionary worker is not running")]
    WorkerGone,

    #[error("dictionary reply {got} does not match request {expected}")]
    Mismatch { expected: u64, got: u64 },
}

// ---------------------------------------------------------------------------
// UnknownWordChecker
// ---------------------------------------------------------------------------

/// Cheap-to-clone handle to the checker worker.
#[derive(Debug, Clone)]
pub struct UnknownWordChecker {
    tx: mpsc::UnboundedSender<CheckerMessage>,
    next_id: Arc<AtomicU64>,
    timeout: Duration,
}

impl UnknownWordChecker {
    /// Start the worker thread with a copy of every set in `store`.
    ///
    /// If the thread cannot be spawned the handle still works: every check
    /// fails with [`CheckError::WorkerGone`], which callers treat as checked.
    pub fn spawn(store: &WordListStore, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let sets: HashMap<String, WordSet> = store
            .languages()
            .into_iter()
            .filter_map(|lang| store.get(&lang).map(|set| (lang, set)))
            .collect();

        let spawned = std::thread::Builder::new()
            .name("dict-checker".into())
            .spawn(move || worker_loop(sets, rx));

        if let Err(e) = spawned {
            log::error!("dictionary: failed to spawn checker thread: {e}");
        }

        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
            timeout,
        }
    }

    /// Replace the worker's word set for `language`.
    pub fn set_dictionary(&self, language: &str, words: Vec<String>) {
        let msg = CheckerMessage::SetDictionary {
            language: language.to_string(),
            words,
        };
        if self.tx.send(msg).is_err() {
            log::warn!("dictionary: worker gone, dropping word list for {language}");
        }
    }

    /// Ask the worker for the unknown words of `text`.
    pub async fn check(&self, text: &str, language: &str) -> Result<Vec<String>, CheckError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply, reply_rx) = oneshot::channel();

        self.tx
            .send(CheckerMessage::Check(CheckRequest {
                id,
                text: text.to_string(),
                language: language.to_string(),
                reply,
            }))
            .map_err(|_| CheckError::WorkerGone)?;

        match tokio::time::timeout(self.timeout, reply_rx).await {
            Err(_) => Err(CheckError::Timeout),
            Ok(Err(_)) => Err(CheckError::WorkerGone),
            Ok(Ok(resp)) if resp.id != id => Err(CheckError::Mismatch {
                expected: id,
                got: resp.id,
            }),
            Ok(Ok(resp)) => Ok(resp.unknown_words),
        }
    }

    /// Ask the worker thread to exit.
    pub fn shutdown(&self) {
        let _ = self.tx.send(CheckerMessage::Shutdown);
    }

    /// Handle wired to a receiver that nobody reads — every check times out.
    #[cfg(test)]
    pub(crate) fn stalled(timeout: Duration) -> (Self, mpsc::UnboundedReceiver<CheckerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let checker = Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
            timeout,
        };
        (checker, rx)
    }
}

fn worker_loop(
    mut sets: HashMap<String, WordSet>,
    mut rx: mpsc::UnboundedReceiver<CheckerMessage>,
) {
    while let Some(msg) = rx.blocking_recv() {
        match msg {
            CheckerMessage::SetDictionary { language, words } => {
                let set: HashSet<String> = words
                    .iter()
                    .filter_map(|w| normalize_token(w, &language))
                    .collect();
                log::debug!("dictionary: worker set {} words for {language}", set.len());
                sets.insert(language, Arc::new(set));
            }
            CheckerMessage::Check(req) => {
                let unknown_words =
                    find_unknown_words(&req.text, &req.language, sets.values().map(|s| &**s));
                // The caller may have timed out and dropped the receiver.
                let _ = req.reply.send(CheckResponse {
                    id: req.id,
                    unknown_words,
                });
            }
            CheckerMessage::Shutdown => break,
        }
    }
    log::debug!("dictionary: checker thread exiting");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(words: &[&str]) -> WordListStore {
        let mut store = WordListStore::new();
        store.replace("en", words.iter().copied());
        store
    }

    #[tokio::test]
    async fn check_reports_unknown_words() {
        let checker = UnknownWordChecker::spawn(&store_with(&["hello", "world"]), Duration::from_secs(2));
        let unknown = checker.check("helo wrld", "en").await.unwrap();
        assert_eq!(unknown, vec!["helo", "wrld"]);
        checker.shutdown();
    }

    #[tokio::test]
    async fn set_dictionary_updates_worker_copy() {
        let checker = UnknownWordChecker::spawn(&store_with(&["hello"]), Duration::from_secs(2));
        assert_eq!(checker.check("zebra", "en").await.unwrap(), vec!["zebra"]);

        checker.set_dictionary("en", vec!["zebra".into()]);
        assert!(checker.check("zebra", "en").await.unwrap().is_empty());
        checker.shutdown();
    }

    #[tokio::test]
    async fn concurrent_checks_are_correlated() {
        let checker = UnknownWordChecker::spawn(&store_with(&["alpha"]), Duration::from_secs(2));
        let (a, b) = tokio::join!(checker.check("alpha bravo", "en"), checker.check("charlie", "en"));
        assert_eq!(a.unwrap(), vec!["bravo"]);
        assert_eq!(b.unwrap(), vec!["charlie"]);
        checker.shutdown();
    }

    #[tokio::test]
    async fn stalled_worker_times_out() {
        let (checker, _rx) = UnknownWordChecker::stalled(Duration::from_millis(50));
        assert_eq!(checker.check("anything", "en").await, Err(CheckError::Timeout));
    }

    #[tokio::test]
    async fn dropped_worker_reports_gone() {
        let (checker, rx) = UnknownWordChecker::stalled(Duration::from_millis(50));
        drop(rx);
        assert_eq!(checker.check("anything", "en").await, Err(CheckError::WorkerGone));
    }
}
