//! Unknown-word detection.
//!
//! * [`WordListStore`] — owned per-language word sets with a `load` /
//!   `get` / `replace` lifecycle.
//! * [`UnknownWordChecker`] — worker thread + typed request/response channel.
//! * [`find_unknown_words`] — the pure scan the worker runs.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use live_proofer::dictionary::{UnknownWordChecker, WordListStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut store = WordListStore::new();
//!     store.replace("en", ["hello", "world"]);
//!
//!     let checker = UnknownWordChecker::spawn(&store, Duration::from_secs(2));
//!     let unknown = checker.check("helo world", "en").await.unwrap_or_default();
//!     assert_eq!(unknown, vec!["helo"]);
//! }
//! ```

pub mod checker;
pub mod store;
pub mod tokenize;

pub use checker::{CheckError, CheckRequest, CheckResponse, CheckerMessage, UnknownWordChecker};
pub use store::{WordListStore, WordSet};
pub use tokenize::{find_unknown_words, normalize_token};
