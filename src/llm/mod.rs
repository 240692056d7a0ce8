//! AI correction capability.
//!
//! This module provides:
//! * [`LlmCorrector`] — async trait implemented by all corrector backends.
//! * [`CorrectionOp`] — `FixTypos`, `Finalize`, `FixAndFinalize`, `Enhance`.
//! * [`ApiCorrector`] — OpenAI-compatible REST API corrector.
//! * [`PromptBuilder`] — per-operation chat prompts.
//! * [`sanitize_response`] — strips reasoning / meta-commentary from replies.
//! * [`LlmError`] — error variants for LLM operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use live_proofer::config::AppConfig;
//! use live_proofer::llm::{ApiCorrector, CorrectionOp, LlmCorrector};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let corrector = ApiCorrector::from_config(&config.llm);
//!
//!     let fixed = corrector
//!         .correct(CorrectionOp::FixTypos, "helo wrld", "en")
//!         .await
//!         .unwrap();
//!     println!("{}", fixed);
//! }
//! ```

pub mod corrector;
pub mod prompt;
pub mod sanitize;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use corrector::{ApiCorrector, CorrectionOp, LlmCorrector, LlmError};
pub use prompt::PromptBuilder;
pub use sanitize::sanitize_response;
