//! Core `LlmCorrector` trait and `ApiCorrector` implementation.
//!
//! `ApiCorrector` calls any OpenAI-compatible `/v1/chat/completions` endpoint
//! — Ollama (OpenAI mode), OpenAI, Groq, LM Studio, vLLM, etc.
//! All connection details come from [`LlmConfig`]; nothing is hardcoded.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LlmConfig;
use crate::llm::prompt::PromptBuilder;
use crate::llm::sanitize::sanitize_response;

// ---------------------------------------------------------------------------
// CorrectionOp
// ---------------------------------------------------------------------------

/// The four operations of the AI correction capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionOp {
    /// Spelling only; structure untouched.
    FixTypos,
    /// Punctuation, capitalisation, filler removal.
    Finalize,
    /// Both at once, for pasted or dictated multi-sentence input.
    FixAndFinalize,
    /// Full rewrite on explicit user request.
    Enhance,
}

impl fmt::Display for CorrectionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CorrectionOp::FixTypos => "fix_typos",
            CorrectionOp::Finalize => "finalize",
            CorrectionOp::FixAndFinalize => "fix_and_finalize",
            CorrectionOp::Enhance => "enhance",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// LlmError
// ---------------------------------------------------------------------------

/// Errors that can occur during AI correction.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("LLM endpoint returned HTTP {0}")]
    Status(u16),

    /// The request did not complete within the configured timeout.
    #[error("LLM request timed out")]
    Timeout,

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse LLM response: {0}")]
    Parse(String),

    /// The LLM returned a response with no usable text content.
    #[error("LLM returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// LlmCorrector trait
// ---------------------------------------------------------------------------

/// Async trait for the AI correction capability.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn LlmCorrector>`).  Empty or whitespace-only input
/// must come back unchanged.
#[async_trait]
pub trait LlmCorrector: Send + Sync {
    async fn correct(&self, op: CorrectionOp, text: &str, language: &str)
        -> Result<String, LlmError>;
}

// ---------------------------------------------------------------------------
// ApiCorrector
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
///
/// # No hardcoded URLs
/// All connection details (`base_url`, `api_key`, `model`) come exclusively
/// from the [`LlmConfig`] passed to [`ApiCorrector::from_config`].
pub struct ApiCorrector {
    client: reqwest::Client,
    config: LlmConfig,
}

impl ApiCorrector {
    /// Build an `ApiCorrector` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default client is used as a last-resort
    /// fallback if the builder fails.
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl LlmCorrector for ApiCorrector {
    /// Send `text` to the configured endpoint for `op`.
    ///
    /// The `Authorization: Bearer …` header is attached **only** when
    /// `config.api_key` is `Some(key)` and `key` is non-empty.
    async fn correct(
        &self,
        op: CorrectionOp,
        text: &str,
        language: &str,
    ) -> Result<String, LlmError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let (system_msg, user_msg) = PromptBuilder::new(language).build_chat(op, text);

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "stream":      false,
            "temperature": self.config.temperature,
            "max_tokens":  self.config.max_tokens
        });

        let mut req = self.client.post(self.endpoint()).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        log::debug!("llm: {op} request ({} chars)", text.chars().count());
        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status(status.as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(LlmError::EmptyResponse)?;

        let cleaned = sanitize_response(content, text);
        if cleaned.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(cleaned)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LlmConfig, LlmProvider};

    fn make_config(api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            provider: LlmProvider::OpenAiCompatible,
            base_url: "http://localhost:11434/".into(),
            api_key: api_key.map(|s| s.to_string()),
            model: "qwen2.5:3b".into(),
            temperature: 0.2,
            max_tokens: 512,
            timeout_secs: 10,
        }
    }

    #[test]
    fn from_config_accepts_any_api_key() {
        let _ = ApiCorrector::from_config(&make_config(None));
        let _ = ApiCorrector::from_config(&make_config(Some("")));
        let _ = ApiCorrector::from_config(&make_config(Some("sk-test-1234")));
    }

    #[test]
    fn endpoint_has_single_slash() {
        let corrector = ApiCorrector::from_config(&make_config(None));
        assert_eq!(
            corrector.endpoint(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    /// Verify that `ApiCorrector` is object-safe (usable as `dyn LlmCorrector`).
    #[test]
    fn corrector_is_object_safe() {
        let corrector: Box<dyn LlmCorrector> =
            Box::new(ApiCorrector::from_config(&make_config(None)));
        drop(corrector);
    }

    /// Blank input never reaches the network.
    #[tokio::test]
    async fn blank_input_is_returned_unchanged() {
        let mut config = make_config(None);
        config.base_url = "http://127.0.0.1:9".into();
        let corrector = ApiCorrector::from_config(&config);
        let out = corrector
            .correct(CorrectionOp::Finalize, "   ", "en")
            .await
            .unwrap();
        assert_eq!(out, "   ");
    }

    #[test]
    fn op_display_is_snake_case() {
        assert_eq!(CorrectionOp::FixAndFinalize.to_string(), "fix_and_finalize");
        assert_eq!(CorrectionOp::FixTypos.to_string(), "fix_typos");
    }
}
