//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// LlmProvider
// ---------------------------------------------------------------------------

/// Selects which LLM backend handles AI correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LlmProvider {
    /// Ollama running locally (OpenAI mode) — no authentication required.
    Ollama,
    /// Any OpenAI-compatible REST API (OpenAI, Groq, Together.ai, LM Studio …).
    OpenAiCompatible,
    /// AI correction disabled — the pipeline starts paused.
    Disabled,
}

impl Default for LlmProvider {
    fn default() -> Self {
        Self::Ollama
    }
}

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the AI correction backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Which backend to use.
    pub provider: LlmProvider,
    /// Base URL of the API endpoint.
    ///
    /// - Ollama default: `http://localhost:11434`
    /// - OpenAI: `https://api.openai.com`
    pub base_url: String,
    /// API key — `None` for local providers.
    pub api_key: Option<String>,
    /// Model identifier sent to the API (e.g. `"qwen2.5:3b"`, `"gpt-4o-mini"`).
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).  Lower = more deterministic.
    pub temperature: f32,
    /// Upper bound on generated tokens per request.
    pub max_tokens: u32,
    /// Maximum seconds the HTTP client waits for a response.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            base_url: "http://localhost:11434".into(),
            api_key: None,
            model: "qwen2.5:3b".into(),
            temperature: 0.2,
            max_tokens: 1024,
            timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    /// `false` when the provider is [`LlmProvider::Disabled`].
    pub fn is_enabled(&self) -> bool {
        self.provider != LlmProvider::Disabled
    }
}

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Timing and stage toggles for the incremental correction pipeline.
///
/// All durations are stored as integer milliseconds so the TOML file stays
/// readable; use the `*_duration` helpers to get [`Duration`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Language code passed to the dictionary checker and the AI backend.
    pub language: String,
    /// Run AI-driven stages (typo fix, finalize, bulk).  `false` = paused.
    pub auto_correct: bool,
    /// Run the local regex normalisation stage.
    pub script_fix: bool,
    /// Run the unknown-word dictionary stage.
    pub dictionary_check: bool,
    /// Period of the pipeline tick.
    pub tick_ms: u64,
    /// Quiet time after the last keystroke before a tick may act.
    pub debounce_ms: u64,
    /// Delay before a pure-typing history checkpoint is recorded.
    pub typing_checkpoint_ms: u64,
    /// Length delta (in characters) at which an edit is checkpointed at once.
    pub large_edit_chars: usize,
    /// Hard timeout for one dictionary check round-trip.
    pub dict_timeout_ms: u64,
    /// Timeout applied to every AI capability call.
    pub ai_timeout_secs: u64,
    /// How long the transient `error` status stays visible.
    pub error_clear_ms: u64,
    /// How long the `done` status stays visible.
    pub done_clear_ms: u64,
    /// Minimum number of words in one dictionary chunk.
    pub min_chunk_words: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: "en".into(),
            auto_correct: true,
            script_fix: true,
            dictionary_check: true,
            tick_ms: 500,
            debounce_ms: 1_000,
            typing_checkpoint_ms: 1_500,
            large_edit_chars: 20,
            dict_timeout_ms: 2_000,
            ai_timeout_secs: 30,
            error_clear_ms: 3_000,
            done_clear_ms: 1_500,
            min_chunk_words: 3,
        }
    }
}

impl PipelineConfig {
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn debounce_duration(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn typing_checkpoint_duration(&self) -> Duration {
        Duration::from_millis(self.typing_checkpoint_ms)
    }

    pub fn dict_timeout(&self) -> Duration {
        Duration::from_millis(self.dict_timeout_ms)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    pub fn error_clear_duration(&self) -> Duration {
        Duration::from_millis(self.error_clear_ms)
    }

    pub fn done_clear_duration(&self) -> Duration {
        Duration::from_millis(self.done_clear_ms)
    }
}

// ---------------------------------------------------------------------------
// HistoryConfig
// ---------------------------------------------------------------------------

/// Undo/redo history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of checkpoints kept; the oldest is evicted beyond it.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}

// ---------------------------------------------------------------------------
// DictionaryConfig
// ---------------------------------------------------------------------------

/// Word-list loading settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Languages whose `<lang>.txt` word list is loaded at startup.
    pub languages: Vec<String>,
    /// Directory holding the word lists.  `None` = `AppPaths::dictionaries_dir`.
    pub directory: Option<std::path::PathBuf>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".into()],
            directory: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use live_proofer::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// AI backend settings.
    pub llm: LlmConfig,
    /// Correction pipeline timing and toggles.
    pub pipeline: PipelineConfig,
    /// Undo history settings.
    pub history: HistoryConfig,
    /// Word-list settings for the unknown-word checker.
    pub dictionary: DictionaryConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Whether AI stages should run at startup: both the provider and the
    /// pipeline toggle must allow it.
    pub fn ai_enabled(&self) -> bool {
        self.llm.is_enabled() && self.pipeline.auto_correct
    }

    /// Directory the word lists are read from.
    pub fn dictionaries_dir(&self) -> std::path::PathBuf {
        self.dictionary
            .directory
            .clone()
            .unwrap_or_else(|| AppPaths::new().dictionaries_dir)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.llm.provider, loaded.llm.provider);
        assert_eq!(original.llm.base_url, loaded.llm.base_url);
        assert_eq!(original.llm.api_key, loaded.llm.api_key);
        assert_eq!(original.llm.model, loaded.llm.model);
        assert_eq!(original.llm.timeout_secs, loaded.llm.timeout_secs);

        assert_eq!(original.pipeline.language, loaded.pipeline.language);
        assert_eq!(original.pipeline.tick_ms, loaded.pipeline.tick_ms);
        assert_eq!(original.pipeline.debounce_ms, loaded.pipeline.debounce_ms);
        assert_eq!(
            original.pipeline.dict_timeout_ms,
            loaded.pipeline.dict_timeout_ms
        );
        assert_eq!(original.history.capacity, loaded.history.capacity);
        assert_eq!(original.dictionary.languages, loaded.dictionary.languages);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.llm.model, default.llm.model);
        assert_eq!(config.pipeline.tick_ms, default.pipeline.tick_ms);
        assert_eq!(config.history.capacity, default.history.capacity);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.llm.base_url, "http://localhost:11434");
        assert!(cfg.llm.api_key.is_none());
        assert_eq!(cfg.pipeline.tick_duration(), Duration::from_millis(500));
        assert_eq!(cfg.pipeline.dict_timeout(), Duration::from_secs(2));
        assert_eq!(cfg.pipeline.min_chunk_words, 3);
        assert_eq!(cfg.history.capacity, 50);
        assert!(cfg.ai_enabled());
    }

    #[test]
    fn disabled_provider_turns_ai_off() {
        let mut cfg = AppConfig::default();
        cfg.llm.provider = LlmProvider::Disabled;
        assert!(!cfg.ai_enabled());
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.llm.provider = LlmProvider::OpenAiCompatible;
        cfg.llm.base_url = "https://api.openai.com".into();
        cfg.llm.api_key = Some("sk-test".into());
        cfg.pipeline.language = "uz".into();
        cfg.pipeline.auto_correct = false;
        cfg.pipeline.debounce_ms = 250;
        cfg.history.capacity = 10;
        cfg.dictionary.directory = Some("/tmp/words".into());

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.llm.provider, LlmProvider::OpenAiCompatible);
        assert_eq!(loaded.llm.api_key, Some("sk-test".into()));
        assert_eq!(loaded.pipeline.language, "uz");
        assert!(!loaded.pipeline.auto_correct);
        assert_eq!(loaded.pipeline.debounce_ms, 250);
        assert_eq!(loaded.history.capacity, 10);
        assert_eq!(
            loaded.dictionaries_dir(),
            std::path::PathBuf::from("/tmp/words")
        );
    }
}
