//! Session persistence as a single JSON document.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::AppPaths;
use crate::history::HistoryStore;
use crate::pipeline::{FinalizedSnapshot, Progress};

/// Everything needed to resume a session: buffer, offsets, finalized set
/// and undo history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub text: String,
    pub progress: Progress,
    pub finalized: FinalizedSnapshot,
    pub history: HistoryStore,
}

impl SessionState {
    /// Load from the platform-appropriate `session.json`.
    ///
    /// Returns `Ok(None)` when no session has been saved yet.
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(&AppPaths::new().session_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading session file {}", path.display()))?;
        let state: Self = serde_json::from_str(&content)
            .with_context(|| format!("parsing session file {}", path.display()))?;
        Ok(Some(state))
    }

    /// Save to the platform-appropriate `session.json`, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().session_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::CheckpointTag;
    use crate::pipeline::FinalizedSet;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_none() {
        let dir = tempdir().unwrap();
        let loaded = SessionState::load_from(&dir.path().join("nope.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut finalized = FinalizedSet::new();
        finalized.add("Hello world.");
        let mut history = HistoryStore::new(10);
        history.checkpoint(
            "Hello world. ",
            Progress::at(13),
            finalized.snapshot(),
            vec![CheckpointTag::Finalized],
        );
        let state = SessionState {
            text: "Hello world. ".into(),
            progress: Progress::at(13),
            finalized: finalized.snapshot(),
            history,
        };

        state.save_to(&path).unwrap();
        let loaded = SessionState::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded, state);
        assert!(loaded.finalized.contains("Hello world."));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(SessionState::load_from(&path).is_err());
    }
}
