//! Where the proofreader keeps its files.
//!
//! Settings are user-edited and live in the platform config directory
//! (`~/.config/live-proofer/settings.toml` on Linux).  The saved editing
//! session and the `<lang>.txt` word lists are data, kept under the local
//! data directory (`~/.local/share/live-proofer/` on Linux,
//! `%LOCALAPPDATA%\live-proofer\` on Windows).  On macOS both resolve to
//! `~/Library/Application Support/live-proofer/`.
//!
//! `AppConfig::load`, `SessionState::load` and the binary's word-list
//! loading all start from [`AppPaths::new`].

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    /// `settings.toml`, read by `AppConfig::load`.
    pub settings_file: PathBuf,
    /// `session.json`: buffer, progress offsets, finalized sentences and
    /// undo history.
    pub session_file: PathBuf,
    /// Default home of the word lists, unless `dictionary.directory` is set.
    pub dictionaries_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "live-proofer";

    /// Missing platform directories fall back to `./live-proofer`.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let session_file = data_dir.join("session.json");
        let dictionaries_dir = data_dir.join("dictionaries");

        Self {
            config_dir,
            settings_file,
            session_file,
            dictionaries_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_and_word_lists_share_the_data_dir() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths
            .settings_file
            .file_name()
            .is_some_and(|n| n == "settings.toml"));
        assert!(paths
            .session_file
            .file_name()
            .is_some_and(|n| n == "session.json"));
        assert!(paths.dictionaries_dir.ends_with("dictionaries"));
        assert_eq!(paths.session_file.parent(), paths.dictionaries_dir.parent());
    }
}
