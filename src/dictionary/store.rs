//! Owned, injectable per-language word sets.
//!
//! [`WordListStore`] replaces module-level global dictionaries: the binary
//! creates one, loads the configured languages, and hands it to
//! [`UnknownWordChecker::spawn`](super::UnknownWordChecker::spawn), which
//! copies the sets into its worker thread.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::tokenize::normalize_token;

/// Immutable, cheaply clonable set of normalised words.
pub type WordSet = Arc<HashSet<String>>;

/// Word lists keyed by language code.
#[derive(Debug, Clone, Default)]
pub struct WordListStore {
    sets: HashMap<String, WordSet>,
}

impl WordListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a newline-separated word list for `language` from `path`.
    ///
    /// Blank lines and lines starting with `#` are skipped.  Replaces any
    /// set previously loaded for the same language and returns its size.
    pub fn load(&mut self, language: &str, path: &Path) -> Result<usize> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading word list {}", path.display()))?;
        let words = data
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect::<Vec<_>>();
        Ok(self.replace(language, words))
    }

    /// Load `<dir>/<language>.txt` for every language, skipping missing
    /// files.  Returns the languages that were loaded.
    pub fn load_dir(&mut self, dir: &Path, languages: &[String]) -> Vec<String> {
        let mut loaded = Vec::new();
        for language in languages {
            let path = dir.join(format!("{language}.txt"));
            if !path.exists() {
                log::info!("dictionary: no word list for {language} at {}", path.display());
                continue;
            }
            match self.load(language, &path) {
                Ok(count) => {
                    log::info!("dictionary: loaded {count} words for {language}");
                    loaded.push(language.clone());
                }
                Err(e) => log::warn!("dictionary: {e:#}"),
            }
        }
        loaded
    }

    /// Replace the set for `language`.  Words are normalised the same way
    /// checked tokens are.  Returns the number of distinct entries.
    pub fn replace<I, S>(&mut self, language: &str, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: HashSet<String> = words
            .into_iter()
            .filter_map(|w| normalize_token(w.as_ref(), language))
            .collect();
        let count = set.len();
        self.sets.insert(language.to_string(), Arc::new(set));
        count
    }

    pub fn get(&self, language: &str) -> Option<WordSet> {
        self.sets.get(language).cloned()
    }

    /// Languages with a loaded set, sorted for stable iteration.
    pub fn languages(&self) -> Vec<String> {
        let mut langs: Vec<String> = self.sets.keys().cloned().collect();
        langs.sort();
        langs
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn replace_normalises_words() {
        let mut store = WordListStore::new();
        let count = store.replace("en", ["Hello", "WORLD", "world", "  "]);
        assert_eq!(count, 2);
        let set = store.get("en").unwrap();
        assert!(set.contains("hello"));
        assert!(set.contains("world"));
    }

    #[test]
    fn load_skips_comments_and_blank_lines() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("en.txt");
        std::fs::write(&path, "# header\nalpha\n\nbeta\n").unwrap();

        let mut store = WordListStore::new();
        assert_eq!(store.load("en", &path).unwrap(), 2);
        assert!(store.get("en").unwrap().contains("beta"));
    }

    #[test]
    fn load_dir_ignores_missing_languages() {
        let dir = tempdir().expect("temp dir");
        std::fs::write(dir.path().join("en.txt"), "word\n").unwrap();

        let mut store = WordListStore::new();
        let loaded = store.load_dir(dir.path(), &["en".into(), "de".into()]);
        assert_eq!(loaded, vec!["en".to_string()]);
        assert_eq!(store.languages(), vec!["en".to_string()]);
    }

    #[test]
    fn load_missing_file_is_error() {
        let mut store = WordListStore::new();
        assert!(store.load("en", Path::new("/definitely/not/here.txt")).is_err());
        assert!(store.is_empty());
    }
}
