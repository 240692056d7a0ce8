//! Content-addressed cache of sentences already confirmed correct.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Immutable view of a [`FinalizedSet`] at one point in time.
///
/// Cloning is an `Arc` bump, so every history checkpoint can carry one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeSet<String>", into = "BTreeSet<String>")]
pub struct FinalizedSnapshot(Arc<BTreeSet<String>>);

impl FinalizedSnapshot {
    pub fn contains(&self, text: &str) -> bool {
        self.0.contains(text.trim())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeSet<String>> for FinalizedSnapshot {
    fn from(set: BTreeSet<String>) -> Self {
        Self(Arc::new(set))
    }
}

impl From<FinalizedSnapshot> for BTreeSet<String> {
    fn from(snapshot: FinalizedSnapshot) -> Self {
        Arc::try_unwrap(snapshot.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

/// Set of trimmed block texts that have been finalized.
///
/// Membership is by content, not position: a finalized sentence stays
/// finalized when text before it is edited and its offset moves.  Entries
/// are never evicted; only a full reset clears the set.
#[derive(Debug, Clone, Default)]
pub struct FinalizedSet {
    entries: Arc<BTreeSet<String>>,
}

impl FinalizedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, text: &str) -> bool {
        self.entries.contains(text.trim())
    }

    /// Trim and insert `text`.  Blank text is ignored.  Returns `true` when
    /// the entry is new.
    pub fn add(&mut self, text: &str) -> bool {
        let key = text.trim();
        if key.is_empty() || self.entries.contains(key) {
            return false;
        }
        Arc::make_mut(&mut self.entries).insert(key.to_string())
    }

    pub fn snapshot(&self) -> FinalizedSnapshot {
        FinalizedSnapshot(Arc::clone(&self.entries))
    }

    pub fn restore(&mut self, snapshot: &FinalizedSnapshot) {
        self.entries = Arc::clone(&snapshot.0);
    }

    pub fn clear(&mut self) {
        self.entries = Arc::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_dedupes() {
        let mut set = FinalizedSet::new();
        assert!(set.add("  Hello world. "));
        assert!(!set.add("Hello world."));
        assert!(!set.add("   "));
        assert!(set.has("Hello world."));
        assert!(set.has("Hello world. "));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_adds() {
        let mut set = FinalizedSet::new();
        set.add("One.");
        let snap = set.snapshot();
        set.add("Two.");

        assert!(snap.contains("One."));
        assert!(!snap.contains("Two."));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn restore_brings_back_exact_membership() {
        let mut set = FinalizedSet::new();
        let empty = set.snapshot();
        set.add("Hello world.");
        set.restore(&empty);
        assert!(!set.has("Hello world."));
        assert!(set.is_empty());
    }

    #[test]
    fn snapshot_serde_round_trip() {
        let mut set = FinalizedSet::new();
        set.add("B.");
        set.add("A.");
        let json = serde_json::to_string(&set.snapshot()).unwrap();
        assert_eq!(json, r#"["A.","B."]"#);

        let back: FinalizedSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set.snapshot());
    }
}
