//! Bounded linear undo history with a cursor.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::checkpoint::{Checkpoint, CheckpointTag};
use crate::pipeline::{FinalizedSnapshot, Progress};

/// Default number of checkpoints kept.
pub const DEFAULT_CAPACITY: usize = 50;

/// Ordered checkpoints plus a cursor at the current one.
///
/// ```text
///  entries:  [c0] [c1] [c2] [c3]
///                        ^ index        undo → c1, redo → c3
///  checkpoint(new) truncates c3 and appends: [c0] [c1] [c2] [new]
/// ```
///
/// Once full, the oldest entry is evicted on every append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStore {
    entries: Vec<Checkpoint>,
    index: usize,
    capacity: usize,
    next_id: u64,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryStore {
    /// Create an empty store.  A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    /// Record a checkpoint after the cursor.
    ///
    /// Returns `false` (and records nothing) when the current checkpoint
    /// already has the same text, committed offset and tags.
    pub fn checkpoint(
        &mut self,
        text: &str,
        progress: Progress,
        finalized: FinalizedSnapshot,
        tags: Vec<CheckpointTag>,
    ) -> bool {
        if let Some(current) = self.current() {
            if current.same_as(text, progress.committed, &tags) {
                return false;
            }
        }

        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }

        self.entries.push(Checkpoint {
            id: self.next_id,
            text: text.to_string(),
            progress,
            finalized,
            timestamp: Utc::now(),
            tags,
        });
        self.next_id += 1;

        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
        self.index = self.entries.len() - 1;
        true
    }

    /// Step the cursor back one checkpoint.
    pub fn undo(&mut self) -> Option<&Checkpoint> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step the cursor forward one checkpoint.
    pub fn redo(&mut self) -> Option<&Checkpoint> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    /// Move the cursor to `index`.  Out-of-range indices are rejected.
    pub fn jump_to(&mut self, index: usize) -> Option<&Checkpoint> {
        if index >= self.entries.len() {
            return None;
        }
        self.index = index;
        self.entries.get(index)
    }

    pub fn current(&self) -> Option<&Checkpoint> {
        self.entries.get(self.index)
    }

    pub fn entries(&self) -> &[Checkpoint] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FinalizedSet;

    fn record(store: &mut HistoryStore, text: &str, tag: CheckpointTag) -> bool {
        store.checkpoint(text, Progress::default(), FinalizedSnapshot::default(), vec![tag])
    }

    #[test]
    fn empty_store_cannot_move() {
        let mut store = HistoryStore::new(5);
        assert!(store.undo().is_none());
        assert!(store.redo().is_none());
        assert!(store.jump_to(0).is_none());
        assert!(store.current().is_none());
    }

    #[test]
    fn undo_then_redo_walks_the_cursor() {
        let mut store = HistoryStore::new(5);
        record(&mut store, "a", CheckpointTag::Typing);
        record(&mut store, "ab", CheckpointTag::Typing);
        record(&mut store, "abc", CheckpointTag::Typing);

        assert_eq!(store.undo().unwrap().text, "ab");
        assert_eq!(store.undo().unwrap().text, "a");
        assert!(store.undo().is_none());
        assert_eq!(store.redo().unwrap().text, "ab");
        assert_eq!(store.redo().unwrap().text, "abc");
        assert!(store.redo().is_none());
    }

    #[test]
    fn identical_checkpoint_is_deduplicated() {
        let mut store = HistoryStore::new(5);
        assert!(record(&mut store, "same", CheckpointTag::Typing));
        assert!(!record(&mut store, "same", CheckpointTag::Typing));
        assert!(record(&mut store, "same", CheckpointTag::PreAi));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn new_checkpoint_truncates_redo_branch() {
        let mut store = HistoryStore::new(5);
        record(&mut store, "a", CheckpointTag::Typing);
        record(&mut store, "b", CheckpointTag::Typing);
        record(&mut store, "c", CheckpointTag::Typing);
        store.undo();
        store.undo();
        record(&mut store, "x", CheckpointTag::Paste);

        let texts: Vec<_> = store.entries().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["a", "x"]);
        assert!(!store.can_redo());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut store = HistoryStore::new(3);
        for text in ["1", "2", "3", "4", "5"] {
            record(&mut store, text, CheckpointTag::Typing);
        }
        let texts: Vec<_> = store.entries().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["3", "4", "5"]);
        assert_eq!(store.index(), 2);
        assert_eq!(store.current().unwrap().text, "5");
    }

    #[test]
    fn ids_increase_monotonically() {
        let mut store = HistoryStore::new(2);
        for text in ["a", "b", "c"] {
            record(&mut store, text, CheckpointTag::Typing);
        }
        let ids: Vec<_> = store.entries().iter().map(|c| c.id).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[test]
    fn jump_to_moves_cursor_without_dropping_entries() {
        let mut store = HistoryStore::new(5);
        for text in ["a", "b", "c"] {
            record(&mut store, text, CheckpointTag::Typing);
        }
        assert_eq!(store.jump_to(0).unwrap().text, "a");
        assert_eq!(store.len(), 3);
        assert!(store.can_redo());
        assert!(store.jump_to(3).is_none());
        assert_eq!(store.index(), 0);
    }

    #[test]
    fn checkpoint_keeps_finalized_snapshot() {
        let mut set = FinalizedSet::new();
        let mut store = HistoryStore::new(5);
        store.checkpoint("x", Progress::default(), set.snapshot(), vec![CheckpointTag::PreAi]);
        set.add("X.");
        store.checkpoint("X.", Progress::at(2), set.snapshot(), vec![CheckpointTag::Finalized]);

        let pre = store.undo().unwrap();
        assert!(pre.finalized.is_empty());
        assert_eq!(pre.committed(), 0);
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let mut store = HistoryStore::new(0);
        record(&mut store, "a", CheckpointTag::Typing);
        record(&mut store, "b", CheckpointTag::Typing);
        assert_eq!(store.len(), 1);
        assert_eq!(store.capacity(), 1);
    }

    #[test]
    fn serde_round_trip_preserves_cursor() {
        let mut store = HistoryStore::new(5);
        record(&mut store, "a", CheckpointTag::Typing);
        record(&mut store, "b", CheckpointTag::Paste);
        store.undo();

        let json = serde_json::to_string(&store).unwrap();
        let back: HistoryStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
        assert_eq!(back.index(), 0);
        assert!(back.can_redo());
    }
}
