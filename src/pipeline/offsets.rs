//! The four progress offsets into the buffer.

use serde::{Deserialize, Serialize};

/// Character offsets marking how far each stage has got.
///
/// Invariants (restored by [`Progress::normalize`]):
/// `committed ≤ corrected`, `committed ≤ checked`, `checked ≤ checking`,
/// and every offset `≤ len(buffer)` after [`Progress::clamp`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Finalized (punctuated, accepted) up to here.
    pub committed: usize,
    /// AI typo-fixed up to here.
    pub corrected: usize,
    /// Dictionary-screened up to here.
    pub checked: usize,
    /// Frontier of an outstanding dictionary check.
    pub checking: usize,
}

impl Progress {
    /// All four offsets at `pos`.
    pub fn at(pos: usize) -> Self {
        Self {
            committed: pos,
            corrected: pos,
            checked: pos,
            checking: pos,
        }
    }

    /// Raise the trailing offsets so the ordering invariants hold.
    pub fn normalize(&mut self) {
        self.corrected = self.corrected.max(self.committed);
        self.checked = self.checked.max(self.committed);
        self.checking = self.checking.max(self.checked);
    }

    /// Clamp every offset to `[0, len]` and restore the invariants.
    pub fn clamp(&mut self, len: usize) {
        self.committed = self.committed.min(len);
        self.corrected = self.corrected.min(len);
        self.checked = self.checked.min(len);
        self.checking = self.checking.min(len);
        self.normalize();
    }

    /// Pull every offset greater than `pos` back to `pos`.
    pub fn pull_back(&mut self, pos: usize) {
        self.committed = self.committed.min(pos);
        self.corrected = self.corrected.min(pos);
        self.checked = self.checked.min(pos);
        self.checking = self.checking.min(pos);
    }

    /// Move `committed` forward to `pos`, dragging the others along.
    pub fn commit_to(&mut self, pos: usize) {
        self.committed = self.committed.max(pos);
        self.normalize();
    }

    /// Re-map every offset after `[start, old_end)` was replaced by
    /// `new_len` characters.
    ///
    /// Offsets at or before `start` stay; offsets at or after `old_end`
    /// shift by the length delta; offsets inside the range keep their
    /// distance from `start`, capped at the new end.
    pub fn remap(&mut self, start: usize, old_end: usize, new_len: usize) {
        self.map_each(|o| {
            if o <= start {
                o
            } else if o >= old_end {
                o - old_end + start + new_len
            } else {
                start + (o - start).min(new_len)
            }
        });
    }

    /// Move every offset through `f`.
    pub fn map_each(&mut self, f: impl Fn(usize) -> usize) {
        self.committed = f(self.committed);
        self.corrected = f(self.corrected);
        self.checked = f(self.checked);
        self.checking = f(self.checking);
    }

    /// `true` when the invariants hold for a buffer of `len` characters.
    pub fn is_valid(&self, len: usize) -> bool {
        self.committed <= self.corrected
            && self.committed <= self.checked
            && self.corrected <= len
            && self.checked <= len
            && self.checking <= len
    }
}
