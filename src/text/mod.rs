//! Pure text utilities shared by the pipeline and the session.
//!
//! Every offset handed around the crate is a **character** index (one
//! Unicode scalar value per step), never a byte index.  The helpers here are
//! the only place that converts between the two.
//!
//! * [`split`] — sentence-like [`Block`]s covering a string without gaps.
//! * [`run_mini_scripts`] — deterministic regex normalisation rules.
//! * [`common_prefix_len`] — the cheap diff used for offset invalidation.
//! * [`align_offsets`] — offset map across a formatting-only rewrite.

pub mod blocks;
pub mod scripts;

pub use blocks::{is_terminator, split, Block};
pub use scripts::{run_mini_scripts, MiniScripts};

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the character at `char_idx`, or `text.len()` past the end.
pub fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

/// Characters `[start, end)` of `text`.  Out-of-range bounds are clamped.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let end = end.max(start);
    let from = byte_offset(text, start);
    let to = byte_offset(text, end);
    &text[from..to.max(from)]
}

/// Length in characters of the longest common prefix of `a` and `b`.
///
/// ```
/// use live_proofer::text::common_prefix_len;
///
/// assert_eq!(common_prefix_len("hello world", "hello there"), 6);
/// assert_eq!(common_prefix_len("abc", "abc"), 3);
/// assert_eq!(common_prefix_len("", "abc"), 0);
/// ```
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Position in `new` of every character boundary of `old`, for rewrites
/// that only insert or delete whitespace and change letter case.
///
/// The returned table has `char_len(old) + 1` entries: entry `i` is the new
/// position of old character `i`, and the last entry is the new length.
///
/// ```
/// use live_proofer::text::align_offsets;
///
/// let table = align_offsets("a,b  c", "A, b c");
/// assert_eq!(table, vec![0, 1, 3, 4, 5, 5, 6]);
/// ```
pub fn align_offsets(old: &str, new: &str) -> Vec<usize> {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();
    let same = |a: char, b: char| a == b || a.to_lowercase().eq(b.to_lowercase());

    let mut table = Vec::with_capacity(old.len() + 1);
    let (mut i, mut j) = (0, 0);
    while i < old.len() {
        if j < new.len() && same(old[i], new[j]) {
            table.push(j);
            i += 1;
            j += 1;
        } else if old[i].is_whitespace() || j >= new.len() {
            // Deleted.
            table.push(j);
            i += 1;
        } else if new[j].is_whitespace() {
            // Inserted.
            j += 1;
        } else {
            table.push(j);
            i += 1;
            j += 1;
        }
    }
    table.push(new.len());
    table
}

/// Split `text` into `(leading whitespace, core, trailing whitespace)`.
pub fn whitespace_frame(text: &str) -> (&str, &str, &str) {
    let core_start = text.len() - text.trim_start().len();
    let core_end = text.trim_end().len().max(core_start);
    (
        &text[..core_start],
        &text[core_start..core_end],
        &text[core_end..],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offset_handles_multibyte() {
        let s = "héllo wörld";
        assert_eq!(byte_offset(s, 0), 0);
        assert_eq!(byte_offset(s, 2), 3);
        assert_eq!(byte_offset(s, 100), s.len());
    }

    #[test]
    fn char_slice_clamps() {
        let s = "ça va bien";
        assert_eq!(char_slice(s, 0, 2), "ça");
        assert_eq!(char_slice(s, 3, 100), "va bien");
        assert_eq!(char_slice(s, 5, 2), "");
    }

    #[test]
    fn common_prefix_counts_chars_not_bytes() {
        assert_eq!(common_prefix_len("ünï", "ünö"), 2);
    }

    #[test]
    fn align_offsets_tracks_each_edit_separately() {
        let old = "X,yy zzzz,wwww";
        let new = "X, yy zzzz, wwww";
        let table = align_offsets(old, new);
        assert_eq!(table.len(), char_len(old) + 1);
        // Start of "zzzz" moves by the first insertion only.
        assert_eq!(table[5], 6);
        assert_eq!(char_slice(new, 0, table[5]), "X, yy ");
        // Start of "wwww" moves by both.
        assert_eq!(table[10], 12);
        assert_eq!(table[char_len(old)], char_len(new));
    }

    #[test]
    fn align_offsets_handles_deletions_and_case() {
        let table = align_offsets("hi , there", "Hi, there");
        assert_eq!(table, vec![0, 1, 2, 2, 3, 4, 5, 6, 7, 8, 9]);
        let table = align_offsets("ßa", "SSa");
        assert_eq!(table.last(), Some(&3));
    }

    #[test]
    fn whitespace_frame_splits_edges() {
        assert_eq!(whitespace_frame("  hi there \n"), ("  ", "hi there", " \n"));
        assert_eq!(whitespace_frame("   "), ("   ", "", ""));
        assert_eq!(whitespace_frame("x"), ("", "x", ""));
    }
}
