//! Stage selection: what the next tick should do.
//!
//! [`select_action`] is a pure function of the buffer, the progress offsets,
//! the finalized set and the stage toggles.  Stages are tried in a fixed
//! priority order and the first one that has work wins:
//!
//! ```text
//! 1. fast-forward   committed past blocks already in the FinalizedSet
//! 2. (boundary)     first finalized block after committed, else end of text
//! 3. script fix     regex tidy-up of [committed, boundary)
//! 4. bulk           complete sentences nobody has verified yet
//! 5. finalize       complete sentences inside [committed, corrected)
//! 6. typo fix       [corrected, checked)
//! 7. dictionary     next chunk of [checked, boundary)
//! 8. idle
//! ```

use std::ops::Range;

use crate::pipeline::finalized::FinalizedSet;
use crate::pipeline::offsets::Progress;
use crate::text::{self, is_terminator, Block, MiniScripts};

/// Stage toggles that feed [`select_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageFlags {
    /// AI stages (bulk, finalize, typo fix) may run.
    pub ai: bool,
    pub script_fix: bool,
    pub dictionary_check: bool,
    /// Minimum words per dictionary chunk.
    pub min_chunk_words: usize,
}

impl Default for StageFlags {
    fn default() -> Self {
        Self {
            ai: true,
            script_fix: true,
            dictionary_check: true,
            min_chunk_words: 3,
        }
    }
}

/// The single step a tick performs.  Ranges are character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move `committed` to `to`; no external call.
    FastForward { to: usize },
    /// Replace `range` with `replacement` produced by the mini-scripts.
    ScriptFix {
        range: Range<usize>,
        replacement: String,
    },
    /// Fix-and-finalize `range` in one AI call.
    Bulk { range: Range<usize> },
    /// Finalize the verified complete sentences in `range`.
    Finalize { range: Range<usize> },
    /// Typo-fix the dictionary-flagged `range`.
    TypoFix { range: Range<usize> },
    /// Screen `range` for unknown words.
    DictCheck { range: Range<usize> },
    /// Mark text up to `to` as checked without a call (blank chunk or the
    /// dictionary stage disabled).
    SkipCheck { to: usize },
    Idle,
}

/// Decide the next action.  Never mutates anything.
pub fn select_action(
    text: &str,
    progress: &Progress,
    finalized: &FinalizedSet,
    flags: &StageFlags,
) -> Action {
    let len = text::char_len(text);
    let committed = progress.committed.min(len);
    let blocks = blocks_from(text, committed, len);

    // 1. Fast-forward over finalized content.
    let skipped = fast_forward(&blocks, finalized);
    if skipped > committed {
        return Action::FastForward { to: skipped };
    }

    // 2. Boundary: nothing at or past a finalized block is reprocessed.
    let boundary = blocks
        .iter()
        .skip(1)
        .find(|b| !b.is_separator && finalized.has(b.normalized()))
        .map(|b| b.start)
        .unwrap_or(len);
    if boundary <= committed {
        return Action::Idle;
    }

    // 3. Script fix.
    if flags.script_fix {
        let region = text::char_slice(text, committed, boundary);
        let fixed = MiniScripts::default().apply(region, starts_sentence(text, committed));
        if fixed != region {
            return Action::ScriptFix {
                range: committed..boundary,
                replacement: fixed,
            };
        }
    }

    if flags.ai {
        // 4. Bulk: a complete sentence lies wholly in unverified text.
        let unverified = progress.corrected.max(committed).min(boundary);
        let bulk_end = blocks
            .iter()
            .filter(|b| b.end <= boundary && b.start >= unverified && is_sentence(b))
            .map(|b| b.end)
            .max();
        if let Some(end) = bulk_end {
            return Action::Bulk {
                range: committed..end,
            };
        }

        // 5. Finalize the verified zone's complete sentences.
        let verified = progress.corrected.min(boundary);
        if verified > committed {
            let finalize_end = blocks
                .iter()
                .filter(|b| b.end <= boundary && is_sentence(b) && content_end(b) <= verified)
                .map(|b| b.end)
                .max();
            if let Some(end) = finalize_end {
                return Action::Finalize {
                    range: committed..end,
                };
            }
        }

        // 6. Typo fix what the dictionary flagged.
        let start = progress.corrected.max(committed);
        let end = progress.checked.min(boundary);
        if end > start {
            return Action::TypoFix { range: start..end };
        }
    }

    // 7. Dictionary check the next chunk.
    let start = progress.checked.max(committed);
    if boundary > start {
        if !flags.dictionary_check {
            return Action::SkipCheck { to: boundary };
        }
        let end = dict_chunk_end(text, start, boundary, flags.min_chunk_words);
        if text::char_slice(text, start, end).trim().is_empty() {
            return Action::SkipCheck { to: end };
        }
        return Action::DictCheck { range: start..end };
    }

    Action::Idle
}

/// End of the next dictionary chunk in `[start, boundary)`: at least
/// `min_words` words, or up to a sentence terminator, plus trailing
/// whitespace.
pub fn dict_chunk_end(text: &str, start: usize, boundary: usize, min_words: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let boundary = boundary.min(chars.len());
    let min_words = min_words.max(1);

    let mut words = 0;
    let mut in_word = false;
    let mut i = start;
    while i < boundary {
        let c = chars[i];
        if c.is_whitespace() {
            if in_word {
                in_word = false;
                words += 1;
                if words >= min_words {
                    return skip_whitespace(&chars, i, boundary);
                }
            }
        } else {
            in_word = true;
            let at_break = i + 1 >= chars.len() || chars[i + 1].is_whitespace();
            if is_terminator(c) && at_break {
                return skip_whitespace(&chars, i + 1, boundary);
            }
        }
        i += 1;
    }
    boundary
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Blocks of `text[from..to]` with offsets relative to the whole buffer.
fn blocks_from(text: &str, from: usize, to: usize) -> Vec<Block> {
    text::split(text::char_slice(text, from, to))
        .into_iter()
        .map(|mut b| {
            b.start += from;
            b.end += from;
            b
        })
        .collect()
}

/// Furthest offset reachable by skipping finalized blocks (and the blank
/// separators between them) from the first block on.
fn fast_forward(blocks: &[Block], finalized: &FinalizedSet) -> usize {
    let mut reached = blocks.first().map(|b| b.start).unwrap_or(0);
    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];
        if !block.is_separator && finalized.has(block.normalized()) {
            reached = block.end;
            i += 1;
            continue;
        }
        let blank = block.normalized().is_empty();
        match blocks.get(i + 1) {
            Some(next) if blank && !next.is_separator && finalized.has(next.normalized()) => {
                reached = next.end;
                i += 2;
            }
            _ => break,
        }
    }
    reached
}

fn is_sentence(block: &Block) -> bool {
    !block.is_separator && block.is_complete()
}

/// Offset just past the last non-whitespace character of `block`.
fn content_end(block: &Block) -> usize {
    block.start + text::char_len(block.text.trim_end())
}

/// `true` when position `pos` begins a sentence: start of the buffer or right
/// after a terminator (ignoring whitespace and closing quotes).
fn starts_sentence(text: &str, pos: usize) -> bool {
    let before = text::char_slice(text, 0, pos).trim_end();
    if before.is_empty() {
        return true;
    }
    Block {
        text: before.to_string(),
        start: 0,
        end: pos,
        is_separator: false,
    }
    .is_complete()
}

fn skip_whitespace(chars: &[char], mut i: usize, boundary: usize) -> usize {
    while i < boundary && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> StageFlags {
        StageFlags::default()
    }

    fn no_scripts() -> StageFlags {
        StageFlags {
            script_fix: false,
            ..StageFlags::default()
        }
    }

    fn progress(committed: usize, corrected: usize, checked: usize) -> Progress {
        Progress {
            committed,
            corrected,
            checked,
            checking: checked,
        }
    }

    #[test]
    fn empty_buffer_is_idle() {
        let action = select_action("", &Progress::default(), &FinalizedSet::new(), &flags());
        assert_eq!(action, Action::Idle);
    }

    #[test]
    fn fast_forwards_over_finalized_sentences() {
        let mut finalized = FinalizedSet::new();
        finalized.add("Hello world.");
        finalized.add("How are you?");
        let text = "Hello world. How are you? fine";
        let action = select_action(text, &Progress::default(), &finalized, &flags());
        assert_eq!(action, Action::FastForward { to: 26 });
    }

    #[test]
    fn fast_forward_crosses_leading_whitespace() {
        let mut finalized = FinalizedSet::new();
        finalized.add("Hello world.");
        let action = select_action("  Hello world.", &Progress::default(), &finalized, &flags());
        assert_eq!(action, Action::FastForward { to: 14 });
    }

    #[test]
    fn finalized_block_bounds_the_region() {
        let mut finalized = FinalizedSet::new();
        finalized.add("Done here.");
        let text = "Helo wrld. Done here. more";
        let action = select_action(text, &Progress::default(), &finalized, &no_scripts());
        assert_eq!(action, Action::Bulk { range: 0..11 });
    }

    #[test]
    fn script_fix_comes_before_ai() {
        let text = "hello , world";
        let action = select_action(text, &Progress::default(), &FinalizedSet::new(), &flags());
        assert_eq!(
            action,
            Action::ScriptFix {
                range: 0..13,
                replacement: "Hello, world".into()
            }
        );
    }

    #[test]
    fn script_fix_does_not_capitalise_mid_sentence() {
        // committed sits after "Hi there " which has no terminator.
        let text = "Hi there friend";
        let p = progress(9, 9, 9);
        let action = select_action(text, &p, &FinalizedSet::new(), &flags());
        assert!(!matches!(action, Action::ScriptFix { .. }));
    }

    #[test]
    fn pasted_sentences_take_the_bulk_path() {
        let text = "I went there. It was fun. ";
        let action = select_action(text, &Progress::default(), &FinalizedSet::new(), &flags());
        assert_eq!(action, Action::Bulk { range: 0..26 });
    }

    #[test]
    fn bulk_stops_at_last_complete_sentence() {
        let text = "I went there. It was";
        let action = select_action(text, &Progress::default(), &FinalizedSet::new(), &flags());
        assert_eq!(action, Action::Bulk { range: 0..14 });
    }

    #[test]
    fn verified_sentence_is_finalized_not_bulked() {
        let text = "Hello world. ";
        let action = select_action(text, &progress(0, 13, 13), &FinalizedSet::new(), &flags());
        assert_eq!(action, Action::Finalize { range: 0..13 });
    }

    #[test]
    fn finalize_accepts_corrected_before_trailing_space() {
        let text = "Hello world. ";
        let action = select_action(text, &progress(0, 12, 12), &FinalizedSet::new(), &flags());
        assert_eq!(action, Action::Finalize { range: 0..13 });
    }

    #[test]
    fn sentence_completed_after_correction_goes_to_dictionary() {
        // "hello world" was corrected, then ". " was typed.
        let text = "Hello world. ";
        let action = select_action(text, &progress(0, 11, 11), &FinalizedSet::new(), &flags());
        assert_eq!(action, Action::DictCheck { range: 11..13 });
    }

    #[test]
    fn typo_fix_covers_checked_but_uncorrected() {
        let text = "Helo wrld";
        let action = select_action(text, &progress(0, 0, 9), &FinalizedSet::new(), &flags());
        assert_eq!(action, Action::TypoFix { range: 0..9 });
    }

    #[test]
    fn dictionary_chunks_by_word_count() {
        let text = "One two three four five";
        let action = select_action(text, &Progress::default(), &FinalizedSet::new(), &flags());
        assert_eq!(action, Action::DictCheck { range: 0..14 });
    }

    #[test]
    fn ai_disabled_skips_ai_stages() {
        let f = StageFlags {
            ai: false,
            ..no_scripts()
        };
        let text = "I went there. ";
        let action = select_action(text, &Progress::default(), &FinalizedSet::new(), &f);
        assert_eq!(action, Action::DictCheck { range: 0..14 });

        let action = select_action(text, &progress(0, 0, 14), &FinalizedSet::new(), &f);
        assert_eq!(action, Action::Idle);
    }

    #[test]
    fn dictionary_disabled_skips_to_boundary() {
        let f = StageFlags {
            ai: false,
            dictionary_check: false,
            ..no_scripts()
        };
        let action = select_action("some words", &Progress::default(), &FinalizedSet::new(), &f);
        assert_eq!(action, Action::SkipCheck { to: 10 });
    }

    #[test]
    fn blank_chunk_is_skipped() {
        let action = select_action("Hi.   ", &progress(3, 3, 3), &FinalizedSet::new(), &no_scripts());
        assert_eq!(action, Action::SkipCheck { to: 6 });
    }

    #[test]
    fn fully_processed_buffer_is_idle() {
        let action = select_action("Hello", &progress(0, 5, 5), &FinalizedSet::new(), &no_scripts());
        assert_eq!(action, Action::Idle);
    }

    #[test]
    fn chunk_end_stops_after_terminator() {
        assert_eq!(dict_chunk_end("Hi. there you go", 0, 16, 3), 4);
        assert_eq!(dict_chunk_end("a b c d", 0, 7, 3), 6);
        assert_eq!(dict_chunk_end("a b", 0, 3, 3), 3);
        assert_eq!(dict_chunk_end("3.5 is fine", 0, 11, 5), 11);
    }

    #[test]
    fn selection_is_pure() {
        let text = "i went there. it was fun. ";
        let p = Progress::default();
        let set = FinalizedSet::new();
        assert_eq!(
            select_action(text, &p, &set, &flags()),
            select_action(text, &p, &set, &flags())
        );
    }
}
