//! Sentence-like block splitting.
//!
//! [`split`] walks a string once and emits [`Block`]s that cover it with no
//! gaps or overlaps:
//!
//! ```text
//! "  Hello world. How are you?  Fine"
//!  ^^                                  separator (leading whitespace)
//!    ^^^^^^^^^^^^^                     sentence (terminator + trailing space)
//!                 ^^^^^^^^^^^^^^       sentence
//!                               ^^^^   trailing fragment (no terminator)
//! ```
//!
//! A terminator only ends a block when it is followed by whitespace or the end
//! of the input, so `3.5` or `example.com` stay inside one block.

/// One sentence-like unit produced by [`split`].
///
/// `start` / `end` are character offsets into the string that was split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// `true` for runs without any alphanumeric character (whitespace,
    /// stray punctuation).
    pub is_separator: bool,
}

impl Block {
    /// Text with surrounding whitespace removed — the key used by the
    /// finalized-set cache.
    pub fn normalized(&self) -> &str {
        self.text.trim()
    }

    /// `true` when the block ends with a sentence terminator (optionally
    /// followed by closing quotes/brackets).
    pub fn is_complete(&self) -> bool {
        self.text
            .trim_end()
            .trim_end_matches(is_closer)
            .chars()
            .next_back()
            .is_some_and(is_terminator)
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Sentence terminators recognised by the splitter and the mini-scripts.
pub fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '»' | '”' | '’')
}

/// Split `text` into ordered blocks.  Deterministic and allocation-light.
pub fn split(text: &str) -> Vec<Block> {
    let chars: Vec<char> = text.chars().collect();
    let mut blocks = Vec::new();

    let lead = chars.iter().take_while(|c| c.is_whitespace()).count();
    if lead > 0 {
        blocks.push(make_block(&chars, 0, lead));
    }

    let mut pos = lead;
    while pos < chars.len() {
        let end = sentence_end(&chars, pos);
        blocks.push(make_block(&chars, pos, end));
        pos = end;
    }

    blocks
}

/// End (exclusive) of the sentence starting at `start`, including the
/// whitespace that follows its terminator.
fn sentence_end(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while i < chars.len() {
        if !is_terminator(chars[i]) {
            i += 1;
            continue;
        }
        let mut j = i;
        while j < chars.len() && (is_terminator(chars[j]) || is_closer(chars[j])) {
            j += 1;
        }
        if j == chars.len() || chars[j].is_whitespace() {
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            return j;
        }
        i = j;
    }
    chars.len()
}

fn make_block(chars: &[char], start: usize, end: usize) -> Block {
    let text: String = chars[start..end].iter().collect();
    let is_separator = !text.chars().any(char::is_alphanumeric);
    Block {
        text,
        start,
        end,
        is_separator,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
