//! Mini-scripts: cheap, local, regex-based formatting rules.
//!
//! The rules run in a fixed order and each one is applied until it no longer
//! matches, which makes the whole pass idempotent:
//!
//! 1. remove spaces before `, . ! ? ; :`
//! 2. insert a space after `, ; ! ?` (and after `.` between words) when a
//!    letter follows directly
//! 3. collapse runs of spaces/tabs to a single space
//! 4. capitalise the first letter after a sentence terminator (and at the
//!    start of the text when it begins a sentence)

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+([,.!?;:])").expect("valid regex"));

static MISSING_SPACE_AFTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([,;!?])(\p{L})").expect("valid regex"));

static MISSING_SPACE_AFTER_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{Ll})\.(\p{Lu}\p{Ll})").expect("valid regex"));

static REPEATED_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S)[ \t]{2,}").expect("valid regex"));

static LOWER_AFTER_TERMINATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([.!?…]["')\]»”’]*\s+["'(«“]?)(\p{Ll})"#).expect("valid regex")
});

static LOWER_AT_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(\s*["'(«“]?)(\p{Ll})"#).expect("valid regex"));

/// Upper bound on fixed-point iterations per rule.
const MAX_PASSES: usize = 8;

/// Toggleable rule set.  All rules are on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiniScripts {
    pub spacing: bool,
    pub capitalization: bool,
}

impl Default for MiniScripts {
    fn default() -> Self {
        Self {
            spacing: true,
            capitalization: true,
        }
    }
}

impl MiniScripts {
    /// Apply the enabled rules to `text`.
    ///
    /// `sentence_start` tells whether `text` begins a new sentence (start of
    /// the buffer, or right after a finalized sentence), in which case its
    /// first letter is capitalised too.
    pub fn apply(&self, text: &str, sentence_start: bool) -> String {
        let mut out = text.to_string();

        if self.spacing {
            out = replace_until_stable(&SPACE_BEFORE_PUNCT, &out, |c| c[1].to_string());
            out = replace_until_stable(&MISSING_SPACE_AFTER, &out, |c| {
                format!("{} {}", &c[1], &c[2])
            });
            out = replace_until_stable(&MISSING_SPACE_AFTER_PERIOD, &out, |c| {
                format!("{}. {}", &c[1], &c[2])
            });
            out = replace_until_stable(&REPEATED_SPACE, &out, |c| format!("{} ", &c[1]));
        }

        if self.capitalization {
            out = replace_until_stable(&LOWER_AFTER_TERMINATOR, &out, capitalize_second);
            if sentence_start {
                out = replace_until_stable(&LOWER_AT_START, &out, capitalize_second);
            }
        }

        out
    }
}

/// Run every rule with `sentence_start = true`.
///
/// ```
/// use live_proofer::text::run_mini_scripts;
///
/// assert_eq!(run_mini_scripts("hello , world.How  are you"), "Hello, world. How are you");
/// ```
pub fn run_mini_scripts(text: &str) -> String {
    MiniScripts::default().apply(text, true)
}

fn capitalize_second(caps: &Captures<'_>) -> String {
    format!("{}{}", &caps[1], caps[2].to_uppercase())
}

fn replace_until_stable<F>(re: &Regex, text: &str, mut rep: F) -> String
where
    F: FnMut(&Captures<'_>) -> String,
{
    let mut current = text.to_string();
    for _ in 0..MAX_PASSES {
        let next = re.replace_all(&current, |c: &Captures<'_>| rep(c)).into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    current
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_space_before_punctuation() {
        assert_eq!(run_mini_scripts("Hi , there !"), "Hi, there!");
    }

    #[test]
    fn inserts_space_after_punctuation() {
        assert_eq!(run_mini_scripts("One,two;three"), "One, two; three");
        assert_eq!(run_mini_scripts("Done.Next one"), "Done. Next one");
    }

    #[test]
    fn leaves_numbers_and_domains_alone() {
        assert_eq!(run_mini_scripts("It costs 1,000.50 at example.com"), "It costs 1,000.50 at example.com");
    }

    #[test]
    fn collapses_repeated_spaces_but_keeps_indent() {
        assert_eq!(run_mini_scripts("A  b \t c"), "A b c");
        assert_eq!(run_mini_scripts("  Indented"), "  Indented");
    }

    #[test]
    fn capitalizes_after_terminators() {
        assert_eq!(
            run_mini_scripts("i went there. it was fun! was it? yes"),
            "I went there. It was fun! Was it? Yes"
        );
    }

    #[test]
    fn no_start_capitalization_mid_sentence() {
        let scripts = MiniScripts::default();
        assert_eq!(scripts.apply("and then. we left", false), "and then. We left");
    }

    #[test]
    fn disabled_rules_do_nothing() {
        let scripts = MiniScripts {
            spacing: false,
            capitalization: false,
        };
        assert_eq!(scripts.apply("a , b. c", true), "a , b. c");
    }

    #[test]
    fn mini_scripts_are_idempotent() {
        let samples = [
            "hello , world.how  are you",
            "ab.Cde.Fg and x.Yz",
            "a ,b ,c",
            "wait ...really ?yes",
            "one.  two .three !four",
            "“quoted.” next. «french» — ok",
            "  ",
            "",
            "ünï ,öber.Ärger",
        ];
        for sample in samples {
            let once = run_mini_scripts(sample);
            let twice = run_mini_scripts(&once);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }
}
