//! Response post-processing: strip reasoning and meta-commentary so only the
//! corrected text is trusted.

use once_cell::sync::Lazy;
use regex::Regex;

static THINK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<(think|thinking|reasoning)>.*?</(think|thinking|reasoning)>").expect("valid regex"));

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[a-zA-Z]*\n(.*?)\n?```$").expect("valid regex"));

static LEADING_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(corrected text|corrected|result|output|here is the corrected text|here's the corrected text)\s*:\s*")
        .expect("valid regex")
});

/// Clean a raw model reply to a request about `source`.  The result is
/// trimmed; it may be empty.
///
/// Quotes wrapping the whole reply are removed only when `source` was not
/// itself wrapped in them.
///
/// ```
/// use live_proofer::llm::sanitize_response;
///
/// assert_eq!(sanitize_response("<think>hmm</think>\nResult: \"Hello.\"", "helo."), "Hello.");
/// assert_eq!(sanitize_response("\"Yes.\"", "\"yes.\""), "\"Yes.\"");
/// ```
pub fn sanitize_response(raw: &str, source: &str) -> String {
    let mut text = THINK_BLOCK.replace_all(raw, "").trim().to_string();

    if let Some(caps) = CODE_FENCE.captures(&text) {
        text = caps[1].trim().to_string();
    }

    text = LEADING_LABEL.replace(&text, "").trim().to_string();

    strip_wrapping_quotes(&text, source.trim()).to_string()
}

const QUOTE_PAIRS: [(char, char); 3] = [('"', '"'), ('“', '”'), ('«', '»')];

/// Inner text when `text` is wrapped in one quote pair with no other quote
/// of that kind inside.
fn unwrap_quotes(text: &str, open: char, close: char) -> Option<&str> {
    if text.chars().count() < 2 || !text.starts_with(open) || !text.ends_with(close) {
        return None;
    }
    let inner = &text[open.len_utf8()..text.len() - close.len_utf8()];
    if inner.contains(open) || inner.contains(close) {
        return None;
    }
    Some(inner)
}

fn strip_wrapping_quotes<'a>(text: &'a str, source: &str) -> &'a str {
    for (open, close) in QUOTE_PAIRS {
        if let Some(inner) = unwrap_quotes(text, open, close) {
            if unwrap_quotes(source, open, close).is_some() {
                // The user's own quotation.
                return text;
            }
            return inner.trim();
        }
    }
    text
}
