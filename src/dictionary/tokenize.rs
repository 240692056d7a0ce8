//! Token normalisation and the unknown-word scan.

use std::collections::HashSet;

/// Tokens with at most this many characters are always treated as known.
pub const MIN_CHECKED_LEN: usize = 4;

/// Languages whose orthography uses apostrophes inside words
/// (`o'zbek`, `Ankara'ya`), so the apostrophe is part of the word.
const APOSTROPHE_LANGUAGES: &[&str] = &["tr", "az", "uz", "kk", "fi", "hu", "et"];

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '’' | 'ʼ' | 'ʻ' | '`' | '‘')
}

fn keeps_apostrophes(language: &str) -> bool {
    APOSTROPHE_LANGUAGES.contains(&language)
}

/// Lowercase `raw`, trim surrounding punctuation and unify apostrophes.
///
/// Returns `None` when nothing word-like is left.
pub fn normalize_token(raw: &str, language: &str) -> Option<String> {
    let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric() && !is_apostrophe(c));
    let trimmed = trimmed.trim_matches(is_apostrophe);
    if trimmed.is_empty() {
        return None;
    }

    let unified: String = trimmed
        .chars()
        .map(|c| if is_apostrophe(c) { '\'' } else { c })
        .collect();

    let word = if keeps_apostrophes(language) {
        unified
    } else {
        // English-style clitics: check the stem ("world's" → "world").
        match unified.split_once('\'') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => unified,
        }
    };

    Some(word.to_lowercase())
}

fn is_numeric(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '/' | ':' | '%'))
}

/// Words of `text` found in none of `sets`, deduplicated in first-seen order.
///
/// Short and numeric tokens are always known.  With no sets loaded nothing
/// is reported.
pub fn find_unknown_words<'a, I>(text: &str, language: &str, sets: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a HashSet<String>> + Clone,
{
    if sets.clone().into_iter().next().is_none() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut unknown = Vec::new();

    for raw in text.split_whitespace() {
        let Some(word) = normalize_token(raw, language) else {
            continue;
        };
        if word.chars().count() < MIN_CHECKED_LEN || is_numeric(&word) {
            continue;
        }
        if sets.clone().into_iter().any(|set| set.contains(&word)) {
            continue;
        }
        if seen.insert(word.clone()) {
            unknown.push(word);
        }
    }

    unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_token("\"Hello,", "en").as_deref(), Some("hello"));
        assert_eq!(normalize_token("...", "en"), None);
        assert_eq!(normalize_token("Déjà", "fr").as_deref(), Some("déjà"));
    }

    #[test]
    fn english_clitics_reduce_to_stem() {
        assert_eq!(normalize_token("World's", "en").as_deref(), Some("world"));
    }

    #[test]
    fn agglutinative_languages_keep_apostrophes() {
        assert_eq!(normalize_token("O‘zbek", "uz").as_deref(), Some("o'zbek"));
        assert_eq!(normalize_token("Ankara’ya", "tr").as_deref(), Some("ankara'ya"));
    }

    #[test]
    fn reports_words_missing_from_every_set() {
        let en = set(&["hello", "world"]);
        let unknown = find_unknown_words("helo wrld hello", "en", [&en]);
        assert_eq!(unknown, vec!["helo", "wrld"]);
    }

    #[test]
    fn short_and_numeric_tokens_are_known() {
        let en = set(&["something"]);
        assert!(find_unknown_words("the cat sat 12345 3.14 2024-01-01", "en", [&en]).is_empty());
    }

    #[test]
    fn any_loaded_language_counts() {
        let en = set(&["house"]);
        let de = set(&["haus"]);
        assert!(find_unknown_words("house haus", "en", [&en, &de]).is_empty());
    }

    #[test]
    fn duplicates_reported_once() {
        let en = set(&["word"]);
        assert_eq!(find_unknown_words("zzzz zzzz ZZZZ", "en", [&en]), vec!["zzzz"]);
    }

    #[test]
    fn nothing_reported_without_word_lists() {
        let none: [&HashSet<String>; 0] = [];
        assert!(find_unknown_words("qwerty asdfgh", "en", none).is_empty());
    }
}
