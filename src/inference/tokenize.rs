use std::sync::LazyLock;

use regex::Regex;

use crate::vocabulary::Vocabulary;

#[allow(clippy::expect_used)]
static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence regex"));

/// Lower-cased word tokens; anything other than letters, digits and `_` separates words
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Tokens with stopwords removed
pub fn content_terms(text: &str, vocabulary: &Vocabulary) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !vocabulary.is_stopword(t))
        .collect()
}

/// Raw sentence fragments split on terminal punctuation, untrimmed
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    SENTENCE_SPLIT.split(text)
}

/// First `max_chars` characters of `text`, followed by an ellipsis
pub fn snippet(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
