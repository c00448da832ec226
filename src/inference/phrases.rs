use std::sync::LazyLock;

use regex::Regex;

use crate::vocabulary::Vocabulary;

/// Trigger templates that introduce a tool, technology or specialty
#[allow(clippy::expect_used)]
static TECHNOLOGY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:using|with|in|on|via|through)\s+([\w\s]{2,20}?)(?:\s+(?:to|for|and|or|but)|\.|,|$)",
        r"(?i)\b(?:built|created|developed|worked)\s+(?:with|using|in|on)\s+([\w\s]{2,20}?)(?:\s+(?:to|for|and|or|but)|\.|,|$)",
        r"(?i)\b(?:expert|experienced|skilled)\s+(?:in|with|at)\s+([\w\s]{2,20}?)(?:\s+(?:to|for|and|or|but)|\.|,|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid technology pattern"))
    .collect()
});

#[allow(clippy::expect_used)]
static TRIGGER_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:using|with|in|on|via|through|built|created|developed|worked|expert|experienced|skilled)\s+",
    )
    .expect("valid trigger regex")
});

#[allow(clippy::expect_used)]
static TRAILING_CONJUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\s+(?:to|for|and|or|but)\b.*$").expect("valid conjunction regex")
});

/// Characters that end a phrase run
#[allow(clippy::expect_used)]
static CLAUSE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s+#/'-]+").expect("valid clause regex"));

/// Longest span kept as a noun phrase
const MAX_PHRASE_WORDS: usize = 3;
/// Shortest noun phrase kept, exclusive
const MIN_PHRASE_CHARS: usize = 4;
/// Shortest template capture kept, exclusive
const MIN_TEMPLATE_CHARS: usize = 2;

/// Short noun-like spans: runs of up to three content words between
/// stopwords, breakers and punctuation, lower-cased
pub fn noun_phrases(text: &str, vocabulary: &Vocabulary) -> Vec<String> {
    let mut phrases = Vec::new();

    for clause in CLAUSE_SPLIT.split(text) {
        let mut run: Vec<String> = Vec::new();
        for raw in clause.split_whitespace() {
            let word = raw.trim_matches(|c: char| c == '-' || c == '\'' || c == '/').to_lowercase();
            if is_phrase_word(&word, vocabulary) {
                run.push(word);
            } else {
                flush_run(&mut run, &mut phrases);
            }
        }
        flush_run(&mut run, &mut phrases);
    }

    phrases
}

fn is_phrase_word(word: &str, vocabulary: &Vocabulary) -> bool {
    !word.is_empty()
        && word.chars().any(char::is_alphabetic)
        && !vocabulary.is_stopword(word)
        && !vocabulary.phrase_breakers.contains(word)
}

fn flush_run(run: &mut Vec<String>, phrases: &mut Vec<String>) {
    if !run.is_empty() && run.len() <= MAX_PHRASE_WORDS {
        let phrase = run.join(" ");
        if phrase.chars().count() > MIN_PHRASE_CHARS {
            phrases.push(phrase);
        }
    }
    run.clear();
}

/// Phrases captured after trigger words such as "using", "built with" or
/// "experienced in", with trailing conjunction clauses removed
pub fn template_phrases(text: &str) -> Vec<String> {
    let mut phrases = Vec::new();

    for pattern in TECHNOLOGY_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let Some(capture) = caps.get(1) else {
                continue;
            };
            let without_triggers = TRIGGER_WORDS.replace_all(capture.as_str(), "");
            let cleaned = TRAILING_CONJUNCTION
                .replace(&without_triggers, "")
                .trim()
                .to_lowercase();
            if cleaned.chars().count() > MIN_TEMPLATE_CHARS {
                phrases.push(cleaned);
            }
        }
    }

    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_phrases_split_on_stopwords_and_breakers() {
        let vocab = Vocabulary::default();
        let phrases = noun_phrases("We need a data pipeline for the machine learning team.", &vocab);

        assert!(phrases.contains(&"data pipeline".to_string()));
        assert!(phrases.contains(&"machine learning team".to_string()));
        assert!(!phrases.iter().any(|p| p.contains("need")));
    }

    #[test]
    fn test_noun_phrases_drop_short_and_long_runs() {
        let vocab = Vocabulary::default();
        let phrases = noun_phrases("Our cat. Senior backend platform engineer role", &vocab);

        assert!(!phrases.contains(&"cat".to_string()));
        assert!(phrases.is_empty());
    }

    #[test]
    fn test_template_phrases() {
        let phrases = template_phrases("I built it with React and Redux. Deployed via Docker, mostly.");
        assert!(phrases.contains(&"react".to_string()));
        assert!(phrases.contains(&"docker".to_string()));
    }

    #[test]
    fn test_template_phrases_expertise_trigger() {
        let phrases = template_phrases("I am experienced in data science for startups");
        assert!(phrases.contains(&"data science".to_string()));
    }
}
