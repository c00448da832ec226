use std::collections::HashMap;

use crate::models::{Keyword, KeywordCategory};
use crate::vocabulary::Vocabulary;

use super::InferenceConfig;
use super::phrases::{noun_phrases, template_phrases};
use super::tokenize::{content_terms, sentences};

/// Shortest single token counted, exclusive
const MIN_TOKEN_CHARS: usize = 2;

/// Term counts that remember first-insertion order so ties sort stably
#[derive(Debug, Default)]
struct FrequencyTable {
    terms: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    fn add(&mut self, term: String) {
        match self.index.get(&term) {
            Some(&i) => self.terms[i].1 += 1,
            None => {
                self.index.insert(term.clone(), self.terms.len());
                self.terms.push((term, 1));
            }
        }
    }
}

/// Extract the most frequent terms and phrases from a contact's text
///
/// Single tokens (stopwords removed, longer than two characters), noun
/// phrases and trigger-template phrases share one frequency table. Terms seen
/// at least `min_keyword_frequency` times are categorized and returned in
/// descending frequency order.
pub fn extract_keywords(
    text: &str,
    config: &InferenceConfig,
    vocabulary: &Vocabulary,
) -> Vec<Keyword> {
    let mut table = FrequencyTable::default();

    for token in content_terms(text, vocabulary) {
        if token.chars().count() > MIN_TOKEN_CHARS {
            table.add(token);
        }
    }
    for phrase in noun_phrases(text, vocabulary)
        .into_iter()
        .chain(template_phrases(text))
    {
        table.add(phrase);
    }

    let mut keywords: Vec<Keyword> = table
        .terms
        .into_iter()
        .filter(|(_, frequency)| *frequency >= config.min_keyword_frequency)
        .map(|(term, frequency)| Keyword {
            category: categorize_keyword(&term, vocabulary),
            confidence: (frequency as f64 / 10.0).min(1.0),
            context: Vec::new(),
            term,
            frequency,
        })
        .collect();

    keywords.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    keywords.truncate(config.max_keywords);

    for keyword in &mut keywords {
        keyword.context = extract_context(text, &keyword.term, config);
    }
    keywords
}

/// Assign a term to a category; the first matching rule wins
///
/// 1. known skill (substring either way), or role if it names management
/// 2. technology marker word
/// 3. role title word
/// 4. industry word
/// 5. company suffix word, or a capitalized term longer than four characters
/// 6. general
pub fn categorize_keyword(term: &str, vocabulary: &Vocabulary) -> KeywordCategory {
    let lower = term.to_lowercase();
    if lower.is_empty() {
        return KeywordCategory::General;
    }

    let is_skill = vocabulary
        .skills
        .iter()
        .any(|skill| lower.contains(skill.as_str()) || skill.contains(lower.as_str()));
    if is_skill {
        let is_management = vocabulary
            .management_tokens
            .iter()
            .any(|t| lower.contains(t.as_str()));
        return if is_management {
            KeywordCategory::Role
        } else {
            KeywordCategory::Skill
        };
    }

    let words: Vec<&str> = lower
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect();
    let has_word = |set: &std::collections::HashSet<String>| words.iter().any(|w| set.contains(*w));

    if has_word(&vocabulary.technology_tokens) {
        return KeywordCategory::Technology;
    }
    if has_word(&vocabulary.role_tokens) {
        return KeywordCategory::Role;
    }
    if has_word(&vocabulary.industry_tokens) {
        return KeywordCategory::Industry;
    }

    let capitalized = term.chars().next().is_some_and(char::is_uppercase);
    if has_word(&vocabulary.company_tokens) || (capitalized && term.chars().count() > 4) {
        return KeywordCategory::Company;
    }

    KeywordCategory::General
}

/// Sentences mentioning the term, within the configured length bounds
pub fn extract_context(text: &str, term: &str, config: &InferenceConfig) -> Vec<String> {
    let needle = term.to_lowercase();
    sentences(text)
        .filter(|s| s.to_lowercase().contains(&needle))
        .map(str::trim)
        .filter(|s| {
            let len = s.chars().count();
            len > config.min_context_chars && len < config.max_context_chars
        })
        .take(config.max_context_sentences)
        .map(str::to_string)
        .collect()
}
