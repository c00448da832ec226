use std::sync::LazyLock;

use regex::Regex;

use crate::models::{CommunicationStyle, Formality, MessageLength, ResponseTime, Sentiment};
use crate::vocabulary::Vocabulary;

use super::InferenceConfig;
use super::tokenize::tokenize;

#[allow(clippy::expect_used)]
static HELPFUL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:help|assist|support|advice|suggest|recommend)\b").expect("valid regex")
});

#[allow(clippy::expect_used)]
static ENTHUSIASTIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)!|great|awesome|excited|love|amazing").expect("valid regex"));

#[allow(clippy::expect_used)]
static FORMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:please|thank you|regards|sincerely|would|could|may i)\b").expect("valid regex")
});

#[allow(clippy::expect_used)]
static INFORMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:hey|hi|yeah|yep|cool|awesome|lol|haha)\b").expect("valid regex")
});

/// Largest magnitude in the polarity lexicon
const MAX_POLARITY: f64 = 5.0;

/// Lexical polarity of one message, in -1..=1
///
/// Mean word polarity scaled by the lexicon maximum. A negation word flips
/// the sign of the word after it.
pub fn message_polarity(content: &str, vocabulary: &Vocabulary) -> f64 {
    let tokens = tokenize(content);
    if tokens.is_empty() {
        return 0.0;
    }

    let mut total = 0.0;
    let mut negate = false;
    for token in &tokens {
        let score = vocabulary.polarity_of(token);
        total += if negate { -score } else { score };
        negate = vocabulary.negations.contains(token);
    }

    (total / tokens.len() as f64 / MAX_POLARITY).clamp(-1.0, 1.0)
}

/// Polarity, helpfulness and enthusiasm over messages long enough to judge
pub fn analyze_sentiment(contents: &[&str], config: &InferenceConfig, vocabulary: &Vocabulary) -> Sentiment {
    let judged: Vec<&str> = contents
        .iter()
        .copied()
        .filter(|c| c.chars().count() >= config.min_sentiment_chars)
        .collect();

    if judged.is_empty() {
        return Sentiment::default();
    }

    let count = judged.len() as f64;
    let polarity: f64 = judged.iter().map(|c| message_polarity(c, vocabulary)).sum();
    let helpful = judged.iter().filter(|c| HELPFUL.is_match(c)).count() as f64;
    let enthusiastic = judged.iter().filter(|c| ENTHUSIASTIC.is_match(c)).count() as f64;

    Sentiment {
        overall: (polarity / count).clamp(-1.0, 1.0),
        helpfulness: (helpful / count).min(1.0),
        enthusiasm: (enthusiastic / count).min(1.0),
    }
}

/// Bucket length, formality and volume of a contact's messages
///
/// The response-time bucket is a volume proxy: exports carry no reliable
/// reply pairing, so message count stands in for responsiveness.
pub fn communication_style(contents: &[&str], config: &InferenceConfig) -> CommunicationStyle {
    if contents.is_empty() {
        return CommunicationStyle::default();
    }

    let count = contents.len();
    let mean_length =
        contents.iter().map(|c| c.chars().count()).sum::<usize>() as f64 / count as f64;
    let message_length = if mean_length < config.short_message_chars {
        MessageLength::Short
    } else if mean_length > config.long_message_chars {
        MessageLength::Long
    } else {
        MessageLength::Medium
    };

    let formal: usize = contents.iter().map(|c| FORMAL.find_iter(c).count()).sum();
    let informal: usize = contents.iter().map(|c| INFORMAL.find_iter(c).count()).sum();
    let formality = match formal.cmp(&informal) {
        std::cmp::Ordering::Greater => Formality::Formal,
        std::cmp::Ordering::Less => Formality::Informal,
        std::cmp::Ordering::Equal => Formality::Neutral,
    };

    let response_time = if count > config.fast_response_messages {
        ResponseTime::Fast
    } else if count > config.medium_response_messages {
        ResponseTime::Medium
    } else {
        ResponseTime::Slow
    };

    CommunicationStyle {
        response_time,
        message_length,
        formality,
    }
}
