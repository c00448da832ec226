pub mod expertise;
pub mod keywords;
pub mod phrases;
pub mod sentiment;
pub mod tokenize;
pub mod topics;

pub use expertise::*;
pub use keywords::*;
pub use sentiment::*;
pub use topics::*;

use tracing::debug;

use crate::models::{ContactAnalysis, ParsedMessage};
use crate::vocabulary::Vocabulary;

/// Configuration for expertise inference
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Terms seen fewer times than this are not keywords
    pub min_keyword_frequency: usize,
    /// Maximum keywords kept per contact
    pub max_keywords: usize,
    /// Maximum context sentences per keyword
    pub max_context_sentences: usize,
    /// Context sentences must be longer than this (characters)
    pub min_context_chars: usize,
    /// Context sentences must be shorter than this (characters)
    pub max_context_chars: usize,
    /// Maximum expertise claims kept per contact
    pub max_expertise: usize,
    /// Claims at or below this confidence are dropped
    pub min_claim_confidence: f64,
    /// Starting confidence of a skill named in a help offer
    pub help_seed_confidence: f64,
    /// Confidence added each time a help offer names a skill again
    pub help_boost: f64,
    /// Share of keyword confidence used to seed a new claim
    pub keyword_seed_factor: f64,
    /// Share of keyword confidence added to an existing claim
    pub keyword_boost_factor: f64,
    /// Characters of a message kept as evidence
    pub evidence_snippet_chars: usize,
    /// Maximum topics kept per contact
    pub max_topics: usize,
    /// Messages shorter than this are ignored by sentiment
    pub min_sentiment_chars: usize,
    /// Contacts with fewer messages are flagged as sparse
    pub sparse_message_threshold: usize,
    /// Mean length below which messages are short
    pub short_message_chars: f64,
    /// Mean length above which messages are long
    pub long_message_chars: f64,
    /// More messages than this reads as a fast responder
    pub fast_response_messages: usize,
    /// More messages than this reads as a medium responder
    pub medium_response_messages: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            min_keyword_frequency: 2,
            max_keywords: 50,
            max_context_sentences: 3,
            min_context_chars: 10,
            max_context_chars: 200,
            max_expertise: 20,
            min_claim_confidence: 0.3,
            help_seed_confidence: 0.7,
            help_boost: 0.3,
            keyword_seed_factor: 0.6,
            keyword_boost_factor: 0.5,
            evidence_snippet_chars: 100,
            max_topics: 10,
            min_sentiment_chars: 6,
            sparse_message_threshold: 6,
            short_message_chars: 50.0,
            long_message_chars: 150.0,
            fast_response_messages: 50,
            medium_response_messages: 20,
        }
    }
}

/// Analyze one contact's messages
///
/// System messages are skipped. Sparse input is not an error: a contact with
/// only a handful of messages still gets a full analysis, which simply comes
/// out mostly empty and neutral.
pub fn analyze_contact<'a, I>(
    messages: I,
    config: &InferenceConfig,
    vocabulary: &Vocabulary,
) -> ContactAnalysis
where
    I: IntoIterator<Item = &'a ParsedMessage>,
{
    let contents: Vec<&str> = messages
        .into_iter()
        .filter(|m| !m.is_system_message)
        .map(|m| m.content.as_str())
        .collect();

    if contents.len() < config.sparse_message_threshold {
        debug!(
            "Sparse contact data: {} messages, analysis will be mostly neutral",
            contents.len()
        );
    }

    let text = contents.join(" ");
    let keywords = extract_keywords(&text, config, vocabulary);
    let expertise = infer_expertise(&contents, &keywords, config, vocabulary);
    let topics = extract_topics(&contents, config, vocabulary);
    let sentiment = analyze_sentiment(&contents, config, vocabulary);
    let communication_style = communication_style(&contents, config);

    ContactAnalysis {
        keywords,
        expertise,
        topics,
        sentiment,
        communication_style,
    }
}
