use crate::inference::tokenize::content_terms;
use crate::models::{ContactAnalysis, KeywordCategory};
use crate::vocabulary::Vocabulary;

/// Integer relevance in 0..=100
pub type RelevanceScore = u8;

/// Weights applied to each matching signal
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    /// Multiplier on a matching claim's confidence
    pub expertise_weight: f64,
    /// Multiplier on a matching skill keyword's confidence
    pub skill_keyword_weight: f64,
    /// Multiplier on any other matching keyword's confidence
    pub keyword_weight: f64,
    /// Added per query term found inside a topic
    pub topic_weight: f64,
    /// Multiplier on whole-query similarity
    pub similarity_weight: f64,
    /// Raw sum is multiplied by this before rounding
    pub scale: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            expertise_weight: 2.0,
            skill_keyword_weight: 1.5,
            keyword_weight: 1.0,
            topic_weight: 0.5,
            similarity_weight: 2.0,
            scale: 10.0,
        }
    }
}

/// Score how well a contact's analysis matches a free-text query
///
/// Always returns a raw score, however small; any inclusion threshold is up
/// to the caller. Contributions are summed without normalizing by term count,
/// so a contact matching many terms weakly can outrank one matching a single
/// term well.
pub fn score_relevance(
    query: &str,
    analysis: &ContactAnalysis,
    config: &ScorerConfig,
    vocabulary: &Vocabulary,
) -> RelevanceScore {
    let terms = content_terms(query, vocabulary);
    let mut sum = 0.0;

    for claim in &analysis.expertise {
        let skill = claim.skill.to_lowercase();
        for term in &terms {
            if overlaps(&skill, term) {
                sum += claim.confidence * config.expertise_weight;
            }
        }
    }

    for keyword in &analysis.keywords {
        let weight = if keyword.category == KeywordCategory::Skill {
            config.skill_keyword_weight
        } else {
            config.keyword_weight
        };
        let term_text = keyword.term.to_lowercase();
        for term in &terms {
            if overlaps(&term_text, term) {
                sum += keyword.confidence * weight;
            }
        }
    }

    for topic in &analysis.topics {
        let topic = topic.to_lowercase();
        for term in &terms {
            if !term.is_empty() && topic.contains(term.as_str()) {
                sum += config.topic_weight;
            }
        }
    }

    sum += similarity(query, &profile_document(analysis)) * config.similarity_weight;

    (sum * config.scale).round().clamp(0.0, 100.0) as RelevanceScore
}

/// Either string contains the other; empty strings never match
fn overlaps(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Skills, keyword terms and topics joined into one searchable string
fn profile_document(analysis: &ContactAnalysis) -> String {
    analysis
        .expertise
        .iter()
        .map(|c| c.skill.as_str())
        .chain(analysis.keywords.iter().map(|k| k.term.as_str()))
        .chain(analysis.topics.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive Jaro-Winkler similarity in 0..=1
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::jaro_winkler(&a, &b)
}
