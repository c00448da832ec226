use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::{ExpertiseClaim, Keyword, KeywordCategory};
use crate::vocabulary::Vocabulary;

use super::InferenceConfig;
use super::keywords::categorize_keyword;
use super::tokenize::snippet;

/// Phrases signalling that a message offers help or claims experience
#[allow(clippy::expect_used)]
static HELP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:can help|happy to help|let me help|i'll help|help you)\b",
        r"(?i)\b(?:experience|expertise|background|worked on|familiar with)\b",
        r"(?i)\b(?:i know|i've done|i've worked|i specialize|my specialty)\b",
        r"(?i)\b(?:advice|suggestion|recommendation|tip|guidance)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid help pattern"))
    .collect()
});

/// Templates naming the thing help is offered with
#[allow(clippy::expect_used)]
static HELP_SKILL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:help|assist|support)\s+(?:with|you|in)\s+([\w\s]{2,30}?)(?:\s|$|\.)",
        r"(?i)\b(?:i know|familiar with|experience in|good at)\s+([\w\s]{2,30}?)(?:\s|$|\.)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid help skill pattern"))
    .collect()
});

#[allow(clippy::expect_used)]
static HELP_LEAD_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:help|assist|support|with|you|in|i know|familiar|experience|good at)\s+")
        .expect("valid help lead regex")
});

/// Accumulates claims keyed by skill, keeping first-seen order
#[derive(Debug, Default)]
struct ClaimSet {
    claims: Vec<ExpertiseClaim>,
    index: HashMap<String, usize>,
}

impl ClaimSet {
    fn get_mut(&mut self, skill: &str) -> Option<&mut ExpertiseClaim> {
        self.index.get(skill).map(|&i| &mut self.claims[i])
    }

    fn insert(&mut self, claim: ExpertiseClaim) {
        self.index.insert(claim.skill.clone(), self.claims.len());
        self.claims.push(claim);
    }
}

/// Whether a message reads as an offer of help or a claim of experience
pub fn offers_help(content: &str) -> bool {
    HELP_PATTERNS.iter().any(|p| p.is_match(content))
}

/// Candidate skills named in a help-offering message
///
/// Every vocabulary skill contained in the text, then every phrase captured by
/// the help templates. Duplicates are kept; each occurrence counts as evidence.
pub fn skills_in_help_context(content: &str, vocabulary: &Vocabulary) -> Vec<String> {
    let lower = content.to_lowercase();
    let mut skills: Vec<String> = vocabulary
        .skills
        .iter()
        .filter(|skill| lower.contains(skill.as_str()))
        .cloned()
        .collect();

    for pattern in HELP_SKILL_PATTERNS.iter() {
        for found in pattern.find_iter(content) {
            let skill = HELP_LEAD_WORDS
                .replace_all(found.as_str(), "")
                .trim()
                .trim_end_matches(|c: char| c.is_ascii_punctuation())
                .to_lowercase();
            let len = skill.chars().count();
            if len > 2 && len < 30 {
                skills.push(skill);
            }
        }
    }

    skills
}

/// Infer ranked expertise claims from help offers and skill keywords
///
/// Help-offering messages seed claims at `help_seed_confidence` and add
/// `help_boost` per repeat. Skill and technology keywords then seed at
/// `keyword_seed_factor` of their confidence, or add `keyword_boost_factor`
/// of it to an existing claim. Results are clamped to 1, filtered by
/// `min_claim_confidence`, sorted descending and truncated.
pub fn infer_expertise(
    contents: &[&str],
    keywords: &[Keyword],
    config: &InferenceConfig,
    vocabulary: &Vocabulary,
) -> Vec<ExpertiseClaim> {
    let mut set = ClaimSet::default();

    for content in contents.iter().filter(|c| offers_help(c)) {
        let evidence = snippet(content, config.evidence_snippet_chars);
        for skill in skills_in_help_context(content, vocabulary) {
            match set.get_mut(&skill) {
                Some(claim) => {
                    claim.confidence += config.help_boost;
                    claim.frequency += 1;
                    claim.evidence.push(evidence.clone());
                }
                None => {
                    let category = categorize_keyword(&skill, vocabulary);
                    set.insert(ExpertiseClaim {
                        skill,
                        confidence: config.help_seed_confidence,
                        evidence: vec![evidence.clone()],
                        category,
                        frequency: 1,
                    });
                }
            }
        }
    }

    for keyword in keywords.iter().filter(|k| {
        matches!(k.category, KeywordCategory::Skill | KeywordCategory::Technology)
    }) {
        match set.get_mut(&keyword.term) {
            Some(claim) => {
                claim.confidence += keyword.confidence * config.keyword_boost_factor;
                claim.frequency += keyword.frequency;
            }
            None => set.insert(ExpertiseClaim {
                skill: keyword.term.clone(),
                confidence: keyword.confidence * config.keyword_seed_factor,
                evidence: keyword.context.clone(),
                category: keyword.category,
                frequency: keyword.frequency,
            }),
        }
    }

    let candidates = set.claims.len();
    let mut claims: Vec<ExpertiseClaim> = set
        .claims
        .into_iter()
        .map(|mut claim| {
            claim.confidence = claim.confidence.clamp(0.0, 1.0);
            claim
        })
        .filter(|claim| claim.confidence > config.min_claim_confidence)
        .collect();

    claims.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    claims.truncate(config.max_expertise);

    debug!("Kept {} of {} expertise candidates", claims.len(), candidates);
    claims
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(term: &str, frequency: usize, category: KeywordCategory) -> Keyword {
        Keyword {
            term: term.to_string(),
            frequency,
            category,
            confidence: (frequency as f64 / 10.0).min(1.0),
            context: vec![format!("I use {term} a lot")],
        }
    }

    #[test]
    fn test_offers_help() {
        assert!(offers_help("Happy to help if you need anything"));
        assert!(offers_help("I have experience with Python and Django"));
        assert!(offers_help("My advice: index the join columns"));
        assert!(!offers_help("See you at lunch"));
    }

    #[test]
    fn test_skills_in_help_context() {
        let vocab = Vocabulary::default();
        let skills = skills_in_help_context("I'm familiar with kubernetes. Can help with figma too", &vocab);

        assert!(skills.contains(&"kubernetes".to_string()));
        assert!(skills.contains(&"figma".to_string()));
    }

    #[test]
    fn test_help_offer_seeds_and_boosts() {
        let vocab = Vocabulary::default();
        let config = InferenceConfig::default();
        let contents = [
            "I have experience with Python and Django",
            "lunch tomorrow?",
            "Happy to help with python scripts",
        ];
        let claims = infer_expertise(&contents, &[], &config, &vocab);

        let python = claims.iter().find(|c| c.skill == "python").unwrap();
        assert!((python.confidence - 1.0).abs() < 1e-9);
        // named once by the vocabulary and once by the "help with" template
        assert_eq!(python.frequency, 3);
        assert_eq!(python.evidence.len(), 3);
        assert!(python.evidence[0].ends_with("..."));
    }

    #[test]
    fn test_keyword_pass_seeds_and_filters() {
        let vocab = Vocabulary::default();
        let config = InferenceConfig::default();
        let keywords = [
            keyword("react", 8, KeywordCategory::Skill),
            keyword("api", 10, KeywordCategory::Technology),
            keyword("sql", 3, KeywordCategory::Skill),
            keyword("coffee", 10, KeywordCategory::General),
        ];
        let claims = infer_expertise(&[], &keywords, &config, &vocab);

        let skills: Vec<&str> = claims.iter().map(|c| c.skill.as_str()).collect();
        assert_eq!(skills, vec!["api", "react"]);
        assert!((claims[0].confidence - 0.6).abs() < 1e-9);
        assert!((claims[1].confidence - 0.48).abs() < 1e-9);
        assert_eq!(claims[1].evidence, vec!["I use react a lot".to_string()]);
    }

    #[test]
    fn test_keyword_pass_boosts_existing_claim() {
        let vocab = Vocabulary::default();
        let config = InferenceConfig::default();
        let keywords = [keyword("docker", 4, KeywordCategory::Skill)];
        let claims = infer_expertise(&["I can help you deploy docker images"], &keywords, &config, &vocab);

        let docker = claims.iter().find(|c| c.skill == "docker").unwrap();
        assert!((docker.confidence - 0.9).abs() < 1e-9);
        assert_eq!(docker.frequency, 5);
    }

    #[test]
    fn test_claims_are_capped_and_sorted() {
        let vocab = Vocabulary::default();
        let config = InferenceConfig::default();
        let keywords: Vec<Keyword> = (0..30)
            .map(|i| keyword(&format!("tool{i} api"), 10 - i % 5, KeywordCategory::Technology))
            .collect();
        let claims = infer_expertise(&[], &keywords, &config, &vocab);

        assert_eq!(claims.len(), config.max_expertise);
        assert!(claims.windows(2).all(|w| w[0].confidence >= w[1].confidence));
        assert!(claims.iter().all(|c| (0.0..=1.0).contains(&c.confidence)));
    }
}
