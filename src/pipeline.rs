use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::inference::{InferenceConfig, analyze_contact};
use crate::models::{ChatTranscript, ContactAnalysis, ContactProfile, ParsedMessage};
use crate::relevance::{RelevanceScore, ScorerConfig, score_relevance};
use crate::vocabulary::Vocabulary;

/// Messages considered when picking highlights, most recent first
const RECENT_MESSAGES: usize = 20;
/// Highlights must be longer than this (characters)
const MIN_HIGHLIGHT_CHARS: usize = 30;
/// Highlights are cut to this many characters
const MAX_HIGHLIGHT_CHARS: usize = 100;
const MAX_HIGHLIGHTS: usize = 3;
/// Skills listed on a search hit
const HIT_EXPERTISE: usize = 6;
/// Skills named in a match reason
const REASON_EXPERTISE: usize = 3;

/// Analysis of one contact, ready for storage or search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactReport {
    pub profile: ContactProfile,
    pub analysis: ContactAnalysis,
    /// Too few messages for the analysis to say much
    pub sparse: bool,
    /// Recent substantial messages, truncated for display
    pub highlights: Vec<String>,
}

/// Caller policy applied when ranking contacts
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Hits must score strictly above this
    pub min_score: RelevanceScore,
    /// Maximum hits returned
    pub limit: usize,
    /// Contacts with no expertise and fewer messages than this are skipped
    pub min_messages: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_score: 20,
            limit: 10,
            min_messages: 5,
        }
    }
}

/// One ranked contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub key: String,
    pub name: String,
    pub score: RelevanceScore,
    /// Highest-confidence skills
    pub expertise: Vec<String>,
    pub match_reason: String,
    pub highlights: Vec<String>,
}

/// Analyze every participant of a transcript
///
/// Contacts are processed in parallel; the output keeps roster order.
pub fn analyze_transcript(
    transcript: &ChatTranscript,
    config: &InferenceConfig,
    vocabulary: &Vocabulary,
) -> Vec<ContactReport> {
    let reports: Vec<ContactReport> = transcript
        .participants
        .par_iter()
        .map(|profile| {
            let messages: Vec<&ParsedMessage> = transcript.messages_from(&profile.key).collect();
            let analysis = analyze_contact(messages.iter().copied(), config, vocabulary);
            let sparse = messages.len() < config.sparse_message_threshold;
            if sparse {
                debug!("{} has only {} messages", profile.name, messages.len());
            }

            ContactReport {
                profile: profile.clone(),
                analysis,
                sparse,
                highlights: highlights(&messages),
            }
        })
        .collect();

    let sparse = reports.iter().filter(|r| r.sparse).count();
    info!(
        "Analyzed {} contacts ({} sparse) from {} messages",
        reports.len(),
        sparse,
        transcript.total_messages()
    );

    reports
}

/// Score every report against a query and keep the best matches
///
/// Hits scoring at or below `min_score` are dropped; the rest are sorted by
/// descending score, keeping roster order among ties.
pub fn rank_contacts(
    query: &str,
    reports: &[ContactReport],
    options: &SearchOptions,
    scorer: &ScorerConfig,
    vocabulary: &Vocabulary,
) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = reports
        .iter()
        .filter(|r| {
            !r.analysis.expertise.is_empty() || r.profile.message_count >= options.min_messages
        })
        .filter_map(|report| {
            let score = score_relevance(query, &report.analysis, scorer, vocabulary);
            (score > options.min_score).then(|| SearchHit {
                key: report.profile.key.clone(),
                name: report.profile.name.clone(),
                score,
                expertise: report
                    .analysis
                    .expertise
                    .iter()
                    .take(HIT_EXPERTISE)
                    .map(|c| c.skill.clone())
                    .collect(),
                match_reason: match_reason(report),
                highlights: report.highlights.clone(),
            })
        })
        .collect();

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(options.limit);

    debug!("Query {:?} matched {} of {} contacts", query, hits.len(), reports.len());
    hits
}

fn match_reason(report: &ContactReport) -> String {
    let top: Vec<&str> = report
        .analysis
        .expertise
        .iter()
        .take(REASON_EXPERTISE)
        .map(|c| c.skill.as_str())
        .collect();

    if top.is_empty() {
        format!(
            "Active participant with {} messages.",
            report.profile.message_count
        )
    } else {
        format!(
            "Has expertise in {} with high confidence scores.",
            top.join(", ")
        )
    }
}

fn highlights(messages: &[&ParsedMessage]) -> Vec<String> {
    let mut recent: Vec<&ParsedMessage> = messages.to_vec();
    recent.sort_by(|a, b| b.date_time.cmp(&a.date_time));

    recent
        .into_iter()
        .take(RECENT_MESSAGES)
        .filter(|m| m.content.chars().count() > MIN_HIGHLIGHT_CHARS)
        .take(MAX_HIGHLIGHTS)
        .map(|m| {
            if m.content.chars().count() > MAX_HIGHLIGHT_CHARS {
                let mut cut: String = m.content.chars().take(MAX_HIGHLIGHT_CHARS).collect();
                cut.push_str("...");
                cut
            } else {
                m.content.clone()
            }
        })
        .collect()
}
