use std::collections::HashSet;

use serde::Serialize;

use crate::error::StructuralInputError;
use crate::models::DateRange;

use super::{ParserConfig, detect_group_chat, matches_any, non_blank_lines, parse_message_line};

/// Outcome of the pre-import structural check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<StructuralInputError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<StructuralInputError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Human-readable rejection reasons
    pub fn reasons(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

/// Cheap summary of an export, computed from a leading sample of lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptPreview {
    /// Non-blank line count, an upper bound on messages
    pub estimated_message_count: usize,
    /// Authored messages found in the sample
    pub sampled_messages: usize,
    /// Distinct normalized senders in the sample
    pub participant_count: usize,
    pub is_group_chat: bool,
    /// Bounds of the sampled message times
    pub date_range: Option<DateRange>,
}

/// Check that text looks like a chat export without parsing it fully
///
/// Rejects empty input outright; otherwise reports every problem found: no
/// template match among the first probe lines, and too few lines overall.
pub fn validate_transcript(text: &str, config: &ParserConfig) -> ValidationReport {
    let lines: Vec<&str> = non_blank_lines(text).collect();

    if lines.is_empty() {
        return ValidationReport::from_errors(vec![StructuralInputError::Empty]);
    }

    let mut errors = Vec::new();

    let probed = lines.len().min(config.validate_probe_lines);
    if !lines[..probed].iter().any(|l| matches_any(l)) {
        errors.push(StructuralInputError::NoRecognizableFormat { probed });
    }

    if lines.len() < config.min_valid_lines {
        errors.push(StructuralInputError::TooShort {
            lines: lines.len(),
            minimum: config.min_valid_lines,
        });
    }

    ValidationReport::from_errors(errors)
}

/// Estimate counts and date bounds from the first sample lines only
pub fn preview_transcript(text: &str, config: &ParserConfig) -> TranscriptPreview {
    let lines: Vec<&str> = non_blank_lines(text).collect();

    let mut senders = HashSet::new();
    let mut times = Vec::new();

    for line in lines.iter().take(config.preview_sample_lines) {
        if let Some((message, _)) = parse_message_line(line) {
            if !message.is_system_message {
                senders.insert(message.sender_key);
                times.push(message.date_time);
            }
        }
    }

    let head = lines
        .iter()
        .take(config.group_probe_lines)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    TranscriptPreview {
        estimated_message_count: lines.len(),
        sampled_messages: times.len(),
        participant_count: senders.len(),
        is_group_chat: detect_group_chat(&head),
        date_range: DateRange::spanning(times),
    }
}
