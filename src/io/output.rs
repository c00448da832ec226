use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::ChatTranscript;
use crate::pipeline::{ContactReport, SearchHit};

/// Skills and topics listed per contact in the summary
const SUMMARY_ITEMS: usize = 5;
const WRAP_WIDTH: usize = 80;

/// Write any serializable value as pretty JSON
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// Human-readable summary of an analyzed transcript
pub struct AnalysisSummary<'a> {
    transcript: &'a ChatTranscript,
    reports: &'a [ContactReport],
}

impl<'a> AnalysisSummary<'a> {
    pub fn new(transcript: &'a ChatTranscript, reports: &'a [ContactReport]) -> Self {
        Self {
            transcript,
            reports,
        }
    }

    pub fn format(&self) -> String {
        let t = self.transcript;
        let mut output = String::new();

        let title = match &t.group_name {
            Some(name) => format!("Group chat: {}", name),
            None => "Direct chat".to_string(),
        };
        output.push_str(&format!("{}\n{}\n", title, "=".repeat(title.chars().count())));
        output.push_str(&format!(
            "{} messages from {} contacts, {} to {}\n",
            t.total_messages(),
            t.participants.len(),
            format_date_time(t.date_range.start),
            format_date_time(t.date_range.end)
        ));
        let stats = &t.source.stats;
        if stats.timestamp_fallbacks > 0 || stats.orphan_lines_dropped > 0 {
            output.push_str(&format!(
                "{} unreadable timestamps, {} orphan lines dropped\n",
                stats.timestamp_fallbacks, stats.orphan_lines_dropped
            ));
        }
        output.push('\n');

        for report in self.reports {
            let profile = &report.profile;
            output.push_str(&format!(
                "{} ({} messages, {} to {}){}\n",
                profile.name,
                profile.message_count,
                format_date_time(profile.first_seen),
                format_date_time(profile.last_seen),
                if report.sparse { " [sparse]" } else { "" }
            ));

            let analysis = &report.analysis;
            if !analysis.expertise.is_empty() {
                let skills: Vec<String> = analysis
                    .expertise
                    .iter()
                    .take(SUMMARY_ITEMS)
                    .map(|c| format!("{} ({:.2})", c.skill, c.confidence))
                    .collect();
                output.push_str(&indent(&wrap_text(
                    &format!("Expertise: {}", skills.join(", ")),
                    WRAP_WIDTH - 2,
                )));
            }
            if !analysis.topics.is_empty() {
                let topics: Vec<&str> = analysis
                    .topics
                    .iter()
                    .take(SUMMARY_ITEMS)
                    .map(String::as_str)
                    .collect();
                output.push_str(&indent(&wrap_text(
                    &format!("Topics: {}", topics.join(", ")),
                    WRAP_WIDTH - 2,
                )));
            }

            let style = analysis.communication_style;
            output.push_str(&format!(
                "  Style: {:?} responder, {:?} messages, {:?}\n",
                style.response_time, style.message_length, style.formality
            ));
            output.push_str(&format!(
                "  Sentiment: {:+.2}, helpfulness {:.2}, enthusiasm {:.2}\n\n",
                analysis.sentiment.overall,
                analysis.sentiment.helpfulness,
                analysis.sentiment.enthusiasm
            ));
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
        write!(file, "{}", self.format()).map_err(|e| Error::io(path, e))?;
        Ok(())
    }
}

/// Ranked search hits, one block per contact
pub fn format_hits(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No contacts matched {:?}\n", query);
    }

    let mut output = format!("{} contacts matched {:?}\n\n", hits.len(), query);
    for (rank, hit) in hits.iter().enumerate() {
        output.push_str(&format!("{}. {} [{}]\n", rank + 1, hit.name, hit.score));
        output.push_str(&indent(&wrap_text(&hit.match_reason, WRAP_WIDTH - 2)));
        for highlight in &hit.highlights {
            output.push_str(&indent(&wrap_text(&format!("> {}", highlight), WRAP_WIDTH - 2)));
        }
        output.push('\n');
    }
    output
}

fn format_date_time(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

fn indent(text: &str) -> String {
    text.lines().map(|line| format!("  {}\n", line)).collect()
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len + word_len + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word_len;
    }

    result
}
