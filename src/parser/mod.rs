pub mod aggregate;
pub mod system;
pub mod templates;
pub mod validate;

pub use aggregate::*;
pub use system::{detect_group_chat, extract_group_name, is_system_message};
pub use templates::{match_line, matches_any, parse_date_time, TemplateKind};
pub use validate::*;

use chrono::{Local, NaiveDateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{ChatTranscript, DateRange, ParseStats, ParsedMessage, TranscriptSource};

/// Configuration for transcript parsing
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Non-blank lines inspected for group indicators
    pub group_probe_lines: usize,
    /// Non-blank lines inspected by validation for a recognisable template
    pub validate_probe_lines: usize,
    /// Fewer non-blank lines than this fails validation
    pub min_valid_lines: usize,
    /// Non-blank lines sampled by the metadata preview
    pub preview_sample_lines: usize,
    /// Group name used when nothing better is found
    pub fallback_group_name: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            group_probe_lines: 10,
            validate_probe_lines: 10,
            min_valid_lines: 5,
            preview_sample_lines: 100,
            fallback_group_name: "Unknown Group".to_string(),
        }
    }
}

/// Canonical contact key: lowercase, punctuation stripped, whitespace collapsed
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed, non-blank lines of the input
pub(crate) fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Parse one trimmed line into a message if it matches a template
///
/// The flag is true when the timestamp matched a template but could not be
/// read, in which case the current local time stands in.
pub fn parse_message_line(line: &str) -> Option<(ParsedMessage, bool)> {
    let parts = match_line(line)?;

    let (date_time, fell_back) = match parse_date_time(parts.timestamp) {
        Some(dt) => (dt, false),
        None => {
            warn!("Failed to parse timestamp {:?}, using current time", parts.timestamp);
            (now(), true)
        }
    };

    let sender = parts.sender.trim();
    let content = parts.content.trim();

    Some((
        ParsedMessage {
            timestamp: parts.timestamp.to_string(),
            date_time,
            sender: sender.to_string(),
            sender_key: normalize_name(sender),
            content: content.to_string(),
            is_system_message: is_system_message(sender, content),
        },
        fell_back,
    ))
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse a raw chat export into a structured transcript
///
/// Never fails: unmatched lines continue the previous message or are dropped,
/// unreadable timestamps become "now". Contacts are aggregated in the same
/// pass from non-system messages only.
pub fn parse_transcript(
    text: &str,
    file_name: Option<&str>,
    file_size: Option<u64>,
    config: &ParserConfig,
) -> ChatTranscript {
    let file_name = file_name.unwrap_or_default();
    let lines: Vec<&str> = non_blank_lines(text).collect();

    let head = lines
        .iter()
        .take(config.group_probe_lines)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    let is_group_chat = detect_group_chat(&head);
    let group_name = is_group_chat
        .then(|| extract_group_name(file_name, &head, &config.fallback_group_name));

    let mut messages: Vec<ParsedMessage> = Vec::new();
    let mut contacts = ContactAggregator::new();
    let mut stats = ParseStats {
        lines_scanned: lines.len(),
        ..Default::default()
    };

    for line in &lines {
        match parse_message_line(line) {
            Some((message, fell_back)) => {
                if fell_back {
                    stats.timestamp_fallbacks += 1;
                }
                if message.is_system_message {
                    stats.system_messages += 1;
                } else {
                    contacts.record(&message);
                }
                messages.push(message);
            }
            None => match messages.last_mut() {
                Some(last) => {
                    last.content.push('\n');
                    last.content.push_str(line);
                    stats.continuation_lines += 1;
                }
                None => {
                    debug!("Dropping orphan line before first message: {:?}", line);
                    stats.orphan_lines_dropped += 1;
                }
            },
        }
    }

    let date_range = DateRange::spanning(messages.iter().map(|m| m.date_time)).unwrap_or_else(|| {
        let now = now();
        DateRange { start: now, end: now }
    });

    info!(
        "Parsed {} messages from {} contacts ({} system, {} continuation lines)",
        messages.len(),
        contacts.len(),
        stats.system_messages,
        stats.continuation_lines
    );

    ChatTranscript {
        is_group_chat,
        group_name,
        participants: contacts.into_profiles(),
        messages,
        date_range,
        source: TranscriptSource {
            import_id: Uuid::new_v4(),
            file_name: file_name.to_string(),
            file_size: file_size.unwrap_or(text.len() as u64),
            parsed_at: Utc::now(),
            stats,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ChatTranscript {
        parse_transcript(text, None, None, &ParserConfig::default())
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Alice   Smith! "), "alice smith");
        assert_eq!(normalize_name("Dr. J.-P. O'Neil"), "dr jp oneil");
        assert_eq!(normalize_name("José_99"), "josé_99");
        assert_eq!(normalize_name("~"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["Alice Smith", "  BOB\t(work) ", "Zoë-Ann", "+1 555 0100", "~ Maria"] {
            let once = normalize_name(raw);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn test_single_line_per_template() {
        for line in [
            "12/31/2023, 11:59 PM - Name: Body",
            "12/31/2023, 23:59 - Name: Body",
            "2023-12-31, 23:59 - Name: Body",
            "[31/12/2023, 23:59:59] Name: Body",
        ] {
            let transcript = parse(line);
            assert_eq!(transcript.messages.len(), 1, "{line}");
            let message = &transcript.messages[0];
            assert_eq!(message.sender, "Name");
            assert_eq!(message.content, "Body");
            assert!(!message.is_system_message);
        }
    }

    #[test]
    fn test_continuation_and_orphan_lines() {
        let text = "orphan before anything\n\
                    1/5/2024, 10:00 - Alice: first line\n\
                    second line\n\
                    \n\
                    third line\n\
                    1/5/2024, 10:05 - Bob: reply";
        let transcript = parse(text);

        assert_eq!(transcript.messages.len(), 2);
        assert_eq!(transcript.messages[0].content, "first line\nsecond line\nthird line");
        assert_eq!(transcript.source.stats.orphan_lines_dropped, 1);
        assert_eq!(transcript.source.stats.continuation_lines, 2);
        assert_eq!(transcript.source.stats.lines_scanned, 5);
    }

    #[test]
    fn test_contacts_merge_by_normalized_key() {
        let text = "1/5/2024, 10:00 - Alice Smith: hi\n\
                    1/5/2024, 10:01 - alice smith: again\n\
                    1/5/2024, 10:02 - Bob: hey";
        let transcript = parse(text);

        assert_eq!(transcript.participants.len(), 2);
        let alice = transcript.contact("alice smith").unwrap();
        assert_eq!(alice.message_count, 2);
        assert_eq!(alice.name, "Alice Smith");
        assert_eq!(transcript.messages_from("alice smith").count(), 2);
    }

    #[test]
    fn test_system_message_excluded_from_counts() {
        let text = "1/5/2024, 10:00 - Alice Smith: hello all\n\
                    1/5/2024, 10:01 - Alice Smith added Bob to the group\n\
                    1/5/2024, 10:02 - Alice Smith: Alice Smith added Bob to the group";
        let transcript = parse(text);

        assert_eq!(transcript.messages.len(), 3);
        assert!(transcript.messages[1].is_system_message);
        assert!(transcript.messages[2].is_system_message);
        assert_eq!(transcript.contact("alice smith").unwrap().message_count, 1);
        assert!(transcript.contact("bob").is_none());
        assert_eq!(transcript.source.stats.system_messages, 2);
    }

    #[test]
    fn test_bad_timestamp_falls_back_to_now() {
        let before = Local::now().naive_local();
        let transcript = parse("99/99/2023, 10:00 - Alice: hello");

        assert_eq!(transcript.messages.len(), 1);
        assert!(transcript.messages[0].date_time >= before);
        assert_eq!(transcript.source.stats.timestamp_fallbacks, 1);
    }

    #[test]
    fn test_date_range_covers_messages() {
        let text = "1/7/2024, 10:00 - Alice: later\n\
                    1/5/2024, 09:00 - Bob: earlier\n\
                    1/6/2024, 12:00 - Alice: middle";
        let transcript = parse(text);

        assert!(transcript.date_range.start <= transcript.date_range.end);
        assert_eq!(transcript.date_range.start, parse_date_time("1/5/2024, 09:00").unwrap());
        assert_eq!(transcript.date_range.end, parse_date_time("1/7/2024, 10:00").unwrap());
        let alice = transcript.contact("alice").unwrap();
        assert!(alice.first_seen <= alice.last_seen);
    }

    #[test]
    fn test_reordering_lines_keeps_counts() {
        let lines = [
            "1/5/2024, 10:00 - Alice: one",
            "1/5/2024, 10:01 - Bob: two",
            "1/5/2024, 10:02 - Alice: three",
            "1/5/2024, 10:03 - Alice: four",
        ];
        let forward = parse(&lines.join("\n"));
        let mut reversed_lines = lines;
        reversed_lines.reverse();
        let reversed = parse(&reversed_lines.join("\n"));

        for key in ["alice", "bob"] {
            assert_eq!(
                forward.contact(key).unwrap().message_count,
                reversed.contact(key).unwrap().message_count
            );
        }
    }

    #[test]
    fn test_empty_input() {
        let transcript = parse("");
        assert!(transcript.messages.is_empty());
        assert!(transcript.participants.is_empty());
        assert!(!transcript.is_group_chat);
        assert_eq!(transcript.date_range.start, transcript.date_range.end);
    }

    #[test]
    fn test_group_detection_and_name() {
        let text = "1/5/2024, 10:00 - Alice created group \"Rustaceans\"\n\
                    1/5/2024, 10:01 - Alice added Bob\n\
                    1/5/2024, 10:02 - Bob: thanks for the invite";
        let transcript = parse_transcript(
            text,
            Some("WhatsApp Chat.txt"),
            Some(1234),
            &ParserConfig::default(),
        );

        assert!(transcript.is_group_chat);
        assert_eq!(transcript.group_name.as_deref(), Some("Rustaceans"));
        assert_eq!(transcript.source.file_size, 1234);
        assert_eq!(transcript.participants.len(), 1);
    }

    #[test]
    fn test_one_to_one_has_no_group_name() {
        let transcript = parse("1/5/2024, 10:00 - Alice: hi\n1/5/2024, 10:01 - Bob: hello");
        assert!(!transcript.is_group_chat);
        assert!(transcript.group_name.is_none());
    }
}
