use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line-level entry of a chat export, with any continuation lines folded in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Timestamp exactly as it appeared in the export
    pub timestamp: String,
    /// Parsed timestamp ("now" when the raw value was malformed)
    pub date_time: NaiveDateTime,
    /// Sender display name, trimmed. Empty for sender-less notices
    pub sender: String,
    /// Normalized sender key used to merge contacts
    pub sender_key: String,
    /// Message body, possibly spanning several lines
    pub content: String,
    pub is_system_message: bool,
}

/// Running statistics for one participant, keyed by normalized name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactProfile {
    /// First display name seen for this key
    pub name: String,
    pub key: String,
    pub message_count: usize,
    pub first_seen: NaiveDateTime,
    pub last_seen: NaiveDateTime,
}

impl ContactProfile {
    /// Start a profile from the first message seen for its key
    pub fn from_message(message: &ParsedMessage) -> Self {
        Self {
            name: message.sender.clone(),
            key: message.sender_key.clone(),
            message_count: 1,
            first_seen: message.date_time,
            last_seen: message.date_time,
        }
    }

    /// Fold another message from the same key into the running stats
    pub fn record(&mut self, message: &ParsedMessage) {
        self.message_count += 1;
        if message.date_time < self.first_seen {
            self.first_seen = message.date_time;
        }
        if message.date_time > self.last_seen {
            self.last_seen = message.date_time;
        }
    }
}

/// Inclusive span of message times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Smallest range covering every time yielded, or None for an empty iterator
    pub fn spanning<I>(times: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        times.into_iter().fold(None, |range, t| match range {
            None => Some(DateRange { start: t, end: t }),
            Some(r) => Some(DateRange {
                start: r.start.min(t),
                end: r.end.max(t),
            }),
        })
    }
}

/// Counters for recoverable anomalies seen during a parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Non-blank lines scanned
    pub lines_scanned: usize,
    /// Lines appended to the previous message
    pub continuation_lines: usize,
    /// Unmatched lines with no previous message to attach to
    pub orphan_lines_dropped: usize,
    /// Timestamps that matched a template but could not be parsed
    pub timestamp_fallbacks: usize,
    pub system_messages: usize,
}

/// Where a transcript came from and how parsing went
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSource {
    pub import_id: Uuid,
    pub file_name: String,
    pub file_size: u64,
    pub parsed_at: DateTime<Utc>,
    pub stats: ParseStats,
}

/// A fully parsed chat export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTranscript {
    pub is_group_chat: bool,
    pub group_name: Option<String>,
    /// Contacts in order of first appearance
    pub participants: Vec<ContactProfile>,
    /// All messages in file order, system messages included
    pub messages: Vec<ParsedMessage>,
    pub date_range: DateRange,
    pub source: TranscriptSource,
}

impl ChatTranscript {
    pub fn total_messages(&self) -> usize {
        self.messages.len()
    }

    /// Look up a contact by normalized key
    pub fn contact(&self, key: &str) -> Option<&ContactProfile> {
        self.participants.iter().find(|c| c.key == key)
    }

    /// Non-system messages sent by the contact with this key
    pub fn messages_from<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ParsedMessage> {
        self.messages
            .iter()
            .filter(move |m| !m.is_system_message && m.sender_key == key)
    }
}
