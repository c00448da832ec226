use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Content patterns marking platform notices rather than authored messages
#[allow(clippy::expect_used)]
static SYSTEM_CONTENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)added|left|removed|changed|created|deleted|security code|end-to-end encryption",
        r"(?i)messages and calls are end-to-end encrypted",
        r"(?i)joined using this group's invite link",
        r"(?i)\w+ changed their phone number",
        r"(?i)you're now an admin",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid system pattern"))
    .collect()
});

#[allow(clippy::expect_used)]
static GROUP_INDICATORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\d+ participants?",
        r"(?i)group info",
        r"(?i)added|left|removed",
        r"(?i)group invite",
        r"(?i)admin",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid group indicator"))
    .collect()
});

#[allow(clippy::expect_used)]
static GROUP_NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)created group ["“](.+?)["”]"#,
        r"(?i)Group:\s*(.+)",
        r"(?i)Chat with (.+)",
        r"(?i)(.+) group",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid group name pattern"))
    .collect()
});

/// Sender tokens that identify the platform itself rather than a person
const SYSTEM_SENDER_BRAND: &str = "whatsapp";
const SYSTEM_SENDER_MARKER: char = '~';

/// File name fragments that say nothing about the group
const GENERIC_FILE_NAME_TOKENS: [&str; 2] = ["WhatsApp", "Chat"];

/// Decide whether a matched line is an automated notice
///
/// A sender-less line, a sender carrying the platform brand or the `~` marker,
/// or content matching a notice phrase all count.
pub fn is_system_message(sender: &str, content: &str) -> bool {
    if sender.is_empty()
        || sender.to_lowercase().contains(SYSTEM_SENDER_BRAND)
        || sender.contains(SYSTEM_SENDER_MARKER)
    {
        return true;
    }

    SYSTEM_CONTENT_PATTERNS.iter().any(|p| p.is_match(content))
}

/// Look for group-chat indicators in the opening lines of an export
pub fn detect_group_chat(head: &str) -> bool {
    GROUP_INDICATORS.iter().any(|p| p.is_match(head))
}

/// Pick a group name from the file name, then the opening lines, then the fallback
pub fn extract_group_name(file_name: &str, head: &str, fallback: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_name);
    let base = strip_txt_suffix(base).trim();

    if !base.is_empty() && !GENERIC_FILE_NAME_TOKENS.iter().any(|t| base.contains(t)) {
        return base.to_string();
    }

    GROUP_NAME_PATTERNS
        .iter()
        .find_map(|p| p.captures(head))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn strip_txt_suffix(name: &str) -> &str {
    let len = name.len();
    if len >= 4 && name.is_char_boundary(len - 4) && name[len - 4..].eq_ignore_ascii_case(".txt") {
        &name[..len - 4]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_sender_markers() {
        assert!(is_system_message("WhatsApp", "anything"));
        assert!(is_system_message("~ Unknown", "hello"));
        assert!(is_system_message("", "Alice added Bob"));
        assert!(!is_system_message("Alice", "hello there"));
    }

    #[test]
    fn test_system_content_phrases() {
        assert!(is_system_message(
            "Alice",
            "Messages and calls are end-to-end encrypted. No one outside of this chat can read them."
        ));
        assert!(is_system_message("Alice", "Alice Smith added Bob to the group"));
        assert!(is_system_message("Bob", "Bob joined using this group's invite link"));
        assert!(is_system_message("Carol", "Carol changed their phone number to a new number"));
        assert!(is_system_message("Dan", "You're now an admin"));
    }

    #[test]
    fn test_detect_group_chat() {
        assert!(detect_group_chat("12/1/2023, 10:00 - Alice added Bob"));
        assert!(detect_group_chat("Group info: 12 participants"));
        assert!(!detect_group_chat("12/1/2023, 10:00 - Alice: hi\n12/1/2023, 10:01 - Bob: hey"));
    }

    #[test]
    fn test_group_name_prefers_specific_file_name() {
        assert_eq!(extract_group_name("Rust Meetup.txt", "", "Unknown Group"), "Rust Meetup");
        assert_eq!(extract_group_name("exports/Founders.TXT", "", "Unknown Group"), "Founders");
    }

    #[test]
    fn test_group_name_from_content() {
        let head = "1/1/2024, 9:00 - Alice: Group: Startup Founders";
        assert_eq!(
            extract_group_name("WhatsApp Chat with X.txt", head, "Unknown Group"),
            "Startup Founders"
        );

        let created = "1/1/2024, 9:00 - Alice created group \"Climbers\"";
        assert_eq!(extract_group_name("", created, "Unknown Group"), "Climbers");
    }

    #[test]
    fn test_group_name_fallback() {
        assert_eq!(extract_group_name("Chat.txt", "nothing here", "Unknown Group"), "Unknown Group");
    }
}
