use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};

/// Line layouts recognised by the parser, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// `12/31/2023, 11:59 PM - Name: body`
    TwelveHour,
    /// `31/12/2023, 23:59 - Name: body`
    TwentyFourHour,
    /// `2023-12-31, 23:59 - Name: body`
    DashedIso,
    /// `[31/12/2023, 23:59:59] Name: body`
    BracketedSeconds,
    /// `12/31/2023, 11:59 PM - Alice added Bob` or `[31/12/2023, 23:59:59] Alice added Bob`
    /// (no sender prefix)
    SenderlessNotice,
}

/// Pieces pulled out of a line that matched a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineParts<'a> {
    pub kind: TemplateKind,
    pub timestamp: &'a str,
    pub sender: &'a str,
    pub content: &'a str,
}

/// A matcher paired with the extractor that turns its captures into parts
pub struct Template {
    pub kind: TemplateKind,
    pattern: Regex,
    extract: for<'a> fn(TemplateKind, &Captures<'a>) -> Option<LineParts<'a>>,
}

impl Template {
    fn new(
        kind: TemplateKind,
        pattern: &str,
        extract: for<'a> fn(TemplateKind, &Captures<'a>) -> Option<LineParts<'a>>,
    ) -> Self {
        #[allow(clippy::expect_used)]
        let pattern = Regex::new(pattern).expect("valid template regex");
        Self {
            kind,
            pattern,
            extract,
        }
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    pub fn parse<'a>(&self, line: &'a str) -> Option<LineParts<'a>> {
        let caps = self.pattern.captures(line)?;
        (self.extract)(self.kind, &caps)
    }
}

fn sender_and_body<'a>(kind: TemplateKind, caps: &Captures<'a>) -> Option<LineParts<'a>> {
    Some(LineParts {
        kind,
        timestamp: caps.get(1)?.as_str(),
        sender: caps.get(2)?.as_str(),
        content: caps.get(3)?.as_str(),
    })
}

fn notice_body<'a>(kind: TemplateKind, caps: &Captures<'a>) -> Option<LineParts<'a>> {
    Some(LineParts {
        kind,
        timestamp: caps.get(1)?.as_str(),
        sender: "",
        content: caps.get(2)?.as_str(),
    })
}

/// All templates, first match wins
pub static TEMPLATES: LazyLock<Vec<Template>> = LazyLock::new(|| {
    vec![
        Template::new(
            TemplateKind::TwelveHour,
            r"^(\d{1,2}/\d{1,2}/\d{4},\s\d{1,2}:\d{2}\s(?i:AM|PM))\s-\s([^:]+):\s(.*)$",
            sender_and_body,
        ),
        Template::new(
            TemplateKind::TwentyFourHour,
            r"^(\d{1,2}/\d{1,2}/\d{4},\s\d{1,2}:\d{2})\s-\s([^:]+):\s(.*)$",
            sender_and_body,
        ),
        Template::new(
            TemplateKind::DashedIso,
            r"^(\d{4}-\d{1,2}-\d{1,2},\s\d{1,2}:\d{2})\s-\s([^:]+):\s(.*)$",
            sender_and_body,
        ),
        Template::new(
            TemplateKind::BracketedSeconds,
            r"^\[(\d{1,2}/\d{1,2}/\d{4},\s\d{1,2}:\d{2}:\d{2})\]\s([^:]+):\s(.*)$",
            sender_and_body,
        ),
        Template::new(
            TemplateKind::SenderlessNotice,
            r"^(\d{1,2}/\d{1,2}/\d{4},\s\d{1,2}:\d{2}(?:\s(?i:AM|PM))?|\d{4}-\d{1,2}-\d{1,2},\s\d{1,2}:\d{2})\s-\s([^:]+)$",
            notice_body,
        ),
        Template::new(
            TemplateKind::SenderlessNotice,
            r"^\[(\d{1,2}/\d{1,2}/\d{4},\s\d{1,2}:\d{2}:\d{2})\]\s([^:]+)$",
            notice_body,
        ),
    ]
});

/// Run the templates in order against one trimmed line
pub fn match_line(line: &str) -> Option<LineParts<'_>> {
    TEMPLATES.iter().find_map(|t| t.parse(line))
}

/// Whether any template recognises the line
pub fn matches_any(line: &str) -> bool {
    TEMPLATES.iter().any(|t| t.is_match(line))
}

/// Parse a raw template timestamp into a datetime
///
/// Meridiem timestamps and slash dates are read month/day/year first, falling
/// back to day/month/year when that is not a real date. Returns None when
/// neither reading works.
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let (date_part, time_part) = raw.split_once(',')?;
    let date_part = date_part.trim();
    let time_part = time_part.trim();

    let (hour, minute, second) = parse_clock(time_part)?;

    let date = if date_part.contains('/') {
        parse_slash_date(date_part)?
    } else if date_part.contains('-') {
        parse_dashed_date(date_part)?
    } else {
        return None;
    };

    date.and_hms_opt(hour, minute, second)
}

/// Parse `H:MM`, `H:MM:SS` or `H:MM AM` into 24-hour clock parts
fn parse_clock(time: &str) -> Option<(u32, u32, u32)> {
    let lower = time.to_lowercase();
    let (clock, meridiem) = if let Some(stripped) = lower.strip_suffix("am") {
        (stripped.trim_end(), Some(false))
    } else if let Some(stripped) = lower.strip_suffix("pm") {
        (stripped.trim_end(), Some(true))
    } else {
        (lower.as_str(), None)
    };

    let mut fields = clock.split(':').map(|f| f.trim().parse::<u32>());
    let hour = fields.next()?.ok()?;
    let minute = fields.next()?.ok()?;
    let second = match fields.next() {
        Some(s) => s.ok()?,
        None => 0,
    };
    if fields.next().is_some() {
        return None;
    }

    let hour = match meridiem {
        None => hour,
        Some(_) if hour == 0 || hour > 12 => return None,
        Some(false) => hour % 12,
        Some(true) => hour % 12 + 12,
    };

    Some((hour, minute, second))
}

fn parse_slash_date(date: &str) -> Option<NaiveDate> {
    let fields: Vec<u32> = date
        .split('/')
        .map(|f| f.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .ok()?;
    let [first, second, year] = fields.as_slice() else {
        return None;
    };
    let year = i32::try_from(*year).ok()?;

    NaiveDate::from_ymd_opt(year, *first, *second)
        .or_else(|| NaiveDate::from_ymd_opt(year, *second, *first))
}

fn parse_dashed_date(date: &str) -> Option<NaiveDate> {
    let fields: Vec<u32> = date
        .split('-')
        .map(|f| f.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .ok()?;
    let [year, month, day] = fields.as_slice() else {
        return None;
    };

    NaiveDate::from_ymd_opt(i32::try_from(*year).ok()?, *month, *day)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_each_template_extracts_parts() {
        let cases = [
            ("12/31/2023, 11:59 PM - Alice Smith: Hello there", TemplateKind::TwelveHour, "12/31/2023, 11:59 PM"),
            ("31/12/2023, 23:59 - Alice Smith: Hello there", TemplateKind::TwentyFourHour, "31/12/2023, 23:59"),
            ("2023-12-31, 23:59 - Alice Smith: Hello there", TemplateKind::DashedIso, "2023-12-31, 23:59"),
            ("[31/12/2023, 23:59:59] Alice Smith: Hello there", TemplateKind::BracketedSeconds, "31/12/2023, 23:59:59"),
        ];

        for (line, kind, timestamp) in cases {
            let parts = match_line(line).unwrap();
            assert_eq!(parts.kind, kind, "{line}");
            assert_eq!(parts.timestamp, timestamp);
            assert_eq!(parts.sender, "Alice Smith");
            assert_eq!(parts.content, "Hello there");
        }
    }

    #[test]
    fn test_body_may_contain_colons() {
        let parts = match_line("1/2/2024, 9:05 AM - Bob: meeting at 10:30: room 4").unwrap();
        assert_eq!(parts.sender, "Bob");
        assert_eq!(parts.content, "meeting at 10:30: room 4");
    }

    #[test]
    fn test_senderless_notice_is_last_resort() {
        let parts = match_line("12/31/2023, 11:59 PM - Alice Smith added Bob").unwrap();
        assert_eq!(parts.kind, TemplateKind::SenderlessNotice);
        assert_eq!(parts.sender, "");
        assert_eq!(parts.content, "Alice Smith added Bob");
    }

    #[test]
    fn test_bracketed_senderless_notice() {
        let parts = match_line("[15/01/2024, 14:31:00] Alice Smith added Bob to the group").unwrap();
        assert_eq!(parts.kind, TemplateKind::SenderlessNotice);
        assert_eq!(parts.timestamp, "15/01/2024, 14:31:00");
        assert_eq!(parts.sender, "");
        assert_eq!(parts.content, "Alice Smith added Bob to the group");

        let authored = match_line("[15/01/2024, 14:32:00] Bob: thanks").unwrap();
        assert_eq!(authored.kind, TemplateKind::BracketedSeconds);
    }

    #[test]
    fn test_plain_text_matches_nothing() {
        assert!(match_line("just a continuation line").is_none());
        assert!(!matches_any("Sent from my phone"));
    }

    #[test]
    fn test_parse_twelve_hour() {
        let dt = parse_date_time("12/31/2023, 11:59 PM").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 12, 31));
        assert_eq!((dt.hour(), dt.minute()), (23, 59));

        let midnight = parse_date_time("1/1/2024, 12:05 am").unwrap();
        assert_eq!(midnight.hour(), 0);
    }

    #[test]
    fn test_parse_slash_falls_back_to_day_first() {
        let us = parse_date_time("3/4/2024, 10:00").unwrap();
        assert_eq!((us.month(), us.day()), (3, 4));

        let eu = parse_date_time("31/12/2023, 23:59:59").unwrap();
        assert_eq!((eu.month(), eu.day()), (12, 31));
        assert_eq!(eu.second(), 59);
    }

    #[test]
    fn test_parse_dashed_iso() {
        let dt = parse_date_time("2023-12-31, 23:59").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2023, 12, 31, 23));
    }

    #[test]
    fn test_malformed_timestamps_are_rejected() {
        assert!(parse_date_time("13/13/2023, 10:00").is_none());
        assert!(parse_date_time("2023-02-30, 10:00").is_none());
        assert!(parse_date_time("1/1/2024, 25:00").is_none());
        assert!(parse_date_time("1/1/2024, 13:00 PM").is_none());
    }
}
