use chatsift::{
    analyze_contact, analyze_transcript, normalize_name, parse_transcript, rank_contacts,
    score_relevance, validate_transcript, ContactAnalysis, InferenceConfig, Keyword,
    KeywordCategory, ParserConfig, ScorerConfig, SearchOptions, Vocabulary,
};

fn parse(text: &str) -> chatsift::ChatTranscript {
    parse_transcript(text, Some("Hiking Club.txt"), None, &ParserConfig::default())
}

#[test]
fn test_each_template_yields_sender_and_body() {
    let lines = [
        "1/15/2024, 2:30 PM - Dana Lee: Body text here",
        "15/01/2024, 14:30 - Dana Lee: Body text here",
        "2024-01-15, 14:30 - Dana Lee: Body text here",
        "[15/01/2024, 14:30:05] Dana Lee: Body text here",
    ];

    for line in lines {
        let transcript = parse(line);
        assert_eq!(transcript.messages.len(), 1, "{line}");
        let message = &transcript.messages[0];
        assert_eq!(message.sender, "Dana Lee");
        assert_eq!(message.content, "Body text here");
        assert!(!message.is_system_message);
        assert_eq!(message.date_time.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 14:30");
    }
}

#[test]
fn test_expertise_from_three_messages() {
    let text = "\
1/15/2024, 10:30 AM - Alice Smith: I have years of experience with Python and Django
1/15/2024, 10:32 AM - Alice Smith: Happy to help anyone with SQL query tuning
1/15/2024, 10:35 AM - Alice Smith: See you all at lunch
";
    let transcript = parse(text);
    let alice = transcript.contact("alice smith").unwrap();
    assert_eq!(alice.message_count, 3);

    let analysis = analyze_contact(
        transcript.messages_from("alice smith"),
        &InferenceConfig::default(),
        &Vocabulary::default(),
    );
    assert!(analysis
        .expertise
        .iter()
        .any(|c| c.skill.contains("python") && c.confidence > 0.3));
}

#[test]
fn test_membership_notices_are_system_messages() {
    let text = "\
1/15/2024, 10:30 AM - Alice Smith: Morning everyone
1/15/2024, 10:31 AM - Alice Smith added Bob to the group
1/15/2024, 10:32 AM - Bob: Thanks for having me
";
    let transcript = parse(text);

    let notice = &transcript.messages[1];
    assert!(notice.is_system_message);
    assert_eq!(transcript.contact("alice smith").unwrap().message_count, 1);
    assert_eq!(transcript.contact("bob").unwrap().message_count, 1);
    assert_eq!(transcript.source.stats.system_messages, 1);
    assert!(transcript.is_group_chat);
    assert_eq!(transcript.group_name.as_deref(), Some("Hiking Club"));
}

#[test]
fn test_bracketed_membership_notice_is_its_own_message() {
    let text = "\
[15/01/2024, 14:30:05] Alice Smith: Morning everyone
[15/01/2024, 14:31:00] Alice Smith added Bob to the group
[15/01/2024, 14:32:00] Bob: thanks
";
    let transcript = parse(text);

    assert_eq!(transcript.messages.len(), 3);
    assert!(transcript.messages[1].is_system_message);
    assert_eq!(transcript.messages[0].content, "Morning everyone");
    assert_eq!(transcript.source.stats.system_messages, 1);
    assert_eq!(transcript.contact("alice smith").unwrap().message_count, 1);
    assert_eq!(transcript.contact("bob").unwrap().message_count, 1);
}

#[test]
fn test_four_lines_is_too_short() {
    let text = "\
1/15/2024, 10:30 AM - Alice: one
1/15/2024, 10:31 AM - Bob: two
1/15/2024, 10:32 AM - Alice: three
1/15/2024, 10:33 AM - Bob: four
";
    let report = validate_transcript(text, &ParserConfig::default());
    assert!(!report.is_valid);
    assert!(report.reasons().iter().any(|r| r.contains("too short")));
}

#[test]
fn test_related_query_outscores_unrelated_one() {
    let analysis = ContactAnalysis {
        keywords: vec![Keyword {
            term: "python".to_string(),
            frequency: 9,
            category: KeywordCategory::Skill,
            confidence: 0.9,
            context: vec![],
        }],
        ..ContactAnalysis::default()
    };
    let config = ScorerConfig::default();
    let vocab = Vocabulary::default();

    let python = score_relevance("I need python help", &analysis, &config, &vocab);
    let legal = score_relevance("legal advice", &analysis, &config, &vocab);
    assert!(python > legal);
    assert!(python <= 100);
    assert_eq!(python, score_relevance("I need python help", &analysis, &config, &vocab));
}

#[test]
fn test_normalization_is_idempotent() {
    for raw in ["Alice Smith", "  ALICE   smith!!", "Jean-Luc (Work)", "~ Maria ~", "Zoë"] {
        let once = normalize_name(raw);
        assert_eq!(normalize_name(&once), once);
    }
}

#[test]
fn test_reordering_keeps_message_counts() {
    let lines = [
        "1/15/2024, 10:30 AM - Alice: first",
        "1/15/2024, 10:31 AM - Bob: second",
        "1/15/2024, 10:32 AM - Alice: third",
        "1/16/2024, 9:00 AM - Alice: fourth",
    ];
    let forward = parse(&lines.join("\n"));
    let backward = parse(&lines.iter().rev().copied().collect::<Vec<_>>().join("\n"));

    for key in ["alice", "bob"] {
        assert_eq!(
            forward.contact(key).unwrap().message_count,
            backward.contact(key).unwrap().message_count
        );
    }
    assert_eq!(forward.date_range, backward.date_range);
    assert!(forward.date_range.start <= forward.date_range.end);
}

#[test]
fn test_search_over_a_group_export() {
    let text = "\
1/15/2024, 9:00 AM - Priya: Happy to help anyone with kubernetes, I run our clusters at work
1/15/2024, 9:02 AM - Priya: kubernetes upgrades are easy once you pin the versions
1/15/2024, 9:03 AM - Tom: Anyone know a good lawyer for contracts?
1/15/2024, 9:05 AM - Priya: Our kubernetes setup uses helm charts for everything
1/15/2024, 9:06 AM - Tom: thanks
";
    let transcript = parse(text);
    let reports = analyze_transcript(&transcript, &InferenceConfig::default(), &Vocabulary::default());
    let hits = rank_contacts(
        "who knows kubernetes",
        &reports,
        &SearchOptions::default(),
        &ScorerConfig::default(),
        &Vocabulary::default(),
    );

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Priya");
    assert!(hits[0].expertise.iter().any(|s| s == "kubernetes"));
    assert!(!hits[0].highlights.is_empty());
}
