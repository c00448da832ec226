use std::collections::HashMap;

use crate::vocabulary::Vocabulary;

use super::InferenceConfig;
use super::tokenize::sentences;

/// Shortest topic kept, exclusive
const MIN_TOPIC_CHARS: usize = 3;

/// Proper-noun topics: runs of capitalized words, ranked by how often they recur
///
/// A lone capitalized word opening a sentence is ignored, since that capital
/// says nothing about the word.
pub fn extract_topics(contents: &[&str], config: &InferenceConfig, vocabulary: &Vocabulary) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for content in contents {
        for sentence in content.lines().flat_map(|line| sentences(line)) {
            for topic in capitalized_runs(sentence, vocabulary) {
                match index.get(&topic) {
                    Some(&i) => counts[i].1 += 1,
                    None => {
                        index.insert(topic.clone(), counts.len());
                        counts.push((topic, 1));
                    }
                }
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(config.max_topics)
        .map(|(topic, _)| topic)
        .collect()
}

fn capitalized_runs(sentence: &str, vocabulary: &Vocabulary) -> Vec<String> {
    let mut topics = Vec::new();
    let mut run: Vec<String> = Vec::new();
    let mut run_start = 0;

    let words: Vec<&str> = sentence
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .collect();

    for (position, word) in words.iter().enumerate() {
        if is_proper(word, vocabulary) {
            if run.is_empty() {
                run_start = position;
            }
            run.push(word.to_lowercase());
        } else {
            flush(&mut run, run_start, &mut topics);
        }
    }
    flush(&mut run, run_start, &mut topics);

    topics
}

fn is_proper(word: &str, vocabulary: &Vocabulary) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
        && word.chars().any(char::is_alphabetic)
        && !vocabulary.is_stopword(&word.to_lowercase())
}

fn flush(run: &mut Vec<String>, run_start: usize, topics: &mut Vec<String>) {
    let sentence_initial_single = run_start == 0 && run.len() == 1;
    if !run.is_empty() && !sentence_initial_single {
        let topic = run.join(" ");
        if topic.chars().count() > MIN_TOPIC_CHARS {
            topics.push(topic);
        }
    }
    run.clear();
}
