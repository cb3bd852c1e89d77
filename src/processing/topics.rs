//! Topic-cluster detection
//!
//! A topic is present in a text when any one of its trigger terms appears as a
//! whole word (or whole phrase) in the normalized text.

use crate::processing::lexicon::TOPIC_CLUSTERS;
use crate::processing::text_processor::normalize;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

struct TopicPatterns {
    topic: &'static str,
    triggers: Vec<Regex>,
}

static COMPILED_TOPICS: Lazy<Vec<TopicPatterns>> = Lazy::new(|| {
    TOPIC_CLUSTERS
        .iter()
        .map(|(topic, terms)| TopicPatterns {
            topic,
            triggers: terms.iter().map(|term| trigger_pattern(term)).collect(),
        })
        .collect()
});

/// Escape a trigger term and let any internal whitespace match a whitespace run.
fn trigger_pattern(term: &str) -> Regex {
    let body = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    Regex::new(&format!(r"(?i)\b{}\b", body)).expect("Invalid topic trigger regex")
}

/// Names of all topics whose triggers appear in `text`.
pub fn detect_topics(text: &str) -> BTreeSet<&'static str> {
    let normalized = normalize(text);

    COMPILED_TOPICS
        .iter()
        .filter(|topic| topic.triggers.iter().any(|re| re.is_match(&normalized)))
        .map(|topic| topic.topic)
        .collect()
}
