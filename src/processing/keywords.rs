//! Job-description keyword extraction and missing-keyword reporting

use crate::processing::lexicon::{HINT_WORDS, PREFERRED_HINTS, REQUIRED_HINTS};
use crate::processing::text_processor::{split_sentences, tokenize, TokenSet};
use serde::{Deserialize, Serialize};

/// Frequency-ranked job tokens that always lead the important-keyword list.
pub const TOP_JD_KEYWORDS: usize = 35;

/// Upper bound on reported missing keywords.
pub const MAX_MISSING_KEYWORDS: usize = 20;

/// Shortest token that counts as a keyword.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Job-description tokens split by how strongly the posting asks for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedKeywords {
    pub required: Vec<String>,
    pub preferred: Vec<String>,
}

/// Classify each job-description sentence as required, preferred or neither
/// and collect its tokens into the matching bucket.
///
/// A sentence carrying both kinds of hint counts as required. The hint words
/// themselves are not keywords.
pub fn extract_weighted_keywords(job_description: &str) -> WeightedKeywords {
    let mut required = TokenSet::new();
    let mut preferred = TokenSet::new();

    for sentence in split_sentences(job_description) {
        let bucket = if REQUIRED_HINTS.is_match(sentence) {
            &mut required
        } else if PREFERRED_HINTS.is_match(sentence) {
            &mut preferred
        } else {
            continue;
        };

        for token in tokenize(sentence) {
            if token.len() >= MIN_KEYWORD_LEN && !HINT_WORDS.contains(token.as_str()) {
                bucket.insert(token);
            }
        }
    }

    WeightedKeywords {
        required: required.iter().map(str::to_string).collect(),
        preferred: preferred.iter().map(str::to_string).collect(),
    }
}

/// Keywords that matter in a job description: the most frequent tokens first,
/// then every other canonical token in first-seen order.
pub fn important_jd_keywords(top_keywords: &[String], jd_tokens: &TokenSet) -> Vec<String> {
    let merged: TokenSet = top_keywords
        .iter()
        .map(String::as_str)
        .chain(jd_tokens.iter())
        .filter(|token| token.len() >= MIN_KEYWORD_LEN)
        .collect();

    merged.iter().map(str::to_string).collect()
}

/// Important job keywords absent from the resume, capped at [`MAX_MISSING_KEYWORDS`].
pub fn missing_keywords(important: &[String], resume_tokens: &TokenSet) -> Vec<String> {
    important
        .iter()
        .filter(|keyword| !resume_tokens.contains(keyword))
        .take(MAX_MISSING_KEYWORDS)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::text_processor::token_set;

    #[test]
    fn test_required_and_preferred_buckets() {
        let jd = "5+ years experience required. AWS and Kubernetes preferred. We ship weekly.";
        let weighted = extract_weighted_keywords(jd);

        assert_eq!(weighted.required, vec!["years", "experience"]);
        assert_eq!(weighted.preferred, vec!["aws", "kubernetes"]);
    }

    #[test]
    fn test_required_wins_when_both_hints_present() {
        let weighted = extract_weighted_keywords("Must know Terraform, Helm is a plus.");

        assert!(weighted.required.contains(&"terraform".to_string()));
        assert!(weighted.required.contains(&"helm".to_string()));
        assert!(weighted.preferred.is_empty());
    }

    #[test]
    fn test_neutral_sentences_contribute_nothing() {
        let weighted = extract_weighted_keywords("We are a friendly team. Lunch is on us!");
        assert_eq!(weighted, WeightedKeywords::default());
    }

    #[test]
    fn test_short_tokens_are_excluded() {
        let weighted = extract_weighted_keywords("Required: Go, R, ML.");
        assert_eq!(weighted.required, vec!["machine learning"]);
    }

    #[test]
    fn test_important_keywords_are_unique_and_ordered() {
        let top = vec!["rust".to_string(), "tokio".to_string()];
        let jd_tokens = token_set("we need tokio and rust and go and axum");
        let important = important_jd_keywords(&top, &jd_tokens);

        assert_eq!(important, vec!["rust", "tokio", "need", "axum"]);
    }

    #[test]
    fn test_missing_keywords_are_capped_and_exclude_resume_tokens() {
        let important: Vec<String> = (0..30).map(|i| format!("skill{}", i)).collect();
        let resume = token_set("skill0 skill5 skill29");
        let missing = missing_keywords(&important, &resume);

        assert_eq!(missing.len(), MAX_MISSING_KEYWORDS);
        assert_eq!(missing[0], "skill1");
        assert!(!missing.contains(&"skill5".to_string()));
    }
}
