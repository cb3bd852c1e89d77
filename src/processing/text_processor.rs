//! Text normalization, tokenization and canonicalization

use crate::processing::lexicon::{ALIASES, PHRASE_ALIASES, STOPWORDS};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Symbols that stay meaningful inside technical terms (`c#`, `ci/cd`, `next.js`, `c++`).
const KEPT_SYMBOLS: [char; 5] = ['+', '.', '#', '/', '-'];

static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("Invalid sentence regex"));

/// Insertion-ordered set of canonical tokens.
///
/// Membership checks go through the hash set; iteration follows first
/// insertion so that everything derived from it is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token, returning `false` if it was already present.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if self.members.contains(&token) {
            return false;
        }
        self.members.insert(token.clone());
        self.order.push(token);
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.members.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TokenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TokenSet::new();
        for token in iter {
            set.insert(token);
        }
        set
    }
}

/// Lowercase the text, blank out noise characters and collapse whitespace.
///
/// Only ASCII letters, digits and `+ . # / -` survive. Idempotent.
pub fn normalize(text: &str) -> String {
    let blanked: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || KEPT_SYMBOLS.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    blanked.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map a raw token onto its canonical spelling, if the alias table knows one.
pub fn canonicalize_token(word: &str) -> String {
    if let Some(canonical) = ALIASES.get(word) {
        return canonical.to_string();
    }

    let compact: String = word.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    match ALIASES.get(compact.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => word.to_string(),
    }
}

/// Canonical tokens in text order, duplicates kept.
///
/// Sentence-final periods are trimmed before the alias lookup. Tokens shorter
/// than two characters and stopwords are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .map(|w| w.trim_end_matches('.'))
        .filter(|w| !w.is_empty())
        .map(canonicalize_token)
        .filter(|w| w.len() >= 2 && !STOPWORDS.contains(w.as_str()))
        .collect()
}

/// Deduplicated canonical tokens of a text.
pub fn token_set(text: &str) -> TokenSet {
    tokenize(text).into_iter().collect()
}

/// Add the canonical token of every phrase alias found in the raw text.
pub fn enrich_with_phrase_aliases(raw_text: &str, tokens: &mut TokenSet) {
    for (pattern, canonical) in PHRASE_ALIASES.iter() {
        if pattern.is_match(raw_text) {
            tokens.insert(*canonical);
        }
    }
}

/// Token set of a raw text with its phrase aliases already added.
pub fn enriched_token_set(raw_text: &str) -> TokenSet {
    let mut tokens = token_set(raw_text);
    enrich_with_phrase_aliases(raw_text, &mut tokens);
    tokens
}

/// Most frequent tokens of length three or more, ties kept in first-seen order.
pub fn top_keywords(text: &str, limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text) {
        match index.get(&token) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(token.clone(), counts.len());
                counts.push((token, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .map(|(token, _)| token)
        .filter(|token| token.len() >= 3)
        .take(limit)
        .collect()
}

/// Split raw text after sentence-ending punctuation that is followed by whitespace.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for mat in SENTENCE_BREAK.find_iter(text) {
        // The punctuation mark is a single ASCII byte
        sentences.push(&text[start..mat.start() + 1]);
        start = mat.end();
    }
    sentences.push(&text[start..]);

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_noise() {
        assert_eq!(
            normalize("  Senior   C#/.NET Dev (Remote)!\n\tCI/CD, Node.js & C++ "),
            "senior c#/.net dev remote ci/cd node.js c++"
        );
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("¡¿ — "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "Led a team of 5 engineers; cut costs by 30%.",
            "<p>Résumé &amp; cover-letter</p>",
            "ALL CAPS\r\nWINDOWS LINES",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_canonicalize_token() {
        assert_eq!(canonicalize_token("nodejs"), "node");
        assert_eq!(canonicalize_token("node.js"), "node");
        assert_eq!(canonicalize_token("postgresql"), "postgres");
        assert_eq!(canonicalize_token("c#"), "csharp");
        // compacted lookup
        assert_eq!(canonicalize_token("ci.cd"), "ci/cd");
        assert_eq!(canonicalize_token("react.js"), "react");
        assert_eq!(canonicalize_token("rust"), "rust");
    }

    #[test]
    fn test_tokenization() {
        let tokens = tokenize("I use Rust and TS with the ML team at a startup");

        assert_eq!(tokens, vec!["rust", "typescript", "machine learning", "team", "startup"]);
    }

    #[test]
    fn test_sentence_periods_do_not_stick_to_tokens() {
        let tokens = tokenize("Worked with AWS. Migrated to Node.js. Knows .NET.");

        assert_eq!(tokens, vec!["worked", "aws", "migrated", "node", "knows", "dotnet"]);
    }

    #[test]
    fn test_tokenize_keeps_duplicates_but_token_set_does_not() {
        let text = "Python python PYTHON django";
        assert_eq!(tokenize(text).len(), 4);

        let set = token_set(text);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["python", "django"]);
    }

    #[test]
    fn test_phrase_enrichment_is_additive() {
        let raw = "Shipped front end features on Amazon Web Services using Next JS";
        let mut set = token_set(raw);
        let before = set.len();

        enrich_with_phrase_aliases(raw, &mut set);

        assert!(set.contains("frontend"));
        assert!(set.contains("aws"));
        assert!(set.contains("next.js"));
        assert!(set.len() >= before);
        assert!(set.contains("shipped"));
    }

    #[test]
    fn test_top_keywords_orders_by_frequency_then_first_seen() {
        let text = "docker kubernetes docker terraform kubernetes docker go aws";
        let top = top_keywords(text, 3);

        assert_eq!(top, vec!["docker", "kubernetes", "terraform"]);
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("Must know Rust. Go is a plus!  Apply now?\nThanks");
        assert_eq!(
            sentences,
            vec!["Must know Rust.", "Go is a plus!", "Apply now?", "Thanks"]
        );

        assert_eq!(split_sentences(""), vec![""]);
        assert_eq!(split_sentences("v1.2 released"), vec!["v1.2 released"]);
    }
}
