//! "Did you mean" hints for missing keywords
//!
//! Purely advisory: a near miss never changes the score.

use crate::processing::text_processor::TokenSet;
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

pub const DEFAULT_NEAR_MISS_THRESHOLD: f64 = 0.88;

/// A missing job keyword and the resume token that most resembles it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearMiss {
    pub keyword: String,
    pub resume_token: String,
    pub similarity: f64,
}

/// For each missing keyword, the closest resume token at or above `threshold`.
///
/// Ties keep the resume token seen first. Keywords with no close token are skipped.
pub fn near_misses(missing: &[String], resume_tokens: &TokenSet, threshold: f64) -> Vec<NearMiss> {
    missing
        .iter()
        .filter_map(|keyword| {
            let mut best: Option<(&str, f64)> = None;

            for token in resume_tokens.iter() {
                if token == keyword {
                    continue;
                }
                let similarity = jaro_winkler(keyword, token);
                if similarity >= threshold && best.map_or(true, |(_, s)| similarity > s) {
                    best = Some((token, similarity));
                }
            }

            best.map(|(token, similarity)| NearMiss {
                keyword: keyword.clone(),
                resume_token: token.to_string(),
                similarity,
            })
        })
        .collect()
}
