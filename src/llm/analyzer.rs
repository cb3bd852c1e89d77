//! Qualitative AI review and its merge with the deterministic score
//!
//! The model's own score is never trusted: once merged, the deterministic
//! score replaces it and the deterministic missing keywords are appended to
//! the model's.

use crate::error::{AtsError, Result};
use crate::llm::prompts::{PromptParams, PromptTemplates};
use crate::processing::ats_scorer::{DeterministicScore, ScoreBreakdown};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Section-by-section review returned by the AI model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualitativeAnalysis {
    /// Model's own 0-100 estimate
    pub score: f64,
    /// Section name to recommendations
    pub sections: BTreeMap<String, Vec<String>>,
    pub missing_keywords: Vec<String>,
    /// HTML or Markdown rewrite of the resume
    pub optimized_resume: String,
}

impl QualitativeAnalysis {
    /// Parse a model reply.
    ///
    /// Tries the whole reply as JSON, then the span from the first `{` to the
    /// last `}` (fenced or chatty replies). Fields of the wrong type fall back
    /// to their defaults.
    pub fn from_model_output(text: &str) -> Result<Self> {
        let value = match serde_json::from_str::<Value>(text.trim()) {
            Ok(value) => value,
            Err(_) => {
                let block = outermost_json_block(text).ok_or_else(|| {
                    AtsError::Analysis("Model reply contains no JSON object".to_string())
                })?;
                serde_json::from_str::<Value>(block)?
            }
        };

        Ok(Self::from_value(&value))
    }

    fn from_value(value: &Value) -> Self {
        let score = match value.get("score") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        };
        let score = if score.is_finite() { score.clamp(0.0, 100.0) } else { 0.0 };

        let sections = value
            .get("sections")
            .and_then(Value::as_object)
            .map(|object| {
                object
                    .iter()
                    .map(|(section, items)| (section.clone(), string_array(items)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            score,
            sections,
            missing_keywords: value.get("missingKeywords").map(string_array).unwrap_or_default(),
            optimized_resume: value
                .get("optimizedResume")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

fn outermost_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn string_array(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

/// A text-generation backend that answers a prompt.
pub trait AnalysisProvider {
    fn generate(&self, prompt: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Drives an [`AnalysisProvider`] through the review prompt.
pub struct QualitativeAnalyzer<P> {
    provider: P,
    prompt_templates: PromptTemplates,
}

impl<P: AnalysisProvider> QualitativeAnalyzer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            prompt_templates: PromptTemplates::default(),
        }
    }

    /// Ask for a review, retrying once with a stricter instruction when the
    /// first reply cannot be parsed.
    pub async fn analyze(&self, resume_text: &str, job_description: &str) -> Result<QualitativeAnalysis> {
        let params = PromptParams {
            resume_content: resume_text.to_string(),
            job_content: job_description.to_string(),
        };

        let reply = self.provider.generate(&self.prompt_templates.render_analysis(&params)).await?;
        match QualitativeAnalysis::from_model_output(&reply) {
            Ok(analysis) => Ok(analysis),
            Err(e) => {
                warn!("Unparseable model reply ({}), retrying with strict JSON instruction", e);
                let retry = self
                    .provider
                    .generate(&self.prompt_templates.render_strict_retry(&params))
                    .await?;
                QualitativeAnalysis::from_model_output(&retry)
            }
        }
    }
}

/// AI review with the deterministic score and breakdown folded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedAnalysis {
    pub score: u8,
    pub sections: BTreeMap<String, Vec<String>>,
    pub missing_keywords: Vec<String>,
    pub optimized_resume: String,
    pub breakdown: ScoreBreakdown,
}

pub fn merge_analysis(ai: QualitativeAnalysis, deterministic: &DeterministicScore) -> MergedAnalysis {
    debug!(
        "merging AI score {} with deterministic score {}",
        ai.score, deterministic.score
    );

    let mut seen = HashSet::new();
    let missing_keywords = ai
        .missing_keywords
        .into_iter()
        .chain(deterministic.missing_keywords.iter().cloned())
        .filter(|keyword| seen.insert(keyword.clone()))
        .collect();

    MergedAnalysis {
        score: deterministic.score,
        sections: ai.sections,
        missing_keywords,
        optimized_resume: ai.optimized_resume,
        breakdown: deterministic.breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ats_scorer::compute_ats_score;
    use std::sync::Mutex;

    struct ScriptedProvider {
        replies: Mutex<Vec<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().rev().map(|r| r.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl AnalysisProvider for ScriptedProvider {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| AtsError::Analysis("no scripted reply left".to_string()))
        }
    }

    #[test]
    fn test_parse_strict_json() {
        let analysis = QualitativeAnalysis::from_model_output(
            r#"{"score": 72, "sections": {"Skills": ["Add Terraform"]}, "missingKeywords": ["terraform"], "optimizedResume": "<h1>Jane</h1>"}"#,
        )
        .unwrap();

        assert_eq!(analysis.score, 72.0);
        assert_eq!(analysis.sections["Skills"], vec!["Add Terraform"]);
        assert_eq!(analysis.missing_keywords, vec!["terraform"]);
        assert_eq!(analysis.optimized_resume, "<h1>Jane</h1>");
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply = "Here you go:\n```json\n{\"score\": \"88\", \"missingKeywords\": [\"helm\"]}\n```";
        let analysis = QualitativeAnalysis::from_model_output(reply).unwrap();

        assert_eq!(analysis.score, 88.0);
        assert_eq!(analysis.missing_keywords, vec!["helm"]);
        assert!(analysis.sections.is_empty());
        assert_eq!(analysis.optimized_resume, "");
    }

    #[test]
    fn test_score_is_clamped_and_bad_fields_default() {
        let analysis = QualitativeAnalysis::from_model_output(
            r#"{"score": 140, "sections": "none", "missingKeywords": ["go", 3, null]}"#,
        )
        .unwrap();
        assert_eq!(analysis.score, 100.0);
        assert!(analysis.sections.is_empty());
        assert_eq!(analysis.missing_keywords, vec!["go"]);

        let negative = QualitativeAnalysis::from_model_output(r#"{"score": -5}"#).unwrap();
        assert_eq!(negative.score, 0.0);
        let garbage = QualitativeAnalysis::from_model_output(r#"{"score": "high"}"#).unwrap();
        assert_eq!(garbage.score, 0.0);
    }

    #[test]
    fn test_reply_without_json_is_an_error() {
        assert!(matches!(
            QualitativeAnalysis::from_model_output("I cannot help with that."),
            Err(AtsError::Analysis(_))
        ));
        assert!(QualitativeAnalysis::from_model_output("{ not json }").is_err());
    }

    #[test]
    fn test_merge_overrides_score_and_dedupes_keywords() {
        let deterministic = compute_ats_score("Rust developer", "Required: Rust, Kafka and Redis.");
        assert!(deterministic.missing_keywords.contains(&"kafka".to_string()));

        let ai = QualitativeAnalysis {
            score: 95.0,
            sections: BTreeMap::from([("Summary".to_string(), vec!["Lead with Rust".to_string()])]),
            missing_keywords: vec!["event streaming".to_string(), "kafka".to_string()],
            optimized_resume: "# Resume".to_string(),
        };

        let merged = merge_analysis(ai, &deterministic);

        assert_eq!(merged.score, deterministic.score);
        assert_eq!(merged.breakdown, deterministic.breakdown);
        assert_eq!(merged.missing_keywords[0], "event streaming");
        assert_eq!(merged.missing_keywords[1], "kafka");
        assert_eq!(
            merged.missing_keywords.iter().filter(|k| k.as_str() == "kafka").count(),
            1
        );
        assert!(merged.missing_keywords.contains(&"redis".to_string()));
        assert_eq!(merged.sections["Summary"], vec!["Lead with Rust"]);
        assert_eq!(merged.optimized_resume, "# Resume");
    }

    #[tokio::test]
    async fn test_analyzer_retries_once_on_bad_reply() {
        let provider = ScriptedProvider::new(&["Sorry, here is prose.", r#"{"score": 61}"#]);
        let analyzer = QualitativeAnalyzer::new(provider);

        let analysis = analyzer.analyze("Rust developer", "Rust role").await.unwrap();
        assert_eq!(analysis.score, 61.0);

        let prompts = analyzer.provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].ends_with("without code fences or commentary."));
    }

    #[tokio::test]
    async fn test_analyzer_gives_up_after_second_bad_reply() {
        let analyzer = QualitativeAnalyzer::new(ScriptedProvider::new(&["nope", "still nope"]));
        assert!(analyzer.analyze("resume", "job").await.is_err());
    }
}
