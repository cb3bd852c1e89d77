//! Report structure shared by every output format

use crate::llm::analyzer::MergedAnalysis;
use crate::processing::ats_scorer::DeterministicScore;
use crate::processing::gap::NearMiss;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one `score` run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub ats: DeterministicScore,

    /// One-line reading of the score
    pub verdict: String,

    /// Components at or above 80% of their maximum
    pub strengths: Vec<ComponentScore>,

    /// Components below half their maximum, most points lost first
    pub improvement_areas: Vec<ComponentScore>,

    /// Present when an AI review was supplied
    pub analysis: Option<MergedAnalysis>,

    /// "Did you mean" hints for missing keywords
    pub near_misses: Vec<NearMiss>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub label: String,
    pub value: u8,
    pub max: u8,
}

impl ComponentScore {
    pub fn points_lost(&self) -> u8 {
        self.max.saturating_sub(self.value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub scorer_version: String,
    pub resume_file: String,
    pub job_file: String,
    pub processing_time_ms: u64,
}

impl ScoreReport {
    pub fn new(
        ats: DeterministicScore,
        analysis: Option<MergedAnalysis>,
        near_misses: Vec<NearMiss>,
        resume_file: &str,
        job_file: &str,
        processing_time_ms: u64,
    ) -> Self {
        let components: Vec<ComponentScore> = ats
            .breakdown
            .components()
            .iter()
            .map(|(label, value, max)| ComponentScore {
                label: label.to_string(),
                value: *value,
                max: *max,
            })
            .collect();

        let strengths = components
            .iter()
            .filter(|c| c.value as u32 * 5 >= c.max as u32 * 4)
            .cloned()
            .collect();

        let mut improvement_areas: Vec<ComponentScore> = components
            .into_iter()
            .filter(|c| (c.value as u32) * 2 < c.max as u32)
            .collect();
        improvement_areas.sort_by(|a, b| b.points_lost().cmp(&a.points_lost()));

        Self {
            verdict: verdict_for(ats.score).to_string(),
            ats,
            strengths,
            improvement_areas,
            analysis,
            near_misses,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                scorer_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: resume_file.to_string(),
                job_file: job_file.to_string(),
                processing_time_ms,
            },
        }
    }

    /// Missing keywords to show: the merged list when an AI review is present.
    pub fn missing_keywords(&self) -> &[String] {
        match &self.analysis {
            Some(analysis) => &analysis.missing_keywords,
            None => &self.ats.missing_keywords,
        }
    }
}

pub fn verdict_for(score: u8) -> &'static str {
    match score {
        80..=100 => "Strong match: likely to pass ATS screening",
        65..=79 => "Good match: a few targeted edits would help",
        50..=64 => "Partial match: important keywords or signals are missing",
        _ => "Weak match: significant tailoring needed",
    }
}
