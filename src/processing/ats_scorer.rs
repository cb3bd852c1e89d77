//! Deterministic ATS scoring of a resume against a job description
//!
//! The whole pipeline is a single pure pass: the same two texts always give
//! the same [`DeterministicScore`], down to the order of the missing keywords.

use crate::processing::keywords::{
    extract_weighted_keywords, important_jd_keywords, missing_keywords, WeightedKeywords,
    TOP_JD_KEYWORDS,
};
use crate::processing::signals;
use crate::processing::subscores;
use crate::processing::text_processor::{
    enriched_token_set, normalize, tokenize, top_keywords, TokenSet,
};
use crate::processing::topics::detect_topics;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Score, breakdown and keyword gaps for one resume/job pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeterministicScore {
    /// Sum of the breakdown, clamped to 0-100
    pub score: u8,
    /// Important job keywords the resume lacks, most important first (at most 20)
    pub missing_keywords: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// The seven bounded components of the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// 0-25
    pub must_have_keywords: u8,
    /// 0-20
    pub skills: u8,
    /// 0-15
    pub role_seniority: u8,
    /// 0-15
    pub experience: u8,
    /// 0-10
    pub achievements: u8,
    /// 0-5
    pub education_certs: u8,
    /// 0-10
    pub ats_structure: u8,
}

impl ScoreBreakdown {
    /// Sum of all components, clamped to 0-100.
    pub fn total(&self) -> u8 {
        let sum = self.must_have_keywords as u32
            + self.skills as u32
            + self.role_seniority as u32
            + self.experience as u32
            + self.achievements as u32
            + self.education_certs as u32
            + self.ats_structure as u32;
        sum.min(100) as u8
    }

    /// `(label, value, maximum)` for each component, in display order.
    pub fn components(&self) -> [(&'static str, u8, u8); 7] {
        [
            ("Must-have keywords", self.must_have_keywords, subscores::MUST_HAVE_MAX),
            ("Skills", self.skills, subscores::SKILLS_MAX),
            ("Role & seniority", self.role_seniority, subscores::ROLE_SENIORITY_MAX),
            ("Experience", self.experience, subscores::EXPERIENCE_MAX),
            ("Achievements", self.achievements, subscores::ACHIEVEMENTS_MAX),
            ("Education & certifications", self.education_certs, subscores::EDUCATION_CERTS_MAX),
            ("ATS structure", self.ats_structure, subscores::ATS_STRUCTURE_MAX),
        ]
    }
}

/// Everything derived from the two texts before any sub-score is computed.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    pub resume_text: &'a str,
    pub job_text: &'a str,
    pub resume_normalized: String,
    pub job_normalized: String,
    /// Resume tokens after phrase-alias enrichment
    pub resume_tokens: TokenSet,
    /// Job tokens after phrase-alias enrichment
    pub job_tokens: TokenSet,
    pub important_jd: Vec<String>,
    pub weighted: WeightedKeywords,
    pub resume_topics: BTreeSet<&'static str>,
    pub job_topics: BTreeSet<&'static str>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(resume_text: &'a str, job_text: &'a str) -> Self {
        let resume_normalized = normalize(resume_text);
        let job_normalized = normalize(job_text);

        let job_top = top_keywords(&job_normalized, TOP_JD_KEYWORDS);

        let resume_tokens = enriched_token_set(resume_text);
        let job_tokens = enriched_token_set(job_text);

        let important_jd = important_jd_keywords(&job_top, &job_tokens);
        let weighted = extract_weighted_keywords(job_text);

        Self {
            resume_text,
            job_text,
            resume_normalized,
            job_normalized,
            resume_tokens,
            job_tokens,
            important_jd,
            weighted,
            resume_topics: detect_topics(resume_text),
            job_topics: detect_topics(job_text),
        }
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        let must_have_keywords =
            subscores::must_have_keywords(&self.weighted, &self.important_jd, &self.resume_tokens);
        debug!(
            "must-have keywords: {} ({} required, {} preferred)",
            must_have_keywords,
            self.weighted.required.len(),
            self.weighted.preferred.len()
        );

        let skills = subscores::skills(
            &self.important_jd,
            &self.resume_tokens,
            &self.job_topics,
            &self.resume_topics,
        );
        debug!(
            "skills: {} (job topics {:?}, resume topics {:?})",
            skills, self.job_topics, self.resume_topics
        );

        let job_level = signals::seniority_level(self.job_text);
        let resume_level = signals::seniority_level(self.resume_text);
        let role_seniority = subscores::role_seniority(job_level, resume_level);
        debug!("role seniority: {} (job level {}, resume level {})", role_seniority, job_level, resume_level);

        let job_years = signals::stated_years(&self.job_normalized);
        let resume_years = signals::stated_years(&self.resume_normalized);
        let dated_roles = signals::calendar_year_mentions(self.resume_text);
        let experience = subscores::experience(job_years, resume_years, dated_roles);
        debug!(
            "experience: {} (job years {:?}, resume years {:?}, dated roles {})",
            experience, job_years, resume_years, dated_roles
        );

        let quantified = signals::quantified_impacts(self.resume_text);
        let verbs = signals::impact_verbs(self.resume_text);
        let achievements = subscores::achievements(quantified, verbs);
        debug!("achievements: {} ({} quantified, {} impact verbs)", achievements, quantified, verbs);

        let education_certs = subscores::education_certs(
            signals::mentions_degree_requirement(self.job_text),
            signals::shows_degree(self.resume_text),
            signals::mentions_certification(self.job_text),
            signals::mentions_certification(self.resume_text),
        );
        debug!("education & certifications: {}", education_certs);

        let sections = signals::standard_sections_present(self.resume_text);
        let bullets = signals::bullet_lines(self.resume_text);
        let token_count = tokenize(self.resume_text).len();
        let ats_structure = subscores::ats_structure(sections, bullets, token_count);
        debug!(
            "ats structure: {} ({} sections, {} bullets, {} tokens)",
            ats_structure, sections, bullets, token_count
        );

        ScoreBreakdown {
            must_have_keywords,
            skills,
            role_seniority,
            experience,
            achievements,
            education_certs,
            ats_structure,
        }
    }

    pub fn missing_keywords(&self) -> Vec<String> {
        missing_keywords(&self.important_jd, &self.resume_tokens)
    }
}

/// Score a resume against a job description.
///
/// Never fails: weak or absent signals fall back to fixed defaults, and empty
/// texts are valid input.
pub fn compute_ats_score(resume_text: &str, job_description_text: &str) -> DeterministicScore {
    let context = ScoringContext::new(resume_text, job_description_text);
    let breakdown = context.breakdown();
    let score = breakdown.total();
    debug!("ats score: {}", score);

    DeterministicScore {
        score,
        missing_keywords: context.missing_keywords(),
        breakdown,
    }
}
