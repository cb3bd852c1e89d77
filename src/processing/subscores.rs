//! The seven bounded sub-score calculators
//!
//! Each function is pure and clamps its own result, so every breakdown field
//! stays inside its maximum whatever the inputs look like.

use crate::processing::keywords::WeightedKeywords;
use crate::processing::lexicon::KNOWN_SKILLS;
use crate::processing::text_processor::TokenSet;
use std::collections::BTreeSet;

pub const MUST_HAVE_MAX: u8 = 25;
pub const SKILLS_MAX: u8 = 20;
pub const ROLE_SENIORITY_MAX: u8 = 15;
pub const EXPERIENCE_MAX: u8 = 15;
pub const ACHIEVEMENTS_MAX: u8 = 10;
pub const EDUCATION_CERTS_MAX: u8 = 5;
pub const ATS_STRUCTURE_MAX: u8 = 10;

/// Coverage used when a signal is missing from the job description.
const NEUTRAL_COVERAGE: f64 = 0.5;

/// Years score when neither text states a number of years.
const UNSTATED_YEARS_SCORE: f64 = 7.0;

/// Resume token count an ATS considers a healthy length.
const IDEAL_TOKEN_RANGE: std::ops::RangeInclusive<usize> = 300..=1200;

fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64
}

fn matched_fraction(keywords: &[String], resume_tokens: &TokenSet) -> f64 {
    let matched = keywords.iter().filter(|k| resume_tokens.contains(k)).count();
    ratio(matched, keywords.len())
}

/// Coverage of required (75%) and preferred (25%) job keywords.
pub fn must_have_keywords(
    weighted: &WeightedKeywords,
    important_jd: &[String],
    resume_tokens: &TokenSet,
) -> u8 {
    let required_coverage = if !weighted.required.is_empty() {
        matched_fraction(&weighted.required, resume_tokens)
    } else if !important_jd.is_empty() {
        NEUTRAL_COVERAGE
    } else {
        0.0
    };

    let preferred_coverage = if !weighted.preferred.is_empty() {
        matched_fraction(&weighted.preferred, resume_tokens)
    } else {
        NEUTRAL_COVERAGE
    };

    let raw = 25.0 * (0.75 * required_coverage + 0.25 * preferred_coverage);
    raw.min(MUST_HAVE_MAX as f64).round() as u8
}

/// Known-skill coverage (70%) blended with topic-cluster coverage (30%).
pub fn skills(
    important_jd: &[String],
    resume_tokens: &TokenSet,
    jd_topics: &BTreeSet<&'static str>,
    resume_topics: &BTreeSet<&'static str>,
) -> u8 {
    let jd_skills: Vec<&str> = important_jd
        .iter()
        .map(String::as_str)
        .filter(|k| KNOWN_SKILLS.contains(*k))
        .collect();
    let resume_skills: Vec<&str> = resume_tokens.iter().filter(|k| KNOWN_SKILLS.contains(*k)).collect();

    let skills_base = if !jd_skills.is_empty() {
        let matched = resume_skills.iter().filter(|k| jd_skills.contains(k)).count();
        ratio(matched, jd_skills.len())
    } else if !resume_skills.is_empty() {
        NEUTRAL_COVERAGE
    } else {
        0.0
    };

    let topic_coverage = if !jd_topics.is_empty() {
        ratio(jd_topics.intersection(resume_topics).count(), jd_topics.len())
    } else {
        NEUTRAL_COVERAGE
    };

    let combined = (0.7 * skills_base + 0.3 * topic_coverage).clamp(0.0, 1.0);
    (SKILLS_MAX as f64 * combined).round() as u8
}

/// Five points lost per seniority level of distance.
pub fn role_seniority(jd_level: u8, resume_level: u8) -> u8 {
    let penalty = 5 * jd_level.abs_diff(resume_level) as u32;
    (ROLE_SENIORITY_MAX as u32).saturating_sub(penalty) as u8
}

/// Stated years against the requirement, plus a bonus for dated roles.
pub fn experience(jd_years: Option<u32>, resume_years: Option<u32>, calendar_years: usize) -> u8 {
    let years_score = match (jd_years, resume_years) {
        (Some(jd), Some(resume)) => (resume as f64 / jd as f64).clamp(0.0, 1.0) * 10.0,
        (Some(_), None) => 3.0,
        (None, Some(resume)) => {
            let bonus = if resume >= 5 { 4.0 } else { 2.0 };
            (6.0_f64 + bonus).min(10.0)
        }
        (None, None) => UNSTATED_YEARS_SCORE,
    };

    let roles_score = ((calendar_years as f64 / 4.0).min(1.0) * 5.0).round().min(5.0);

    (years_score + roles_score).min(EXPERIENCE_MAX as f64).round() as u8
}

/// Banded on quantified results and impact verbs.
pub fn achievements(quantified: usize, verbs: usize) -> u8 {
    if quantified >= 5 || (quantified >= 3 && verbs >= 2) {
        10
    } else if quantified >= 3 || (quantified >= 2 && verbs >= 1) {
        7
    } else if quantified >= 1 {
        4
    } else {
        0
    }
}

pub fn education_certs(
    jd_wants_degree: bool,
    resume_has_degree: bool,
    jd_wants_cert: bool,
    resume_has_cert: bool,
) -> u8 {
    let education = match (jd_wants_degree, resume_has_degree) {
        (true, true) => 3,
        (true, false) => 1,
        (false, _) => 2,
    };
    let certs = if jd_wants_cert && resume_has_cert { 2 } else { 0 };

    (education + certs).min(EDUCATION_CERTS_MAX)
}

/// Sections, bullet points and overall length.
pub fn ats_structure(sections_present: usize, bullet_lines: usize, token_count: usize) -> u8 {
    let mut score = 2 * sections_present.min(4) as u8;
    if bullet_lines >= 3 {
        score += 1;
    }
    if IDEAL_TOKEN_RANGE.contains(&token_count) {
        score += 1;
    }
    score.min(ATS_STRUCTURE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::text_processor::token_set;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_must_have_defaults_without_signal() {
        let empty = WeightedKeywords::default();
        let resume = TokenSet::new();

        // Nothing at all in the job description
        assert_eq!(must_have_keywords(&empty, &[], &resume), 3);
        // Keywords exist but no sentence was classified
        assert_eq!(must_have_keywords(&empty, &strings(&["rust"]), &resume), 13);
    }

    #[test]
    fn test_must_have_weighting() {
        let weighted = WeightedKeywords {
            required: strings(&["rust", "tokio"]),
            preferred: strings(&["aws", "kubernetes"]),
        };
        let important = strings(&["rust", "tokio", "aws", "kubernetes"]);

        assert_eq!(must_have_keywords(&weighted, &important, &token_set("rust tokio aws kubernetes")), 25);
        assert_eq!(must_have_keywords(&weighted, &important, &token_set("rust tokio")), 19);
        assert_eq!(must_have_keywords(&weighted, &important, &token_set("aws")), 3);
        assert_eq!(must_have_keywords(&weighted, &important, &TokenSet::new()), 0);
    }

    #[test]
    fn test_skills_blends_topics() {
        let important = strings(&["python", "docker", "kubernetes", "teamwork"]);
        let resume = token_set("python docker");
        let jd_topics: BTreeSet<&'static str> = ["devops", "cloud"].into_iter().collect();
        let resume_topics: BTreeSet<&'static str> = ["devops"].into_iter().collect();

        // 0.7 * 2/3 + 0.3 * 1/2 = 0.6167 -> 12.33
        assert_eq!(skills(&important, &resume, &jd_topics, &resume_topics), 12);
    }

    #[test]
    fn test_skills_without_job_skills() {
        let none = BTreeSet::new();
        assert_eq!(skills(&[], &TokenSet::new(), &none, &none), 3);
        assert_eq!(skills(&[], &token_set("rust"), &none, &none), 10);
    }

    #[test]
    fn test_role_seniority() {
        assert_eq!(role_seniority(2, 2), 15);
        assert_eq!(role_seniority(3, 2), 10);
        assert_eq!(role_seniority(1, 3), 5);
        assert_eq!(role_seniority(3, 0), 0);
        assert_eq!(role_seniority(5, 0), 0);
    }

    #[test]
    fn test_experience_branches() {
        assert_eq!(experience(Some(5), Some(8), 0), 10);
        assert_eq!(experience(Some(6), Some(3), 0), 5);
        assert_eq!(experience(Some(5), None, 0), 3);
        assert_eq!(experience(None, Some(7), 0), 10);
        assert_eq!(experience(None, Some(2), 0), 8);
        assert_eq!(experience(None, None, 0), 7);
        // roles bonus: 2 dated entries -> round(2.5) = 3
        assert_eq!(experience(None, None, 2), 10);
        assert_eq!(experience(Some(5), Some(8), 12), 15);
    }

    #[test]
    fn test_achievement_bands() {
        assert_eq!(achievements(0, 9), 0);
        assert_eq!(achievements(1, 0), 4);
        assert_eq!(achievements(2, 1), 7);
        assert_eq!(achievements(3, 0), 7);
        assert_eq!(achievements(3, 2), 10);
        assert_eq!(achievements(5, 0), 10);
    }

    #[test]
    fn test_education_certs() {
        assert_eq!(education_certs(false, false, false, false), 2);
        assert_eq!(education_certs(true, false, false, false), 1);
        assert_eq!(education_certs(true, true, false, false), 3);
        assert_eq!(education_certs(true, true, true, true), 5);
        assert_eq!(education_certs(false, true, true, false), 2);
        assert_eq!(education_certs(false, false, false, true), 2);
    }

    #[test]
    fn test_ats_structure() {
        assert_eq!(ats_structure(0, 0, 0), 0);
        assert_eq!(ats_structure(4, 5, 500), 10);
        assert_eq!(ats_structure(6, 2, 1500), 8);
        assert_eq!(ats_structure(2, 3, 1200), 6);
    }
}
