//! Detectors for the resume and job-description signals the sub-scores read

use crate::processing::lexicon::{case_insensitive, IMPACT_VERBS, STANDARD_SECTIONS};
use crate::processing::text_processor::normalize;
use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Seniority assumed when a text names no level.
pub const DEFAULT_SENIORITY: u8 = 2;

/// Level patterns in priority order: the first one that matches wins.
static SENIORITY_LEVELS: Lazy<Vec<(Regex, u8)>> = Lazy::new(|| {
    [
        (r"principal|staff\b", 5),
        (r"lead\b|tech lead|team lead", 4),
        (r"senior\b|sr\.", 3),
        (r"mid\b|intermediate\b", 2),
        (r"junior\b|jr\.", 1),
        (r"intern\b|entry\s*level", 0),
    ]
    .into_iter()
    .map(|(pattern, level)| (Regex::new(pattern).expect("Invalid seniority regex"), level))
    .collect()
});

static YEARS: Lazy<Regex> =
    Lazy::new(|| case_insensitive(r"(\d{1,2})\s*\+?\s*(?:years|yrs)"));

static CALENDAR_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b20\d{2}\b").expect("Invalid calendar year regex"));

static QUANTIFIED_IMPACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+\s?%|\$\s?\d+[kKmM]?\b|\b\d+\s?(?:x|times)\b")
        .expect("Invalid quantified impact regex")
});

static IMPACT_VERB_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostFirst)
        .build(IMPACT_VERBS)
        .expect("Failed to build impact verb matcher")
});

static DEGREE_REQUIREMENT: Lazy<Regex> = Lazy::new(|| case_insensitive(r"bachelor|master|phd|degree"));

static DEGREE_HELD: Lazy<Regex> = Lazy::new(|| {
    case_insensitive(r"bachelor|\bb\.?s\b|master|\bm\.?s\b|phd|b\.tech|m\.tech|degree")
});

static CERTIFICATION: Lazy<Regex> = Lazy::new(|| {
    case_insensitive(
        r"\b(?:aws|azure|gcp)\b.*\bcertified\b|\bpmp\b|\bscrum\s+master\b|\bcism\b|\bcissp\b|\bckad?\b",
    )
});

static BULLET_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[-*•]\s+").expect("Invalid bullet regex"));

/// Ordinal seniority of a text: 0 intern .. 5 principal/staff.
pub fn seniority_level(text: &str) -> u8 {
    let normalized = normalize(text);

    SENIORITY_LEVELS
        .iter()
        .find(|(pattern, _)| pattern.is_match(&normalized))
        .map(|(_, level)| *level)
        .unwrap_or(DEFAULT_SENIORITY)
}

/// Largest "N years" / "N yrs" figure stated in the text.
///
/// A stated zero carries no signal and is treated as absent.
pub fn stated_years(text: &str) -> Option<u32> {
    YEARS
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .filter(|years| *years > 0)
}

/// Number of 20xx calendar years mentioned, a rough proxy for listed roles.
pub fn calendar_year_mentions(text: &str) -> usize {
    CALENDAR_YEAR.find_iter(text).count()
}

/// Percentages, currency amounts and "N x" / "N times" multipliers.
pub fn quantified_impacts(text: &str) -> usize {
    QUANTIFIED_IMPACT.find_iter(text).count()
}

pub fn impact_verbs(text: &str) -> usize {
    IMPACT_VERB_MATCHER.find_iter(text).count()
}

pub fn mentions_degree_requirement(job_description: &str) -> bool {
    DEGREE_REQUIREMENT.is_match(job_description)
}

pub fn shows_degree(resume: &str) -> bool {
    DEGREE_HELD.is_match(resume)
}

/// Cloud "... certified", PMP, Scrum Master, CISM, CISSP, CKA, CKAD.
pub fn mentions_certification(text: &str) -> bool {
    CERTIFICATION.is_match(text)
}

/// How many of the standard resume sections appear in the text.
pub fn standard_sections_present(resume: &str) -> usize {
    let normalized = normalize(resume);
    STANDARD_SECTIONS
        .iter()
        .filter(|section| normalized.contains(*section))
        .count()
}

/// Lines starting with `-`, `*` or `•` followed by whitespace.
pub fn bullet_lines(text: &str) -> usize {
    text.lines().filter(|line| BULLET_LINE.is_match(line)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seniority_levels() {
        assert_eq!(seniority_level("Principal Engineer"), 5);
        assert_eq!(seniority_level("Staff engineer"), 5);
        assert_eq!(seniority_level("Tech Lead, payments"), 4);
        assert_eq!(seniority_level("Senior Backend Developer"), 3);
        assert_eq!(seniority_level("Sr. developer"), 3);
        assert_eq!(seniority_level("Intermediate analyst"), 2);
        assert_eq!(seniority_level("Junior QA"), 1);
        assert_eq!(seniority_level("Summer intern"), 0);
        assert_eq!(seniority_level("Entry level role"), 0);
        assert_eq!(seniority_level("Software engineer"), DEFAULT_SENIORITY);
        assert_eq!(seniority_level(""), DEFAULT_SENIORITY);
    }

    #[test]
    fn test_seniority_priority_order() {
        // Both present: the higher-priority pattern decides
        assert_eq!(seniority_level("Senior engineer reporting to the team lead"), 4);
        assert_eq!(seniority_level("International logistics"), DEFAULT_SENIORITY);
    }

    #[test]
    fn test_stated_years() {
        assert_eq!(stated_years("5+ years experience, 3 yrs with Go"), Some(5));
        assert_eq!(stated_years("10 Years in fintech"), Some(10));
        assert_eq!(stated_years("0 years required"), None);
        assert_eq!(stated_years("a few years"), None);
        assert_eq!(stated_years(""), None);
    }

    #[test]
    fn test_calendar_years() {
        assert_eq!(calendar_year_mentions("2019 - 2021, then 2022 - present"), 3);
        assert_eq!(calendar_year_mentions("1999 and 20234"), 0);
    }

    #[test]
    fn test_quantified_impacts() {
        let text = "Grew revenue 40% and saved $50k; 3x faster builds, 2 times fewer pages.";
        assert_eq!(quantified_impacts(text), 4);
        assert_eq!(quantified_impacts("no numbers here"), 0);
    }

    #[test]
    fn test_impact_verbs_case_insensitive() {
        assert_eq!(impact_verbs("Increased uptime, REDUCED cost, streamlined deploys"), 3);
        assert_eq!(impact_verbs(""), 0);
    }

    #[test]
    fn test_degree_and_certification_detection() {
        assert!(mentions_degree_requirement("Bachelor's degree in CS"));
        assert!(!mentions_degree_requirement("Self-taught welcome"));
        assert!(shows_degree("B.S. Computer Science"));
        assert!(shows_degree("MSc? No, an M.S. in Physics"));
        assert!(!shows_degree("Built systems and jobs"));
        assert!(mentions_certification("AWS Solutions Architect – Certified"));
        assert!(mentions_certification("CKAD, 2023"));
        assert!(!mentions_certification("Used AWS daily"));
        assert!(mentions_certification("Certified Scrum  Master, CKA"));
        assert!(!mentions_certification("Won a hackathon"));
        assert!(!mentions_certification("stackable components"));
    }

    #[test]
    fn test_sections_and_bullets() {
        let resume = "SUMMARY\nBackend dev\n\nWork Experience\n- Built APIs\n* Ran on-call\n• Mentored\n-not a bullet\n\nSkills\nRust";
        assert_eq!(standard_sections_present(resume), 3);
        assert_eq!(bullet_lines(resume), 3);
    }
}
