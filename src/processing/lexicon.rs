//! Static lookup tables shared by every scoring call
//!
//! Everything here is built once on first use and never written to again.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::{HashMap, HashSet};

/// Words that carry no signal for keyword matching.
pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "you", "with", "are", "this", "that", "from", "have",
        "has", "was", "were", "will", "shall", "than", "then", "but", "not", "all",
        "any", "can", "may", "per", "via", "our", "your", "their", "they", "them",
        "her", "his", "its", "over", "into", "onto", "upon", "who", "what", "where",
        "when", "why", "how", "as", "of", "in", "on", "to", "by", "is", "it", "or",
        "an", "a", "at", "be", "we", "i", "he", "she", "me", "my", "us", "if", "do",
        "does", "did", "done", "also", "etc", "about", "using", "use", "used",
    ]
    .into_iter()
    .collect()
});

/// Canonical skill tokens counted by the skills sub-score.
pub static KNOWN_SKILLS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Programming & data
        "javascript", "typescript", "react", "next.js", "node", "node.js", "express",
        "python", "django", "flask", "java", "spring", "c#", "dotnet", "go", "golang",
        "rust", "ruby", "rails", "php", "laravel", "scala", "kotlin", "swift",
        "objective-c", "html", "css", "sass", "tailwind", "redux", "graphql", "rest",
        "websocket", "rxjs", "vite", "webpack", "babel", "mysql", "postgres",
        "mongodb", "redis", "elasticsearch", "kafka", "rabbitmq", "hadoop", "spark",
        "snowflake", "bigquery", "databricks", "airflow",
        // Cloud & delivery
        "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ansible", "ci/cd",
        "jenkins", "github actions", "gitlab ci", "csharp",
        // ML/AI
        "machine learning", "deep learning", "nlp", "computer vision", "pytorch",
        "tensorflow", "scikit-learn", "pandas", "numpy", "matplotlib",
        // Testing
        "cypress", "playwright", "jest", "mocha", "vitest", "storybook",
    ]
    .into_iter()
    .collect()
});

/// Spelling variants mapped to their canonical token.
pub static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("nextjs", "next.js"),
        ("next", "next.js"),
        ("nodejs", "node"),
        ("node", "node"),
        ("node.js", "node"),
        ("reactjs", "react"),
        ("typescript", "typescript"),
        ("ts", "typescript"),
        ("javascript", "javascript"),
        ("js", "javascript"),
        ("postgresql", "postgres"),
        ("postgre", "postgres"),
        ("gcp", "gcp"),
        ("googlecloud", "gcp"),
        ("googlecloudplatform", "gcp"),
        ("aws", "aws"),
        ("amazonwebservices", "aws"),
        ("azure", "azure"),
        ("microsoftazure", "azure"),
        ("ci", "ci"),
        ("cd", "cd"),
        ("cicd", "ci/cd"),
        ("ci-cd", "ci/cd"),
        ("ci/cd", "ci/cd"),
        ("c#", "csharp"),
        ("csharp", "csharp"),
        (".net", "dotnet"),
        ("dotnet", "dotnet"),
        ("frontend", "frontend"),
        ("front-end", "frontend"),
        ("front end", "frontend"),
        ("backend", "backend"),
        ("back-end", "backend"),
        ("back end", "backend"),
        ("ml", "machine learning"),
        ("dl", "deep learning"),
    ]
    .into_iter()
    .collect()
});

/// Multi-word or punctuated phrases that whitespace tokenization would split apart.
pub static PHRASE_ALIASES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\bnext\s*\.?\s*js\b", "next.js"),
        (r"\bnode\s*\.?\s*js\b", "node"),
        (r"\breact\s*\.?\s*js\b", "react"),
        (r"\bgoogle\s+cloud(\s+platform)?\b", "gcp"),
        (r"\bamazon\s+web\s+services\b", "aws"),
        (r"\bcontinuous\s+integration\b", "ci"),
        (r"\bcontinuous\s+(delivery|deployment)\b", "cd"),
        (r"\bc\s*#", "csharp"),
        (r"\.net\b", "dotnet"),
        (r"\bpostgre?s(ql)?\b", "postgres"),
        (r"\bfront[-\s]?end\b", "frontend"),
        (r"\bback[-\s]?end\b", "backend"),
    ]
    .into_iter()
    .map(|(pattern, canonical)| (case_insensitive(pattern), canonical))
    .collect()
});

/// Broader concepts inferred from any one of their trigger terms.
pub const TOPIC_CLUSTERS: &[(&str, &[&str])] = &[
    (
        "full stack",
        &["full stack", "full-stack", "frontend", "backend", "api", "end-to-end", "mern", "mean", "pern"],
    ),
    (
        "chatbot",
        &[
            "chatbot", "conversational ai", "assistant", "bot", "dialogflow", "rasa",
            "botpress", "langchain", "rag", "prompt", "llm", "gpt", "gemini",
        ],
    ),
    (
        "microservices",
        &[
            "microservice", "microservices", "service mesh", "istio", "grpc",
            "event-driven", "saga", "ddd", "domain-driven",
        ],
    ),
    (
        "cloud",
        &[
            "cloud", "aws", "azure", "gcp", "serverless", "lambda", "cloud functions",
            "app engine", "ecs", "eks", "aks",
        ],
    ),
    (
        "devops",
        &[
            "devops", "ci/cd", "pipeline", "terraform", "kubernetes", "docker", "helm",
            "ansible", "monitoring", "observability",
        ],
    ),
    (
        "data engineering",
        &[
            "etl", "elt", "data pipeline", "airflow", "spark", "kafka", "data warehouse",
            "bigquery", "snowflake", "dbt",
        ],
    ),
    (
        "testing",
        &[
            "unit testing", "integration testing", "e2e", "cypress", "playwright", "jest",
            "qa", "tdd", "bdd",
        ],
    ),
    (
        "security",
        &[
            "oauth", "jwt", "oidc", "csp", "xss", "csrf", "encryption", "tls", "iam",
            "cognito", "keycloak",
        ],
    ),
    (
        "architecture",
        &[
            "scalability", "performance", "availability", "latency", "throughput",
            "cost optimization", "design patterns", "clean architecture",
        ],
    ),
    (
        "mobile",
        &["react native", "flutter", "swift", "kotlin", "android", "ios", "expo"],
    ),
];

/// Resume sections an ATS expects to find.
pub const STANDARD_SECTIONS: &[&str] = &["summary", "experience", "education", "skills"];

/// Verbs that signal measurable impact. Matched as case-insensitive substrings.
pub const IMPACT_VERBS: &[&str] = &[
    "increased", "reduced", "improved", "optimized", "grew", "decreased", "cut",
    "boosted", "accelerated", "streamlined",
];

/// Sentence hints marking mandatory qualifications.
pub static REQUIRED_HINTS: Lazy<Regex> =
    Lazy::new(|| case_insensitive(r"must|required|minimum|need to|requirements|qualifications"));

/// Sentence hints marking optional qualifications.
pub static PREFERRED_HINTS: Lazy<Regex> =
    Lazy::new(|| case_insensitive(r"preferred|nice to have|bonus|plus"));

/// Words of the hint phrases themselves; they never become weighted keywords.
pub static HINT_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "must", "required", "minimum", "need", "requirements", "qualifications",
        "preferred", "nice", "bonus", "plus",
    ]
    .into_iter()
    .collect()
});

pub(crate) fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("Invalid lexicon regex")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_targets_are_lowercase() {
        for canonical in ALIASES.values() {
            assert_eq!(*canonical, canonical.to_lowercase());
        }
    }

    #[test]
    fn test_phrase_aliases_compile_and_match() {
        let matched: Vec<&str> = PHRASE_ALIASES
            .iter()
            .filter(|(re, _)| re.is_match("Built on Google Cloud Platform with Node.js"))
            .map(|(_, canonical)| *canonical)
            .collect();

        assert_eq!(matched, vec!["node", "gcp"]);
    }

    #[test]
    fn test_hint_priority_inputs() {
        assert!(REQUIRED_HINTS.is_match("Minimum 3 years"));
        assert!(PREFERRED_HINTS.is_match("Nice to have: Go"));
        assert!(!REQUIRED_HINTS.is_match("Nice to have: Go"));
    }
}
