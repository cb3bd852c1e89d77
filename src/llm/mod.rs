//! AI review integration: prompt, reply parsing and merge with the deterministic score

pub mod prompts;
pub mod analyzer;

pub use analyzer::{merge_analysis, AnalysisProvider, MergedAnalysis, QualitativeAnalysis, QualitativeAnalyzer};
