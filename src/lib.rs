//! Deterministic ATS scoring library
//!
//! [`compute_ats_score`] compares a resume against a job description and
//! returns a reproducible 0-100 score, a seven-part breakdown and the job
//! keywords the resume is missing.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{AtsError, Result};
pub use processing::ats_scorer::{compute_ats_score, DeterministicScore, ScoreBreakdown};
