//! Deterministic text processing and scoring

pub mod lexicon;
pub mod text_processor;
pub mod topics;
pub mod keywords;
pub mod signals;
pub mod subscores;
pub mod ats_scorer;
pub mod gap;
