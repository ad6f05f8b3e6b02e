//! Sinscreen Core
//!
//! Core types, configuration, and error handling shared across Sinscreen
//! components.
//!
//! This crate provides:
//! - Common types for tokens, matches, scorer signals, and analysis results
//! - Error types and result handling
//! - The engine configuration surface with production-tuned defaults

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    ClassificationThresholds, ContextConfig, EngineConfig, EnsembleWeights, FuzzyConfig,
    LearnedConfig, SequenceConfig,
};
pub use error::{Error, Result};
pub use types::{
    clamp01, normalize_text, AnalysisResult, Classification, ContextSignals, Language,
    LearnedLabel, LearnedPrediction, MatchRecord, MatchType, ModelsUsed, SequenceSignals,
    SignalBreakdown, SubwordSignals, TermCategory, Token,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        clamp01, normalize_text, AnalysisResult, Classification, Language, MatchRecord,
        MatchType, TermCategory, Token,
    };
}
