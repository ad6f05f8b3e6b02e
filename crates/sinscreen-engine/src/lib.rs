//! Sinscreen Engine
//!
//! Ensemble scoring engine for Sinhala, Singlish, and mixed-script text.
//!
//! Four scorers contribute to every verdict:
//! - Context: lexicon hits amplified by hostile neighborhoods
//! - Sequence: a scalar recurrence over token order plus bigram hits
//! - Subword: character n-gram fragments that survive obfuscation
//! - Learned: an optional out-of-process model, consulted under a deadline
//!
//! The rule-based scorers are pure and synchronous; only the learned
//! scorer awaits. Analysis itself never fails.

pub mod analyzer;
pub mod context;
pub mod ensemble;
pub mod language;
pub mod learned;
pub mod sequence;
pub mod subword;
pub mod tokenizer;

pub use analyzer::Analyzer;
pub use context::ContextScorer;
pub use ensemble::{EnsembleAggregator, EnsembleOutcome};
pub use language::detect_language;
pub use learned::{HttpLearnedScorer, LearnedScorer};
pub use sequence::SequenceScorer;
pub use subword::SubwordScorer;
pub use tokenizer::tokenize;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::Analyzer;
    pub use crate::ensemble::{EnsembleAggregator, EnsembleOutcome};
    pub use crate::learned::{HttpLearnedScorer, LearnedScorer};
    pub use crate::tokenizer::tokenize;
    pub use sinscreen_core::prelude::*;
    pub use sinscreen_lexicon::{Lexicon, LexiconStore, TermMatcher};
}
