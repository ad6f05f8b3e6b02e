//! Sinscreen Lexicon
//!
//! Weighted hate-speech lexicon for Sinhala, romanized Singlish, and
//! English, with the matching machinery built around it.
//!
//! This crate provides:
//! - The immutable `Lexicon` with category term tables and hateful bigrams
//! - A built-in curated seed plus YAML file loading
//! - Obfuscation variant generation (leet, elongation, transliteration)
//! - Exact, variation, and fuzzy token matching
//! - A copy-on-write `LexiconStore` with a replayable feedback journal

pub mod lexicon;
pub mod matcher;
mod seed;
pub mod store;
pub mod variations;

pub use lexicon::{Lexicon, LexiconBuilder};
pub use matcher::{TermMatcher, TokenLookup};
pub use store::LexiconStore;
pub use variations::token_variations;
