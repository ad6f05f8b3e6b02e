//! Sequence scorer
//!
//! A scalar recurrence over the token sequence biases the score toward
//! recent hostility without unbounded growth: each step keeps 70% of the
//! running state and feeds in 30% of the current token's net weight. The
//! accumulated state plus hateful-bigram hits form the sequence score;
//! emotional emphasis (punctuation, shouting, intensifiers) compounds on
//! top of already-negative state to form the intensity score.

use sinscreen_core::{clamp01, SequenceConfig, SequenceSignals, Token};
use sinscreen_lexicon::{Lexicon, TokenLookup};

/// Words that intensify whatever they attach to
const INTENSIFIERS: &[&str] = &[
    "very",
    "so",
    "really",
    "totally",
    "extremely",
    "absolutely",
    "godak",
    "harima",
    "maara",
    "hari",
    "ගොඩක්",
    "හරිම",
    "මාර",
    "හරි",
];

/// Minimum run of identical characters that counts as elongation
const ELONGATION_RUN: usize = 3;

/// Minimum letters before an all-caps token counts as shouting
const SHOUT_MIN_LETTERS: usize = 3;

/// Scores token sequences by recurrence and emotional emphasis
#[derive(Debug, Clone)]
pub struct SequenceScorer {
    config: SequenceConfig,
}

impl SequenceScorer {
    /// Create a scorer with the given tuning
    pub fn new(config: SequenceConfig) -> Self {
        Self { config }
    }

    /// Score a token sequence. Pure; empty input scores zero.
    ///
    /// `lookups` must be the matcher output for `tokens`, index-aligned.
    pub fn score(
        &self,
        tokens: &[Token],
        lookups: &[TokenLookup],
        lexicon: &Lexicon,
    ) -> SequenceSignals {
        let count = tokens.len();
        if count == 0 {
            return SequenceSignals::default();
        }
        debug_assert_eq!(count, lookups.len());

        let mut hidden = 0.0_f64;
        let mut state_sum = 0.0;
        let mut intensity_sum = 0.0;

        for (token, lookup) in tokens.iter().zip(lookups) {
            let token_weight = lookup.hate + lookup.harassment - lookup.positive;
            // intensity compounds on the state before this token
            intensity_sum += emotional_weight(token) * (1.0 + hidden.abs());
            hidden = self.config.retention * hidden + self.config.input_gain * token_weight;
            state_sum += hidden;
        }

        let mut sequence_sum = state_sum;
        for pair in tokens.windows(2) {
            if let Some(weight) = lexicon.bigram(&pair[0].normalized, &pair[1].normalized) {
                sequence_sum += weight;
            }
        }

        SequenceSignals {
            sequence: clamp01(sequence_sum / count as f64),
            intensity: clamp01(intensity_sum / count as f64),
        }
    }
}

/// Emphasis carried by one token: exclamation/question marks, shouting,
/// elongation, known intensifier words. Capped at 1.0.
fn emotional_weight(token: &Token) -> f64 {
    let mut weight = 0.0;

    let marks = token
        .text
        .chars()
        .filter(|c| *c == '!' || *c == '?')
        .count();
    weight += 0.25 * marks as f64;

    if is_shouted(&token.text) {
        weight += 0.4;
    }
    if has_elongation(&token.text) {
        weight += 0.3;
    }

    let word = token
        .normalized
        .trim_matches(|c: char| !c.is_alphanumeric());
    if INTENSIFIERS.contains(&word) {
        weight += 0.5;
    }

    weight.min(1.0)
}

fn is_shouted(text: &str) -> bool {
    let mut letters = 0;
    for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
        if c.is_ascii_lowercase() {
            return false;
        }
        letters += 1;
    }
    letters >= SHOUT_MIN_LETTERS
}

fn has_elongation(text: &str) -> bool {
    let mut run = 0;
    let mut prev = None;
    for c in text.chars() {
        if Some(c) == prev {
            run += 1;
            if run >= ELONGATION_RUN {
                return true;
            }
        } else {
            prev = Some(c);
            run = 1;
        }
    }
    false
}
