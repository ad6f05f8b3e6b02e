//! Context scorer
//!
//! Window-based co-occurrence scoring. A hate term inside a cluster of
//! other hostile terms reads worse than the same term alone, so
//! contributions from tokens with hostile neighbors are amplified.
//! Positive terms accumulate a damped offset that is charged against the
//! hate score at the end.

use sinscreen_core::{clamp01, ContextConfig, ContextSignals};
use sinscreen_lexicon::TokenLookup;

/// Scores token sequences by local co-occurrence
#[derive(Debug, Clone)]
pub struct ContextScorer {
    config: ContextConfig,
}

impl ContextScorer {
    /// Create a scorer with the given tuning
    pub fn new(config: ContextConfig) -> Self {
        Self { config }
    }

    /// Score a looked-up token sequence. Pure; empty input scores zero.
    pub fn score(&self, lookups: &[TokenLookup]) -> ContextSignals {
        let count = lookups.len();
        if count == 0 {
            return ContextSignals::default();
        }

        let mut hate_sum = 0.0;
        let mut harassment_sum = 0.0;
        let mut offset = 0.0;

        for (index, lookup) in lookups.iter().enumerate() {
            if lookup.positive > 0.0 {
                offset += lookup.positive * self.config.positive_damping;
            }
            if lookup.hate <= 0.0 && lookup.harassment <= 0.0 {
                continue;
            }
            let factor = if self.has_hostile_neighbor(lookups, index) {
                self.config.amplification
            } else {
                1.0
            };
            hate_sum += lookup.hate * factor;
            harassment_sum += lookup.harassment * factor;
        }

        // rescale compensates for hate-term sparsity in longer texts
        let scale = self.config.sparsity_rescale / count as f64;
        let hate = clamp01(hate_sum * scale);
        let harassment = clamp01(harassment_sum * scale);

        ContextSignals {
            hate: (hate - offset).max(0.0),
            harassment,
            positive_offset: offset,
        }
    }

    fn has_hostile_neighbor(&self, lookups: &[TokenLookup], index: usize) -> bool {
        let start = index.saturating_sub(self.config.window_radius);
        let end = (index + self.config.window_radius).min(lookups.len() - 1);
        (start..=end)
            .filter(|i| *i != index)
            .any(|i| lookups[i].hate > 0.0 || lookups[i].harassment > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> ContextScorer {
        ContextScorer::new(ContextConfig::default())
    }

    fn hate(weight: f64) -> TokenLookup {
        TokenLookup {
            hate: weight,
            ..Default::default()
        }
    }

    fn harassment(weight: f64) -> TokenLookup {
        TokenLookup {
            harassment: weight,
            ..Default::default()
        }
    }

    fn positive(weight: f64) -> TokenLookup {
        TokenLookup {
            positive: weight,
            ..Default::default()
        }
    }

    fn neutral() -> TokenLookup {
        TokenLookup::default()
    }

    #[test]
    fn test_empty_sequence_scores_zero() {
        assert_eq!(scorer().score(&[]), ContextSignals::default());
    }

    #[test]
    fn test_neutral_sequence_scores_zero() {
        let signals = scorer().score(&[neutral(), neutral(), neutral()]);
        assert_eq!(signals.hate, 0.0);
        assert_eq!(signals.harassment, 0.0);
    }

    #[test]
    fn test_amplification_raises_clustered_terms() {
        // same hate term, same sequence length; hostile neighbor within
        // the window in one case, out of reach in the other
        let clustered = [hate(0.5), harassment(0.4), neutral(), neutral(), neutral()];
        let isolated = [hate(0.5), neutral(), neutral(), neutral(), harassment(0.4)];

        let clustered = scorer().score(&clustered);
        let isolated = scorer().score(&isolated);
        assert!(
            clustered.hate > isolated.hate,
            "clustered {} should beat isolated {}",
            clustered.hate,
            isolated.hate
        );
    }

    #[test]
    fn test_positive_offset_subtracted_from_hate_only() {
        let signals = scorer().score(&[hate(0.5), harassment(0.5), positive(0.8)]);
        assert_eq!(signals.positive_offset, 0.4);
        // hate: (0.5 * 1.3) / 3 * 2 = 0.433..., minus 0.4 offset
        assert!(signals.hate > 0.0 && signals.hate < 0.05);
        // harassment untouched by the offset
        assert!(signals.harassment > 0.4);
    }

    #[test]
    fn test_hate_floors_at_zero() {
        let signals = scorer().score(&[hate(0.2), positive(0.9), positive(0.9)]);
        assert_eq!(signals.hate, 0.0);
        assert!(signals.positive_offset > 0.8);
    }

    #[test]
    fn test_dense_hostility_saturates_before_offset() {
        let signals = scorer().score(&[hate(0.9), hate(0.9), hate(0.9)]);
        assert_eq!(signals.hate, 1.0);
    }

    #[test]
    fn test_window_clamps_at_boundaries() {
        // single token sequence must not panic on window math
        let signals = scorer().score(&[hate(0.7)]);
        assert!(signals.hate > 0.0);
    }
}
