//! Ensemble aggregator
//!
//! Blends the scorer signals with fixed documented weights, classifies
//! against strict thresholds, then lets a learned prediction adjust the
//! verdict within tight bounds. Neither side is fully trusted alone:
//! the learned model has no obfuscation handling, the lexical engine no
//! broader context, so each can only move the other one step.

use sinscreen_core::{
    clamp01, Classification, ClassificationThresholds, ContextSignals, EnsembleWeights,
    LearnedConfig, LearnedLabel, LearnedPrediction, MatchRecord, MatchType, SequenceSignals,
    SubwordSignals, TermCategory,
};

/// Blended scores and verdict for one analysis
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleOutcome {
    /// Blended hate score in `[0.0, 1.0]`
    pub hate_score: f64,

    /// Blended harassment score in `[0.0, 1.0]`
    pub harassment_score: f64,

    /// Residual normal score
    pub normal_score: f64,

    /// Verdict confidence, discounted by primary-scorer disagreement
    pub confidence_score: f64,

    /// Final verdict
    pub classification: Classification,

    /// Hate-speech verdict with confidence above the auto-hide bar
    pub auto_hide_eligible: bool,
}

/// Blends scorer outputs into a final verdict
#[derive(Debug, Clone)]
pub struct EnsembleAggregator {
    weights: EnsembleWeights,
    thresholds: ClassificationThresholds,
    learned: LearnedConfig,
}

impl EnsembleAggregator {
    /// Create an aggregator with the given weights and thresholds
    pub fn new(
        weights: EnsembleWeights,
        thresholds: ClassificationThresholds,
        learned: LearnedConfig,
    ) -> Self {
        Self {
            weights,
            thresholds,
            learned,
        }
    }

    /// Blend signals and classify
    pub fn aggregate(
        &self,
        context: &ContextSignals,
        sequence: &SequenceSignals,
        subword: &SubwordSignals,
        learned: Option<&LearnedPrediction>,
        matches: &[MatchRecord],
    ) -> EnsembleOutcome {
        let w = &self.weights;
        let hate_score = clamp01(
            w.hate_context * context.hate
                + w.hate_sequence * sequence.sequence
                + w.hate_subword * subword.subword
                + w.hate_encoding * subword.encoding,
        );
        let harassment_score = clamp01(
            w.harassment_context * context.harassment
                + w.harassment_intensity * sequence.intensity
                + w.harassment_subword * (subword.subword * 0.5),
        );
        let normal_score = clamp01(1.0 - hate_score - harassment_score);

        // agreement considers only the two primary scorers
        let agreement = 1.0 - (context.hate - sequence.sequence).abs();
        let confidence_score = clamp01(
            hate_score.max(harassment_score).max(normal_score) * agreement,
        );

        let mut classification = self.classify(hate_score, harassment_score);
        if let Some(prediction) = learned {
            classification = self.apply_learned(classification, prediction, matches);
        }

        let auto_hide_eligible = classification == Classification::HateSpeech
            && confidence_score > self.thresholds.auto_hide_confidence;

        EnsembleOutcome {
            hate_score,
            harassment_score,
            normal_score,
            confidence_score,
            classification,
            auto_hide_eligible,
        }
    }

    /// Rule-based classification, strict thresholds, first match wins
    pub fn classify(&self, hate_score: f64, harassment_score: f64) -> Classification {
        if hate_score > self.thresholds.hate {
            Classification::HateSpeech
        } else if hate_score > self.thresholds.hate_review
            || harassment_score > self.thresholds.harassment_review
        {
            Classification::Flagged
        } else {
            Classification::Safe
        }
    }

    /// Learned-prediction override, applied after rule-based
    /// classification.
    ///
    /// An offensive prediction without exact or fuzzy lexical
    /// corroboration pins the verdict to flagged: the learned signal
    /// alone never produces an auto-hidable hate-speech verdict. A
    /// confident not-offensive prediction softens a flag to safe unless
    /// a strong hate match stands, and never touches a hate-speech
    /// verdict.
    fn apply_learned(
        &self,
        rule_based: Classification,
        prediction: &LearnedPrediction,
        matches: &[MatchRecord],
    ) -> Classification {
        match prediction.label {
            LearnedLabel::Offensive => {
                if prediction.confidence < self.learned.offensive_confidence {
                    return rule_based;
                }
                let corroborated = matches
                    .iter()
                    .any(|m| matches!(m.match_type, MatchType::Exact | MatchType::Fuzzy));
                if corroborated {
                    rule_based
                } else {
                    Classification::Flagged
                }
            }
            LearnedLabel::NotOffensive => {
                if prediction.confidence < self.learned.safe_override_confidence {
                    return rule_based;
                }
                let strong_match = matches.iter().any(|m| {
                    m.category == TermCategory::Hate
                        && m.similarity >= self.learned.strong_match_similarity
                        && m.weight >= self.learned.strong_match_weight
                });
                match rule_based {
                    Classification::Flagged if !strong_match => Classification::Safe,
                    other => other,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator() -> EnsembleAggregator {
        EnsembleAggregator::new(
            EnsembleWeights::default(),
            ClassificationThresholds::default(),
            LearnedConfig::default(),
        )
    }

    fn prediction(label: LearnedLabel, confidence: f64) -> LearnedPrediction {
        let offensive = match label {
            LearnedLabel::Offensive => confidence,
            LearnedLabel::NotOffensive => 1.0 - confidence,
        };
        LearnedPrediction {
            label,
            confidence,
            not_offensive: 1.0 - offensive,
            offensive,
        }
    }

    fn exact_match(weight: f64) -> MatchRecord {
        MatchRecord {
            matched_term: "pakaya".to_string(),
            input_token: "pakaya".to_string(),
            match_type: MatchType::Exact,
            similarity: 1.0,
            category: TermCategory::Hate,
            weight,
            position: 0,
        }
    }

    fn variation_match() -> MatchRecord {
        MatchRecord {
            matched_term: "hate".to_string(),
            input_token: "h8".to_string(),
            match_type: MatchType::Variation,
            similarity: 0.9,
            category: TermCategory::Hate,
            weight: 0.85,
            position: 0,
        }
    }

    #[test]
    fn test_threshold_boundaries_are_strict() {
        let agg = aggregator();
        assert_eq!(agg.classify(0.61, 0.0), Classification::HateSpeech);
        assert_eq!(agg.classify(0.60, 0.0), Classification::Flagged);
        assert_eq!(agg.classify(0.41, 0.0), Classification::Flagged);
        assert_eq!(agg.classify(0.40, 0.0), Classification::Safe);
        assert_eq!(agg.classify(0.0, 0.51), Classification::Flagged);
        assert_eq!(agg.classify(0.0, 0.50), Classification::Safe);
    }

    #[test]
    fn test_blend_weights_applied() {
        let agg = aggregator();
        let outcome = agg.aggregate(
            &ContextSignals {
                hate: 1.0,
                harassment: 0.5,
                positive_offset: 0.0,
            },
            &SequenceSignals {
                sequence: 1.0,
                intensity: 0.4,
            },
            &SubwordSignals {
                subword: 0.5,
                encoding: 0.5,
            },
            None,
            &[],
        );
        // 0.4 + 0.3 + 0.2*0.5 + 0.1*0.5 = 0.85
        assert!((outcome.hate_score - 0.85).abs() < 1e-9);
        // 0.4*0.5 + 0.3*0.4 + 0.3*0.25 = 0.395
        assert!((outcome.harassment_score - 0.395).abs() < 1e-9);
        assert_eq!(outcome.normal_score, 0.0);
        assert_eq!(outcome.classification, Classification::HateSpeech);
    }

    #[test]
    fn test_confidence_penalized_by_disagreement() {
        let agg = aggregator();
        let agreed = agg.aggregate(
            &ContextSignals {
                hate: 0.8,
                ..Default::default()
            },
            &SequenceSignals {
                sequence: 0.8,
                intensity: 0.0,
            },
            &SubwordSignals::default(),
            None,
            &[],
        );
        let disagreed = agg.aggregate(
            &ContextSignals {
                hate: 0.8,
                ..Default::default()
            },
            &SequenceSignals {
                sequence: 0.1,
                intensity: 0.0,
            },
            &SubwordSignals::default(),
            None,
            &[],
        );
        assert!(agreed.confidence_score > disagreed.confidence_score);
    }

    #[test]
    fn test_offensive_without_corroboration_pins_to_flagged() {
        let agg = aggregator();
        let learned = prediction(LearnedLabel::Offensive, 0.9);
        // no matches at all: safe rule result escalates to flagged
        assert_eq!(
            agg.apply_learned(Classification::Safe, &learned, &[]),
            Classification::Flagged
        );
        // variation-only matches do not corroborate; hate speech is
        // pulled back to flagged
        assert_eq!(
            agg.apply_learned(Classification::HateSpeech, &learned, &[variation_match()]),
            Classification::Flagged
        );
    }

    #[test]
    fn test_offensive_with_corroboration_keeps_rule_verdict() {
        let agg = aggregator();
        let learned = prediction(LearnedLabel::Offensive, 0.9);
        assert_eq!(
            agg.apply_learned(Classification::HateSpeech, &learned, &[exact_match(0.9)]),
            Classification::HateSpeech
        );
        assert_eq!(
            agg.apply_learned(Classification::Safe, &learned, &[exact_match(0.3)]),
            Classification::Safe
        );
    }

    #[test]
    fn test_low_confidence_predictions_ignored() {
        let agg = aggregator();
        assert_eq!(
            agg.apply_learned(
                Classification::Safe,
                &prediction(LearnedLabel::Offensive, 0.5),
                &[]
            ),
            Classification::Safe
        );
        assert_eq!(
            agg.apply_learned(
                Classification::Flagged,
                &prediction(LearnedLabel::NotOffensive, 0.5),
                &[]
            ),
            Classification::Flagged
        );
    }

    #[test]
    fn test_not_offensive_softens_weak_flag() {
        let agg = aggregator();
        let learned = prediction(LearnedLabel::NotOffensive, 0.9);
        assert_eq!(
            agg.apply_learned(Classification::Flagged, &learned, &[]),
            Classification::Safe
        );
    }

    #[test]
    fn test_strong_match_blocks_safe_override() {
        let agg = aggregator();
        let learned = prediction(LearnedLabel::NotOffensive, 0.95);
        assert_eq!(
            agg.apply_learned(Classification::Flagged, &learned, &[exact_match(0.9)]),
            Classification::Flagged
        );
    }

    #[test]
    fn test_not_offensive_never_downgrades_hate_speech() {
        let agg = aggregator();
        let learned = prediction(LearnedLabel::NotOffensive, 0.99);
        assert_eq!(
            agg.apply_learned(Classification::HateSpeech, &learned, &[]),
            Classification::HateSpeech
        );
    }

    #[test]
    fn test_auto_hide_requires_confident_hate_speech() {
        let agg = aggregator();
        // perfect agreement between primary scorers, saturated hate
        let outcome = agg.aggregate(
            &ContextSignals {
                hate: 1.0,
                ..Default::default()
            },
            &SequenceSignals {
                sequence: 1.0,
                intensity: 0.0,
            },
            &SubwordSignals {
                subword: 1.0,
                encoding: 1.0,
            },
            None,
            &[],
        );
        assert_eq!(outcome.classification, Classification::HateSpeech);
        assert!(outcome.confidence_score > 0.8);
        assert!(outcome.auto_hide_eligible);

        // disagreement drags confidence below the bar
        let outcome = agg.aggregate(
            &ContextSignals {
                hate: 1.0,
                ..Default::default()
            },
            &SequenceSignals {
                sequence: 0.5,
                intensity: 0.0,
            },
            &SubwordSignals {
                subword: 1.0,
                encoding: 1.0,
            },
            None,
            &[],
        );
        assert_eq!(outcome.classification, Classification::HateSpeech);
        assert!(!outcome.auto_hide_eligible);
    }
}
