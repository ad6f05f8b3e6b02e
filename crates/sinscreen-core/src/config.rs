//! Engine configuration
//!
//! Every tunable the scorers and the aggregator use lives here, with the
//! empirically tuned defaults baked in as serde defaults. Constructing
//! `EngineConfig::default()` gives the production tuning; a YAML file can
//! override any subset of fields.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fuzzy matcher tuning
    #[serde(default)]
    pub fuzzy: FuzzyConfig,

    /// Context scorer tuning
    #[serde(default)]
    pub context: ContextConfig,

    /// Sequence scorer tuning
    #[serde(default)]
    pub sequence: SequenceConfig,

    /// Ensemble blend weights
    #[serde(default)]
    pub weights: EnsembleWeights,

    /// Classification thresholds
    #[serde(default)]
    pub thresholds: ClassificationThresholds,

    /// Learned-model sidecar settings
    #[serde(default)]
    pub learned: LearnedConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(config_path: &str) -> Result<Self> {
        let config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            let parsed = Self::from_yaml(&content)?;
            debug!(path = config_path, "loaded engine config");
            parsed
        } else {
            debug!(path = config_path, "config file not found, using defaults");
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::config(format!("invalid config: {e}")))
    }

    /// Reject configurations that would produce out-of-range scores
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fuzzy.similarity_threshold) {
            return Err(Error::config("fuzzy.similarity_threshold must be in [0, 1]"));
        }
        if self.context.window_radius == 0 {
            return Err(Error::config("context.window_radius must be at least 1"));
        }
        if self.context.amplification < 1.0 {
            return Err(Error::config("context.amplification must be at least 1.0"));
        }
        if !(0.0..=1.0).contains(&self.context.positive_damping) {
            return Err(Error::config("context.positive_damping must be in [0, 1]"));
        }
        if self.context.sparsity_rescale <= 0.0 {
            return Err(Error::config("context.sparsity_rescale must be positive"));
        }
        if !(0.0..=1.0).contains(&self.sequence.retention)
            || !(0.0..=1.0).contains(&self.sequence.input_gain)
        {
            return Err(Error::config("sequence gains must be in [0, 1]"));
        }
        if self.learned.timeout_ms == 0 {
            return Err(Error::config("learned.timeout_ms must be positive"));
        }
        for (name, value) in [
            ("thresholds.hate", self.thresholds.hate),
            ("thresholds.hate_review", self.thresholds.hate_review),
            ("thresholds.harassment_review", self.thresholds.harassment_review),
            ("thresholds.auto_hide_confidence", self.thresholds.auto_hide_confidence),
            ("learned.offensive_confidence", self.learned.offensive_confidence),
            ("learned.safe_override_confidence", self.learned.safe_override_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!("{name} must be in [0, 1]")));
            }
        }
        Ok(())
    }
}

/// Fuzzy matcher tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzyConfig {
    /// Minimum normalized similarity for a fuzzy hit
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Candidate terms may differ from the token by at most this many chars
    #[serde(default = "default_length_window")]
    pub length_window: usize,

    /// Tokens shorter than this never fuzzy-match (too noisy)
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            length_window: default_length_window(),
            min_token_len: default_min_token_len(),
        }
    }
}

/// Context scorer tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Tokens on each side considered neighbors
    #[serde(default = "default_window_radius")]
    pub window_radius: usize,

    /// Multiplier for terms whose window holds other hate/harassment terms
    #[serde(default = "default_amplification")]
    pub amplification: f64,

    /// Fraction of positive weight credited against hate evidence
    #[serde(default = "default_positive_damping")]
    pub positive_damping: f64,

    /// Rescale factor compensating for dilution in longer texts
    #[serde(default = "default_sparsity_rescale")]
    pub sparsity_rescale: f64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            window_radius: default_window_radius(),
            amplification: default_amplification(),
            positive_damping: default_positive_damping(),
            sparsity_rescale: default_sparsity_rescale(),
        }
    }
}

/// Sequence scorer tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceConfig {
    /// How much of the running state survives each step
    #[serde(default = "default_retention")]
    pub retention: f64,

    /// How much each token's net weight feeds the running state
    #[serde(default = "default_input_gain")]
    pub input_gain: f64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            retention: default_retention(),
            input_gain: default_input_gain(),
        }
    }
}

/// Ensemble blend weights.
///
/// The hate weights sum to 1.0. The harassment weights blend context,
/// intensity, and half the subword signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleWeights {
    /// Context contribution to the hate score
    #[serde(default = "default_hate_context")]
    pub hate_context: f64,

    /// Sequence contribution to the hate score
    #[serde(default = "default_hate_sequence")]
    pub hate_sequence: f64,

    /// Subword contribution to the hate score
    #[serde(default = "default_hate_subword")]
    pub hate_subword: f64,

    /// Encoding contribution to the hate score
    #[serde(default = "default_hate_encoding")]
    pub hate_encoding: f64,

    /// Context contribution to the harassment score
    #[serde(default = "default_harassment_context")]
    pub harassment_context: f64,

    /// Intensity contribution to the harassment score
    #[serde(default = "default_harassment_intensity")]
    pub harassment_intensity: f64,

    /// Subword contribution to the harassment score (applied at half value)
    #[serde(default = "default_harassment_subword")]
    pub harassment_subword: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            hate_context: default_hate_context(),
            hate_sequence: default_hate_sequence(),
            hate_subword: default_hate_subword(),
            hate_encoding: default_hate_encoding(),
            harassment_context: default_harassment_context(),
            harassment_intensity: default_harassment_intensity(),
            harassment_subword: default_harassment_subword(),
        }
    }
}

/// Classification thresholds. All comparisons are strict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Hate score above this is hate speech
    #[serde(default = "default_hate_threshold")]
    pub hate: f64,

    /// Hate score above this is at least flagged
    #[serde(default = "default_hate_review")]
    pub hate_review: f64,

    /// Harassment score above this is at least flagged
    #[serde(default = "default_harassment_review")]
    pub harassment_review: f64,

    /// Confidence above this makes a hate-speech verdict auto-hide eligible
    #[serde(default = "default_auto_hide_confidence")]
    pub auto_hide_confidence: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            hate: default_hate_threshold(),
            hate_review: default_hate_review(),
            harassment_review: default_harassment_review(),
            auto_hide_confidence: default_auto_hide_confidence(),
        }
    }
}

/// Learned-model sidecar settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnedConfig {
    /// Base URL of the sidecar. None disables the learned scorer.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Hard deadline for one prediction
    #[serde(default = "default_learned_timeout_ms")]
    pub timeout_ms: u64,

    /// Minimum confidence for an offensive verdict to escalate the result
    #[serde(default = "default_offensive_confidence")]
    pub offensive_confidence: f64,

    /// Minimum confidence for a not-offensive verdict to soften a flag
    #[serde(default = "default_safe_override_confidence")]
    pub safe_override_confidence: f64,

    /// Similarity at or above which a lexicon match blocks safe overrides
    #[serde(default = "default_strong_match_similarity")]
    pub strong_match_similarity: f64,

    /// Weight at or above which a lexicon match blocks safe overrides
    #[serde(default = "default_strong_match_weight")]
    pub strong_match_weight: f64,
}

impl Default for LearnedConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: default_learned_timeout_ms(),
            offensive_confidence: default_offensive_confidence(),
            safe_override_confidence: default_safe_override_confidence(),
            strong_match_similarity: default_strong_match_similarity(),
            strong_match_weight: default_strong_match_weight(),
        }
    }
}

fn default_similarity_threshold() -> f64 {
    0.80
}

fn default_length_window() -> usize {
    2
}

fn default_min_token_len() -> usize {
    3
}

fn default_window_radius() -> usize {
    3
}

fn default_amplification() -> f64 {
    1.3
}

fn default_positive_damping() -> f64 {
    0.5
}

fn default_sparsity_rescale() -> f64 {
    2.0
}

fn default_retention() -> f64 {
    0.7
}

fn default_input_gain() -> f64 {
    0.3
}

fn default_hate_context() -> f64 {
    0.4
}

fn default_hate_sequence() -> f64 {
    0.3
}

fn default_hate_subword() -> f64 {
    0.2
}

fn default_hate_encoding() -> f64 {
    0.1
}

fn default_harassment_context() -> f64 {
    0.4
}

fn default_harassment_intensity() -> f64 {
    0.3
}

fn default_harassment_subword() -> f64 {
    0.3
}

fn default_hate_threshold() -> f64 {
    0.6
}

fn default_hate_review() -> f64 {
    0.4
}

fn default_harassment_review() -> f64 {
    0.5
}

fn default_auto_hide_confidence() -> f64 {
    0.8
}

fn default_learned_timeout_ms() -> u64 {
    2000
}

fn default_offensive_confidence() -> f64 {
    0.7
}

fn default_safe_override_confidence() -> f64 {
    0.8
}

fn default_strong_match_similarity() -> f64 {
    0.8
}

fn default_strong_match_weight() -> f64 {
    0.8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = EngineConfig::from_yaml(
            r#"
fuzzy:
  similarity_threshold: 0.9
thresholds:
  hate: 0.7
"#,
        )
        .unwrap();
        assert_eq!(config.fuzzy.similarity_threshold, 0.9);
        assert_eq!(config.fuzzy.length_window, 2);
        assert_eq!(config.thresholds.hate, 0.7);
        assert_eq!(config.thresholds.hate_review, 0.4);
        assert_eq!(config.context.window_radius, 3);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut config = EngineConfig::default();
        config.thresholds.hate = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_window_radius() {
        let mut config = EngineConfig::default();
        config.context.window_radius = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = EngineConfig::load("/nonexistent/sinscreen.yaml").unwrap();
        assert_eq!(config.thresholds.hate, 0.6);
        assert!(config.learned.endpoint.is_none());
    }

    #[test]
    fn load_reads_overrides_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sinscreen.yaml");
        std::fs::write(&path, "sequence:\n  retention: 0.5\n").unwrap();

        let config = EngineConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.sequence.retention, 0.5);
        assert_eq!(config.sequence.input_gain, 0.3);
    }

    #[test]
    fn load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sinscreen.yaml");
        std::fs::write(&path, "thresholds:\n  hate: 2.0\n").unwrap();

        assert!(EngineConfig::load(path.to_str().unwrap()).is_err());
    }
}
