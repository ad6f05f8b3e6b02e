//! Core types for Sinscreen

use serde::{Deserialize, Serialize};

/// Clamp a score into `[0.0, 1.0]`, mapping NaN to `0.0`.
///
/// Every score that leaves a scorer or the aggregator passes through this,
/// so downstream consumers never observe out-of-range values.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Zero-width joiner, load-bearing for Sinhala conjuncts in rendering but
/// noise for matching.
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// Zero-width non-joiner
pub const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';

/// Normalize a token or lexicon term for matching: strip zero-width
/// joiners and lowercase.
///
/// Tokens and lexicon terms must go through the same normalization or
/// exact lookups silently miss.
pub fn normalize_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != ZERO_WIDTH_JOINER && *c != ZERO_WIDTH_NON_JOINER)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lexicon category a term belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermCategory {
    /// Direct hate terms (slurs, dehumanizing language)
    Hate,

    /// Harassment terms (insults, hostile imperatives)
    Harassment,

    /// Positive terms that offset hate evidence
    Positive,
}

impl TermCategory {
    /// Stable string label, used in logs and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hate => "hate",
            Self::Harassment => "harassment",
            Self::Positive => "positive",
        }
    }
}

/// How a token was matched against the lexicon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Token equals a lexicon term after normalization
    Exact,

    /// A generated obfuscation variant of the token equals a lexicon term
    Variation,

    /// Token is within the similarity threshold of a lexicon term
    Fuzzy,
}

impl MatchType {
    /// Precedence when several match types apply to one token.
    /// Exact beats variation beats fuzzy.
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Exact => 2,
            Self::Variation => 1,
            Self::Fuzzy => 0,
        }
    }

    /// Stable string label, used in logs and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Variation => "variation",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// Final moderation verdict for an analyzed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// No action required
    Safe,

    /// Needs human review
    Flagged,

    /// Direct hate speech
    HateSpeech,
}

impl Classification {
    /// Stable string label, used in logs and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Flagged => "flagged",
            Self::HateSpeech => "hate_speech",
        }
    }
}

/// Dominant script of the analyzed text.
///
/// Informational only. Scoring is script-agnostic because the lexicon
/// carries Sinhala script, romanized Singlish, and English terms side
/// by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Mostly Sinhala script codepoints
    Sinhala,

    /// Mostly Latin letters
    English,

    /// Substantial amounts of both scripts
    Mixed,

    /// No letters to judge by
    Unknown,
}

impl Language {
    /// Stable string label, used in logs and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sinhala => "sinhala",
            Self::English => "english",
            Self::Mixed => "mixed",
            Self::Unknown => "unknown",
        }
    }
}

/// A single whitespace-delimited unit of input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Original text as it appeared in the input
    pub text: String,

    /// Normalized form: lowercased, zero-width joiners stripped
    pub normalized: String,

    /// Zero-based position in the token sequence
    pub position: usize,
}

impl Token {
    /// Create a new token
    pub fn new(text: impl Into<String>, normalized: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            normalized: normalized.into(),
            position,
        }
    }
}

/// Record of a lexicon hit for one input token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The lexicon term that matched
    pub matched_term: String,

    /// The input token (normalized form) that triggered the match
    pub input_token: String,

    /// How the match was found
    pub match_type: MatchType,

    /// Similarity between token and term, in `[0.0, 1.0]`
    pub similarity: f64,

    /// Category of the matched term
    pub category: TermCategory,

    /// Severity weight of the matched term
    pub weight: f64,

    /// Token position the match occurred at
    pub position: usize,
}

/// Output of the context scorer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextSignals {
    /// Window-amplified, density-rescaled hate evidence in `[0.0, 1.0]`
    pub hate: f64,

    /// Window-amplified, density-rescaled harassment evidence in `[0.0, 1.0]`
    pub harassment: f64,

    /// Damped positive evidence already subtracted from `hate`
    pub positive_offset: f64,
}

/// Output of the sequence scorer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceSignals {
    /// Recurrence-accumulated hate evidence plus bigram hits, in `[0.0, 1.0]`
    pub sequence: f64,

    /// Emotional intensity of the token sequence, in `[0.0, 1.0]`
    pub intensity: f64,
}

/// Output of the subword scorer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubwordSignals {
    /// Length-normalized obfuscated-fragment evidence, in `[0.0, 1.0]`
    pub subword: f64,

    /// Encoding-trick evidence (leet runs, odd symbols, elongation), in `[0.0, 1.0]`
    pub encoding: f64,
}

/// Binary verdict from the learned model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnedLabel {
    /// Model judged the text inoffensive
    NotOffensive,

    /// Model judged the text offensive
    Offensive,
}

/// Prediction returned by a learned scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearnedPrediction {
    /// Predicted label
    pub label: LearnedLabel,

    /// Model confidence in the predicted label, in `[0.0, 1.0]`
    pub confidence: f64,

    /// Raw probability of the not-offensive class
    pub not_offensive: f64,

    /// Raw probability of the offensive class
    pub offensive: f64,
}

/// Which scorers contributed to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsUsed {
    /// Context scorer ran
    pub context: bool,

    /// Sequence scorer ran
    pub sequence: bool,

    /// Subword scorer ran
    pub subword: bool,

    /// Learned model responded within its deadline
    pub learned: bool,
}

impl Default for ModelsUsed {
    fn default() -> Self {
        Self {
            context: true,
            sequence: true,
            subword: true,
            learned: false,
        }
    }
}

/// Per-scorer signal breakdown attached to every result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalBreakdown {
    /// Context scorer output
    pub context: ContextSignals,

    /// Sequence scorer output
    pub sequence: SequenceSignals,

    /// Subword scorer output
    pub subword: SubwordSignals,

    /// Learned model output, when one responded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learned: Option<LearnedPrediction>,
}

/// Complete analysis result for one input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Blended hate score in `[0.0, 1.0]`
    pub hate_score: f64,

    /// Blended harassment score in `[0.0, 1.0]`
    pub harassment_score: f64,

    /// Residual normal score, `clamp01(1 - hate - harassment)`
    pub normal_score: f64,

    /// Confidence in the verdict, discounted by scorer disagreement
    pub confidence_score: f64,

    /// Final moderation verdict
    pub classification: Classification,

    /// Lexicon matches in token order
    pub matches: Vec<MatchRecord>,

    /// Dominant script of the input
    pub language: Language,

    /// Per-scorer signals that fed the blend
    pub signals: SignalBreakdown,

    /// Which scorers contributed
    pub models_used: ModelsUsed,

    /// Verdict is hate speech with confidence above the auto-hide bar
    pub auto_hide_eligible: bool,

    /// Number of tokens the input produced
    pub token_count: usize,

    /// Wall-clock analysis time in microseconds
    pub latency_us: u64,
}

impl AnalysisResult {
    /// Result for empty or whitespace-only input: all scores zero, safe,
    /// nothing matched.
    pub fn empty(language: Language, latency_us: u64) -> Self {
        Self {
            hate_score: 0.0,
            harassment_score: 0.0,
            normal_score: 0.0,
            confidence_score: 0.0,
            classification: Classification::Safe,
            matches: Vec::new(),
            language,
            signals: SignalBreakdown::default(),
            models_used: ModelsUsed::default(),
            auto_hide_eligible: false,
            token_count: 0,
            latency_us,
        }
    }
}
