//! Analysis orchestration
//!
//! `Analyzer` wires the matcher and the three rule-based scorers over a
//! shared lexicon snapshot, waits on the optional learned sidecar under
//! a hard deadline, and blends everything through the ensemble.
//! Analysis never fails: any input produces a result, and a dead or
//! slow sidecar degrades to rule-based scoring.

use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use tracing::{debug, warn};

use sinscreen_core::{
    AnalysisResult, EngineConfig, LearnedPrediction, MatchRecord, ModelsUsed, Result,
    SignalBreakdown,
};
use sinscreen_lexicon::{LexiconStore, TermMatcher};

use crate::context::ContextScorer;
use crate::ensemble::EnsembleAggregator;
use crate::language::detect_language;
use crate::learned::LearnedScorer;
use crate::sequence::SequenceScorer;
use crate::subword::SubwordScorer;
use crate::tokenizer::tokenize;

/// Scores texts against the current lexicon snapshot
pub struct Analyzer {
    store: Arc<LexiconStore>,
    matcher: TermMatcher,
    context: ContextScorer,
    sequence: SequenceScorer,
    subword: SubwordScorer,
    ensemble: EnsembleAggregator,
    learned: Option<Arc<dyn LearnedScorer>>,
    learned_timeout: Duration,
}

impl Analyzer {
    /// Build an analyzer over a lexicon store.
    ///
    /// Validates the configuration so a hand-constructed config cannot
    /// smuggle out-of-range tuning past the scorers.
    pub fn new(config: EngineConfig, store: Arc<LexiconStore>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            matcher: TermMatcher::new(config.fuzzy),
            context: ContextScorer::new(config.context),
            sequence: SequenceScorer::new(config.sequence),
            subword: SubwordScorer::new()?,
            ensemble: EnsembleAggregator::new(
                config.weights,
                config.thresholds,
                config.learned.clone(),
            ),
            learned: None,
            learned_timeout: Duration::from_millis(config.learned.timeout_ms),
        })
    }

    /// Attach a learned scorer
    pub fn with_learned(mut self, scorer: Arc<dyn LearnedScorer>) -> Self {
        self.learned = Some(scorer);
        self
    }

    /// Analyze one text. Infallible: empty input yields the zeroed safe
    /// result, learned-scorer failures fall back to rule-based scoring.
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        let started = Instant::now();
        counter!("sinscreen_analyses_total").increment(1);

        let language = detect_language(text);
        let tokens = tokenize(text);
        if tokens.is_empty() {
            let result = AnalysisResult::empty(language, elapsed_us(started));
            counter!(
                "sinscreen_classifications_total",
                "classification" => result.classification.as_str()
            )
            .increment(1);
            return result;
        }

        let lexicon = self.store.snapshot();
        let lookups = self.matcher.lookup_sequence(&lexicon, &tokens);

        let context = self.context.score(&lookups);
        let sequence = self.sequence.score(&tokens, &lookups, &lexicon);
        let subword = self.subword.score(text);
        let learned = self.predict_learned(text).await;

        let matches: Vec<MatchRecord> = lookups
            .iter()
            .filter_map(|lookup| lookup.best.clone())
            .collect();

        let outcome = self
            .ensemble
            .aggregate(&context, &sequence, &subword, learned.as_ref(), &matches);

        let latency_us = elapsed_us(started);
        histogram!("sinscreen_analysis_latency_us").record(latency_us as f64);
        counter!(
            "sinscreen_classifications_total",
            "classification" => outcome.classification.as_str()
        )
        .increment(1);

        debug!(
            classification = outcome.classification.as_str(),
            language = language.as_str(),
            hate = outcome.hate_score,
            harassment = outcome.harassment_score,
            confidence = outcome.confidence_score,
            tokens = tokens.len(),
            matches = matches.len(),
            latency_us,
            "analysis complete"
        );

        AnalysisResult {
            hate_score: outcome.hate_score,
            harassment_score: outcome.harassment_score,
            normal_score: outcome.normal_score,
            confidence_score: outcome.confidence_score,
            classification: outcome.classification,
            matches,
            language,
            signals: SignalBreakdown {
                context,
                sequence,
                subword,
                learned,
            },
            models_used: ModelsUsed {
                learned: learned.is_some(),
                ..ModelsUsed::default()
            },
            auto_hide_eligible: outcome.auto_hide_eligible,
            token_count: tokens.len(),
            latency_us,
        }
    }

    async fn predict_learned(&self, text: &str) -> Option<LearnedPrediction> {
        let scorer = self.learned.as_ref()?;
        match tokio::time::timeout(self.learned_timeout, scorer.predict(text)).await {
            Ok(Ok(prediction)) => Some(prediction),
            Ok(Err(e)) => {
                counter!("sinscreen_learned_failures_total").increment(1);
                warn!(
                    scorer = scorer.name(),
                    error = %e,
                    "learned scorer failed, continuing rule-based"
                );
                None
            }
            Err(_) => {
                counter!("sinscreen_learned_failures_total").increment(1);
                warn!(
                    scorer = scorer.name(),
                    timeout_ms = self.learned_timeout.as_millis() as u64,
                    "learned scorer timed out, continuing rule-based"
                );
                None
            }
        }
    }
}

fn elapsed_us(started: Instant) -> u64 {
    started.elapsed().as_micros() as u64
}
