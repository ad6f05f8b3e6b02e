//! Subword scorer
//!
//! Operates on the raw, untokenized string so obfuscation that confuses
//! the tokenizer still leaves evidence. Two signals: known obfuscation
//! fragments (2-4 character digit/symbol stand-ins for hate terms), and
//! generic encoding tricks (leet runs, disallowed symbols, elongation).

use aho_corasick::AhoCorasick;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use sinscreen_core::{clamp01, Error, Result, SubwordSignals};

/// Obfuscation fragments with severity weights. Every entry is 2-4
/// characters and contains a digit or symbol, or is a vowel-dropped
/// spelling that clean text never produces.
const FRAGMENTS: &[(&str, f64)] = &[
    ("h8", 0.8),
    ("k1ll", 0.85),
    ("k1l", 0.7),
    ("k1", 0.5),
    ("d1e", 0.7),
    ("@ss", 0.8),
    ("@$$", 0.8),
    ("b1t", 0.6),
    ("b!t", 0.6),
    ("sh1t", 0.85),
    ("5h1t", 0.85),
    ("$h1t", 0.85),
    ("fck", 0.8),
    ("fuk", 0.8),
    ("fkn", 0.6),
    ("@t", 0.5),
    ("t@", 0.5),
    ("@p", 0.5),
    ("p@k", 0.7),
    ("hu7", 0.7),
    ("w3s", 0.6),
    ("p0n", 0.6),
    ("m0d", 0.5),
    ("b@ll", 0.7),
    ("$t", 0.5),
];

/// Symbols that legitimate Sinhala/English prose rarely carries
const DISALLOWED_SYMBOLS: &[char] = &[
    '@', '$', '#', '%', '^', '&', '*', '~', '|', '<', '>', '=', '\\',
];

const LEET_RUN_WEIGHT: f64 = 0.1;
const SYMBOL_WEIGHT: f64 = 0.05;
const ELONGATION_WEIGHT: f64 = 0.15;

/// Minimum run of identical characters that counts as elongation
const ELONGATION_RUN: usize = 3;

/// Scores raw text for obfuscation evidence
#[derive(Debug)]
pub struct SubwordScorer {
    fragments: AhoCorasick,
    weights: Vec<f64>,
    leet_runs: Regex,
}

impl SubwordScorer {
    /// Build the fragment automaton and detectors
    pub fn new() -> Result<Self> {
        let (patterns, weights): (Vec<&str>, Vec<f64>) = FRAGMENTS.iter().copied().unzip();

        let fragments = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| Error::scorer(format!("failed to build fragment matcher: {e}")))?;

        // a digit/symbol run is leet when it touches a letter
        let leet_runs = Regex::new(r"[a-zA-Z][0-9@$#!+*]+|[0-9@$#!+*]+[a-zA-Z]")
            .map_err(|e| Error::scorer(format!("failed to build leet detector: {e}")))?;

        Ok(Self {
            fragments,
            weights,
            leet_runs,
        })
    }

    /// Score raw text. Pure; blank input scores zero.
    pub fn score(&self, text: &str) -> SubwordSignals {
        if text.trim().is_empty() {
            return SubwordSignals::default();
        }

        let fragment_sum: f64 = self
            .fragments
            .find_overlapping_iter(text)
            .map(|m| self.weights[m.pattern().as_usize()])
            .sum();
        // normalize by perceived length; combining signs inflate the
        // char count of Sinhala text
        let length = text.graphemes(true).count().max(1) as f64;
        let subword = clamp01(fragment_sum / length);

        let leet = self.leet_runs.find_iter(text).count() as f64;
        let symbols = text
            .chars()
            .filter(|c| DISALLOWED_SYMBOLS.contains(c))
            .count() as f64;
        let elongation = elongation_runs(text) as f64;
        let encoding = clamp01(
            LEET_RUN_WEIGHT * leet + SYMBOL_WEIGHT * symbols + ELONGATION_WEIGHT * elongation,
        );

        SubwordSignals { subword, encoding }
    }
}

/// Count maximal runs of `ELONGATION_RUN`+ identical characters
fn elongation_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut run_len = 0;
    let mut prev = None;
    for c in text.chars() {
        if Some(c) == prev {
            run_len += 1;
        } else {
            if run_len >= ELONGATION_RUN {
                runs += 1;
            }
            prev = Some(c);
            run_len = 1;
        }
    }
    if run_len >= ELONGATION_RUN {
        runs += 1;
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> SubwordScorer {
        SubwordScorer::new().unwrap()
    }

    #[test]
    fn test_blank_input_scores_zero() {
        assert_eq!(scorer().score(""), SubwordSignals::default());
        assert_eq!(scorer().score("   "), SubwordSignals::default());
    }

    #[test]
    fn test_obfuscated_beats_clean_form() {
        let s = scorer();
        let obfuscated = s.score("st@pid");
        let clean = s.score("stupid");
        assert!(obfuscated.subword > clean.subword);
        assert!(obfuscated.encoding > 0.0);
        assert_eq!(clean.subword, 0.0);
        assert_eq!(clean.encoding, 0.0);
    }

    #[test]
    fn test_encoding_detector_weights() {
        let s = scorer();
        // one leet run ("h8"), no disallowed symbols, no elongation
        let signals = s.score("h8");
        assert!((signals.encoding - 0.1).abs() < 1e-9);
        // elongation only
        let signals = s.score("nooooo");
        assert!((signals.encoding - 0.15).abs() < 1e-9);
        // one symbol inside a leet run: 0.1 + 0.05
        let signals = s.score("st@pid");
        assert!((signals.encoding - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_fragments_found_case_insensitively() {
        let s = scorer();
        assert!(s.score("K1LL them").subword > 0.0);
    }

    #[test]
    fn test_clean_sinhala_scores_zero() {
        let s = scorer();
        let signals = s.score("හොඳ දවසක් වේවා");
        assert_eq!(signals.subword, 0.0);
        assert_eq!(signals.encoding, 0.0);
    }

    #[test]
    fn test_plain_numbers_are_not_leet_runs() {
        let s = scorer();
        let signals = s.score("2024 12 31");
        assert_eq!(signals.encoding, 0.0);
    }

    #[test]
    fn test_scores_clamped_under_pileup() {
        let s = scorer();
        let noisy = "h8 h8 h8 @$$ k1ll $h1t @@@@ ~~~~ nooooo!!!";
        let signals = s.score(noisy);
        assert!(signals.subword <= 1.0);
        assert_eq!(signals.encoding, 1.0);
    }
}
