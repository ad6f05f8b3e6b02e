//! Script detection
//!
//! Informational metadata on the result. Scoring never branches on the
//! detected language; the lexicon holds all three vocabularies.

use sinscreen_core::Language;

/// Sinhala Unicode block
const SINHALA_START: char = '\u{0D80}';
const SINHALA_END: char = '\u{0DFF}';

/// Ratio above which text counts as Sinhala, below which as English
const SINHALA_RATIO: f64 = 0.7;
const ENGLISH_RATIO: f64 = 0.3;

/// Classify the dominant script by letter counts
pub fn detect_language(text: &str) -> Language {
    let mut sinhala = 0usize;
    let mut latin = 0usize;
    for c in text.chars() {
        if (SINHALA_START..=SINHALA_END).contains(&c) {
            sinhala += 1;
        } else if c.is_ascii_alphabetic() {
            latin += 1;
        }
    }

    let total = sinhala + latin;
    if total == 0 {
        return Language::Unknown;
    }
    let ratio = sinhala as f64 / total as f64;
    if ratio > SINHALA_RATIO {
        Language::Sinhala
    } else if ratio < ENGLISH_RATIO {
        Language::English
    } else {
        Language::Mixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_sinhala() {
        assert_eq!(detect_language("හොඳ දවසක්"), Language::Sinhala);
    }

    #[test]
    fn test_detects_english() {
        assert_eq!(detect_language("have a good day"), Language::English);
        // romanized Singlish is Latin script
        assert_eq!(detect_language("oyata kohomada"), Language::English);
    }

    #[test]
    fn test_detects_mixed() {
        assert_eq!(detect_language("මූ බල්ලා stupid"), Language::Mixed);
    }

    #[test]
    fn test_no_letters_is_unknown() {
        assert_eq!(detect_language(""), Language::Unknown);
        assert_eq!(detect_language("123 !!! 456"), Language::Unknown);
    }
}
