//! Whitespace tokenizer with Sinhala-aware normalization
//!
//! Only literal whitespace separates tokens. Zero-width joiners are
//! normalization noise, never split points: splitting on them would
//! fragment Sinhala conjunct consonants into nonsense tokens.

use sinscreen_core::{normalize_text, Token};

/// Split text into normalized tokens. Never fails; empty input yields
/// an empty sequence.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|raw| {
            let normalized = normalize_text(raw);
            if normalized.is_empty() {
                None
            } else {
                Some((raw, normalized))
            }
        })
        .enumerate()
        .map(|(position, (raw, normalized))| Token::new(raw, normalized, position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n  ").is_empty());
    }

    #[test]
    fn test_splits_on_whitespace_runs() {
        let tokens = tokenize("oya  balla\tstupid\nloku");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].normalized, "balla");
        assert_eq!(tokens[3].normalized, "loku");
    }

    #[test]
    fn test_positions_are_contiguous() {
        let tokens = tokenize("a b c");
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_latin_lowercased_sinhala_unchanged() {
        let tokens = tokenize("STUPID බල්ලා");
        assert_eq!(tokens[0].normalized, "stupid");
        assert_eq!(tokens[0].text, "STUPID");
        assert_eq!(tokens[1].normalized, "බල්ලා");
    }

    #[test]
    fn test_conjunct_consonants_stay_one_token() {
        // "ක්‍රමයක්" carries a zero-width joiner inside the conjunct
        let text = "ක්\u{200D}රමයක් හොඳයි";
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 2);
        // joiner stripped in the normalized form, cluster not split
        assert_eq!(tokens[0].normalized, "ක්රමයක්");
        assert!(tokens[0].text.contains('\u{200D}'));
    }

    #[test]
    fn test_zero_width_only_tokens_dropped() {
        let tokens = tokenize("hello \u{200C}\u{200D} world");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].position, 1);
    }
}
