//! Token-to-lexicon matching
//!
//! Resolution order per token and category: exact lookup, then generated
//! obfuscation variants, then fuzzy similarity. The first stage that hits
//! wins, so an exact match is never downgraded by a fuzzier one.

use std::cmp::Reverse;
use tracing::trace;

use sinscreen_core::{FuzzyConfig, MatchRecord, MatchType, TermCategory, Token};

use crate::lexicon::Lexicon;
use crate::variations::token_variations;

/// Similarity reported for variant hits. A variant is a confident decode,
/// not a guess, so it sits just below exact.
const VARIATION_SIMILARITY: f64 = 0.9;

/// Tokens that negate the phrase after them ("not a pakaya")
const NEGATORS: &[&str] = &[
    "not", "no", "never", "dont", "don't", "isnt", "isn't", "arent", "aren't", "wasnt", "wasn't",
    "නැහැ", "නෑ", "නැත", "නෙමෙයි", "නෙවෙයි", "එපා", "epa", "nemei", "newei", "nathi", "na",
];

const QUOTE_CHARS: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// How far back a negator reaches, in tokens
const NEGATION_REACH: usize = 2;

/// Everyday words within one edit of a lexicon term. These never match,
/// or "ball" would fuzzy-match "balla" and "putha" (son) would fuzzy-match
/// a slur.
const SAFE_WORDS: &[&str] = &[
    "ball", "balls", "bella", "batch", "pitch", "witch", "shirt", "shift", "skill", "laser",
    "closer", "loses", "crash", "idiom", "gone", "gonna", "mode", "hata", "putha",
];

/// Per-token lexicon lookup result
#[derive(Debug, Clone, Default)]
pub struct TokenLookup {
    /// Hate weight of the best hate-category match, or 0.0
    pub hate: f64,

    /// Harassment weight of the best harassment-category match, or 0.0
    pub harassment: f64,

    /// Positive weight of the best positive-category match, or 0.0
    pub positive: f64,

    /// Best hate or harassment match for reporting, if any
    pub best: Option<MatchRecord>,
}

impl TokenLookup {
    fn suppress(&mut self) {
        self.hate = 0.0;
        self.harassment = 0.0;
        self.best = None;
    }
}

#[derive(Debug, Clone)]
struct CategoryHit {
    term: String,
    weight: f64,
    match_type: MatchType,
    similarity: f64,
}

/// Matches normalized tokens against a lexicon
#[derive(Debug, Clone)]
pub struct TermMatcher {
    config: FuzzyConfig,
}

impl TermMatcher {
    /// Create a matcher with the given fuzzy tuning
    pub fn new(config: FuzzyConfig) -> Self {
        Self { config }
    }

    /// Look up every token, then apply sequence-level suppression:
    /// quoted tokens and tokens within reach of a preceding negator do
    /// not count as hate or harassment evidence.
    pub fn lookup_sequence(&self, lexicon: &Lexicon, tokens: &[Token]) -> Vec<TokenLookup> {
        let mut lookups: Vec<TokenLookup> = tokens
            .iter()
            .map(|token| self.lookup_token(lexicon, token))
            .collect();

        for (i, token) in tokens.iter().enumerate() {
            if lookups[i].hate <= 0.0 && lookups[i].harassment <= 0.0 {
                continue;
            }
            if is_quoted(&token.text) || negated_before(tokens, i) {
                trace!(token = %token.normalized, "suppressing negated or quoted match");
                lookups[i].suppress();
            }
        }
        lookups
    }

    /// Look up a single token across all categories
    pub fn lookup_token(&self, lexicon: &Lexicon, token: &Token) -> TokenLookup {
        let trimmed = token
            .normalized
            .trim_matches(|c: char| !c.is_alphanumeric());
        if SAFE_WORDS.contains(&token.normalized.as_str()) || SAFE_WORDS.contains(&trimmed) {
            return TokenLookup::default();
        }

        let variants = token_variations(&token.normalized);
        let mut lookup = TokenLookup::default();

        for category in [
            TermCategory::Hate,
            TermCategory::Harassment,
            TermCategory::Positive,
        ] {
            let Some(hit) = self.match_category(lexicon, category, &token.normalized, &variants)
            else {
                continue;
            };

            match category {
                TermCategory::Hate => lookup.hate = hit.weight,
                TermCategory::Harassment => lookup.harassment = hit.weight,
                TermCategory::Positive => lookup.positive = hit.weight,
            }

            // positive hits feed scoring but are not reported as matches
            if category == TermCategory::Positive {
                continue;
            }
            let record = MatchRecord {
                matched_term: hit.term,
                input_token: token.normalized.clone(),
                match_type: hit.match_type,
                similarity: hit.similarity,
                category,
                weight: hit.weight,
                position: token.position,
            };
            lookup.best = Some(match lookup.best.take() {
                None => record,
                Some(current) => prefer_record(current, record),
            });
        }
        lookup
    }

    fn match_category(
        &self,
        lexicon: &Lexicon,
        category: TermCategory,
        normalized: &str,
        variants: &[String],
    ) -> Option<CategoryHit> {
        if let Some(weight) = lexicon.weight(category, normalized) {
            return Some(CategoryHit {
                term: normalized.to_string(),
                weight,
                match_type: MatchType::Exact,
                similarity: 1.0,
            });
        }

        let mut best: Option<CategoryHit> = None;
        for variant in variants {
            if let Some(weight) = lexicon.weight(category, variant) {
                let candidate = CategoryHit {
                    term: variant.clone(),
                    weight,
                    match_type: MatchType::Variation,
                    similarity: VARIATION_SIMILARITY,
                };
                best = Some(match best.take() {
                    None => candidate,
                    Some(current) if candidate.weight > current.weight => candidate,
                    Some(current) => current,
                });
            }
        }
        if best.is_some() {
            return best;
        }

        self.fuzzy_match(lexicon, category, normalized)
    }

    /// Scan a category for the closest term within the length window.
    /// Ties go to higher weight, then the shorter term, then the
    /// lexically smaller term.
    fn fuzzy_match(
        &self,
        lexicon: &Lexicon,
        category: TermCategory,
        normalized: &str,
    ) -> Option<CategoryHit> {
        let token_len = normalized.chars().count();
        if token_len < self.config.min_token_len {
            return None;
        }

        let mut best: Option<CategoryHit> = None;
        for (term, weight) in lexicon.terms(category) {
            let term_len = term.chars().count();
            if term_len.abs_diff(token_len) > self.config.length_window {
                continue;
            }
            let similarity = strsim::normalized_levenshtein(normalized, term);
            if similarity < self.config.similarity_threshold {
                continue;
            }
            // lexical order falls out of the BTreeMap scan: on a full
            // tie the earlier term stays
            let better = match &best {
                None => true,
                Some(current) => {
                    (similarity, weight, Reverse(term_len))
                        > (
                            current.similarity,
                            current.weight,
                            Reverse(current.term.chars().count()),
                        )
                }
            };
            if better {
                best = Some(CategoryHit {
                    term: term.to_string(),
                    weight,
                    match_type: MatchType::Fuzzy,
                    similarity,
                });
            }
        }
        best
    }
}

/// Pick the match to report when both hate and harassment hit the same
/// token: match-type precedence, then similarity, then weight. Hate wins
/// remaining ties since it is the severer category.
fn prefer_record(current: MatchRecord, candidate: MatchRecord) -> MatchRecord {
    let current_key = (
        current.match_type.precedence(),
        current.similarity,
        current.weight,
    );
    let candidate_key = (
        candidate.match_type.precedence(),
        candidate.similarity,
        candidate.weight,
    );
    if candidate_key > current_key {
        candidate
    } else {
        current
    }
}

fn is_quoted(text: &str) -> bool {
    let mut chars = text.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return false;
    };
    QUOTE_CHARS.contains(&first) && QUOTE_CHARS.contains(&last)
}

fn negated_before(tokens: &[Token], index: usize) -> bool {
    tokens[index.saturating_sub(NEGATION_REACH)..index]
        .iter()
        .any(|t| NEGATORS.contains(&t.normalized.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sinscreen_core::normalize_text;

    fn matcher() -> TermMatcher {
        TermMatcher::new(FuzzyConfig::default())
    }

    fn token(text: &str, position: usize) -> Token {
        Token::new(text, normalize_text(text), position)
    }

    fn tokens(text: &str) -> Vec<Token> {
        text.split_whitespace()
            .enumerate()
            .map(|(i, t)| token(t, i))
            .collect()
    }

    #[test]
    fn test_exact_match_beats_fuzzy() {
        let lexicon = Lexicon::builtin();
        let lookup = matcher().lookup_token(&lexicon, &token("balla", 0));
        let record = lookup.best.unwrap();
        assert_eq!(record.match_type, MatchType::Exact);
        assert_eq!(record.similarity, 1.0);
        assert_eq!(record.matched_term, "balla");
        assert_eq!(lookup.hate, 0.85);
    }

    #[test]
    fn test_variation_match_via_phonetic_digit() {
        let lexicon = Lexicon::builtin();
        let lookup = matcher().lookup_token(&lexicon, &token("h8", 0));
        let record = lookup.best.unwrap();
        assert_eq!(record.match_type, MatchType::Variation);
        assert_eq!(record.matched_term, "hate");
        assert_eq!(record.similarity, VARIATION_SIMILARITY);
    }

    #[test]
    fn test_fuzzy_match_within_threshold() {
        let lexicon = Lexicon::builtin();
        let lookup = matcher().lookup_token(&lexicon, &token("st@pid", 0));
        let record = lookup.best.unwrap();
        assert_eq!(record.match_type, MatchType::Fuzzy);
        assert_eq!(record.matched_term, "stupid");
        assert!(record.similarity >= 0.8);
        assert!(record.similarity < 1.0);
    }

    #[test]
    fn test_short_tokens_never_fuzzy_match() {
        let lexicon = Lexicon::builder()
            .term(TermCategory::Hate, "gon", 0.6)
            .build();
        // "gun" is one edit from "gon" but too short for fuzzy
        let lookup = matcher().lookup_token(&lexicon, &token("gu", 0));
        assert!(lookup.best.is_none());
    }

    #[test]
    fn test_clean_token_matches_nothing() {
        let lexicon = Lexicon::builtin();
        let lookup = matcher().lookup_token(&lexicon, &token("සුන්දර", 0));
        assert!(lookup.best.is_none());
        assert_eq!(lookup.hate, 0.0);
    }

    #[test]
    fn test_negation_suppresses_match() {
        let lexicon = Lexicon::builtin();
        let toks = tokens("oya not a pakaya");
        let lookups = matcher().lookup_sequence(&lexicon, &toks);
        assert_eq!(lookups[3].hate, 0.0);
        assert!(lookups[3].best.is_none());
    }

    #[test]
    fn test_negation_reach_is_bounded() {
        let lexicon = Lexicon::builtin();
        let toks = tokens("not really very big pakaya");
        let lookups = matcher().lookup_sequence(&lexicon, &toks);
        // negator is four tokens back, out of reach
        assert!(lookups[4].hate > 0.0);
    }

    #[test]
    fn test_quoted_token_suppressed() {
        let lexicon = Lexicon::builtin();
        let toks = tokens("he said \"pakaya\" loudly");
        let lookups = matcher().lookup_sequence(&lexicon, &toks);
        assert_eq!(lookups[2].hate, 0.0);
        assert!(lookups[2].best.is_none());
    }

    #[test]
    fn test_positive_terms_feed_weight_but_not_matches() {
        let lexicon = Lexicon::builtin();
        let lookup = matcher().lookup_token(&lexicon, &token("හොඳ", 0));
        assert_eq!(lookup.positive, 0.7);
        assert!(lookup.best.is_none());
    }

    #[test]
    fn test_safe_words_never_match() {
        let lexicon = Lexicon::builtin();
        for word in ["ball", "gonna", "shirt", "putha", "skill"] {
            let lookup = matcher().lookup_token(&lexicon, &token(word, 0));
            assert!(lookup.best.is_none(), "safe word {word} matched");
            assert_eq!(lookup.hate, 0.0);
            assert_eq!(lookup.harassment, 0.0);
        }
        // punctuation does not defeat the safe list
        let lookup = matcher().lookup_token(&lexicon, &token("ball,", 0));
        assert!(lookup.best.is_none());
    }

    #[test]
    fn test_fuzzy_tie_breaks_to_shorter_term() {
        let lexicon = Lexicon::builder()
            .term(TermCategory::Hate, "payya", 0.9)
            .term(TermCategory::Hate, "payiya", 0.9)
            .build();
        let lookup = matcher().lookup_token(&lexicon, &token("payyya", 0));
        let record = lookup.best.unwrap();
        // one edit from either term; equal similarity and weight
        // resolve to the shorter term
        assert_eq!(record.match_type, MatchType::Fuzzy);
        assert!(record.similarity >= 0.8);
        assert_eq!(record.matched_term, "payya");
    }
}
