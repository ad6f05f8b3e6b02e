//! Weighted term lexicon
//!
//! Three categories of single terms plus a bigram table, all keyed on
//! normalized text. `BTreeMap` keeps iteration order deterministic, which
//! the fuzzy matcher relies on for stable tie-breaking.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use sinscreen_core::{normalize_text, Error, Result, TermCategory};

use crate::seed;

/// Immutable weighted lexicon snapshot
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    hate: BTreeMap<String, f64>,
    harassment: BTreeMap<String, f64>,
    positive: BTreeMap<String, f64>,
    bigrams: BTreeMap<(String, String), f64>,
}

impl Lexicon {
    /// An empty lexicon. Matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a lexicon term by term
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder {
            lexicon: Self::empty(),
        }
    }

    /// The built-in seed lexicon of Sinhala, Singlish, and English terms
    pub fn builtin() -> Self {
        let mut builder = Self::builder();
        for (term, weight) in seed::HATE_TERMS {
            builder = builder.term(TermCategory::Hate, term, *weight);
        }
        for (term, weight) in seed::HARASSMENT_TERMS {
            builder = builder.term(TermCategory::Harassment, term, *weight);
        }
        for (term, weight) in seed::POSITIVE_TERMS {
            builder = builder.term(TermCategory::Positive, term, *weight);
        }
        for (first, second, weight) in seed::BIGRAMS {
            builder = builder.bigram(first, second, *weight);
        }
        builder.build()
    }

    /// Parse a lexicon from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: LexiconFile = serde_yaml::from_str(content)
            .map_err(|e| Error::lexicon(format!("invalid lexicon file: {e}")))?;

        let mut lexicon = Self::empty();
        for (category, entries) in [
            (TermCategory::Hate, &file.terms.hate),
            (TermCategory::Harassment, &file.terms.harassment),
            (TermCategory::Positive, &file.terms.positive),
        ] {
            for entry in entries {
                lexicon.insert_term(category, &entry.term, entry.weight)?;
            }
        }
        for entry in &file.bigrams {
            lexicon.insert_bigram(&entry.first, &entry.second, entry.weight)?;
        }
        Ok(lexicon)
    }

    /// Load a lexicon from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Merge another lexicon into this one. The other lexicon wins on
    /// conflicting weights.
    pub fn merged(mut self, other: Lexicon) -> Self {
        self.hate.extend(other.hate);
        self.harassment.extend(other.harassment);
        self.positive.extend(other.positive);
        self.bigrams.extend(other.bigrams);
        self
    }

    /// Weight of a normalized term in a category, if present
    pub fn weight(&self, category: TermCategory, term: &str) -> Option<f64> {
        self.table(category).get(term).copied()
    }

    /// Iterate a category's terms in lexical order
    pub fn terms(&self, category: TermCategory) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.table(category).iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// Weight of a normalized bigram, if present
    pub fn bigram(&self, first: &str, second: &str) -> Option<f64> {
        self.bigrams
            .get(&(first.to_string(), second.to_string()))
            .copied()
    }

    /// Total single-term count across categories
    pub fn term_count(&self) -> usize {
        self.hate.len() + self.harassment.len() + self.positive.len()
    }

    /// Bigram count
    pub fn bigram_count(&self) -> usize {
        self.bigrams.len()
    }

    /// True when no terms and no bigrams are loaded
    pub fn is_empty(&self) -> bool {
        self.term_count() == 0 && self.bigrams.is_empty()
    }

    fn table(&self, category: TermCategory) -> &BTreeMap<String, f64> {
        match category {
            TermCategory::Hate => &self.hate,
            TermCategory::Harassment => &self.harassment,
            TermCategory::Positive => &self.positive,
        }
    }

    fn table_mut(&mut self, category: TermCategory) -> &mut BTreeMap<String, f64> {
        match category {
            TermCategory::Hate => &mut self.hate,
            TermCategory::Harassment => &mut self.harassment,
            TermCategory::Positive => &mut self.positive,
        }
    }

    /// Validate and insert a term. This is the ingestion boundary: every
    /// external term (files, feedback) goes through here.
    pub(crate) fn insert_term(
        &mut self,
        category: TermCategory,
        term: &str,
        weight: f64,
    ) -> Result<()> {
        let normalized = normalize_text(term.trim());
        if normalized.is_empty() {
            return Err(Error::lexicon("term is empty after normalization"));
        }
        if normalized.chars().count() > MAX_TERM_CHARS {
            return Err(Error::lexicon(format!(
                "term '{normalized}' exceeds {MAX_TERM_CHARS} characters"
            )));
        }
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(Error::lexicon(format!(
                "weight {weight} for '{normalized}' is outside [0, 1]"
            )));
        }
        self.table_mut(category).insert(normalized, weight);
        Ok(())
    }

    /// Validate and insert a bigram
    pub(crate) fn insert_bigram(&mut self, first: &str, second: &str, weight: f64) -> Result<()> {
        let first = normalize_text(first.trim());
        let second = normalize_text(second.trim());
        if first.is_empty() || second.is_empty() {
            return Err(Error::lexicon("bigram side is empty after normalization"));
        }
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(Error::lexicon(format!(
                "weight {weight} for '{first} {second}' is outside [0, 1]"
            )));
        }
        self.bigrams.insert((first, second), weight);
        Ok(())
    }
}

pub(crate) const MAX_TERM_CHARS: usize = 64;

/// Infallible builder for code-defined lexicons. Out-of-range weights are
/// clamped and empty terms dropped; hand-written tables should not need
/// error plumbing.
pub struct LexiconBuilder {
    lexicon: Lexicon,
}

impl LexiconBuilder {
    /// Add a term
    pub fn term(mut self, category: TermCategory, term: &str, weight: f64) -> Self {
        let normalized = normalize_text(term.trim());
        if !normalized.is_empty() {
            let weight = if weight.is_finite() {
                weight.clamp(0.0, 1.0)
            } else {
                0.0
            };
            self.lexicon.table_mut(category).insert(normalized, weight);
        }
        self
    }

    /// Add a bigram
    pub fn bigram(mut self, first: &str, second: &str, weight: f64) -> Self {
        let first = normalize_text(first.trim());
        let second = normalize_text(second.trim());
        if !first.is_empty() && !second.is_empty() {
            let weight = if weight.is_finite() {
                weight.clamp(0.0, 1.0)
            } else {
                0.0
            };
            self.lexicon.bigrams.insert((first, second), weight);
        }
        self
    }

    /// Finish building
    pub fn build(self) -> Lexicon {
        self.lexicon
    }
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    terms: TermSection,

    #[serde(default)]
    bigrams: Vec<BigramEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct TermSection {
    #[serde(default)]
    hate: Vec<TermEntry>,

    #[serde(default)]
    harassment: Vec<TermEntry>,

    #[serde(default)]
    positive: Vec<TermEntry>,
}

#[derive(Debug, Deserialize)]
struct TermEntry {
    term: String,
    weight: f64,
}

#[derive(Debug, Deserialize)]
struct BigramEntry {
    first: String,
    second: String,
    weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lexicon_loads() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.term_count() > 100);
        assert!(lexicon.bigram_count() > 5);
        assert_eq!(lexicon.weight(TermCategory::Hate, "pakaya"), Some(0.9));
        assert_eq!(lexicon.weight(TermCategory::Hate, "බල්ලා"), Some(0.95));
        assert_eq!(lexicon.weight(TermCategory::Positive, "හොඳ"), Some(0.7));
        assert_eq!(lexicon.bigram("මූ", "බල්ලා"), Some(0.95));
        assert_eq!(lexicon.weight(TermCategory::Hate, "nosuchword"), None);
    }

    #[test]
    fn test_builder_normalizes_terms() {
        let lexicon = Lexicon::builder()
            .term(TermCategory::Hate, "  PakaYA ", 0.9)
            .term(TermCategory::Hate, "", 0.5)
            .build();
        assert_eq!(lexicon.weight(TermCategory::Hate, "pakaya"), Some(0.9));
        assert_eq!(lexicon.term_count(), 1);
    }

    #[test]
    fn test_yaml_lexicon_parses() {
        let lexicon = Lexicon::from_yaml(
            r#"
terms:
  hate:
    - { term: "badword", weight: 0.9 }
  positive:
    - { term: "kindword", weight: 0.6 }
bigrams:
  - { first: "get", second: "out", weight: 0.5 }
"#,
        )
        .unwrap();
        assert_eq!(lexicon.weight(TermCategory::Hate, "badword"), Some(0.9));
        assert_eq!(lexicon.weight(TermCategory::Positive, "kindword"), Some(0.6));
        assert_eq!(lexicon.bigram("get", "out"), Some(0.5));
    }

    #[test]
    fn test_yaml_rejects_out_of_range_weight() {
        let result = Lexicon::from_yaml(
            r#"
terms:
  hate:
    - { term: "badword", weight: 1.7 }
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_merged_prefers_other() {
        let base = Lexicon::builder()
            .term(TermCategory::Hate, "word", 0.5)
            .build();
        let overlay = Lexicon::builder()
            .term(TermCategory::Hate, "word", 0.9)
            .term(TermCategory::Hate, "extra", 0.7)
            .build();
        let merged = base.merged(overlay);
        assert_eq!(merged.weight(TermCategory::Hate, "word"), Some(0.9));
        assert_eq!(merged.weight(TermCategory::Hate, "extra"), Some(0.7));
    }
}
