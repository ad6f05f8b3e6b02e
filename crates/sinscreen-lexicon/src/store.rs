//! Shared lexicon store with feedback ingestion
//!
//! Readers take an `Arc` snapshot and never block behind writers; an
//! analysis that started before a feedback submission finishes on the
//! lexicon it started with. Writers clone the current lexicon, apply the
//! change, and swap the `Arc`.
//!
//! Accepted feedback is appended to a JSONL journal so moderator-taught
//! terms survive restarts. The journal is replayed on startup.

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use sinscreen_core::{normalize_text, Error, Result, TermCategory};

use crate::lexicon::Lexicon;

/// Thread-safe, copy-on-write lexicon holder
pub struct LexiconStore {
    current: RwLock<Arc<Lexicon>>,
    journal: Option<Mutex<JournalWriter>>,
}

impl LexiconStore {
    /// Create a store without persistence. Feedback lives until restart.
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            current: RwLock::new(Arc::new(lexicon)),
            journal: None,
        }
    }

    /// Create a store backed by a JSONL feedback journal. Existing
    /// journal entries are replayed on top of the given lexicon;
    /// malformed lines are skipped with a warning so one bad entry
    /// cannot take the engine down.
    pub fn with_journal(lexicon: Lexicon, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut lexicon = lexicon;

        if path.exists() {
            let file = File::open(&path)?;
            let mut replayed = 0usize;
            for (line_no, line) in BufReader::new(file).lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let entry: JournalEntry = match serde_json::from_str(&line) {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!(line = line_no + 1, error = %e, "skipping malformed feedback entry");
                        continue;
                    }
                };
                if let Err(e) = entry.apply(&mut lexicon) {
                    warn!(line = line_no + 1, error = %e, "skipping invalid feedback entry");
                    continue;
                }
                replayed += 1;
            }
            info!(replayed, path = %path.display(), "replayed feedback journal");
        }

        let writer = JournalWriter::open(path)?;
        Ok(Self {
            current: RwLock::new(Arc::new(lexicon)),
            journal: Some(Mutex::new(writer)),
        })
    }

    /// Current lexicon snapshot. Cheap; clones an `Arc`.
    pub fn snapshot(&self) -> Arc<Lexicon> {
        self.current.read().clone()
    }

    /// Add or reweigh a term from moderator feedback.
    ///
    /// Validation happens here, at the ingestion boundary. Invalid
    /// submissions are rejected without touching the published lexicon
    /// or the journal.
    pub fn add_term(&self, category: TermCategory, term: &str, weight: f64) -> Result<()> {
        let normalized = validate_term(term, weight)?;
        self.append(JournalEntry::Term {
            term: normalized.clone(),
            category,
            weight,
        })?;
        self.publish(|lexicon| lexicon.insert_term(category, &normalized, weight))?;
        debug!(term = %normalized, category = category.as_str(), weight, "lexicon term added");
        Ok(())
    }

    /// Add or reweigh a bigram from moderator feedback
    pub fn add_bigram(&self, first: &str, second: &str, weight: f64) -> Result<()> {
        let first = validate_term(first, weight)?;
        let second = validate_term(second, weight)?;
        self.append(JournalEntry::Bigram {
            first: first.clone(),
            second: second.clone(),
            weight,
        })?;
        self.publish(|lexicon| lexicon.insert_bigram(&first, &second, weight))?;
        debug!(first = %first, second = %second, weight, "lexicon bigram added");
        Ok(())
    }

    fn append(&self, entry: JournalEntry) -> Result<()> {
        if let Some(journal) = &self.journal {
            journal.lock().append(&entry)?;
        }
        Ok(())
    }

    fn publish<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Lexicon) -> Result<()>,
    {
        let mut guard = self.current.write();
        let mut next = Lexicon::clone(&guard);
        mutate(&mut next)?;
        *guard = Arc::new(next);
        Ok(())
    }
}

fn validate_term(term: &str, weight: f64) -> Result<String> {
    let normalized = normalize_text(term.trim());
    if normalized.is_empty() {
        return Err(Error::feedback("term is empty after normalization"));
    }
    if normalized.split_whitespace().count() != 1 {
        return Err(Error::feedback(format!(
            "term '{normalized}' must be a single token"
        )));
    }
    if normalized.chars().count() > crate::lexicon::MAX_TERM_CHARS {
        return Err(Error::feedback(format!(
            "term '{normalized}' exceeds {} characters",
            crate::lexicon::MAX_TERM_CHARS
        )));
    }
    if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
        return Err(Error::feedback(format!(
            "weight {weight} is outside [0, 1]"
        )));
    }
    Ok(normalized)
}

/// One accepted feedback submission, as journaled
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum JournalEntry {
    Term {
        term: String,
        category: TermCategory,
        weight: f64,
    },
    Bigram {
        first: String,
        second: String,
        weight: f64,
    },
}

impl JournalEntry {
    fn apply(&self, lexicon: &mut Lexicon) -> Result<()> {
        match self {
            Self::Term {
                term,
                category,
                weight,
            } => lexicon.insert_term(*category, term, *weight),
            Self::Bigram {
                first,
                second,
                weight,
            } => lexicon.insert_bigram(first, second, *weight),
        }
    }
}

struct JournalWriter {
    file: File,
    path: PathBuf,
}

impl JournalWriter {
    fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { file, path })
    }

    fn append(&mut self, entry: &JournalEntry) -> Result<()> {
        let line = serde_json::to_string(entry)?;
        writeln!(self.file, "{line}").map_err(|e| {
            Error::feedback(format!(
                "failed to journal feedback to {}: {e}",
                self.path.display()
            ))
        })?;
        self.file.flush()?;
        Ok(())
    }
}
