use serde::Serialize;

use super::example::Tense;

/// Counts reported at the end of a run so a human can spot silent
/// degradation, e.g. near-zero examples from a markup format change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files_seen: usize,
    pub files_processed: usize,
    /// Raw fragments produced by splitting.
    pub documents_seen: usize,
    /// Fragments surviving deduplication.
    pub documents_unique: usize,
    /// Fragments dropped because no document number could be extracted.
    pub documents_malformed: usize,
    /// Documents skipped by length or sequence-listing filters.
    pub documents_skipped: usize,
    /// Documents whose processing panicked and was isolated.
    pub documents_failed: usize,
    pub documents_with_examples: usize,
    pub documents_with_statistics: usize,
    pub examples_found: usize,
    pub examples_classified: usize,
    pub past: usize,
    pub present: usize,
    pub unknown: usize,
    pub cancelled: bool,
    pub errors: Vec<String>,
}

impl RunSummary {
    pub fn record_tense(&mut self, tense: Tense) {
        self.examples_classified += 1;
        match tense {
            Tense::Past => self.past += 1,
            Tense::Present => self.present += 1,
            Tense::Unknown => self.unknown += 1,
        }
    }

    /// Fold the counts of another (per-file) summary into this one.
    pub fn merge(&mut self, other: RunSummary) {
        self.files_seen += other.files_seen;
        self.files_processed += other.files_processed;
        self.documents_seen += other.documents_seen;
        self.documents_unique += other.documents_unique;
        self.documents_malformed += other.documents_malformed;
        self.documents_skipped += other.documents_skipped;
        self.documents_failed += other.documents_failed;
        self.documents_with_examples += other.documents_with_examples;
        self.documents_with_statistics += other.documents_with_statistics;
        self.examples_found += other.examples_found;
        self.examples_classified += other.examples_classified;
        self.past += other.past;
        self.present += other.present;
        self.unknown += other.unknown;
        self.cancelled |= other.cancelled;
        self.errors.extend(other.errors);
    }
}
