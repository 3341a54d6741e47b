//! Per-document pipeline and per-archive aggregation.
//!
//! Each document runs these steps in isolation:
//! 1. Length and sequence-listing filters
//! 2. Example extraction (see [`crate::document`])
//! 3. Tense classification of every qualifying example
//! 4. Per-patent statistics
//!
//! Documents are admitted in batches and processed in parallel on the
//! caller's thread pool. Only the orchestrating thread merges results.

use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::LazyLock;

use log::{debug, warn};
use rayon::ThreadPool;
use rayon::prelude::*;
use regex::Regex;

use super::cancel::StopCheck;
use super::options::ProcessOptions;
use crate::document::extract_examples;
use crate::models::{DocumentNumber, ExampleBlock, PatentDocument, PatentStatistics, RunSummary};
use crate::tense::classify_tense;

static SEQUENCE_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<s\d+>.*?</s\d+>").unwrap());

/// Genetic sequence listings are published as documents of their own.
pub fn is_sequence_listing(text: &str) -> bool {
    text.contains("<sequence-cwu")
        || text.contains("<!DOCTYPE sequence-cwu")
        || SEQUENCE_MARKUP.is_match(text)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    TooShort,
    SequenceListing,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DocumentOutcome {
    Skipped(SkipReason),
    Processed {
        examples: Vec<ExampleBlock>,
        statistics: Option<PatentStatistics>,
    },
    /// Processing panicked; treated like malformed input.
    Failed,
}

/// Merged results of one archive.
#[derive(Clone, Debug, Default)]
pub struct Aggregation {
    pub examples_by_patent: BTreeMap<DocumentNumber, Vec<ExampleBlock>>,
    pub statistics_by_patent: BTreeMap<DocumentNumber, PatentStatistics>,
    pub summary: RunSummary,
}

impl Aggregation {
    fn record(&mut self, number: &DocumentNumber, outcome: DocumentOutcome) {
        match outcome {
            DocumentOutcome::Skipped(reason) => {
                debug!("Skipped {}: {:?}", number, reason);
                self.summary.documents_skipped += 1;
            }
            DocumentOutcome::Failed => {
                self.summary.documents_failed += 1;
            }
            DocumentOutcome::Processed {
                examples,
                statistics,
            } => {
                for tense in examples.iter().filter_map(ExampleBlock::tense) {
                    self.summary.record_tense(tense);
                }
                if let Some(statistics) = statistics {
                    self.summary.documents_with_statistics += 1;
                    self.statistics_by_patent.insert(number.clone(), statistics);
                }
                // Blocks without content never reach storage, so they are not
                // counted as found.
                let found = examples.iter().filter(|b| b.has_content()).count();
                if found > 0 {
                    self.summary.documents_with_examples += 1;
                    self.summary.examples_found += found;
                }
                if !examples.is_empty() {
                    self.examples_by_patent.insert(number.clone(), examples);
                }
            }
        }
    }
}

pub struct Aggregator<'a> {
    options: &'a ProcessOptions,
    pool: &'a ThreadPool,
}

impl<'a> Aggregator<'a> {
    pub fn new(options: &'a ProcessOptions, pool: &'a ThreadPool) -> Self {
        Self { options, pool }
    }

    pub fn options(&self) -> &ProcessOptions {
        self.options
    }

    fn qualifies(&self, block: &ExampleBlock) -> bool {
        block.has_content() && block.description().chars().count() > self.options.min_example_length
    }

    /// Run the full pipeline for one document. Pure apart from logging.
    pub fn process_document(&self, document: &PatentDocument, year: Option<i32>) -> DocumentOutcome {
        if document.char_len() < self.options.min_document_length {
            return DocumentOutcome::Skipped(SkipReason::TooShort);
        }
        if self.options.skip_sequence_listings && is_sequence_listing(&document.text) {
            return DocumentOutcome::Skipped(SkipReason::SequenceListing);
        }

        let mut examples = extract_examples(&document.text);
        for block in examples.iter_mut().filter(|b| self.qualifies(b)) {
            block.classification = Some(classify_tense(&block.description()));
        }

        let statistics = PatentStatistics::from_classifications(
            examples.iter().filter_map(|b| b.classification.as_ref()),
        )
        .map(|s| s.with_year(year));

        DocumentOutcome::Processed {
            examples,
            statistics,
        }
    }

    fn process_isolated<F>(document: &PatentDocument, step: &F) -> DocumentOutcome
    where
        F: Fn(&PatentDocument) -> DocumentOutcome,
    {
        catch_unwind(AssertUnwindSafe(|| step(document))).unwrap_or_else(|_| {
            warn!("Processing of document {} panicked; skipping it", document.number);
            DocumentOutcome::Failed
        })
    }

    /// Process deduplicated documents in admission batches.
    ///
    /// `stop` is consulted before each document is admitted. Admitted
    /// documents always complete, and everything merged so far is returned
    /// with `summary.cancelled` set.
    pub fn aggregate(
        &self,
        documents: &[PatentDocument],
        year: Option<i32>,
        stop: &dyn StopCheck,
    ) -> Aggregation {
        self.aggregate_with(documents, stop, |document| self.process_document(document, year))
    }

    /// Batched admission loop around an arbitrary per-document step.
    fn aggregate_with<F>(
        &self,
        documents: &[PatentDocument],
        stop: &dyn StopCheck,
        step: F,
    ) -> Aggregation
    where
        F: Fn(&PatentDocument) -> DocumentOutcome + Sync,
    {
        let batch_size = self.options.effective_batch_size();
        let mut aggregation = Aggregation::default();
        let mut pending = documents.iter();

        loop {
            let mut batch: Vec<&PatentDocument> = Vec::with_capacity(batch_size);
            while batch.len() < batch_size {
                let Some(document) = pending.next() else {
                    break;
                };
                if stop.should_stop() {
                    aggregation.summary.cancelled = true;
                    break;
                }
                batch.push(document);
            }
            if batch.is_empty() {
                break;
            }

            let outcomes: Vec<DocumentOutcome> = self.pool.install(|| {
                batch
                    .par_iter()
                    .map(|document| Self::process_isolated(document, &step))
                    .collect()
            });
            for (document, outcome) in batch.iter().zip(outcomes) {
                aggregation.record(&document.number, outcome);
            }

            if aggregation.summary.cancelled {
                break;
            }
        }

        aggregation
    }
}
