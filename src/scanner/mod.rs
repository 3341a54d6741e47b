mod aggregate;
mod cancel;
mod count;
mod options;
mod process;
mod progress;

use std::collections::BTreeMap;

use crate::models::{DocumentNumber, ExampleBlock, PatentStatistics, RunSummary};

pub use self::aggregate::{
    Aggregation, Aggregator, DocumentOutcome, SkipReason, is_sequence_listing,
};
pub use self::cancel::{NeverStop, StopCheck, StopSignal};
pub use self::count::{ArchiveFilter, count, list_archives};
pub use self::options::{DEFAULT_BATCH_SIZE, DEFAULT_INCLUDE, ProcessOptions, ProcessOptionsBuilder};
pub use self::process::{infer_year_from_file_name, process_archive_text, process_directory};
pub use self::progress::{ProgressSink, SilentProgress};

/// Results of one archive file, handed to the storage collaborator once.
#[derive(Clone, Debug, Default)]
pub struct ArchiveResults {
    /// File name of the archive.
    pub source: String,
    pub year: Option<i32>,
    pub examples_by_patent: BTreeMap<DocumentNumber, Vec<ExampleBlock>>,
    pub statistics_by_patent: BTreeMap<DocumentNumber, PatentStatistics>,
    pub summary: RunSummary,
}

impl ArchiveResults {
    /// Drop example blocks without content, and patents left with none.
    pub fn drop_empty_examples(&mut self) {
        for blocks in self.examples_by_patent.values_mut() {
            blocks.retain(ExampleBlock::has_content);
        }
        self.examples_by_patent.retain(|_, blocks| !blocks.is_empty());
    }
}

/// Storage collaborator. Receives the results of each archive file,
/// including the partial results of a cancelled one.
pub trait ResultSink {
    fn store(&mut self, results: ArchiveResults) -> anyhow::Result<()>;
}

impl ResultSink for Vec<ArchiveResults> {
    fn store(&mut self, results: ArchiveResults) -> anyhow::Result<()> {
        self.push(results);
        Ok(())
    }
}
