pub mod cli;
pub mod document;
pub mod models;
pub mod scanner;
pub mod tense;

pub use models::{ExampleBlock, Header, Output, PatentStatistics, RunSummary, Tense};
pub use scanner::{
    ArchiveResults, ProcessOptions, ResultSink, StopSignal, count, process_directory,
};
pub use tense::classify_tense;
