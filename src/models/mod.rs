mod document;
mod example;
mod output;
mod statistics;
mod summary;

pub use document::{DocumentNumber, PatentDocument};
pub use example::{
    ClassificationRule, ExampleBlock, Tense, TenseClassification, TenseCounts, TensePercentages,
    UnknownReason,
};
pub use output::{ExtraData, Header, OUTPUT_FORMAT_VERSION, Output};
pub use statistics::PatentStatistics;
pub use summary::RunSummary;
