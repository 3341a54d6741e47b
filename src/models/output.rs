use serde::Serialize;
use std::collections::BTreeMap;

use super::{DocumentNumber, ExampleBlock, PatentStatistics, RunSummary};

pub const OUTPUT_FORMAT_VERSION: &str = "1.0.0";

#[derive(Serialize, Debug)]
pub struct Output {
    pub headers: Vec<Header>,
    pub examples_by_patent: BTreeMap<DocumentNumber, Vec<ExampleBlock>>,
    pub statistics_by_patent: BTreeMap<DocumentNumber, PatentStatistics>,
}

#[derive(Serialize, Debug)]
pub struct Header {
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub duration: f64,
    pub input_directory: String,
    pub extra_data: ExtraData,
    pub summary: RunSummary,
    pub output_format_version: String,
}

#[derive(Serialize, Debug)]
pub struct ExtraData {
    pub files_count: usize,
    pub min_example_length: usize,
    pub min_document_length: usize,
    pub skip_sequence_listings: bool,
    pub year: Option<i32>,
    pub workers: usize,
    pub tool_version: String,
}
