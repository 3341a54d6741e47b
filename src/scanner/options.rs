use derive_builder::Builder;
use serde::Serialize;

pub const DEFAULT_BATCH_SIZE: usize = 200;
pub const DEFAULT_INCLUDE: &str = "*.xml";

/// Knobs for one processing run. Every field has a default, so
/// `ProcessOptionsBuilder::default().build()` always succeeds.
#[derive(Clone, Debug, Builder, Serialize, PartialEq, Eq)]
pub struct ProcessOptions {
    /// An example qualifies for classification only when its description
    /// (`title + "." + content`) is longer than this many characters.
    #[builder(default)]
    pub min_example_length: usize,
    /// Fragments shorter than this many characters are skipped unparsed.
    #[builder(default)]
    pub min_document_length: usize,
    /// Skip genetic sequence listings, which carry no prose examples.
    #[builder(default = "true")]
    pub skip_sequence_listings: bool,
    /// Documents admitted per parallel batch. Zero is treated as one.
    #[builder(default = "DEFAULT_BATCH_SIZE")]
    pub batch_size: usize,
    /// Year tag for statistics. Inferred from bulk-data file names when unset.
    #[builder(default, setter(strip_option))]
    pub year: Option<i32>,
    /// Glob selecting archive files by name.
    #[builder(default = "DEFAULT_INCLUDE.to_string()", setter(into))]
    pub include: String,
    /// Globs matched against file names and paths to skip.
    #[builder(default)]
    pub exclude: Vec<String>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        ProcessOptionsBuilder::default()
            .build()
            .expect("ProcessOptions fields all have defaults")
    }
}

impl ProcessOptions {
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}
