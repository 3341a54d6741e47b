use clap::Parser;

use crate::scanner::{DEFAULT_BATCH_SIZE, DEFAULT_INCLUDE, ProcessOptions};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory of unzipped bulk-data XML archives
    pub input_dir: String,

    /// Output file path
    #[arg(short, long, default_value = "output.json")]
    pub output_file: String,

    /// Worker threads for document processing (defaults to one per CPU)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Only classify examples whose title and content exceed this many characters
    #[arg(long, default_value_t = 0)]
    pub min_example_length: usize,

    /// Skip documents shorter than this many characters
    #[arg(long, default_value_t = 0)]
    pub min_document_length: usize,

    /// Process genetic sequence listings instead of skipping them
    #[arg(long)]
    pub no_skip_sequence_listings: bool,

    /// Year tag for statistics (inferred from ipgYYMMDD.xml/ipaYYMMDD.xml names when omitted)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Documents admitted per parallel batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Glob selecting archive files by name
    #[arg(long, default_value = DEFAULT_INCLUDE)]
    pub include: String,

    /// Exclude patterns (glob patterns like "ipa*" or "*.tmp")
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Log per-document decisions
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            min_example_length: self.min_example_length,
            min_document_length: self.min_document_length,
            skip_sequence_listings: !self.no_skip_sequence_listings,
            batch_size: self.batch_size,
            year: self.year,
            include: self.include.clone(),
            exclude: self.exclude.clone(),
        }
    }
}
