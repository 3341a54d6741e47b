use chrono::Utc;
use clap::Parser;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use serde_json::to_string_pretty;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io::Write;

use prophetic::cli::Cli;
use prophetic::models::{
    DocumentNumber, ExampleBlock, ExtraData, Header, OUTPUT_FORMAT_VERSION, Output,
    PatentStatistics, RunSummary,
};
use prophetic::scanner::{
    ArchiveResults, NeverStop, ProcessOptions, ProgressSink, ResultSink, count, process_directory,
};

fn main() -> std::io::Result<()> {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let start_time = Utc::now();

    let multi = init_logging(cli.verbose)?;
    let options = cli.process_options();

    let total_files = count(&cli.input_dir, &options)?;
    println!("Found {} archive files in {}", total_files, cli.input_dir);

    let mut pool_builder = rayon::ThreadPoolBuilder::new();
    if let Some(workers) = cli.workers {
        pool_builder = pool_builder.num_threads(workers);
    }
    let pool = pool_builder.build()?;

    let progress_bar = multi.add(create_progress_bar(total_files));
    let progress = BarProgress(&progress_bar);
    let mut collector = OutputCollector::default();
    let summary = process_directory(
        &cli.input_dir,
        &options,
        &pool,
        &mut collector,
        &progress,
        &NeverStop,
    )?;
    progress_bar.finish_with_message("Processing complete!");

    let end_time = Utc::now();
    let output = collector.into_output(
        start_time,
        end_time,
        &cli.input_dir,
        &options,
        pool.current_num_threads(),
        summary,
    );
    write_output(&cli.output_file, &output)?;

    print_summary(&output.headers[0].summary);
    println!("JSON output written to {}", cli.output_file);
    Ok(())
}

fn init_logging(verbose: bool) -> Result<MultiProgress, Box<dyn Error>> {
    let default_level = if verbose { "debug" } else { "info" };
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .build();
    let level = logger.filter();
    let multi = MultiProgress::new();
    LogWrapper::new(multi.clone(), logger).try_init()?;
    log::set_max_level(level);
    Ok(multi)
}

fn create_progress_bar(total_files: usize) -> ProgressBar {
    let progress_bar = ProgressBar::new(total_files as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .expect("Failed to create progress bar style")
            .progress_chars("#>-"),
    );
    progress_bar
}

struct BarProgress<'a>(&'a ProgressBar);

impl ProgressSink for BarProgress<'_> {
    fn report(&self, message: &str) {
        self.0.set_message(message.to_string());
    }

    fn file_done(&self) {
        self.0.inc(1);
    }
}

/// Merges every archive's results into one JSON document.
#[derive(Default)]
struct OutputCollector {
    examples_by_patent: BTreeMap<DocumentNumber, Vec<ExampleBlock>>,
    statistics_by_patent: BTreeMap<DocumentNumber, PatentStatistics>,
}

impl ResultSink for OutputCollector {
    fn store(&mut self, results: ArchiveResults) -> anyhow::Result<()> {
        self.examples_by_patent.extend(results.examples_by_patent);
        self.statistics_by_patent.extend(results.statistics_by_patent);
        Ok(())
    }
}

impl OutputCollector {
    fn into_output(
        self,
        start_time: chrono::DateTime<Utc>,
        end_time: chrono::DateTime<Utc>,
        input_directory: &str,
        options: &ProcessOptions,
        workers: usize,
        summary: RunSummary,
    ) -> Output {
        let duration =
            (end_time - start_time).num_nanoseconds().unwrap_or(0) as f64 / 1_000_000_000.0;

        let extra_data = ExtraData {
            files_count: summary.files_processed,
            min_example_length: options.min_example_length,
            min_document_length: options.min_document_length,
            skip_sequence_listings: options.skip_sequence_listings,
            year: options.year,
            workers,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Output {
            headers: vec![Header {
                start_timestamp: start_time.to_rfc3339(),
                end_timestamp: end_time.to_rfc3339(),
                duration,
                input_directory: input_directory.to_string(),
                extra_data,
                summary,
                output_format_version: OUTPUT_FORMAT_VERSION.to_string(),
            }],
            examples_by_patent: self.examples_by_patent,
            statistics_by_patent: self.statistics_by_patent,
        }
    }
}

fn write_output(output_file: &str, output: &Output) -> std::io::Result<()> {
    let json_output = match to_string_pretty(output) {
        Ok(json) => json,
        Err(err) => return Err(std::io::Error::other(err)),
    };
    let mut file = File::create(output_file)?;
    file.write_all(json_output.as_bytes())?;
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "Files: {} of {} processed{}",
        summary.files_processed,
        summary.files_seen,
        if summary.cancelled { " (cancelled)" } else { "" }
    );
    println!(
        "Documents: {} seen, {} unique, {} malformed, {} skipped, {} failed",
        summary.documents_seen,
        summary.documents_unique,
        summary.documents_malformed,
        summary.documents_skipped,
        summary.documents_failed
    );
    println!(
        "Patents with examples: {} ({} with statistics)",
        summary.documents_with_examples, summary.documents_with_statistics
    );
    println!(
        "Examples: {} found, {} classified (past {}, present {}, unknown {})",
        summary.examples_found,
        summary.examples_classified,
        summary.past,
        summary.present,
        summary.unknown
    );
    for error in &summary.errors {
        eprintln!("{}", error);
    }
}
