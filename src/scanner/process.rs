use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Error};
use log::{info, warn};
use rayon::ThreadPool;
use regex::Regex;

use super::aggregate::Aggregator;
use super::cancel::StopCheck;
use super::count::{ArchiveFilter, file_name_of, list_archives};
use super::options::ProcessOptions;
use super::progress::ProgressSink;
use super::{ArchiveResults, ResultSink};
use crate::document::{deduplicate, split_documents};
use crate::models::RunSummary;

/// Bulk-data archive names: `ipgYYMMDD.xml` for grants, `ipaYYMMDD.xml` for
/// applications.
static BULK_FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ip[ga](\d{2})\d{4}\.xml").unwrap());

/// Year of a bulk-data archive from its file name. Two-digit years below 50
/// are 20YY, the rest 19YY.
pub fn infer_year_from_file_name(name: &str) -> Option<i32> {
    let captures = BULK_FILE_NAME.captures(name)?;
    let short: i32 = captures[1].parse().ok()?;
    Some(if short < 50 { 2000 + short } else { 1900 + short })
}

/// Split, deduplicate and aggregate the text of one archive file.
pub fn process_archive_text(
    content: &str,
    source: &str,
    year: Option<i32>,
    aggregator: &Aggregator<'_>,
    stop: &dyn StopCheck,
) -> ArchiveResults {
    let fragments: Vec<&str> = split_documents(content).collect();
    let deduplicated = deduplicate(fragments.iter().copied());

    let aggregation = aggregator.aggregate(&deduplicated.documents, year, stop);

    let mut summary = aggregation.summary;
    summary.documents_seen = fragments.len();
    summary.documents_malformed = deduplicated.malformed;
    summary.documents_unique = deduplicated.documents.len();

    ArchiveResults {
        source: source.to_string(),
        year,
        examples_by_patent: aggregation.examples_by_patent,
        statistics_by_patent: aggregation.statistics_by_patent,
        summary,
    }
}

/// Process every archive file in `dir`, handing each file's results to
/// `sink` as soon as the file is done.
///
/// Files run one after another; documents within a file run on `pool`.
/// `stop` is checked before each file and before each document. A stopped
/// run still stores what it gathered and returns a summary with
/// `cancelled` set.
///
/// Unreadable files are reported, recorded in the summary and skipped. Only
/// an unreadable directory or a failing sink abort the run.
pub fn process_directory<P: AsRef<Path>>(
    dir: P,
    options: &ProcessOptions,
    pool: &ThreadPool,
    sink: &mut dyn ResultSink,
    progress: &dyn ProgressSink,
    stop: &dyn StopCheck,
) -> Result<RunSummary, Error> {
    let dir = dir.as_ref();
    let filter = ArchiveFilter::from_options(options)?;
    let archives = list_archives(dir, &filter)?;
    let aggregator = Aggregator::new(options, pool);

    let mut summary = RunSummary {
        files_seen: archives.len(),
        ..RunSummary::default()
    };

    for (index, path) in archives.iter().enumerate() {
        if stop.should_stop() {
            progress.report("Stop requested; remaining files skipped");
            summary.cancelled = true;
            break;
        }

        let name = file_name_of(path);
        progress.report(&format!(
            "Processing file {} of {}: {}",
            index + 1,
            archives.len(),
            name
        ));

        let content = match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                let message = format!("Failed to read {}: {}", path.display(), e);
                warn!("{}", message);
                progress.report(&message);
                summary.errors.push(message);
                progress.file_done();
                continue;
            }
        };

        let year = options.year.or_else(|| infer_year_from_file_name(&name));
        let mut results = process_archive_text(&content, &name, year, &aggregator, stop);
        results.drop_empty_examples();

        let file_summary = results.summary.clone();
        let patents_found = results.examples_by_patent.len();
        info!(
            "{}: {} documents, {} unique, {} with examples, {} examples classified",
            name,
            file_summary.documents_seen,
            file_summary.documents_unique,
            patents_found,
            file_summary.examples_classified
        );

        sink.store(results)
            .with_context(|| format!("Failed to store results of {}", name))?;

        let cancelled = file_summary.cancelled;
        summary.merge(file_summary);
        summary.files_processed += 1;

        progress.report(&format!(
            "Finished {}: {} patents with examples",
            name, patents_found
        ));
        progress.file_done();

        if cancelled {
            break;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::XML_PROLOGUE;
    use crate::models::DocumentNumber;
    use crate::scanner::cancel::{NeverStop, StopSignal};
    use crate::scanner::progress::SilentProgress;
    use std::cell::RefCell;
    use tempfile::TempDir;

    fn pool() -> ThreadPool {
        rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap()
    }

    fn grant(number: &str, paragraph: &str) -> String {
        format!(
            "{XML_PROLOGUE}\n<us-patent-grant><publication-reference><document-id><doc-number>{number}</doc-number></document-id></publication-reference><description><heading>EXAMPLES</heading><heading>Example 1</heading><p>Title</p><p>{paragraph}</p></description></us-patent-grant>\n"
        )
    }

    #[test]
    fn test_infer_year_from_file_name() {
        assert_eq!(infer_year_from_file_name("ipg240102.xml"), Some(2024));
        assert_eq!(infer_year_from_file_name("IPA051229.XML"), Some(2005));
        assert_eq!(infer_year_from_file_name("ipg760106.xml"), Some(1976));
        assert_eq!(infer_year_from_file_name("/data/2024/ipg240102.xml"), Some(2024));
        assert_eq!(infer_year_from_file_name("grants.xml"), None);
    }

    #[test]
    fn test_process_archive_text_counts() {
        let options = ProcessOptions::default();
        let pool = pool();
        let aggregator = Aggregator::new(&options, &pool);
        let content = format!(
            "{}{}{}{XML_PROLOGUE}<broken",
            grant("1111111", "The product contains salt."),
            grant("2222222", "The mixture was heated."),
            grant("1111111", "The product contains salt and water.")
        );

        let results = process_archive_text(&content, "test.xml", Some(2020), &aggregator, &NeverStop);
        assert_eq!(results.summary.documents_seen, 4);
        assert_eq!(results.summary.documents_unique, 2);
        assert_eq!(results.summary.documents_malformed, 1);
        assert_eq!(results.examples_by_patent.len(), 2);
        assert_eq!(
            results.examples_by_patent[&DocumentNumber::from("1111111")][0].content,
            vec!["The product contains salt and water."]
        );
        assert_eq!(results.statistics_by_patent[&DocumentNumber::from("2222222")].year, Some(2020));
    }

    #[test]
    fn test_process_directory_stores_each_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("ipg240102.xml"), grant("1111111", "The mixture was heated.")).unwrap();
        fs::write(temp.path().join("ipg240109.xml"), grant("2222222", "The product contains salt.")).unwrap();
        fs::write(temp.path().join("readme.txt"), "ignored").unwrap();

        let options = ProcessOptions::default();
        let pool = pool();
        let mut stored: Vec<ArchiveResults> = Vec::new();
        let summary =
            process_directory(temp.path(), &options, &pool, &mut stored, &SilentProgress, &NeverStop)
                .unwrap();

        assert_eq!(summary.files_seen, 2);
        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.past, 1);
        assert_eq!(summary.present, 1);
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].source, "ipg240102.xml");
        assert_eq!(stored[0].year, Some(2024));
    }

    #[test]
    fn test_stop_between_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("ipg240102.xml"), grant("1111111", "The mixture was heated.")).unwrap();
        fs::write(temp.path().join("ipg240109.xml"), grant("2222222", "The product contains salt.")).unwrap();

        let signal = StopSignal::new();
        let stop_after_first_file = |message: &str| {
            if message.starts_with("Finished") {
                signal.stop();
            }
        };

        let options = ProcessOptions::default();
        let pool = pool();
        let mut stored: Vec<ArchiveResults> = Vec::new();
        let summary = process_directory(
            temp.path(),
            &options,
            &pool,
            &mut stored,
            &stop_after_first_file,
            &signal,
        )
        .unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.files_processed, 1);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].source, "ipg240102.xml");
    }

    #[test]
    fn test_progress_messages() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("ipg240102.xml"), grant("1111111", "The mixture was heated.")).unwrap();

        let messages = RefCell::new(Vec::new());
        let record = |message: &str| messages.borrow_mut().push(message.to_string());

        let options = ProcessOptions::default();
        let pool = pool();
        let mut stored: Vec<ArchiveResults> = Vec::new();
        process_directory(temp.path(), &options, &pool, &mut stored, &record, &NeverStop).unwrap();

        assert_eq!(
            messages.into_inner(),
            vec![
                "Processing file 1 of 1: ipg240102.xml",
                "Finished ipg240102.xml: 1 patents with examples",
            ]
        );
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let options = ProcessOptions::default();
        let pool = pool();
        let mut stored: Vec<ArchiveResults> = Vec::new();
        let result = process_directory(
            temp.path().join("missing"),
            &options,
            &pool,
            &mut stored,
            &SilentProgress,
            &NeverStop,
        );
        assert!(result.is_err());
    }
}
