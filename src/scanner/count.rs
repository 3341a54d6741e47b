use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use log::warn;

use super::options::ProcessOptions;

/// Include/exclude globs deciding which files of a directory are archives.
#[derive(Clone, Debug)]
pub struct ArchiveFilter {
    include: Pattern,
    exclude: Vec<Pattern>,
}

impl ArchiveFilter {
    pub fn from_options(options: &ProcessOptions) -> Result<Self> {
        let include = Pattern::new(&options.include)
            .with_context(|| format!("Invalid include pattern {:?}", options.include))?;
        Ok(Self {
            include,
            exclude: compile_exclude_patterns(&options.exclude),
        })
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        let file_name = file_name_of(path);
        self.exclude
            .iter()
            .any(|pattern| pattern.matches(&path_str) || pattern.matches(&file_name))
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.include.matches(&file_name_of(path)) && !self.is_excluded(path)
    }
}

fn compile_exclude_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|pattern| match Pattern::new(pattern) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                warn!("Ignoring invalid exclude pattern {:?}: {}", pattern, e);
                None
            }
        })
        .collect()
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Archive files directly inside `dir`, sorted by path.
pub fn list_archives<P: AsRef<Path>>(dir: P, filter: &ArchiveFilter) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory {}", dir.display()))?;

    let mut archives: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && filter.matches(path))
        .collect();
    archives.sort();
    Ok(archives)
}

/// Number of archive files a run over `dir` will visit.
pub fn count<P: AsRef<Path>>(dir: P, options: &ProcessOptions) -> Result<usize> {
    let filter = ArchiveFilter::from_options(options)?;
    Ok(list_archives(dir, &filter)?.len())
}
