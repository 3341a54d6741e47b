//! Locating the "Examples" section of a patent description.

use super::markup::{MarkupNode, MarkupTree};

/// Normalized headings that open an examples section. Only the plural form
/// counts; "Example 1" style sub-headings are handled by the block extractor.
pub const SECTION_TITLES: [&str; 3] = ["EXAMPLES", "EXPERIMENTS", "TESTS"];

/// Uppercase the trimmed text and drop every space.
pub fn normalize_section_title(text: &str) -> String {
    text.trim().to_uppercase().replace(' ', "")
}

pub fn is_section_heading(text: &str) -> bool {
    let normalized = normalize_section_title(text);
    SECTION_TITLES.contains(&normalized.as_str())
}

/// Indices (into [`MarkupTree::nodes`]) of every examples-section heading.
pub fn locate_example_sections(tree: &MarkupTree) -> Vec<usize> {
    tree.headings()
        .filter(|(_, node)| is_section_heading(node.text()))
        .map(|(index, _)| index)
        .collect()
}

/// Which nodes the block extractor should walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanRange {
    /// Siblings following the single examples heading at this index.
    Siblings(usize),
    /// Every heading and paragraph in the document.
    WholeDocument,
}

/// Use the siblings of the heading only when exactly one was found; zero or
/// several headings break the single-section assumption.
pub fn select_scan_range(sections: &[usize]) -> ScanRange {
    match sections {
        [single] => ScanRange::Siblings(*single),
        _ => ScanRange::WholeDocument,
    }
}

pub fn scan_nodes(tree: &MarkupTree, range: ScanRange) -> Vec<&MarkupNode> {
    match range {
        ScanRange::Siblings(index) => tree.following_siblings(index),
        ScanRange::WholeDocument => tree.all_nodes(),
    }
}
