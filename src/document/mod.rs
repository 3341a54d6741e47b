//! Patent document handling.
//!
//! Turns raw archive text into example blocks in four steps:
//! 1. Splitting concatenated XML and deduplicating filings
//! 2. Document number extraction
//! 3. Locating the examples section
//! 4. Segmenting the section into numbered example blocks

mod blocks;
mod markup;
mod number;
mod sections;
mod splitter;

pub use blocks::{extract_example_blocks, is_example_heading};
pub use markup::{MarkupNode, MarkupTree, NodeKind};
pub use number::{extract_document_number, normalize_document_number};
pub use sections::{
    SECTION_TITLES, ScanRange, is_section_heading, locate_example_sections,
    normalize_section_title, scan_nodes, select_scan_range,
};
pub use splitter::{Deduplicated, XML_PROLOGUE, deduplicate, split_documents};

use log::debug;

use crate::models::ExampleBlock;

/// Extract example blocks from one document fragment.
///
/// Scans the siblings of the examples heading when there is exactly one,
/// otherwise the whole document. A sibling scan that finds nothing falls
/// back to the whole document as well.
pub fn extract_examples(fragment: &str) -> Vec<ExampleBlock> {
    let tree = MarkupTree::parse(fragment);
    if !tree.is_complete() {
        debug!("Recovered {} nodes from malformed markup", tree.nodes().len());
    }
    let sections = locate_example_sections(&tree);
    let range = select_scan_range(&sections);

    let blocks = extract_example_blocks(&scan_nodes(&tree, range));
    if blocks.is_empty() && range != ScanRange::WholeDocument {
        return extract_example_blocks(&scan_nodes(&tree, ScanRange::WholeDocument));
    }
    blocks
}
