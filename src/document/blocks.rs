//! Segmenting an examples section into numbered example blocks.
//!
//! A single pass over heading/paragraph nodes with two states. A heading
//! mentioning example, experiment, test or trial opens a new block whose
//! title is the next node; paragraphs are appended to the open block. A
//! plural section heading ("EXAMPLES", "TESTS", ...) closes the open block
//! without opening a new one.

use super::markup::{MarkupNode, NodeKind};
use super::sections::is_section_heading;
use crate::models::ExampleBlock;

const EXAMPLE_WORDS: [&str; 4] = ["example", "experiment", "test", "trial"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    OutsideExample,
    InsideExample,
}

/// Whether heading text starts or mentions an example.
///
/// Substring match, so "Comparative Example 2" and "Stability testing" both
/// qualify.
pub fn is_example_heading(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    EXAMPLE_WORDS.iter().any(|word| lower.contains(word))
}

fn opens_block(node: &MarkupNode) -> bool {
    node.is_heading() && !is_section_heading(node.text()) && is_example_heading(node.text())
}

/// Extract example blocks from an ordered run of sibling nodes.
///
/// Blocks with no paragraphs are returned as well; callers filter them at
/// the storage boundary.
pub fn extract_example_blocks(nodes: &[&MarkupNode]) -> Vec<ExampleBlock> {
    let mut blocks: Vec<ExampleBlock> = Vec::new();
    let mut state = ScanState::OutsideExample;
    let mut title_index = None;

    for (index, node) in nodes.iter().enumerate() {
        if title_index == Some(index) {
            continue;
        }

        match node.kind {
            NodeKind::Heading if is_section_heading(node.text()) => {
                state = ScanState::OutsideExample;
            }
            NodeKind::Heading if is_example_heading(node.text()) => {
                let next = nodes.get(index + 1);
                let title = next.map(|n| n.text().to_string()).unwrap_or_default();
                // The title node is consumed unless it is itself a boundary.
                title_index = next
                    .filter(|n| !opens_block(n) && !is_section_heading(n.text()))
                    .map(|_| index + 1);
                blocks.push(ExampleBlock::new(node.text(), title));
                state = ScanState::InsideExample;
            }
            NodeKind::Heading => {}
            NodeKind::Paragraph => {
                if state == ScanState::InsideExample
                    && let Some(block) = blocks.last_mut()
                {
                    let text = node.text();
                    if !text.is_empty() {
                        block.content.push(text.to_string());
                    }
                }
            }
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::markup::MarkupTree;

    fn blocks_from(xml: &str) -> Vec<ExampleBlock> {
        let tree = MarkupTree::parse(xml);
        extract_example_blocks(&tree.all_nodes())
    }

    #[test]
    fn test_is_example_heading() {
        assert!(is_example_heading("Example 1"));
        assert!(is_example_heading("EXPERIMENT 2"));
        assert!(is_example_heading("Trial A"));
        assert!(is_example_heading("Comparative Example 3"));
        assert!(is_example_heading("Stability Testing"));
        assert!(!is_example_heading("Preparation of Compound A"));
    }

    #[test]
    fn test_single_example_with_title_and_content() {
        let blocks = blocks_from(
            r#"<d>
            <heading>Example 1</heading>
            <p>Synthesis of compound A</p>
            <p>First paragraph.</p>
            <p>Second paragraph.</p>
        </d>"#,
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].number, "Example 1");
        assert_eq!(blocks[0].title, "Synthesis of compound A");
        assert_eq!(blocks[0].content, vec!["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn test_heading_title_is_consumed() {
        let blocks = blocks_from(
            r#"<d>
            <heading>EXAMPLE 1</heading>
            <heading>Preparation of Salt</heading>
            <p>Body.</p>
        </d>"#,
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Preparation of Salt");
        assert_eq!(blocks[0].content, vec!["Body."]);
    }

    #[test]
    fn test_next_example_closes_previous() {
        let blocks = blocks_from(
            r#"<d>
            <heading>Example 1</heading><p>T1</p><p>A</p>
            <heading>Example 2</heading><p>T2</p><p>B</p><p>C</p>
        </d>"#,
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].content, vec!["A"]);
        assert_eq!(blocks[1].title, "T2");
        assert_eq!(blocks[1].content, vec!["B", "C"]);
    }

    #[test]
    fn test_adjacent_example_headings_are_not_swallowed_as_titles() {
        let blocks = blocks_from(
            r#"<d>
            <heading>Example 1</heading>
            <heading>Example 2</heading>
            <p>Title two</p>
            <p>Body two</p>
        </d>"#,
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "Example 2");
        assert!(blocks[0].content.is_empty());
        assert_eq!(blocks[1].content, vec!["Body two"]);
    }

    #[test]
    fn test_paragraphs_outside_examples_are_ignored() {
        let blocks = blocks_from(
            r#"<d>
            <p>Intro.</p>
            <heading>EXAMPLES</heading>
            <p>General remarks.</p>
            <heading>Example 1</heading><p>Title</p><p>Body</p>
        </d>"#,
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, vec!["Body"]);
    }

    #[test]
    fn test_section_heading_closes_open_example() {
        let blocks = blocks_from(
            r#"<d>
            <heading>Example 1</heading><p>Title</p><p>Body</p>
            <heading>TESTS</heading>
            <p>Not part of example 1.</p>
        </d>"#,
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, vec!["Body"]);
    }

    #[test]
    fn test_other_headings_keep_example_open() {
        let blocks = blocks_from(
            r#"<d>
            <heading>Example 1</heading><p>Title</p>
            <heading>Step (a)</heading><p>One.</p>
            <heading>Step (b)</heading><p>Two.</p>
        </d>"#,
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, vec!["One.", "Two."]);
    }

    #[test]
    fn test_no_example_headings() {
        let blocks = blocks_from("<d><heading>SUMMARY</heading><p>Text.</p></d>");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_last_heading_without_title() {
        let blocks = blocks_from("<d><p>x</p><heading>Example 9</heading></d>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "");
        assert!(blocks[0].content.is_empty());
    }
}
