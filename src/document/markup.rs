//! Lenient reader for patent XML markup.
//!
//! Bulk patent archives contain fragments with mismatched or dangling tags,
//! undeclared entities and truncated tails. This reader never fails: it
//! collects every `<heading>` and `<p>` element it can reach, together with
//! the identity of the enclosing element so that sibling relations can be
//! answered later, and stops quietly at the first unrecoverable syntax error.

use std::borrow::Cow;
use std::sync::LazyLock;

use log::debug;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use quick_xml::reader::Reader;
use regex::{Captures, Regex};

/// Kind of block-level element kept by the reader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Heading,
    Paragraph,
}

impl NodeKind {
    fn from_element_name(name: &[u8]) -> Option<Self> {
        match name {
            b"heading" => Some(Self::Heading),
            b"p" => Some(Self::Paragraph),
            _ => None,
        }
    }
}

/// A heading or paragraph element with its concatenated descendant text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupNode {
    pub kind: NodeKind,
    text: String,
    /// Identity of the enclosing element; 0 is the document root.
    parent: usize,
}

impl MarkupNode {
    /// Text content with surrounding whitespace removed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn is_heading(&self) -> bool {
        self.kind == NodeKind::Heading
    }

    pub fn is_paragraph(&self) -> bool {
        self.kind == NodeKind::Paragraph
    }
}

struct OpenElement {
    name: Vec<u8>,
    id: usize,
    node: Option<usize>,
}

/// Heading and paragraph nodes of one document fragment, in document order.
#[derive(Clone, Debug, Default)]
pub struct MarkupTree {
    nodes: Vec<MarkupNode>,
    complete: bool,
}

impl MarkupTree {
    /// Parse a fragment, recovering as much structure as possible.
    pub fn parse(fragment: &str) -> Self {
        let fragment = escape_stray_ampersands(fragment);
        let mut reader = Reader::from_str(&fragment);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut nodes: Vec<MarkupNode> = Vec::new();
        let mut stack: Vec<OpenElement> = Vec::new();
        let mut next_id = 1;
        let mut complete = true;

        loop {
            let position = reader.buffer_position();
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let parent = stack.last().map_or(0, |open| open.id);
                    let node = NodeKind::from_element_name(e.local_name().as_ref()).map(|kind| {
                        nodes.push(MarkupNode {
                            kind,
                            text: String::new(),
                            parent,
                        });
                        nodes.len() - 1
                    });
                    stack.push(OpenElement {
                        name: e.local_name().as_ref().to_vec(),
                        id: next_id,
                        node,
                    });
                    next_id += 1;
                }
                Ok(Event::Empty(e)) => {
                    if let Some(kind) = NodeKind::from_element_name(e.local_name().as_ref()) {
                        nodes.push(MarkupNode {
                            kind,
                            text: String::new(),
                            parent: stack.last().map_or(0, |open| open.id),
                        });
                    }
                    next_id += 1;
                }
                Ok(Event::End(e)) => {
                    let name = e.local_name();
                    // A stray end tag closes nothing; a mismatched one closes
                    // everything opened after its start tag.
                    if let Some(pos) = stack.iter().rposition(|open| open.name == name.as_ref()) {
                        stack.truncate(pos);
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Ok(text) = e.decode() {
                        append_text(&mut nodes, &stack, &text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Ok(text) = e.decode() {
                        append_text(&mut nodes, &stack, &text);
                    }
                }
                Ok(Event::GeneralRef(e)) => {
                    if let Some(text) = resolve_reference(&e) {
                        append_text(&mut nodes, &stack, &text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    complete = false;
                    // Skip past the bad token; give up only when the reader
                    // cannot make progress.
                    if reader.buffer_position() > position {
                        debug!("Skipping malformed markup at position {}: {}", position, e);
                        continue;
                    }
                    debug!("Stopping markup scan at position {}: {}", position, e);
                    break;
                }
                _ => {}
            }
        }

        Self { nodes, complete }
    }

    pub fn nodes(&self) -> &[MarkupNode] {
        &self.nodes
    }

    /// Whether the reader reached the end of input without a syntax error.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn headings(&self) -> impl Iterator<Item = (usize, &MarkupNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_heading())
    }

    /// Heading and paragraph nodes that share the parent of `index` and come
    /// after it.
    pub fn following_siblings(&self, index: usize) -> Vec<&MarkupNode> {
        let Some(anchor) = self.nodes.get(index) else {
            return Vec::new();
        };
        self.nodes[index + 1..]
            .iter()
            .filter(|node| node.parent == anchor.parent)
            .collect()
    }

    /// Every heading and paragraph node in the fragment.
    pub fn all_nodes(&self) -> Vec<&MarkupNode> {
        self.nodes.iter().collect()
    }
}

static STRAY_AMPERSAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[0-9]+;|#[xX][0-9A-Fa-f]+;|[A-Za-z_][A-Za-z0-9._-]*;)?").unwrap()
});

/// Escape every `&` that does not start a character or entity reference,
/// as in "R&D", so the reader does not stop on it.
pub(crate) fn escape_stray_ampersands(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    STRAY_AMPERSAND.replace_all(text, |caps: &Captures<'_>| {
        if caps[0].len() == 1 {
            "&amp;".to_string()
        } else {
            caps[0].to_string()
        }
    })
}

fn append_text(nodes: &mut [MarkupNode], stack: &[OpenElement], text: &str) {
    for index in stack.iter().filter_map(|open| open.node) {
        nodes[index].text.push_str(text);
    }
}

fn resolve_reference(reference: &BytesRef<'_>) -> Option<String> {
    if let Ok(Some(ch)) = reference.resolve_char_ref() {
        return Some(ch.to_string());
    }
    let name = reference.decode().ok()?;
    resolve_predefined_entity(&name).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_headings_and_paragraphs_in_order() {
        let xml = r#"<doc><description>
            <heading id="h-1">EXAMPLES</heading>
            <p id="p-1">First <b>bold</b> paragraph.</p>
            <heading id="h-2">Example 1</heading>
        </description></doc>"#;
        let tree = MarkupTree::parse(xml);

        let texts: Vec<&str> = tree.nodes().iter().map(MarkupNode::text).collect();
        assert_eq!(texts, vec!["EXAMPLES", "First bold paragraph.", "Example 1"]);
        assert_eq!(tree.headings().count(), 2);
        assert!(tree.is_complete());
    }

    #[test]
    fn test_following_siblings_stay_within_parent() {
        let xml = r#"<doc>
            <description>
                <heading>EXAMPLES</heading>
                <p>a</p>
                <ul><li><p>nested</p></li></ul>
                <p>b</p>
            </description>
            <abstract><p>outside</p></abstract>
        </doc>"#;
        let tree = MarkupTree::parse(xml);
        let (index, _) = tree.headings().next().unwrap();

        let siblings: Vec<&str> = tree
            .following_siblings(index)
            .into_iter()
            .map(MarkupNode::text)
            .collect();
        assert_eq!(siblings, vec!["a", "b"]);
    }

    #[test]
    fn test_resolves_entities() {
        let xml = "<p>A &amp; B &#x3b1;-helix &#8212; done</p>";
        let tree = MarkupTree::parse(xml);
        assert_eq!(tree.nodes()[0].text(), "A & B \u{3b1}-helix \u{2014} done");
    }

    #[test]
    fn test_unknown_entities_are_dropped() {
        let tree = MarkupTree::parse("<p>x &custom; y</p>");
        assert_eq!(tree.nodes()[0].text(), "x  y");
    }

    #[test]
    fn test_mismatched_end_tags_recover() {
        let xml = "<doc><heading>EXAMPLES</b></heading><p>one</i></p><p>two</p></doc>";
        let tree = MarkupTree::parse(xml);
        let texts: Vec<&str> = tree.nodes().iter().map(MarkupNode::text).collect();
        assert_eq!(texts, vec!["EXAMPLES", "one", "two"]);
    }

    #[test]
    fn test_syntax_error_keeps_nodes_read_so_far() {
        let xml = "<doc><p>kept</p><!-- unterminated comment <p>lost</p></doc>";
        let tree = MarkupTree::parse(xml);
        assert!(!tree.is_complete());
        assert_eq!(tree.nodes()[0].text(), "kept");
    }

    #[test]
    fn test_stray_ampersand_does_not_end_the_scan() {
        let xml = "<description><p>R&D data</p><heading>EXAMPLES</heading>\
            <heading>Example 1</heading><p>Title</p><p>Body.</p></description>";
        let tree = MarkupTree::parse(xml);
        let texts: Vec<&str> = tree.nodes().iter().map(MarkupNode::text).collect();
        assert_eq!(texts, vec!["R&D data", "EXAMPLES", "Example 1", "Title", "Body."]);
        assert!(tree.is_complete());
    }

    #[test]
    fn test_escape_stray_ampersands() {
        assert_eq!(escape_stray_ampersands("R&D & Co"), "R&amp;D &amp; Co");
        assert_eq!(
            escape_stray_ampersands("&amp; &#955; &#x3b1; &custom;"),
            "&amp; &#955; &#x3b1; &custom;"
        );
        assert!(matches!(escape_stray_ampersands("no refs"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_input() {
        let tree = MarkupTree::parse("");
        assert!(tree.nodes().is_empty());
        assert!(tree.following_siblings(3).is_empty());
    }
}
