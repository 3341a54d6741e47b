//! Splitting concatenated archive text into filings and removing
//! re-published duplicates.

use std::collections::HashMap;

use log::debug;

use super::number::extract_document_number;
use crate::models::PatentDocument;

/// Prologue that starts every document in a bulk archive file.
pub const XML_PROLOGUE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Split archive text on the XML prologue, dropping blank fragments.
pub fn split_documents(content: &str) -> impl Iterator<Item = &str> + '_ {
    content
        .split(XML_PROLOGUE)
        .filter(|fragment| !fragment.trim().is_empty())
}

/// Surviving filings plus counts of what was dropped.
#[derive(Debug, Default)]
pub struct Deduplicated {
    /// One filing per document number, in order of first appearance.
    pub documents: Vec<PatentDocument>,
    /// Fragments with no recoverable document number.
    pub malformed: usize,
    /// Fragments superseded by a longer filing of the same number.
    pub duplicates: usize,
}

/// Keep the longest fragment per document number.
///
/// Fragments whose number cannot be extracted are dropped. On equal length
/// the first fragment wins.
pub fn deduplicate<'a, I>(fragments: I) -> Deduplicated
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result = Deduplicated::default();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for fragment in fragments {
        let Some(number) = extract_document_number(fragment) else {
            result.malformed += 1;
            continue;
        };

        match positions.get(number.as_str()).copied() {
            Some(pos) => {
                result.duplicates += 1;
                let kept = &mut result.documents[pos];
                if fragment.chars().count() > kept.char_len() {
                    debug!("Replacing shorter filing of {}", number);
                    kept.text = fragment.to_string();
                }
            }
            None => {
                positions.insert(number.as_str().to_string(), result.documents.len());
                result.documents.push(PatentDocument::new(number, fragment));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(number: &str, padding: usize) -> String {
        format!(
            "<us-patent-grant><publication-reference><document-id><doc-number>{}</doc-number></document-id></publication-reference>{}</us-patent-grant>",
            number,
            "x".repeat(padding)
        )
    }

    #[test]
    fn test_split_drops_blank_fragments() {
        let content = format!("{XML_PROLOGUE}\n<a/>\n{XML_PROLOGUE}\n  \n{XML_PROLOGUE}<b/>");
        let parts: Vec<&str> = split_documents(&content).collect();
        assert_eq!(parts, vec!["\n<a/>\n", "<b/>"]);
    }

    #[test]
    fn test_split_without_prologue_yields_whole_text() {
        let parts: Vec<&str> = split_documents("<a/>").collect();
        assert_eq!(parts, vec!["<a/>"]);
        assert_eq!(split_documents("   ").count(), 0);
    }

    #[test]
    fn test_keeps_longest_fragment() {
        let short = doc("1234567", 5);
        let long = doc("1234567", 50);
        let other = doc("7654321", 0);
        let result = deduplicate([short.as_str(), other.as_str(), long.as_str()]);

        assert_eq!(result.documents.len(), 2);
        assert_eq!(result.documents[0].number.as_str(), "1234567");
        assert_eq!(result.documents[0].text, long);
        assert_eq!(result.documents[1].number.as_str(), "7654321");
        assert_eq!(result.duplicates, 1);
    }

    #[test]
    fn test_tie_keeps_first() {
        let first = doc("1234567", 10).replace("x", "a");
        let second = doc("1234567", 10).replace("x", "b");
        let result = deduplicate([first.as_str(), second.as_str()]);
        assert_eq!(result.documents.len(), 1);
        assert_eq!(result.documents[0].text, first);
    }

    #[test]
    fn test_groups_by_normalized_number() {
        let legacy = doc("01234567", 0);
        let modern = doc("1234567", 30);
        let result = deduplicate([legacy.as_str(), modern.as_str()]);
        assert_eq!(result.documents.len(), 1);
        assert_eq!(result.documents[0].text, modern);
    }

    #[test]
    fn test_malformed_fragments_are_dropped() {
        let good = doc("7654321", 0);
        let result = deduplicate(["<broken", "<root>no number</root>", good.as_str()]);
        assert_eq!(result.documents.len(), 1);
        assert_eq!(result.malformed, 2);
    }

    #[test]
    fn test_deduplicate_is_idempotent() {
        let a1 = doc("1111111", 3);
        let a2 = doc("1111111", 9);
        let b = doc("2222222", 1);
        let once = deduplicate([a1.as_str(), b.as_str(), a2.as_str()]);
        let twice = deduplicate(once.documents.iter().map(|d| d.text.as_str()));

        assert_eq!(once.documents, twice.documents);
        assert_eq!(twice.duplicates, 0);
    }
}
