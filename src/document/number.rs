//! Publication number extraction.
//!
//! The canonical number lives at
//! `publication-reference // document-id // doc-number`. The reader stops as
//! soon as that element closes, so the cost is proportional to the size of
//! the bibliographic header rather than the whole filing.

use log::debug;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::markup::escape_stray_ampersands;
use crate::models::DocumentNumber;

const PUBLICATION_REFERENCE: &[u8] = b"publication-reference";
const DOCUMENT_ID: &[u8] = b"document-id";
const DOC_NUMBER: &[u8] = b"doc-number";

/// Extract and normalize the publication number of one fragment.
///
/// Returns `None` when the markup is too broken to reach the number or the
/// fragment has no publication reference.
pub fn extract_document_number(fragment: &str) -> Option<DocumentNumber> {
    let raw = find_publication_doc_number(fragment)?;
    let number = normalize_document_number(&raw);
    (!number.as_str().is_empty()).then_some(number)
}

/// Strip list-serialization artifacts (brackets, quotes, spaces) and reduce
/// an 8-character number with a leading zero to 7 characters.
///
/// Numbers of any other length, or without the leading zero, are kept.
pub fn normalize_document_number(raw: &str) -> DocumentNumber {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '\'' | ' '))
        .collect();

    if cleaned.chars().count() == 8 && cleaned.starts_with('0') {
        DocumentNumber::from(&cleaned[1..])
    } else {
        DocumentNumber::from(cleaned)
    }
}

fn find_publication_doc_number(fragment: &str) -> Option<String> {
    let fragment = escape_stray_ampersands(fragment);
    let mut reader = Reader::from_str(&fragment);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut stack: Vec<Vec<u8>> = Vec::new();
    // Depth of the open doc-number element and the text gathered inside it.
    let mut capture: Option<(usize, String)> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(e.local_name().as_ref().to_vec());
                if capture.is_none() && is_publication_doc_number(&stack) {
                    capture = Some((stack.len(), String::new()));
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                if let Some(pos) = stack.iter().rposition(|open| open == name.as_ref()) {
                    stack.truncate(pos);
                }
                if let Some((depth, text)) = capture.take() {
                    if stack.len() >= depth {
                        capture = Some((depth, text));
                    } else if !text.trim().is_empty() {
                        return Some(text.trim().to_string());
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some((_, text)) = capture.as_mut() {
                    if let Ok(decoded) = e.decode() {
                        text.push_str(&decoded);
                    }
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some((_, text)) = capture.as_mut() {
                    if let Ok(Some(ch)) = e.resolve_char_ref() {
                        text.push(ch);
                    } else if let Some(resolved) = e
                        .decode()
                        .ok()
                        .and_then(|name| resolve_predefined_entity(&name))
                    {
                        text.push_str(resolved);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) if reader.buffer_position() > position => {
                debug!("Skipping malformed markup at position {}: {}", position, e);
            }
            Err(e) => {
                debug!("Document number scan aborted at position {}: {}", position, e);
                break;
            }
            _ => {}
        }
    }

    // A truncated fragment may end inside the doc-number element.
    capture
        .map(|(_, text)| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// `doc-number` on top of the stack, with a `document-id` ancestor that in
/// turn has a `publication-reference` ancestor.
fn is_publication_doc_number(stack: &[Vec<u8>]) -> bool {
    let Some((last, ancestors)) = stack.split_last() else {
        return false;
    };
    if last != DOC_NUMBER {
        return false;
    }
    let Some(document_id) = ancestors.iter().rposition(|name| name == DOCUMENT_ID) else {
        return false;
    };
    ancestors[..document_id]
        .iter()
        .any(|name| name == PUBLICATION_REFERENCE)
}
