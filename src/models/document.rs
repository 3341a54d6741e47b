use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized publication number used as the unique key of a filing.
///
/// Construct through [`crate::document::normalize_document_number`] to get
/// the leading-zero handling; `DocumentNumber::from` keeps the text as given.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocumentNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DocumentNumber {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for DocumentNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw XML text of one patent filing, paired with its document number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatentDocument {
    pub number: DocumentNumber,
    pub text: String,
}

impl PatentDocument {
    pub fn new(number: DocumentNumber, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Length in characters, the measure used to pick the most complete filing.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
