//! Core types for tense classification.
//!
//! - The POS tag enum ([`PosTag`]), a subset of the Penn Treebank tag set
//! - The [`Token`] struct linking text values to POS tags

/// Part-of-speech tag for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    // Verbs
    Vb,  // Base form: "add", "be"
    Vbd, // Past tense: "added", "took"
    Vbg, // Gerund or present participle: "adding"
    Vbn, // Past participle: "taken", "been"
    Vbp, // Present, not third person singular: "add", "are"
    Vbz, // Present, third person singular: "adds", "is"
    Md,  // Modal: "will", "may"

    // Nominals
    Nn,  // Common noun (catch-all)
    Nns, // Plural noun: "results"
    Nnp, // Abbreviation or formula: "DMSO", "NaCl"
    Prp, // Subject or object pronoun: "we", "it"

    // Modifiers
    Jj, // Adjective: "purified" (attributive), "stable"
    Rb, // Adverb: "slowly", "then"
    Cd, // Number: "50", "1.5"

    // Function words
    Dt,  // Determiner or possessive: "the", "its"
    In,  // Preposition or subordinating conjunction: "of", "while"
    To,  // "to"
    Cc,  // Coordinating conjunction: "and"
    Wdt, // Relative pronoun: "which", "wherein"
    Sym, // Punctuation and other symbols
}

impl PosTag {
    /// Tags starting with "VB" in the Penn tag set. Modals are not verbs here.
    pub fn is_verb(self) -> bool {
        matches!(
            self,
            Self::Vb | Self::Vbd | Self::Vbg | Self::Vbn | Self::Vbp | Self::Vbz
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vb => "VB",
            Self::Vbd => "VBD",
            Self::Vbg => "VBG",
            Self::Vbn => "VBN",
            Self::Vbp => "VBP",
            Self::Vbz => "VBZ",
            Self::Md => "MD",
            Self::Nn => "NN",
            Self::Nns => "NNS",
            Self::Nnp => "NNP",
            Self::Prp => "PRP",
            Self::Jj => "JJ",
            Self::Rb => "RB",
            Self::Cd => "CD",
            Self::Dt => "DT",
            Self::In => "IN",
            Self::To => "TO",
            Self::Cc => "CC",
            Self::Wdt => "WDT",
            Self::Sym => "SYM",
        }
    }
}

/// A tagged token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    /// Lowercased `value`, used by every word-list comparison.
    pub lower: String,
    pub tag: PosTag,
}

impl Token {
    pub fn new(value: &str, tag: PosTag) -> Self {
        Self {
            value: value.to_string(),
            lower: value.to_lowercase(),
            tag,
        }
    }

    pub fn is(&self, word: &str) -> bool {
        self.lower == word
    }

    pub fn is_any(&self, words: &[&str]) -> bool {
        words.contains(&self.lower.as_str())
    }
}
