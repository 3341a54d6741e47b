//! Tense classification for example descriptions.
//!
//! Decides whether an example reads as an experiment already performed
//! (past) or as a prophetic one (present, with future folded in).
//!
//! Pipeline:
//! 1. Whitespace normalization
//! 2. Fast paths that return past outright (see [`rules`])
//! 3. Tokenization and POS tagging (see [`lexer`])
//! 4. One vote per verb, plurality wins, breakdown and mixed flag

mod classifier;
pub mod lexer;
mod patterns;
pub mod rules;
pub mod types;

pub use classifier::{MIXED_TENSE_THRESHOLD, classify_tense, normalize_whitespace};
pub use types::{PosTag, Token};
