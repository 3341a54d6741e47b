//! Tokenizer and POS tagger for example descriptions.
//!
//! Pipeline: text → tokenize → lexical tag → contextual retag → tagged tokens
//!
//! The lexical pass tags each token in isolation. The contextual pass walks
//! left to right and fixes the tags that depend on the preceding words:
//! "-ed" forms after an auxiliary become participles, base verbs after a
//! determiner become nouns, and so on.

use std::sync::LazyLock;

use regex::Regex;

use super::patterns::{COMPILED_PATTERNS, LEXICON, is_ambiguous_past, is_lexical_third_person};
use super::types::{PosTag, Token};

/// Words with inner hyphens or apostrophes, numbers with decimal or
/// thousands separators, and any other single non-space character.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{L}[\p{L}\p{N}]*(?:['’-][\p{L}\p{N}]+)*|\p{N}+(?:[.,]\p{N}+)*|\S").unwrap()
});

/// Auxiliaries after which an ambiguous "-ed" form is a participle.
const PARTICIPLE_AUXILIARIES: &[&str] = &[
    "is", "are", "am", "was", "were", "be", "been", "being", "has", "have", "had", "having",
    "get", "gets", "got", "getting",
];

/// Subjects after which a base verb is a present tense verb.
const PLURAL_SUBJECTS: &[&str] = &["i", "we", "you", "they"];

/// Split text into token strings.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

fn lexical_tag(value: &str) -> PosTag {
    let lower = value.to_lowercase().replace('’', "'");
    match LEXICON.get(&lower) {
        Some(tag) => *tag,
        None => COMPILED_PATTERNS.match_token(value),
    }
}

/// Tokenize and tag text.
pub fn tag_text(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = tokenize(text)
        .into_iter()
        .map(|value| Token::new(value, lexical_tag(value)))
        .collect();
    apply_context(&mut tokens);
    tokens
}

/// The previous token, skipping up to two adverbs ("was then slowly added").
fn previous_content_word(tokens: &[Token], index: usize) -> Option<&Token> {
    tokens[..index]
        .iter()
        .rev()
        .take(3)
        .find(|token| token.tag != PosTag::Rb)
}

fn retag(tokens: &[Token], index: usize) -> PosTag {
    let token = &tokens[index];
    let previous = index.checked_sub(1).map(|i| &tokens[i]);
    let previous_tag = previous.map(|t| t.tag);

    match token.tag {
        PosTag::Vbd if is_ambiguous_past(&token.lower) => {
            if index == 0 {
                return PosTag::Vbn;
            }
            let after_auxiliary = previous_content_word(tokens, index)
                .is_some_and(|t| t.is_any(PARTICIPLE_AUXILIARIES));
            if after_auxiliary {
                PosTag::Vbn
            } else if matches!(
                previous_tag,
                Some(PosTag::Dt | PosTag::In | PosTag::Jj | PosTag::Cd)
            ) {
                // Attributive: "the purified product", "of heated water"
                PosTag::Jj
            } else {
                PosTag::Vbd
            }
        }
        PosTag::Vb => {
            let after_modal = previous_content_word(tokens, index)
                .is_some_and(|t| matches!(t.tag, PosTag::To | PosTag::Md));
            match previous {
                _ if after_modal => PosTag::Vb,
                Some(p) if p.is_any(&["do", "does", "did", "don't", "doesn't", "didn't"]) => {
                    PosTag::Vb
                }
                Some(p) if matches!(p.tag, PosTag::Dt | PosTag::In | PosTag::Jj | PosTag::Cd) => {
                    PosTag::Nn
                }
                Some(p) if p.is_any(PLURAL_SUBJECTS) || matches!(p.tag, PosTag::Nns | PosTag::Wdt) => {
                    PosTag::Vbp
                }
                Some(p) if matches!(p.tag, PosTag::Nn | PosTag::Nnp) => PosTag::Nn,
                _ => PosTag::Vb,
            }
        }
        PosTag::Vbz if is_lexical_third_person(&token.lower) => {
            let nominal_position = index == 0
                || matches!(
                    previous_tag,
                    Some(PosTag::Dt | PosTag::In | PosTag::Jj | PosTag::Cd | PosTag::To | PosTag::Sym)
                );
            if nominal_position {
                PosTag::Nns
            } else {
                PosTag::Vbz
            }
        }
        tag => tag,
    }
}

/// Left-to-right contextual pass. Each decision sees the already-fixed tags
/// of the tokens before it.
fn apply_context(tokens: &mut [Token]) {
    for index in 0..tokens.len() {
        let tag = retag(tokens, index);
        tokens[index].tag = tag;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, &'static str)> {
        tag_text(text)
            .into_iter()
            .map(|t| (t.value, t.tag.as_str()))
            .collect()
    }

    fn tag_of(text: &str, word: &str) -> PosTag {
        tag_text(text)
            .into_iter()
            .find(|t| t.value == word)
            .map(|t| t.tag)
            .unwrap()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("The pH-adjusted solution (1.5 mL) isn't clear."),
            vec!["The", "pH-adjusted", "solution", "(", "1.5", "mL", ")", "isn't", "clear", "."]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tag_text("   ").is_empty());
    }

    #[test]
    fn test_tag_simple_sentence() {
        assert_eq!(
            tags("The mixture cooled slowly."),
            vec![
                ("The".to_string(), "DT"),
                ("mixture".to_string(), "NN"),
                ("cooled".to_string(), "VBD"),
                ("slowly".to_string(), "RB"),
                (".".to_string(), "SYM"),
            ]
        );
    }

    #[test]
    fn test_participle_after_auxiliary() {
        assert_eq!(tag_of("The salt is dissolved in water", "dissolved"), PosTag::Vbn);
        assert_eq!(tag_of("The salt was then slowly added", "added"), PosTag::Vbn);
        assert_eq!(tag_of("We have made progress", "made"), PosTag::Vbn);
    }

    #[test]
    fn test_participle_at_start() {
        assert_eq!(tag_of("Stirred solutions gave a precipitate", "Stirred"), PosTag::Vbn);
    }

    #[test]
    fn test_attributive_participle() {
        assert_eq!(tag_of("The purified product", "purified"), PosTag::Jj);
        assert_eq!(tag_of("A sample of heated water", "heated"), PosTag::Jj);
    }

    #[test]
    fn test_base_verb_context() {
        assert_eq!(tag_of("We add the salt", "add"), PosTag::Vbp);
        assert_eq!(tag_of("The results show an effect", "show"), PosTag::Vbp);
        assert_eq!(tag_of("The test shows an effect", "test"), PosTag::Nn);
        assert_eq!(tag_of("The patient will receive it", "receive"), PosTag::Vb);
        assert_eq!(tag_of("To dissolve the salt", "dissolve"), PosTag::Vb);
    }

    #[test]
    fn test_third_person_context() {
        assert_eq!(tag_of("The composition contains salt", "contains"), PosTag::Vbz);
        assert_eq!(tag_of("The results are good", "results"), PosTag::Nns);
        assert_eq!(tag_of("Results are good", "Results"), PosTag::Nns);
        assert_eq!(tag_of("It is good", "is"), PosTag::Vbz);
    }
}
