//! Tense rules over tagged tokens.
//!
//! Three fast paths decide "past" outright, in order:
//! 1. The text mentions "was" or "were" anywhere
//! 2. Passive voice: a participle after was/were/is/are/be, or opening the text
//! 3. Procedure wording: an opening participle such as "Prepared", or a
//!    reference to an earlier method such as "according to"
//!
//! Otherwise every verb token casts at most one vote, decided by the first
//! matching rule in [`verb_vote`].

use super::types::{PosTag, Token};
use crate::models::Tense;

const PASSIVE_AUXILIARIES: &[&str] = &["was", "were", "is", "are", "be"];

const PROCEDURE_OPENERS: &[&str] = &[
    "prepared",
    "obtained",
    "synthesized",
    "isolated",
    "dissolved",
    "mixed",
    "combined",
    "heated",
    "cooled",
    "filtered",
    "purified",
    "separated",
];

const PROCEDURE_PHRASES: &[&str] = &[
    "according to",
    "following the procedure",
    "as described",
    "using the method",
    "following example",
];

/// Substring check on lowercased text, so "answered" counts as well.
pub fn mentions_was_or_were(lower: &str) -> bool {
    lower.contains("was") || lower.contains("were")
}

pub fn has_passive_voice(tokens: &[Token]) -> bool {
    tokens.iter().enumerate().any(|(index, token)| {
        token.tag == PosTag::Vbn
            && (index == 0 || tokens[index - 1].is_any(PASSIVE_AUXILIARIES))
    })
}

pub fn is_patent_procedure(lower: &str) -> bool {
    let opener = lower
        .split_whitespace()
        .next()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .unwrap_or_default();

    PROCEDURE_OPENERS.contains(&opener)
        || PROCEDURE_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Auxiliaries present anywhere in the text, checked per token.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuxiliaryContext {
    pub was_or_were: bool,
    pub has_or_have: bool,
    pub will_have: bool,
}

impl AuxiliaryContext {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        Self {
            was_or_were: tokens.iter().any(|t| t.is_any(&["was", "were"])),
            has_or_have: tokens.iter().any(|t| t.is_any(&["has", "have"])),
            will_have: tokens
                .windows(2)
                .any(|pair| pair[0].is("will") && pair[1].is("have")),
        }
    }
}

fn is_one_of(token: Option<&Token>, words: &[&str]) -> bool {
    token.is_some_and(|t| t.is_any(words))
}

/// Decide the vote of the verb token at `index`, if any.
pub fn verb_vote(tokens: &[Token], index: usize, context: &AuxiliaryContext) -> Option<Tense> {
    let token = &tokens[index];
    let previous = index.checked_sub(1).map(|i| &tokens[i]);
    let before_previous = index.checked_sub(2).map(|i| &tokens[i]);

    match token.tag {
        PosTag::Vbg if is_one_of(previous, &["is", "are"]) => Some(Tense::Present),
        PosTag::Vbg if is_one_of(previous, &["was", "were"]) => Some(Tense::Past),
        PosTag::Vbg if is_one_of(previous, &["be"]) && before_previous.is_some_and(|t| t.is("will")) => {
            Some(Tense::Present)
        }
        _ if token.is("going") && tokens.get(index + 1).is_some_and(|t| t.is("to")) => {
            Some(Tense::Present)
        }
        _ if is_one_of(previous, &["will"]) => Some(Tense::Present),
        PosTag::Vbd => Some(Tense::Past),
        PosTag::Vbp | PosTag::Vbz => Some(Tense::Present),
        PosTag::Vbn if context.was_or_were => Some(Tense::Past),
        PosTag::Vbn if context.has_or_have || context.will_have => Some(Tense::Present),
        _ => None,
    }
}

/// Votes cast by the verbs of a tagged text, in token order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerbTally {
    pub verbs_found: usize,
    pub votes: Vec<Tense>,
}

pub fn tally_verbs(tokens: &[Token]) -> VerbTally {
    let context = AuxiliaryContext::from_tokens(tokens);
    let mut tally = VerbTally::default();

    for (index, token) in tokens.iter().enumerate() {
        if !token.tag.is_verb() {
            continue;
        }
        tally.verbs_found += 1;
        if let Some(tense) = verb_vote(tokens, index, &context) {
            tally.votes.push(tense);
        }
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tense::lexer::tag_text;

    #[test]
    fn test_mentions_was_or_were() {
        assert!(mentions_was_or_were("it was done"));
        assert!(mentions_was_or_were("they were"));
        assert!(mentions_was_or_were("answered"));
        assert!(!mentions_was_or_were("it is done"));
    }

    #[test]
    fn test_passive_voice() {
        assert!(has_passive_voice(&tag_text("The salt is dissolved in water.")));
        assert!(has_passive_voice(&tag_text("Stirred solutions gave a precipitate.")));
        assert!(!has_passive_voice(&tag_text("The mixture cooled slowly.")));
        assert!(!has_passive_voice(&tag_text("We have shown the effect.")));
    }

    #[test]
    fn test_patent_procedure() {
        assert!(is_patent_procedure("prepared from compound a."));
        assert!(is_patent_procedure("\"obtained\" as a white solid"));
        assert!(is_patent_procedure("the title compound according to example 1"));
        assert!(is_patent_procedure("repeat following example 2"));
        assert!(!is_patent_procedure("the salt dissolves quickly"));
        assert!(!is_patent_procedure(""));
    }

    #[test]
    fn test_auxiliary_context_is_token_level() {
        let context = AuxiliaryContext::from_tokens(&tag_text("The behavior shows a wash step"));
        assert!(!context.was_or_were);
        assert!(!context.has_or_have);

        let context = AuxiliaryContext::from_tokens(&tag_text("It will have shown effects"));
        assert!(context.will_have);
    }

    #[test]
    fn test_votes() {
        let tally = tally_verbs(&tag_text("The cells are growing in culture."));
        assert_eq!(tally.votes, vec![Tense::Present, Tense::Present]);

        let tally = tally_verbs(&tag_text("The patient will receive the drug."));
        assert_eq!(tally.votes, vec![Tense::Present]);

        let tally = tally_verbs(&tag_text("The mixture turned blue and gave a solid."));
        assert_eq!(tally.votes, vec![Tense::Past, Tense::Past]);

        let tally = tally_verbs(&tag_text("The inventors have shown an effect."));
        assert_eq!(tally.votes, vec![Tense::Present, Tense::Present]);
    }

    #[test]
    fn test_going_to() {
        let tally = tally_verbs(&tag_text("We are going to test it."));
        assert_eq!(tally.verbs_found, 3);
        assert_eq!(tally.votes, vec![Tense::Present, Tense::Present]);
    }

    #[test]
    fn test_unvoted_verbs() {
        let tally = tally_verbs(&tag_text("To dissolve the salt in water."));
        assert_eq!(tally.verbs_found, 1);
        assert!(tally.votes.is_empty());
    }
}
