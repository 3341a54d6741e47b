use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Grammatical tense bucket assigned to one example.
///
/// Future constructions are folded into [`Tense::Present`]; the output
/// alphabet is only past, present and unknown.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tense {
    Past,
    Present,
    Unknown,
}

/// Why an example was classified as [`Tense::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UnknownReason {
    /// Nothing but whitespace after preprocessing.
    EmptyText,
    /// No token was tagged as a verb.
    NoVerbsFound,
    /// Verbs were tagged, but none matched a tense construction.
    VerbsFoundButNotClassified,
}

/// The rule that decided a classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClassificationRule {
    /// Lowercased text contains "was" or "were".
    WasWereShortcut,
    /// A past participle follows a be-auxiliary or opens the text.
    PassiveVoice,
    /// Text opens with a procedure verb or contains a procedure phrase.
    PatentProcedure,
    /// Plurality vote over the tense constructions of individual verbs.
    VerbTally,
    /// No tense could be established.
    NoTense,
}

/// Share of classified verbs per tense, in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TensePercentages {
    #[serde(rename = "past_percentage")]
    pub past: f64,
    #[serde(rename = "present_percentage")]
    pub present: f64,
    #[serde(rename = "unknown_percentage")]
    pub unknown: f64,
}

impl TensePercentages {
    pub fn all_past() -> Self {
        Self {
            past: 100.0,
            present: 0.0,
            unknown: 0.0,
        }
    }

    pub fn all_unknown() -> Self {
        Self {
            past: 0.0,
            present: 0.0,
            unknown: 100.0,
        }
    }

    pub fn get(&self, tense: Tense) -> f64 {
        match tense {
            Tense::Past => self.past,
            Tense::Present => self.present,
            Tense::Unknown => self.unknown,
        }
    }
}

/// Number of tense votes cast by the classifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenseCounts {
    pub past: usize,
    pub present: usize,
}

impl TenseCounts {
    pub fn total(&self) -> usize {
        self.past + self.present
    }
}

/// Result of classifying one example's text.
///
/// `why_unknown` is `None` whenever `tense` is not [`Tense::Unknown`], and the
/// three percentages always add up to 100.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TenseClassification {
    pub tense: Tense,
    #[serde(rename = "verb_counts")]
    pub counts: TenseCounts,
    #[serde(flatten)]
    pub percentages: TensePercentages,
    /// Human-readable breakdown, e.g. `past: 60.0%, present: 40.0%` or
    /// `Mixed: past 60.0%, present 40.0%`. Empty for unknown.
    #[serde(rename = "tense_breakdown")]
    pub breakdown: String,
    pub has_mixed: bool,
    pub why_unknown: Option<UnknownReason>,
    pub rule: ClassificationRule,
}

impl TenseClassification {
    /// A 100% past result produced by one of the fast-path rules.
    pub fn fast_past(rule: ClassificationRule) -> Self {
        Self {
            tense: Tense::Past,
            counts: TenseCounts {
                past: 1,
                present: 0,
            },
            percentages: TensePercentages::all_past(),
            breakdown: "past: 100%".to_string(),
            has_mixed: false,
            why_unknown: None,
            rule,
        }
    }

    pub fn unknown(reason: UnknownReason, counts: TenseCounts) -> Self {
        Self {
            tense: Tense::Unknown,
            counts,
            percentages: TensePercentages::all_unknown(),
            breakdown: String::new(),
            has_mixed: false,
            why_unknown: Some(reason),
            rule: ClassificationRule::NoTense,
        }
    }
}

/// One numbered "Example N" sub-section of a patent's Examples section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExampleBlock {
    /// Heading text that opened the block, e.g. "Example 3".
    pub number: String,
    /// Text of the node immediately following the heading.
    pub title: String,
    /// Paragraph texts in document order.
    pub content: Vec<String>,
    /// Flattened into the block, so serialized blocks carry `tense`,
    /// `why_unknown` and `tense_breakdown` next to their content.
    #[serde(flatten)]
    pub classification: Option<TenseClassification>,
}

impl ExampleBlock {
    pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            title: title.into(),
            content: Vec::new(),
            classification: None,
        }
    }

    /// Text handed to the tense classifier: title, a period, then the
    /// paragraphs joined by single spaces.
    pub fn description(&self) -> String {
        format!("{}.{}", self.title, self.content.join(" "))
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn tense(&self) -> Option<Tense> {
        self.classification.as_ref().map(|c| c.tense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_description_joins_title_and_content() {
        let mut block = ExampleBlock::new("Example 1", "Preparation of A");
        block.content.push("First step.".to_string());
        block.content.push("Second step.".to_string());
        assert_eq!(
            block.description(),
            "Preparation of A.First step. Second step."
        );
    }

    #[test]
    fn test_description_without_content() {
        let block = ExampleBlock::new("Example 2", "Title");
        assert_eq!(block.description(), "Title.");
        assert!(!block.has_content());
    }

    #[test]
    fn test_tense_string_forms() {
        assert_eq!(Tense::Past.to_string(), "past");
        assert_eq!(Tense::from_str("present").ok(), Some(Tense::Present));
        assert_eq!(
            serde_json::to_string(&Tense::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn test_unknown_reason_serializes_snake_case() {
        assert_eq!(UnknownReason::NoVerbsFound.as_ref(), "no_verbs_found");
        assert_eq!(
            serde_json::to_string(&UnknownReason::VerbsFoundButNotClassified).unwrap(),
            "\"verbs_found_but_not_classified\""
        );
    }

    #[test]
    fn test_fast_past_is_complete() {
        let result = TenseClassification::fast_past(ClassificationRule::PassiveVoice);
        assert_eq!(result.tense, Tense::Past);
        assert_eq!(result.percentages.past, 100.0);
        assert!(result.why_unknown.is_none());
    }

    #[test]
    fn test_classified_block_serializes_flat() {
        let mut block = ExampleBlock::new("Example 1", "Title");
        block.content.push("Body.".to_string());
        block.classification = Some(TenseClassification::fast_past(
            ClassificationRule::WasWereShortcut,
        ));

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["number"], "Example 1");
        assert_eq!(value["tense"], "past");
        assert_eq!(value["tense_breakdown"], "past: 100%");
        assert_eq!(value["past_percentage"], 100.0);
        assert_eq!(value["why_unknown"], serde_json::Value::Null);
        assert_eq!(value["rule"], "was_were_shortcut");
    }

    #[test]
    fn test_unclassified_block_has_no_tense_fields() {
        let block = ExampleBlock::new("Example 1", "Title");
        let value = serde_json::to_value(&block).unwrap();
        assert!(value.get("tense").is_none());
    }
}
