use serde::{Deserialize, Serialize};

use super::example::{Tense, TenseClassification};

/// Per-patent aggregate of its examples' tense classifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatentStatistics {
    pub past_count: usize,
    pub present_count: usize,
    pub unknown_count: usize,
    /// Number of qualifying examples that were classified.
    pub examples_count: usize,
    /// Number of those examples flagged as mixed tense.
    pub mixed_count: usize,
    /// `mixed_count / examples_count * 100`, rounded half-to-even, as `"NN%"`.
    pub mixed_tense_percentage: String,
    /// Every classified example is present tense.
    pub all_present: bool,
    /// At least one, but not every, example is present tense.
    pub some_present: bool,
    /// No example is present tense.
    pub no_present: bool,
    #[serde(default)]
    pub year: Option<i32>,
}

impl PatentStatistics {
    /// Aggregate classifications into statistics.
    ///
    /// Returns `None` when there is nothing to aggregate; a patent without
    /// qualifying examples gets no statistics record.
    pub fn from_classifications<'a, I>(classifications: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a TenseClassification>,
    {
        let mut past_count = 0;
        let mut present_count = 0;
        let mut unknown_count = 0;
        let mut mixed_count = 0;

        for classification in classifications {
            match classification.tense {
                Tense::Past => past_count += 1,
                Tense::Present => present_count += 1,
                Tense::Unknown => unknown_count += 1,
            }
            if classification.has_mixed {
                mixed_count += 1;
            }
        }

        let examples_count = past_count + present_count + unknown_count;
        if examples_count == 0 {
            return None;
        }

        let all_present = present_count == examples_count;
        Some(Self {
            past_count,
            present_count,
            unknown_count,
            examples_count,
            mixed_count,
            mixed_tense_percentage: format_percentage(mixed_count, examples_count),
            all_present,
            some_present: present_count > 0 && !all_present,
            no_present: present_count == 0,
            year: None,
        })
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }
}

fn format_percentage(part: usize, whole: usize) -> String {
    let pct = part as f64 / whole as f64 * 100.0;
    format!("{}%", pct.round_ties_even() as i64)
}
