use log::trace;

use super::lexer::tag_text;
use super::rules::{
    VerbTally, has_passive_voice, is_patent_procedure, mentions_was_or_were, tally_verbs,
};
use crate::models::{
    ClassificationRule, Tense, TenseClassification, TenseCounts, TensePercentages, UnknownReason,
};

/// Minimum share, in percent, for a tense to count towards a mixed result.
pub const MIXED_TENSE_THRESHOLD: f64 = 20.0;

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classify the dominant grammatical tense of one example description.
///
/// Pure function of `text`: the same input always yields the same result.
pub fn classify_tense(text: &str) -> TenseClassification {
    let text = normalize_whitespace(text);
    if text.is_empty() {
        return TenseClassification::unknown(UnknownReason::EmptyText, TenseCounts::default());
    }

    let lower = text.to_lowercase();
    if mentions_was_or_were(&lower) {
        return TenseClassification::fast_past(ClassificationRule::WasWereShortcut);
    }

    let tokens = tag_text(&text);
    if has_passive_voice(&tokens) {
        return TenseClassification::fast_past(ClassificationRule::PassiveVoice);
    }
    if is_patent_procedure(&lower) {
        return TenseClassification::fast_past(ClassificationRule::PatentProcedure);
    }

    let tally = tally_verbs(&tokens);
    trace!(
        "{} verbs, {} votes in {:?}",
        tally.verbs_found,
        tally.votes.len(),
        text
    );
    summarize(&tally)
}

fn summarize(tally: &VerbTally) -> TenseClassification {
    let counts = TenseCounts {
        past: tally.votes.iter().filter(|t| **t == Tense::Past).count(),
        present: tally.votes.iter().filter(|t| **t == Tense::Present).count(),
    };

    if tally.votes.is_empty() {
        let reason = if tally.verbs_found == 0 {
            UnknownReason::NoVerbsFound
        } else {
            UnknownReason::VerbsFoundButNotClassified
        };
        return TenseClassification::unknown(reason, counts);
    }

    let total = counts.total() as f64;
    let percentages = TensePercentages {
        past: counts.past as f64 * 100.0 / total,
        present: counts.present as f64 * 100.0 / total,
        unknown: 0.0,
    };

    let significant: Vec<Tense> = [Tense::Past, Tense::Present]
        .into_iter()
        .filter(|t| percentages.get(*t) >= MIXED_TENSE_THRESHOLD)
        .collect();
    let has_mixed = significant.len() >= 2;

    TenseClassification {
        tense: plurality(&tally.votes),
        counts,
        percentages,
        breakdown: format_breakdown(&percentages, &significant, has_mixed),
        has_mixed,
        why_unknown: None,
        rule: ClassificationRule::VerbTally,
    }
}

/// Most frequent vote; on a tie the tense that was voted first wins.
fn plurality(votes: &[Tense]) -> Tense {
    let mut order: Vec<Tense> = Vec::with_capacity(2);
    for vote in votes {
        if !order.contains(vote) {
            order.push(*vote);
        }
    }

    let count = |tense: Tense| votes.iter().filter(|t| **t == tense).count();
    order
        .iter()
        .copied()
        .reduce(|best, candidate| {
            if count(candidate) > count(best) {
                candidate
            } else {
                best
            }
        })
        .unwrap_or(Tense::Unknown)
}

fn format_breakdown(percentages: &TensePercentages, significant: &[Tense], has_mixed: bool) -> String {
    if has_mixed {
        let mut ranked = significant.to_vec();
        ranked.sort_by(|a, b| percentages.get(*b).total_cmp(&percentages.get(*a)));
        let parts: Vec<String> = ranked
            .iter()
            .map(|t| format!("{} {:.1}%", t, percentages.get(*t)))
            .collect();
        format!("Mixed: {}", parts.join(", "))
    } else {
        [Tense::Past, Tense::Present]
            .into_iter()
            .filter(|t| percentages.get(*t) > 0.0)
            .map(|t| format!("{}: {:.1}%", t, percentages.get(t)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
