//! Fix-branch verification.
//!
//! Compares a ledger against the unified diff between the defect branch and
//! a candidate fix branch. Each ledger entry is classified as missed, fixed
//! incorrectly, or fixed correctly, and the aggregate gets a
//! severity-weighted score.

use regex::Regex;

use super::diff::{FileDiff, Hunk, parse_unified_diff};
use super::mutators::{CREDENTIAL_TERM, SECRET_MARKER};
use crate::types::{DefectKind, DefectOutcome, DefectRecord, DefectStatus, EvaluationResult};

/// Classify every ledger entry against the defect-branch..fix-branch diff
/// and compute the weighted score.
pub fn verify(records: &[DefectRecord], diff: &str) -> EvaluationResult {
    let files = parse_unified_diff(diff);

    let per_defect: Vec<DefectOutcome> = records
        .iter()
        .map(|record| {
            let (status, fix_correct) = resolve_status(record, &files);
            DefectOutcome {
                record: record.clone(),
                status,
                fix_correct,
            }
        })
        .collect();

    let fixed_correctly = count(&per_defect, DefectStatus::FixedCorrectly);
    let fixed_incorrectly = count(&per_defect, DefectStatus::FixedIncorrectly);
    let missed = count(&per_defect, DefectStatus::Missed);

    EvaluationResult {
        total: per_defect.len(),
        found: fixed_correctly + fixed_incorrectly,
        fixed_correctly,
        fixed_incorrectly,
        missed,
        performance_score: weighted_score(&per_defect),
        per_defect,
    }
}

fn count(outcomes: &[DefectOutcome], status: DefectStatus) -> usize {
    outcomes.iter().filter(|o| o.status == status).count()
}

/// Correct fixes earn full severity weight, incorrect ones half, missed
/// ones nothing. Empty ledgers score 0.
fn weighted_score(outcomes: &[DefectOutcome]) -> f64 {
    let mut earned = 0.0;
    let mut possible = 0.0;
    for outcome in outcomes {
        let weight = f64::from(outcome.record.weight());
        possible += weight;
        earned += match outcome.status {
            DefectStatus::FixedCorrectly => weight,
            DefectStatus::FixedIncorrectly => weight / 2.0,
            DefectStatus::Missed => 0.0,
        };
    }
    if possible == 0.0 {
        return 0.0;
    }
    (earned / possible * 100.0 * 100.0).round() / 100.0
}

fn resolve_status(record: &DefectRecord, files: &[FileDiff]) -> (DefectStatus, bool) {
    let Some(path) = record.file.as_deref() else {
        return (DefectStatus::Missed, false);
    };
    let Some(file) = files.iter().find(|f| f.path == path) else {
        return (DefectStatus::Missed, false);
    };
    let Some(hunk) = locate_hunk(record, file) else {
        return (DefectStatus::Missed, false);
    };

    if fix_is_correct(record, hunk) {
        (DefectStatus::FixedCorrectly, true)
    } else {
        (DefectStatus::FixedIncorrectly, false)
    }
}

/// Find the hunk addressing this defect.
///
/// A record that captured text must see that text in the diff: the removed
/// side carrying the injected `modified` form, or (for pure removals) the
/// added side restoring `original`. A hunk that merely covers the recorded
/// line with unrelated content does not count. Only records with no captured
/// text at all fall back to the line hint.
fn locate_hunk<'a>(record: &DefectRecord, file: &'a FileDiff) -> Option<&'a Hunk> {
    if let Some(modified) = record.modified.as_deref() {
        return file
            .hunks
            .iter()
            .find(|h| h.removed.iter().any(|l| l.contains(modified)));
    }
    if let Some(original) = record.original.as_deref() {
        // Pure removal: the fix restores the deleted text.
        return file
            .hunks
            .iter()
            .find(|h| h.added.iter().any(|l| l.contains(original)));
    }
    let line = record.line?;
    file.hunks.iter().find(|h| h.touches_line(line))
}

/// Kind-specific correctness predicate, deliberately lenient: it checks
/// that the fix moves in the right direction, not that it is byte-exact.
fn fix_is_correct(record: &DefectRecord, hunk: &Hunk) -> bool {
    match record.kind {
        DefectKind::VariableTypo => {
            let Some(original) = record.original.as_deref() else {
                return false;
            };
            let Ok(word) = word_pattern(original) else {
                return false;
            };
            hunk.added.iter().any(|l| word.is_match(l))
        }
        DefectKind::BooleanFlip | DefectKind::OffByOne | DefectKind::RemovedComment => {
            let Some(original) = record.original.as_deref() else {
                return false;
            };
            hunk.added.iter().any(|l| l.contains(original))
        }
        DefectKind::SecurityVulnerability
            if record.subtype.as_deref() == Some("hardcoded_credentials") =>
        {
            hunk.removed
                .iter()
                .any(|l| l.contains(CREDENTIAL_TERM) && l.contains(SECRET_MARKER))
        }
        _ => hunk.added.iter().any(|l| !l.trim().is_empty()),
    }
}

fn word_pattern(word: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\b{}\b", regex::escape(word)))
}
