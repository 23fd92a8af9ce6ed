use serde::Serialize;
use strum::Display;

use super::defect::DefectRecord;

/// Resolved status of one ledger entry after comparing the mutated state
/// against a candidate fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DefectStatus {
    FixedCorrectly,
    FixedIncorrectly,
    Missed,
}

/// Per-defect verification outcome.
#[derive(Debug, Clone, Serialize)]
pub struct DefectOutcome {
    pub record: DefectRecord,
    pub status: DefectStatus,
    /// Whether the kind-specific correctness predicate held. Always false
    /// for missed defects.
    pub fix_correct: bool,
}

/// Aggregate result of one verification run. Owns no long-lived state;
/// created fresh per call.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub total: usize,
    pub found: usize,
    pub fixed_correctly: usize,
    pub fixed_incorrectly: usize,
    pub missed: usize,
    /// Severity-weighted percentage in [0, 100], rounded to 2 decimals.
    pub performance_score: f64,
    pub per_defect: Vec<DefectOutcome>,
}
