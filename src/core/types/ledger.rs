use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::defect::{DefectRecord, Severity};
use super::hash::Hash;

/// Append-only record of everything one deployment run injected.
///
/// Created once per run, persisted alongside the project, and read back
/// verbatim by verification (possibly many times against different fix
/// branches). Never mutated after `deploy` returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectLedger {
    /// Branch holding the mutated state.
    pub branch_name: String,
    pub timestamp: DateTime<Utc>,
    /// Injection order. Order is not significant for verification.
    pub defects: Vec<DefectRecord>,
    /// SHA-256 of each touched file's mutated content, keyed by relative
    /// path. Lets `status` detect edits made after injection.
    #[serde(default)]
    pub file_hashes: BTreeMap<String, Hash>,
}

impl DefectLedger {
    pub fn new(branch_name: String) -> Self {
        Self {
            branch_name,
            timestamp: Utc::now(),
            defects: Vec::new(),
            file_hashes: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }

    /// (minor, moderate, severe) counts.
    pub fn severity_counts(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for defect in &self.defects {
            match defect.severity {
                Some(Severity::Minor) => counts.0 += 1,
                Some(Severity::Moderate) => counts.1 += 1,
                Some(Severity::Severe) => counts.2 += 1,
                None => {}
            }
        }
        counts
    }

    /// Defect counts keyed by kind name, for reporting.
    pub fn kind_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for defect in &self.defects {
            *counts.entry(defect.kind.to_string()).or_insert(0) += 1;
        }
        counts
    }
}
