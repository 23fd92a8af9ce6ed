use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The kind of defect a mutation strategy injects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DefectKind {
    VariableTypo,
    RemovedComment,
    UnusedVariable,
    BooleanFlip,
    OffByOne,
    SwappedArguments,
    ModifiedString,
    RemovedErrorHandling,
    NullDereference,
    ResourceLeak,
    SecurityVulnerability,
}

/// Severity tier governing sampling weight at injection time and
/// scoring weight at verification time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Minor => 1,
            Severity::Moderate => 2,
            Severity::Severe => 3,
        }
    }
}

/// One injected (or attempted) defect.
///
/// Mutators produce records without a severity; the mutation engine fills in
/// the tier it drew. The deployment orchestrator sets `file` after a
/// successful write-back. Records with `success == false` never reach the
/// ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectRecord {
    pub kind: DefectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Exact substring that was replaced or removed. None for pure insertions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    /// Exact substring that was written in its place. None for pure removals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    /// 1-based line number at injection time. Advisory only; later defects in
    /// the same file may shift it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Path relative to the project root, set by the orchestrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl DefectRecord {
    fn blank(kind: DefectKind) -> Self {
        Self {
            kind,
            severity: None,
            subtype: None,
            original: None,
            modified: None,
            line: None,
            success: false,
            reason: None,
            details: None,
            file: None,
        }
    }

    /// A successful substitution of `original` with `modified`.
    pub fn replaced(kind: DefectKind, original: &str, modified: &str, line: u32) -> Self {
        Self {
            original: Some(original.to_string()),
            modified: Some(modified.to_string()),
            line: Some(line),
            success: true,
            ..Self::blank(kind)
        }
    }

    /// A successful removal of `original`.
    pub fn removed(kind: DefectKind, original: &str, line: u32) -> Self {
        Self {
            original: Some(original.to_string()),
            line: Some(line),
            success: true,
            ..Self::blank(kind)
        }
    }

    /// A successful insertion of `modified`.
    pub fn inserted(kind: DefectKind, modified: &str, line: u32) -> Self {
        Self {
            modified: Some(modified.to_string()),
            line: Some(line),
            success: true,
            ..Self::blank(kind)
        }
    }

    /// No applicable injection site. The source text is left untouched.
    pub fn failed(kind: DefectKind, reason: &str) -> Self {
        Self {
            reason: Some(reason.to_string()),
            ..Self::blank(kind)
        }
    }

    /// Scoring weight; a record with no recorded severity weighs 1.
    pub fn weight(&self) -> u32 {
        self.severity.map_or(1, |s| s.weight())
    }
}
