//! Catalog entries without a site-selection rule yet.
//!
//! Declared so the severity tiers keep their configured shape; each reports
//! failure and leaves the source untouched. The mutation engine tolerates a
//! chosen strategy that always fails.

use crate::types::{DefectKind, DefectRecord};

pub fn unused_variable(source: &str, _rng: &mut fastrand::Rng) -> (String, DefectRecord) {
    (
        source.to_string(),
        DefectRecord::failed(DefectKind::UnusedVariable, "not implemented"),
    )
}

pub fn swapped_arguments(source: &str, _rng: &mut fastrand::Rng) -> (String, DefectRecord) {
    (
        source.to_string(),
        DefectRecord::failed(DefectKind::SwappedArguments, "not implemented"),
    )
}

pub fn modified_string(source: &str, _rng: &mut fastrand::Rng) -> (String, DefectRecord) {
    (
        source.to_string(),
        DefectRecord::failed(DefectKind::ModifiedString, "not implemented"),
    )
}

pub fn removed_error_handling(source: &str, _rng: &mut fastrand::Rng) -> (String, DefectRecord) {
    (
        source.to_string(),
        DefectRecord::failed(DefectKind::RemovedErrorHandling, "not implemented"),
    )
}

pub fn null_dereference(source: &str, _rng: &mut fastrand::Rng) -> (String, DefectRecord) {
    (
        source.to_string(),
        DefectRecord::failed(DefectKind::NullDereference, "not implemented"),
    )
}

pub fn resource_leak(source: &str, _rng: &mut fastrand::Rng) -> (String, DefectRecord) {
    (
        source.to_string(),
        DefectRecord::failed(DefectKind::ResourceLeak, "not implemented"),
    )
}
