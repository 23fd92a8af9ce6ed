use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::core::cli::StatusArgs;
use crate::core::store::LedgerStore;
use crate::types::{AppError, AppResult, DefectLedger, Hash};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum FileState {
    /// Content still hashes to the value recorded at injection time.
    Intact,
    Modified,
    Missing,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    branch_name: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    total_defects: usize,
    minor: usize,
    moderate: usize,
    severe: usize,
    by_kind: BTreeMap<String, usize>,
    files: BTreeMap<String, FileState>,
}

pub fn execute_status(args: StatusArgs, cwd: &Path) -> AppResult<()> {
    let store = LedgerStore::for_project(cwd);
    let ledger = match store.load() {
        Ok(ledger) => ledger,
        Err(AppError::LedgerNotFound(_)) => {
            info!("No ledger found. Run 'deploy' first.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let report = build_report(&ledger, cwd);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_table_format(&report),
    }

    Ok(())
}

fn build_report(ledger: &DefectLedger, cwd: &Path) -> StatusReport {
    let (minor, moderate, severe) = ledger.severity_counts();

    let files = ledger
        .file_hashes
        .iter()
        .map(|(path, recorded)| {
            let state = match fs::read(cwd.join(path)) {
                Ok(contents) if Hash::digest(&contents) == *recorded => FileState::Intact,
                Ok(_) => FileState::Modified,
                Err(_) => FileState::Missing,
            };
            (path.clone(), state)
        })
        .collect();

    StatusReport {
        branch_name: ledger.branch_name.clone(),
        timestamp: ledger.timestamp,
        total_defects: ledger.defects.len(),
        minor,
        moderate,
        severe,
        by_kind: ledger.kind_counts(),
        files,
    }
}

fn print_table_format(report: &StatusReport) {
    info!("Defect branch: {}", report.branch_name);
    info!("Deployed at:   {}", report.timestamp);
    info!(
        "Defects: {} total ({} minor, {} moderate, {} severe)",
        report.total_defects, report.minor, report.moderate, report.severe
    );

    info!("");
    info!("By kind:");
    for (kind, count) in &report.by_kind {
        info!("  {kind}: {count}");
    }

    info!("");
    info!("Mutated files:");
    for (path, state) in &report.files {
        let label = match state {
            FileState::Intact => "intact",
            FileState::Modified => "modified since injection",
            FileState::Missing => "missing",
        };
        info!("  {path}: {label}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_check_flags_edited_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kept.py"), "total = 1\n").unwrap();
        fs::write(dir.path().join("edited.py"), "total = 1\n").unwrap();

        let mut ledger = DefectLedger::new("review/defects-x".to_string());
        for name in ["kept.py", "edited.py", "gone.py"] {
            ledger
                .file_hashes
                .insert(name.to_string(), Hash::digest("total = 1\n"));
        }

        fs::write(dir.path().join("edited.py"), "total = 2\n").unwrap();

        let report = build_report(&ledger, dir.path());
        assert_eq!(report.files["kept.py"], FileState::Intact);
        assert_eq!(report.files["edited.py"], FileState::Modified);
        assert_eq!(report.files["gone.py"], FileState::Missing);
    }
}
