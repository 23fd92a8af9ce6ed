use std::path::Path;

use chrono::Utc;
use console::style;
use log::info;
use serde::Serialize;

use crate::core::cli::VerifyArgs;
use crate::core::git::{GitCli, VersionControl};
use crate::core::store::LedgerStore;
use crate::engine::verify::verify;
use crate::types::{AppError, AppResult, DefectOutcome, DefectStatus, EvaluationResult};

#[derive(Debug, Serialize)]
struct VerifyReport<'a> {
    defect_branch: &'a str,
    fix_branch: &'a str,
    verified_at: chrono::DateTime<Utc>,
    #[serde(flatten)]
    result: &'a EvaluationResult,
}

pub fn execute_verify(args: VerifyArgs, cwd: &Path) -> AppResult<()> {
    let store = LedgerStore::for_project(cwd);
    let ledger = store.load()?;

    let vcs = GitCli::new(cwd);
    let branches = vcs.branch_names()?;
    for branch in [ledger.branch_name.as_str(), args.fix_branch.as_str()] {
        if !branches.iter().any(|b| b == branch) {
            return Err(AppError::BranchNotFound(branch.to_string()));
        }
    }

    let diff = vcs.diff_between(&ledger.branch_name, &args.fix_branch)?;
    let result = verify(&ledger.defects, &diff);

    match args.format.as_str() {
        "json" => {
            let report = VerifyReport {
                defect_branch: &ledger.branch_name,
                fix_branch: &args.fix_branch,
                verified_at: Utc::now(),
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_report(&ledger.branch_name, &args.fix_branch, &result, args.verbose),
    }

    Ok(())
}

fn print_report(defect_branch: &str, fix_branch: &str, result: &EvaluationResult, verbose: bool) {
    info!("Verification: {defect_branch} vs {fix_branch}");
    info!(
        "Defects: {} total, {} found, {} fixed correctly, {} fixed incorrectly, {} missed",
        result.total, result.found, result.fixed_correctly, result.fixed_incorrectly, result.missed
    );

    let score = format!("{:.2}%", result.performance_score);
    let score = if result.performance_score >= 80.0 {
        style(score).green()
    } else if result.performance_score >= 50.0 {
        style(score).yellow()
    } else {
        style(score).red()
    };
    info!("Performance score: {score}");

    for status in [
        DefectStatus::Missed,
        DefectStatus::FixedIncorrectly,
        DefectStatus::FixedCorrectly,
    ] {
        let group: Vec<&DefectOutcome> = result
            .per_defect
            .iter()
            .filter(|o| o.status == status)
            .collect();
        if group.is_empty() {
            continue;
        }
        info!("");
        info!("{status}:");
        for outcome in group {
            print_outcome(outcome, verbose);
        }
    }
}

fn print_outcome(outcome: &DefectOutcome, verbose: bool) {
    let record = &outcome.record;
    let location = match (record.file.as_deref(), record.line) {
        (Some(file), Some(line)) => format!("{file}:{line}"),
        (Some(file), None) => file.to_string(),
        _ => "<unknown>".to_string(),
    };
    let severity = record
        .severity
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    info!("  [{severity}] {} at {location}", record.kind);

    if verbose {
        match (record.original.as_deref(), record.modified.as_deref()) {
            (Some(original), Some(modified)) => {
                info!("    change: {}", inline_change(original, modified));
            }
            (Some(original), None) => info!("    removed: {original}"),
            (None, Some(modified)) => info!("    injected: {modified}"),
            (None, None) => {}
        }
        if let Some(details) = record.details.as_deref() {
            info!("    details: {details}");
        }
    }
}

/// Word-level rendering of what the injection changed, with deletions and
/// insertions styled when colors are on.
fn inline_change(original: &str, modified: &str) -> String {
    let diff = similar::TextDiff::from_words(original, modified);
    let mut rendered = String::new();
    for change in diff.iter_all_changes() {
        let value = change.value();
        match change.tag() {
            similar::ChangeTag::Delete => {
                rendered.push_str(&style(value).red().strikethrough().to_string());
            }
            similar::ChangeTag::Insert => {
                rendered.push_str(&style(value).green().to_string());
            }
            similar::ChangeTag::Equal => rendered.push_str(value),
        }
    }
    rendered
}
