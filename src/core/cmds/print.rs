use std::path::Path;

use log::info;

use crate::core::store::LedgerStore;
use crate::types::AppResult;
use crate::types::config::config;

pub fn execute_print_config(format: &str) -> AppResult<()> {
    let effective = config().to_effective();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&effective)?),
        _ => {
            info!("Effective configuration:");
            info!("  excluded_files: {:?}", effective.excluded_files());
            info!(
                "  excluded_directories: {:?}",
                effective.excluded_directories()
            );
            info!("  file_extensions: {:?}", effective.file_extensions());
            info!(
                "  max_defects_per_file: {}",
                effective.max_defects_per_file()
            );
            info!(
                "  file_selection_probability: {}",
                effective.file_selection_probability()
            );
            info!("  branch_prefix: {}", effective.branch_prefix());
            let weights = effective.severity_weights();
            info!(
                "  severity_weights: minor={} moderate={} severe={}",
                weights.minor, weights.moderate, weights.severe
            );
            let log = effective.log();
            info!("  log.level: {}", log.level());
            info!(
                "  log.color: {}",
                match log.color() {
                    Some(true) => "on",
                    Some(false) => "off",
                    None => "auto",
                }
            );
        }
    }

    Ok(())
}

pub fn execute_print_ledger(format: &str, cwd: &Path) -> AppResult<()> {
    let store = LedgerStore::for_project(cwd);
    let ledger = store.load()?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&ledger)?),
        _ => {
            info!("Branch: {}", ledger.branch_name);
            info!("Deployed at: {}", ledger.timestamp);
            for defect in &ledger.defects {
                let severity = defect
                    .severity
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let location = match (defect.file.as_deref(), defect.line) {
                    (Some(file), Some(line)) => format!("{file}:{line}"),
                    (Some(file), None) => file.to_string(),
                    _ => "<unknown>".to_string(),
                };
                info!("  [{severity}] {} at {location}", defect.kind);
            }
        }
    }

    Ok(())
}
