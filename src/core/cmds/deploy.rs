use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use indicatif::ProgressBar;
use log::{info, warn};

use crate::core::cli::DeployArgs;
use crate::core::git::GitCli;
use crate::core::store::LedgerStore;
use crate::engine::deploy::{DeployOutcome, DeploySettings, DeploymentOrchestrator};
use crate::types::AppResult;
use crate::types::config::config;

pub fn execute_deploy(
    args: DeployArgs,
    cwd: &Path,
    running: Arc<AtomicBool>,
    rng: &mut fastrand::Rng,
) -> AppResult<i32> {
    let cfg = config();
    let settings = DeploySettings {
        rules: cfg.selection_rules(),
        weights: cfg.severity_weights(),
        branch_prefix: cfg.branch_prefix().to_string(),
        max_defects_per_file: args.max_defects.unwrap_or_else(|| cfg.max_defects_per_file()),
    };

    let vcs = GitCli::new(cwd);
    let store = LedgerStore::for_project(cwd);
    let orchestrator = DeploymentOrchestrator::new(cwd, settings, &vcs, &store, running);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("injecting defects...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    let outcome = orchestrator.deploy(args.files, rng);
    spinner.finish_and_clear();

    match outcome? {
        DeployOutcome::Deployed(ledger) => {
            let (minor, moderate, severe) = ledger.severity_counts();
            info!(
                "injected {} defect(s) into {} file(s) on {}",
                ledger.defects.len(),
                ledger.file_hashes.len(),
                ledger.branch_name
            );
            info!("severity mix: {minor} minor, {moderate} moderate, {severe} severe");
            info!("ledger written to {}", store.path().display());
            Ok(0)
        }
        DeployOutcome::NoCandidates => {
            warn!("no eligible files found; nothing to do");
            Ok(1)
        }
        DeployOutcome::NothingInjected => {
            warn!("every injection attempt failed; branch rolled back");
            Ok(1)
        }
    }
}
