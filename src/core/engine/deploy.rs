//! Deployment orchestration.
//!
//! One deployment run walks the project for candidates, creates a dedicated
//! branch, injects defects into a selected subset of files, then either
//! commits and persists the ledger or rolls the branch back if nothing was
//! actually injected.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use log::{info, warn};

use super::generator::DefectGenerator;
use super::selector::{self, SelectionMode};
use crate::core::git::VersionControl;
use crate::core::store::LedgerStore;
use crate::types::config::{SelectionRules, SeverityWeights};
use crate::types::{AppResult, DefectLedger, Hash};

/// Everything a run needs besides the project itself.
pub struct DeploySettings {
    pub rules: SelectionRules,
    pub weights: SeverityWeights,
    pub branch_prefix: String,
    pub max_defects_per_file: u32,
}

#[derive(Debug)]
pub enum DeployOutcome {
    Deployed(DefectLedger),
    /// No eligible files; no branch was created.
    NoCandidates,
    /// Files were selected but every injection attempt failed. The working
    /// branch was rolled back and deleted.
    NothingInjected,
}

pub struct DeploymentOrchestrator<'a> {
    root: &'a Path,
    settings: DeploySettings,
    vcs: &'a dyn VersionControl,
    store: &'a LedgerStore,
    running: Arc<AtomicBool>,
}

impl<'a> DeploymentOrchestrator<'a> {
    pub fn new(
        root: &'a Path,
        settings: DeploySettings,
        vcs: &'a dyn VersionControl,
        store: &'a LedgerStore,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            root,
            settings,
            vcs,
            store,
            running,
        }
    }

    /// Run one deployment. `num_files` switches selection from the
    /// configured per-file probability to a fixed count.
    pub fn deploy(
        &self,
        num_files: Option<usize>,
        rng: &mut fastrand::Rng,
    ) -> AppResult<DeployOutcome> {
        let candidates = selector::candidate_files(self.root, &self.settings.rules);
        if candidates.is_empty() {
            return Ok(DeployOutcome::NoCandidates);
        }
        info!("{} candidate file(s)", candidates.len());

        let base_branch = self.vcs.current_branch()?;
        let branch_name = format!(
            "{}{}",
            self.settings.branch_prefix,
            Local::now().format("%Y%m%d-%H%M%S")
        );
        self.vcs.create_branch(&branch_name)?;
        info!("created branch {branch_name}");

        let mode = num_files
            .map(SelectionMode::Fixed)
            .unwrap_or(SelectionMode::Probability(
                self.settings.rules.selection_probability,
            ));
        let selected = selector::select_files(&candidates, mode, rng);
        info!("selected {} file(s) for injection", selected.len());

        let generator = DefectGenerator::new(self.settings.weights);
        let mut ledger = DefectLedger::new(branch_name.clone());

        for relative in &selected {
            if !self.running.load(Ordering::SeqCst) {
                warn!("interrupted, stopping injection");
                break;
            }

            let path = self.root.join(relative);
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(e) => {
                    warn!("skipping {}: {e}", relative.display());
                    continue;
                }
            };

            let count = rng.u32(1..=self.settings.max_defects_per_file.max(1));
            let (mutated, records) = generator.generate(&source, count, rng);

            let successes: Vec<_> = records.into_iter().filter(|r| r.success).collect();
            if successes.is_empty() {
                continue;
            }

            if let Err(e) = fs::write(&path, &mutated) {
                warn!("skipping {}: {e}", relative.display());
                continue;
            }

            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            ledger.file_hashes.insert(key.clone(), Hash::digest(&mutated));
            for mut record in successes {
                record.file = Some(key.clone());
                ledger.defects.push(record);
            }
        }

        if ledger.is_empty() {
            info!("no defects injected, rolling back {branch_name}");
            self.vcs.switch_branch(&base_branch)?;
            self.vcs.delete_branch(&branch_name)?;
            return Ok(DeployOutcome::NothingInjected);
        }

        self.vcs.commit_all("Inject review-exercise defects")?;
        self.store.save(&ledger)?;
        Ok(DeployOutcome::Deployed(ledger))
    }
}
