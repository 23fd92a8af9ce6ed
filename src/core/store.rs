//! Ledger persistence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{AppError, AppResult, DefectLedger};

pub const LEDGER_FILE: &str = ".defect_ledger.json";

/// Reads and writes the ledger file at the project root.
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn for_project(root: impl AsRef<Path>) -> Self {
        Self {
            path: root.as_ref().join(LEDGER_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn save(&self, ledger: &DefectLedger) -> AppResult<()> {
        let json = serde_json::to_string_pretty(ledger)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn load(&self) -> AppResult<DefectLedger> {
        if !self.path.exists() {
            return Err(AppError::LedgerNotFound(self.path.clone()));
        }
        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|source| AppError::LedgerFormat {
            path: self.path.clone(),
            source,
        })
    }
}
