use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::warn;
use walkdir::WalkDir;

use crate::types::config::SelectionRules;

/// How to pick the subset of eligible files to mutate.
#[derive(Debug, Clone, Copy)]
pub enum SelectionMode {
    /// Include each eligible file independently with this probability. An
    /// empty draw over a non-empty candidate set falls back to exactly one
    /// file so a deployment always makes progress.
    Probability(f64),
    /// Choose `min(n, candidates)` files uniformly without replacement.
    Fixed(usize),
}

/// Walk the project tree and return eligible files as root-relative paths.
///
/// Excluded directories are pruned during traversal so their subtrees are
/// never descended into. Results are sorted for reproducible seeded runs.
pub fn candidate_files(root: &Path, rules: &SelectionRules) -> Vec<PathBuf> {
    let excluded_files = build_globset(&rules.excluded_files);
    let mut candidates = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !rules.excluded_directories.iter().any(|d| d == name.as_ref())
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if excluded_files.is_match(Path::new(name.as_ref())) {
            continue;
        }
        if !rules
            .file_extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_str()))
        {
            continue;
        }

        if let Ok(relative) = entry.path().strip_prefix(root) {
            candidates.push(relative.to_path_buf());
        }
    }

    candidates.sort();
    candidates
}

/// Select a subset of the candidates per the given mode.
pub fn select_files(
    candidates: &[PathBuf],
    mode: SelectionMode,
    rng: &mut fastrand::Rng,
) -> Vec<PathBuf> {
    match mode {
        SelectionMode::Probability(p) => {
            let mut selected: Vec<PathBuf> = candidates
                .iter()
                .filter(|_| rng.f64() < p)
                .cloned()
                .collect();
            if selected.is_empty() && !candidates.is_empty() {
                selected.push(candidates[rng.usize(..candidates.len())].clone());
            }
            selected
        }
        SelectionMode::Fixed(n) => {
            let n = n.min(candidates.len());
            let mut indices: Vec<usize> = (0..candidates.len()).collect();
            rng.shuffle(&mut indices);
            let mut selected: Vec<PathBuf> = indices[..n]
                .iter()
                .map(|&i| candidates[i].clone())
                .collect();
            selected.sort();
            selected
        }
    }
}

fn build_globset(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => warn!("ignoring invalid exclusion pattern {pattern:?}: {e}"),
        }
    }
    builder.build().unwrap_or_else(|e| {
        warn!("exclusion patterns disabled: {e}");
        GlobSet::empty()
    })
}
