use std::fs;
use std::path::{Path, PathBuf};

use bugsmith::engine::selector::{self, SelectionMode};
use bugsmith::types::config::SelectionRules;
use pretty_assertions::assert_eq;

fn rules() -> SelectionRules {
    SelectionRules {
        excluded_files: vec!["README.md".to_string(), "*.lock".to_string()],
        excluded_directories: vec!["node_modules".to_string(), ".git".to_string()],
        file_extensions: vec![".py".to_string(), ".js".to_string()],
        selection_probability: 0.3,
    }
}

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "pass\n").unwrap();
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "app.py");
    touch(root, "util.js");
    touch(root, "notes.txt");
    touch(root, "README.md");
    touch(root, "poetry.lock");
    touch(root, "pkg/helper.py");
    touch(root, "node_modules/dep/index.js");
    touch(root, ".git/hooks/sample.py");
    dir
}

#[test]
fn walk_applies_exclusions_and_extensions() {
    let dir = project();
    let candidates = selector::candidate_files(dir.path(), &rules());

    let expected: Vec<PathBuf> = ["app.py", "pkg/helper.py", "util.js"]
        .iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(candidates, expected);
}

#[test]
fn candidates_are_relative_and_sorted() {
    let dir = project();
    let candidates = selector::candidate_files(dir.path(), &rules());

    assert!(candidates.iter().all(|p| p.is_relative()));
    let mut sorted = candidates.clone();
    sorted.sort();
    assert_eq!(candidates, sorted);
}

#[test]
fn empty_tree_yields_no_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let candidates = selector::candidate_files(dir.path(), &rules());
    assert!(candidates.is_empty());
}

#[test]
fn zero_probability_still_selects_one_file() {
    let dir = project();
    let candidates = selector::candidate_files(dir.path(), &rules());

    let mut rng = fastrand::Rng::with_seed(11);
    let selected = selector::select_files(&candidates, SelectionMode::Probability(0.0), &mut rng);
    assert_eq!(selected.len(), 1);
    assert!(candidates.contains(&selected[0]));
}

#[test]
fn full_probability_selects_everything() {
    let dir = project();
    let candidates = selector::candidate_files(dir.path(), &rules());

    let mut rng = fastrand::Rng::with_seed(11);
    let selected = selector::select_files(&candidates, SelectionMode::Probability(1.0), &mut rng);
    assert_eq!(selected, candidates);
}

#[test]
fn fixed_mode_caps_at_candidate_count() {
    let dir = project();
    let candidates = selector::candidate_files(dir.path(), &rules());

    let mut rng = fastrand::Rng::with_seed(11);
    let two = selector::select_files(&candidates, SelectionMode::Fixed(2), &mut rng);
    assert_eq!(two.len(), 2);
    assert!(two.iter().all(|p| candidates.contains(p)));

    let all = selector::select_files(&candidates, SelectionMode::Fixed(10), &mut rng);
    assert_eq!(all, candidates);
}

#[test]
fn selection_on_empty_candidates_is_empty() {
    let mut rng = fastrand::Rng::with_seed(11);
    assert!(selector::select_files(&[], SelectionMode::Probability(0.0), &mut rng).is_empty());
    assert!(selector::select_files(&[], SelectionMode::Fixed(3), &mut rng).is_empty());
}
