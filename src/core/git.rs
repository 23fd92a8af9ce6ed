//! Version-control seam.
//!
//! The orchestrator and verifier talk to the repository through the
//! `VersionControl` trait; `GitCli` is the production implementation that
//! shells out to `git`. Tests substitute an in-memory double.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::types::{AppError, AppResult};

pub trait VersionControl {
    fn current_branch(&self) -> AppResult<String>;
    fn create_branch(&self, name: &str) -> AppResult<()>;
    fn switch_branch(&self, name: &str) -> AppResult<()>;
    /// Stage everything and commit with the given message.
    fn commit_all(&self, message: &str) -> AppResult<()>;
    /// Unified diff from `from` to `to`.
    fn diff_between(&self, from: &str, to: &str) -> AppResult<String>;
    fn delete_branch(&self, name: &str) -> AppResult<()>;
    fn branch_names(&self) -> AppResult<Vec<String>>;
}

/// `git` invoked as a subprocess, rooted at the project directory.
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn run(&self, args: &[&str]) -> AppResult<String> {
        debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()?;
        if !output.status.success() {
            return Err(AppError::Git {
                command: format!("git {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControl for GitCli {
    fn current_branch(&self) -> AppResult<String> {
        Ok(self
            .run(&["rev-parse", "--abbrev-ref", "HEAD"])?
            .trim()
            .to_string())
    }

    fn create_branch(&self, name: &str) -> AppResult<()> {
        self.run(&["checkout", "-b", name]).map(|_| ())
    }

    fn switch_branch(&self, name: &str) -> AppResult<()> {
        self.run(&["checkout", name]).map(|_| ())
    }

    fn commit_all(&self, message: &str) -> AppResult<()> {
        self.run(&["add", "."])?;
        self.run(&["commit", "-m", message]).map(|_| ())
    }

    fn diff_between(&self, from: &str, to: &str) -> AppResult<String> {
        self.run(&["diff", from, to])
    }

    fn delete_branch(&self, name: &str) -> AppResult<()> {
        self.run(&["branch", "-D", name]).map(|_| ())
    }

    fn branch_names(&self) -> AppResult<Vec<String>> {
        Ok(self
            .run(&["branch", "--format=%(refname:short)"])?
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }
}
