//! Local git queries, run through a [`ProcessRunner`].

mod name_status;

pub use name_status::{parse_name_status, parse_name_status_output};

use crate::process::{Invocation, ProcessRunner};
use anyhow::{Context, Result};

pub struct GitCommand<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> GitCommand<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }

    /// Most recent common ancestor of `branch` and `HEAD`.
    pub fn merge_base(&self, branch: &str) -> Result<String> {
        let stdout = self
            .runner
            .check_output(&Invocation::new("git", ["merge-base", branch, "HEAD"]))
            .with_context(|| format!("Failed to find merge base of {branch} and HEAD"))?;
        Ok(stdout.trim().to_string())
    }

    /// Paths that differ between `commit` and the working tree, deletions excluded.
    pub fn diff_name_status(&self, commit: &str) -> Result<Vec<String>> {
        let stdout = self
            .runner
            .check_output(&Invocation::new("git", ["diff", commit, "--name-status"]))
            .with_context(|| format!("Failed to diff working tree against {commit}"))?;
        Ok(parse_name_status_output(&stdout))
    }

    /// Get a git config value (local, then global). `None` when unset.
    pub fn config_get(&self, key: &str) -> Result<Option<String>> {
        let output = self
            .runner
            .run(&Invocation::new("git", ["config", "--get", key]))
            .context("Failed to execute git config command")?;

        if output.is_success() {
            Ok(Some(output.stdout.trim().to_string()))
        } else {
            // Exit code 1 means the key was not found, which is not an error
            Ok(None)
        }
    }
}
