//! The full remote build run.
//!
//! `merge-base → reconcile → diff → transfer → drift → build`, each stage
//! starting only after the previous one's subprocesses have exited. The
//! first failure ends the run.

use super::{build, changes, drift, reconcile, ProgressSink};
use crate::config::BuildConfig;
use crate::git::GitCommand;
use crate::process::ProcessRunner;
use crate::remote::RemoteShell;
use crate::transfer;
use anyhow::Result;

/// What happened to the build step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Skipped,
    Succeeded,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub base_commit: String,
    pub reconcile: reconcile::ReconcileOutcome,
    /// Changed files; empty when there was nothing to push.
    pub files: Vec<String>,
    pub transferred: bool,
    /// Remote-only edits that were restored from HEAD.
    pub reverted: Vec<String>,
    pub build: BuildOutcome,
}

pub fn execute(
    config: &BuildConfig,
    runner: &dyn ProcessRunner,
    sink: &mut dyn ProgressSink,
) -> Result<PipelineOutcome> {
    let git = GitCommand::new(runner);
    let remote = RemoteShell::new(runner, &config.host, &config.remote_path);

    let base_commit = git.merge_base(&config.branch)?;
    sink.on_info(&format!("Base commit: {base_commit}"));

    let reconcile = reconcile::execute(&remote, &config.tracking_branch, &base_commit, sink)?;

    let files = changes::execute(&git, &base_commit, sink)?;

    sink.on_step("Transferring changed files");
    let transferred = transfer::push_files(runner, &files, &config.host, &config.remote_path)?;

    sink.on_step("Checking remote working tree for unexpected changes");
    let reverted = drift::execute(&remote, &files, sink)?;

    let build = if config.skip_build {
        BuildOutcome::Skipped
    } else {
        build::execute(
            &remote,
            &config.build_script,
            &config.build_type,
            &config.build_args,
            sink,
        )?;
        BuildOutcome::Succeeded
    };

    Ok(PipelineOutcome {
        base_commit,
        reconcile,
        files,
        transferred,
        reverted,
        build,
    })
}
