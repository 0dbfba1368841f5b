//! Bring the remote checkout to the local base commit.
//!
//! When the remote HEAD differs from the base commit, the remote checkout is
//! reset and moved with one composite command, then queried again. There is
//! exactly one attempt; a second mismatch is fatal.

use super::ProgressSink;
use crate::error::RemoteBuildError;
use crate::remote::RemoteShell;
use anyhow::Result;

/// Result of reconciling the remote checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Remote HEAD observed before any correction.
    pub initial_remote_commit: String,
    /// Whether the reset-and-checkout command was issued.
    pub resynced: bool,
}

pub fn execute(
    remote: &RemoteShell<'_>,
    tracking_branch: &str,
    base_commit: &str,
    sink: &mut dyn ProgressSink,
) -> Result<ReconcileOutcome> {
    sink.on_step(&format!("Querying HEAD of {}:{}", remote.host(), remote.path()));
    let initial_remote_commit = remote.head_commit()?;
    if initial_remote_commit == base_commit {
        return Ok(ReconcileOutcome {
            initial_remote_commit,
            resynced: false,
        });
    }

    sink.on_info("Remote commit mismatch, syncing");
    sink.on_step(&format!(
        "Remote is at {initial_remote_commit}, expected {base_commit}"
    ));
    remote.communicate(remote.sync_command(tracking_branch, base_commit))?;

    let actual = remote.head_commit()?;
    if actual != base_commit {
        return Err(RemoteBuildError::CommitMismatch {
            expected: base_commit.to_string(),
            actual,
        }
        .into());
    }

    Ok(ReconcileOutcome {
        initial_remote_commit,
        resynced: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordingSink;
    use crate::process::{ProcessOutput, ScriptedRunner};

    const HEAD_QUERY: &str = "git rev-parse HEAD";

    #[test]
    fn test_matching_commit_issues_no_mutation() {
        let runner = ScriptedRunner::new().on(HEAD_QUERY, ProcessOutput::success("abc123\n"));
        let remote = RemoteShell::new(&runner, "buildbox", "~/code/db");
        let mut sink = RecordingSink::default();

        let outcome = execute(&remote, "master", "abc123", &mut sink).unwrap();

        assert!(!outcome.resynced);
        assert_eq!(runner.invocations().len(), 1);
        assert_eq!(runner.count("git pull"), 0);
        assert_eq!(runner.count("git clean"), 0);
        assert!(sink.infos.is_empty());
    }

    #[test]
    fn test_mismatch_resyncs_once() {
        let runner = ScriptedRunner::new()
            .once(HEAD_QUERY, ProcessOutput::success("def456\n"))
            .on(HEAD_QUERY, ProcessOutput::success("abc123\n"));
        let remote = RemoteShell::new(&runner, "buildbox", "~/code/db");
        let mut sink = RecordingSink::default();

        let outcome = execute(&remote, "master", "abc123", &mut sink).unwrap();

        assert!(outcome.resynced);
        assert_eq!(outcome.initial_remote_commit, "def456");
        assert_eq!(runner.count("git pull"), 1);
        assert_eq!(runner.count("git checkout abc123"), 1);
        assert_eq!(runner.count(HEAD_QUERY), 2);
        assert_eq!(sink.infos, vec!["Remote commit mismatch, syncing"]);
    }

    #[test]
    fn test_persistent_mismatch_is_fatal() {
        let runner = ScriptedRunner::new().on(HEAD_QUERY, ProcessOutput::success("def456\n"));
        let remote = RemoteShell::new(&runner, "buildbox", "~/code/db");

        let err = execute(&remote, "master", "abc123", &mut RecordingSink::default()).unwrap_err();

        match err.downcast_ref::<RemoteBuildError>() {
            Some(RemoteBuildError::CommitMismatch { expected, actual }) => {
                assert_eq!(expected, "abc123");
                assert_eq!(actual, "def456");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(runner.count("git pull"), 1, "exactly one attempt");
        assert_eq!(runner.count(HEAD_QUERY), 2);
    }

    #[test]
    fn test_failed_sync_command_propagates() {
        let runner = ScriptedRunner::new()
            .on(HEAD_QUERY, ProcessOutput::success("def456\n"))
            .on("git pull", ProcessOutput::failure(1));
        let remote = RemoteShell::new(&runner, "buildbox", "~/code/db");

        let err = execute(&remote, "master", "abc123", &mut RecordingSink::default()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RemoteBuildError>(),
            Some(RemoteBuildError::CommandFailed { .. })
        ));
        assert_eq!(runner.count(HEAD_QUERY), 1);
    }
}
