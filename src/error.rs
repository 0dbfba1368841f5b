//! Failure taxonomy for a remote build run.
//!
//! Everything that decides the process exit status is a [`RemoteBuildError`];
//! other failures travel as plain `anyhow` errors and exit with status 1.

use thiserror::Error;

/// Exit status used when no more specific code is available.
pub const GENERIC_EXIT_CODE: i32 = 1;

#[derive(Debug, Error)]
pub enum RemoteBuildError {
    /// No host from `--host`, the environment, or git config.
    #[error("Please specify host with --host option or {env_var} variable")]
    MissingHost { env_var: &'static str },

    /// `git`, `ssh` or `rsync` could not be found on PATH.
    #[error("Missing required tools: {}", .0.join(", "))]
    MissingTools(Vec<String>),

    /// The remote checkout still disagrees after the one reset attempt.
    #[error("Failed to sync remote commit to: {expected}, it still: {actual}")]
    CommitMismatch { expected: String, actual: String },

    /// An external command exited unsuccessfully.
    ///
    /// `code` is `None` when the process was terminated by a signal.
    #[error("{command} {}", describe_status(.code))]
    CommandFailed { command: String, code: Option<i32> },
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

impl RemoteBuildError {
    /// Process exit status for this failure.
    ///
    /// Failed subprocesses propagate their own code unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            RemoteBuildError::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => GENERIC_EXIT_CODE,
        }
    }
}

/// Exit status for any error surfaced by the orchestrator.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<RemoteBuildError>()
        .map(RemoteBuildError::exit_code)
        .unwrap_or(GENERIC_EXIT_CODE)
}
