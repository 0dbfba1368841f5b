//! Subprocess execution seam.
//!
//! Every git, ssh and rsync call goes through a [`ProcessRunner`]. The real
//! implementation is [`SystemRunner`]; tests substitute [`ScriptedRunner`]
//! to script outputs and exit statuses and to inspect what was invoked.

mod scripted;

pub use scripted::ScriptedRunner;

use crate::error::RemoteBuildError;
use crate::log_debug;
use anyhow::{Context, Result};
use std::fmt;
use std::process::{Command, Stdio};

/// How the child's stdout is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Stdout is captured and returned; stderr goes to the terminal.
    Capture,
    /// Stdout and stderr go straight to the terminal.
    Inherit,
}

/// A fully specified external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub mode: OutputMode,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            mode: OutputMode::Capture,
        }
    }

    /// Stream the child's output to the terminal instead of capturing it.
    pub fn inherit(mut self) -> Self {
        self.mode = OutputMode::Inherit;
        self
    }

    /// Command line rendered with single spaces, used for logging and matching.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Exit status and captured stdout of a finished child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the child was killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout; empty in [`OutputMode::Inherit`].
    pub stdout: String,
}

impl ProcessOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands to completion.
///
/// `run` only fails when the command could not be started; a nonzero exit
/// is reported through [`ProcessOutput::code`]. The provided helpers turn
/// nonzero exits into [`RemoteBuildError::CommandFailed`].
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput>;

    /// Run with captured stdout and return it, failing on a nonzero exit.
    fn check_output(&self, invocation: &Invocation) -> Result<String> {
        let output = self.run(invocation)?;
        if !output.is_success() {
            return Err(command_failed(invocation, output.code).into());
        }
        Ok(output.stdout)
    }

    /// Run with inherited stdio, failing on a nonzero exit.
    fn check_status(&self, invocation: &Invocation) -> Result<()> {
        let invocation = invocation.clone().inherit();
        let output = self.run(&invocation)?;
        if !output.is_success() {
            return Err(command_failed(&invocation, output.code).into());
        }
        Ok(())
    }
}

fn command_failed(invocation: &Invocation, code: Option<i32>) -> RemoteBuildError {
    RemoteBuildError::CommandFailed {
        command: invocation.program.clone(),
        code,
    }
}

/// Spawns real child processes with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        log_debug!("Running: {invocation}");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        match invocation.mode {
            OutputMode::Capture => {
                let output = cmd
                    .stdin(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .output()
                    .with_context(|| format!("Failed to execute {}", invocation.program))?;
                let stdout = String::from_utf8(output.stdout)
                    .with_context(|| format!("Failed to parse {} output", invocation.program))?;
                log_debug!("{} exited with {:?}", invocation.program, output.status.code());
                Ok(ProcessOutput {
                    code: output.status.code(),
                    stdout,
                })
            }
            OutputMode::Inherit => {
                let status = cmd
                    .status()
                    .with_context(|| format!("Failed to execute {}", invocation.program))?;
                log_debug!("{} exited with {:?}", invocation.program, status.code());
                Ok(ProcessOutput {
                    code: status.code(),
                    stdout: String::new(),
                })
            }
        }
    }
}
