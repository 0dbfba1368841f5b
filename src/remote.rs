//! Commands executed inside the remote checkout over ssh.
//!
//! Every remote command is prefixed with `cd <remote path> && `. The remote
//! path is interpolated as-is so a leading `~` expands on the build host;
//! everything else embedded in a command string is quoted with
//! [`shell::quote`].

use crate::git::parse_name_status_output;
use crate::process::{Invocation, ProcessRunner};
use crate::shell;
use anyhow::{Context, Result};

/// A remote checkout reachable as `ssh <host>`.
pub struct RemoteShell<'a> {
    runner: &'a dyn ProcessRunner,
    host: &'a str,
    path: &'a str,
}

impl<'a> RemoteShell<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, host: &'a str, path: &'a str) -> Self {
        Self { runner, host, path }
    }

    pub fn host(&self) -> &str {
        self.host
    }

    pub fn path(&self) -> &str {
        self.path
    }

    /// `cd <path> && <command>`
    pub fn in_checkout(&self, command: &str) -> String {
        format!("cd {} && {command}", self.path)
    }

    fn ssh(&self, remote_command: String) -> Invocation {
        Invocation::new("ssh", [self.host.to_string(), remote_command])
    }

    /// Run `command` in the checkout and return its trimmed stdout.
    pub fn output_line(&self, command: &str) -> Result<String> {
        let stdout = self
            .runner
            .check_output(&self.ssh(self.in_checkout(command)))
            .with_context(|| format!("Remote command failed on {}: {command}", self.host))?;
        Ok(stdout.trim().to_string())
    }

    /// Run an already composed remote command with output on the terminal.
    pub fn communicate(&self, remote_command: String) -> Result<()> {
        self.runner.check_status(&self.ssh(remote_command))
    }

    /// Commit currently checked out on the build host.
    pub fn head_commit(&self) -> Result<String> {
        self.output_line("git rev-parse HEAD")
    }

    /// Paths modified in the remote working tree relative to its HEAD.
    pub fn changed_files(&self) -> Result<Vec<String>> {
        let stdout = self
            .runner
            .check_output(&self.ssh(self.in_checkout("git diff --name-status")))
            .with_context(|| format!("Failed to list remote changes on {}", self.host))?;
        Ok(parse_name_status_output(&stdout))
    }

    /// Composite command that discards local remote state and checks out `commit`.
    pub fn sync_command(&self, tracking_branch: &str, commit: &str) -> String {
        self.in_checkout(&format!(
            "git checkout -- . && git clean -f . && git checkout {} && git pull && git checkout {}",
            shell::quote(tracking_branch),
            shell::quote(commit)
        ))
    }

    /// Composite command restoring each of `files` from the remote HEAD.
    pub fn revert_command(&self, files: &[String]) -> String {
        let mut command = format!("cd {}", self.path);
        for file in files {
            command.push_str(" && git checkout -- ");
            command.push_str(&shell::quote(file));
        }
        command
    }

    /// `cd <path> && <script> <args...>` with every argument quoted.
    pub fn build_command(&self, script: &str, args: &[String]) -> String {
        let mut command = self.in_checkout(script);
        for arg in args {
            command.push(' ');
            command.push_str(&shell::quote(arg));
        }
        command
    }
}
