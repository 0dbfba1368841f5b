//! Checksum-based file transfer with rsync.

use crate::process::{Invocation, ProcessRunner};
use anyhow::{Context, Result};

/// rsync flags: the archive set `-rlptgoD` with `t` replaced by `c`, so
/// files are compared by checksum instead of modification time and remote
/// mtimes are left alone, plus `-v` and `-R` to recreate the relative paths
/// under the destination.
pub const RSYNC_FLAGS: &str = "-rlpcgoDvR";

/// rsync invocation pushing `files` to `<host>:<remote_path>`.
pub fn rsync_invocation(files: &[String], host: &str, remote_path: &str) -> Invocation {
    let mut args = Vec::with_capacity(files.len() + 2);
    args.push(RSYNC_FLAGS.to_string());
    args.extend(files.iter().cloned());
    args.push(format!("{host}:{remote_path}"));
    Invocation::new("rsync", args).inherit()
}

/// Push `files` to the build host. Returns whether a transfer was run.
///
/// An empty list is a no-op. A failing rsync surfaces its exit code.
pub fn push_files(
    runner: &dyn ProcessRunner,
    files: &[String],
    host: &str,
    remote_path: &str,
) -> Result<bool> {
    if files.is_empty() {
        return Ok(false);
    }
    runner
        .check_status(&rsync_invocation(files, host, remote_path))
        .with_context(|| format!("Failed to transfer {} file(s) to {host}", files.len()))?;
    Ok(true)
}
