//! Discard remote working-tree edits that were not part of the push.
//!
//! After the transfer the remote checkout should differ from its HEAD only
//! in the pushed files. Anything else was edited on the build host directly
//! and is restored from HEAD so it cannot leak into the build.

use super::ProgressSink;
use crate::remote::RemoteShell;
use anyhow::Result;
use std::collections::HashSet;

/// Entries of `remote_changed` absent from `expected`, in remote order.
pub fn unexpected_files(expected: &[String], remote_changed: &[String]) -> Vec<String> {
    let expected: HashSet<&str> = expected.iter().map(String::as_str).collect();
    remote_changed
        .iter()
        .filter(|file| !expected.contains(file.as_str()))
        .cloned()
        .collect()
}

/// Revert unexpected remote changes. Returns the reverted paths.
pub fn execute(
    remote: &RemoteShell<'_>,
    expected: &[String],
    sink: &mut dyn ProgressSink,
) -> Result<Vec<String>> {
    let remote_changed = remote.changed_files()?;
    let unexpected = unexpected_files(expected, &remote_changed);
    if unexpected.is_empty() {
        return Ok(unexpected);
    }

    let mut message = String::from("Reverting:\n");
    for file in &unexpected {
        message.push_str(&format!("  {file}\n"));
    }
    sink.on_info(&message);

    remote.communicate(remote.revert_command(&unexpected))?;
    Ok(unexpected)
}
