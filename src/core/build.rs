//! Remote build invocation.

use super::ProgressSink;
use crate::remote::RemoteShell;
use anyhow::Result;

/// Separator that may lead the forwarded arguments.
pub const ARG_SEPARATOR: &str = "--";

/// Arguments for the build script: the build type, then the forwarded
/// arguments with one leading `--` removed.
pub fn build_arguments(build_type: &str, forwarded: &[String]) -> Vec<String> {
    let forwarded = match forwarded.split_first() {
        Some((first, rest)) if first == ARG_SEPARATOR => rest,
        _ => forwarded,
    };
    let mut args = Vec::with_capacity(forwarded.len() + 1);
    args.push(build_type.to_string());
    args.extend(forwarded.iter().cloned());
    args
}

/// Run the build script in the remote checkout with output on the terminal.
///
/// A failing build surfaces the remote exit code unchanged.
pub fn execute(
    remote: &RemoteShell<'_>,
    script: &str,
    build_type: &str,
    forwarded: &[String],
    sink: &mut dyn ProgressSink,
) -> Result<()> {
    let command = remote.build_command(script, &build_arguments(build_type, forwarded));
    sink.on_info(&format!("Remote command: {command}"));
    remote.communicate(command)
}
