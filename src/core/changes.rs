//! Local change set relative to the base commit.

use super::ProgressSink;
use crate::git::GitCommand;
use anyhow::Result;

/// Files to push: everything that differs between `base_commit` and the
/// working tree, minus deletions, in git's output order.
pub fn execute(
    git: &GitCommand<'_>,
    base_commit: &str,
    sink: &mut dyn ProgressSink,
) -> Result<Vec<String>> {
    let files = git.diff_name_status(base_commit)?;
    sink.on_info(&format!("Total files: {}", files.len()));
    for file in &files {
        sink.on_step(file);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RecordingSink;
    use crate::process::{ProcessOutput, ScriptedRunner};

    #[test]
    fn test_reports_total_and_lists_files() {
        let runner = ScriptedRunner::new().on(
            "git diff abc123 --name-status",
            ProcessOutput::success("M\tfoo.txt\nD\tbar.txt\nR100\told.txt\tnew.txt\n"),
        );
        let mut sink = RecordingSink::default();

        let files = execute(&GitCommand::new(&runner), "abc123", &mut sink).unwrap();

        assert_eq!(files, vec!["foo.txt", "new.txt"]);
        assert_eq!(sink.infos, vec!["Total files: 2"]);
        assert_eq!(sink.steps, vec!["foo.txt", "new.txt"]);
    }

    #[test]
    fn test_clean_tree_has_no_files() {
        let runner = ScriptedRunner::new();
        let mut sink = RecordingSink::default();
        let files = execute(&GitCommand::new(&runner), "abc123", &mut sink).unwrap();
        assert!(files.is_empty());
        assert_eq!(sink.infos, vec!["Total files: 0"]);
    }
}
