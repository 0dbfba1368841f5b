//! Parsing of `git diff --name-status` output.

/// Extract the paths that still exist after the change from name-status lines.
///
/// Each line is `STATUS\tPATH` or, for renames and copies,
/// `STATUS\tOLD\tNEW`. Deleted entries and blank lines yield nothing, a
/// rename yields its destination, everything else its only path. Order is
/// preserved and duplicates are kept.
pub fn parse_name_status<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| changed_path(line.as_ref()))
        .collect()
}

/// Convenience wrapper over [`parse_name_status`] for raw command output.
pub fn parse_name_status_output(output: &str) -> Vec<String> {
    parse_name_status(output.split('\n'))
}

fn changed_path(line: &str) -> Option<String> {
    let tokens: Vec<&str> = line.split('\t').map(str::trim).collect();
    let status = tokens.first().copied().unwrap_or_default();
    if status.is_empty() || status == "D" {
        return None;
    }
    let index = if status.starts_with('R') { 2 } else { 1 };
    tokens
        .get(index)
        .filter(|path| !path.is_empty())
        .map(|path| path.to_string())
}
