//! Check that the external tools are installed before doing any work.

use crate::error::RemoteBuildError;

/// Tools every run shells out to.
pub const REQUIRED_TOOLS: [&str; 3] = ["git", "ssh", "rsync"];

/// Names from [`REQUIRED_TOOLS`] for which `is_installed` returns false.
pub fn missing_tools(is_installed: impl Fn(&str) -> bool) -> Vec<String> {
    REQUIRED_TOOLS
        .iter()
        .filter(|&&tool| !is_installed(tool))
        .map(|tool| tool.to_string())
        .collect()
}

/// Fail with every missing tool listed at once.
pub fn check_dependencies() -> Result<(), RemoteBuildError> {
    let missing = missing_tools(|tool| which::which(tool).is_ok());
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RemoteBuildError::MissingTools(missing))
    }
}
