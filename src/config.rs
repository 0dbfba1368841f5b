//! Resolution of the effective build configuration.
//!
//! Command-line flags win, then the host environment variable (host only),
//! then git config settings, then built-in defaults. The process
//! environment is read once by [`StartupEnv::capture`]; everything after
//! that is pure.

use crate::error::RemoteBuildError;
use crate::settings::{defaults, RemoteBuildSettings};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct ConfigFlags {
    pub host: Option<String>,
    pub remote_path: Option<String>,
    pub branch: Option<String>,
    pub build_type: Option<String>,
    pub skip_build: bool,
    pub build_args: Vec<String>,
}

/// Process environment captured at startup.
#[derive(Debug, Clone, Default)]
pub struct StartupEnv {
    /// Value of `$YB_REMOTE_BUILD_HOST`, if set and non-empty.
    pub host: Option<String>,
    pub home: Option<PathBuf>,
    pub cwd: PathBuf,
}

impl StartupEnv {
    pub fn capture() -> Result<Self> {
        let host = std::env::var(defaults::HOST_ENV)
            .ok()
            .filter(|value| !value.is_empty());
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self {
            host,
            home: dirs::home_dir(),
            cwd,
        })
    }
}

/// Everything the orchestrator needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub host: String,
    pub remote_path: String,
    pub branch: String,
    pub build_type: String,
    pub build_script: String,
    pub tracking_branch: String,
    pub skip_build: bool,
    /// Arguments forwarded to the build script, possibly led by `--`.
    pub build_args: Vec<String>,
}

impl BuildConfig {
    pub fn resolve(
        flags: ConfigFlags,
        env: &StartupEnv,
        settings: RemoteBuildSettings,
    ) -> Result<Self, RemoteBuildError> {
        let host = flags
            .host
            .filter(|host| !host.is_empty())
            .or_else(|| env.host.clone())
            .or(settings.host)
            .ok_or(RemoteBuildError::MissingHost {
                env_var: defaults::HOST_ENV,
            })?;

        let remote_path = flags
            .remote_path
            .or(settings.remote_path)
            .unwrap_or_else(|| default_remote_path(&env.cwd, env.home.as_deref()));

        Ok(Self {
            host,
            remote_path,
            branch: flags.branch.unwrap_or(settings.branch),
            build_type: flags.build_type.unwrap_or(settings.build_type),
            build_script: settings.build_script,
            tracking_branch: settings.tracking_branch,
            skip_build: flags.skip_build,
            build_args: flags.build_args,
        })
    }
}

/// Remote mirror of the local working directory.
///
/// A directory under `home` maps to the same relative path under the remote
/// home (`~`); anything else maps to [`defaults::REMOTE_PATH`]. The prefix
/// test is per path component.
pub fn default_remote_path(cwd: &Path, home: Option<&Path>) -> String {
    let relative = home.and_then(|home| cwd.strip_prefix(home).ok());
    match relative {
        Some(relative) => format!(
            "{}/{}",
            defaults::REMOTE_HOME,
            relative.to_string_lossy()
        ),
        None => defaults::REMOTE_PATH.to_string(),
    }
}
