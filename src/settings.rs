//! Git config-based settings for remote-build.
//!
//! Settings are read once at startup from git's layered config (local →
//! global) and fill in whatever the command line leaves unset.
//!
//! # Config Keys
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `remoteBuild.host` | (none) | Build host, after `--host` and `$YB_REMOTE_BUILD_HOST` |
//! | `remoteBuild.remotePath` | derived from cwd | Checkout path on the build host |
//! | `remoteBuild.branch` | `origin/master` | Base branch for the merge-base |
//! | `remoteBuild.buildType` | `debug` | First argument to the build script |
//! | `remoteBuild.buildScript` | `./yb_build.sh` | Build entry point, relative to the remote path |
//! | `remoteBuild.trackingBranch` | `master` | Branch pulled before checking out the base commit |
//!
//! # Example
//!
//! ```bash
//! git config --global remoteBuild.host devserver.example.com
//! git config remoteBuild.buildType release
//! ```

use crate::git::GitCommand;
use crate::log_debug;
use anyhow::Result;

/// Default values for settings.
pub mod defaults {
    /// Environment variable consulted when `--host` is absent.
    pub const HOST_ENV: &str = "YB_REMOTE_BUILD_HOST";

    /// Base branch for the merge-base computation.
    pub const BRANCH: &str = "origin/master";

    /// Build type passed first to the build script.
    pub const BUILD_TYPE: &str = "debug";

    /// Build entry point run inside the remote checkout.
    pub const BUILD_SCRIPT: &str = "./yb_build.sh";

    /// Branch the remote checkout pulls before moving to the base commit.
    pub const TRACKING_BRANCH: &str = "master";

    /// Remote path used when the working directory is outside the home directory.
    pub const REMOTE_PATH: &str = "~/code/yugabyte";

    /// Remote spelling of the home directory.
    pub const REMOTE_HOME: &str = "~";
}

/// Git config keys for remote-build settings.
pub mod keys {
    pub const HOST: &str = "remoteBuild.host";
    pub const REMOTE_PATH: &str = "remoteBuild.remotePath";
    pub const BRANCH: &str = "remoteBuild.branch";
    pub const BUILD_TYPE: &str = "remoteBuild.buildType";
    pub const BUILD_SCRIPT: &str = "remoteBuild.buildScript";
    pub const TRACKING_BRANCH: &str = "remoteBuild.trackingBranch";
}

/// User-configurable settings.
///
/// Optional fields stay `None` when unset so the resolver can tell a
/// configured value from a built-in default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBuildSettings {
    pub host: Option<String>,
    pub remote_path: Option<String>,
    pub branch: String,
    pub build_type: String,
    pub build_script: String,
    pub tracking_branch: String,
}

impl Default for RemoteBuildSettings {
    fn default() -> Self {
        Self {
            host: None,
            remote_path: None,
            branch: defaults::BRANCH.to_string(),
            build_type: defaults::BUILD_TYPE.to_string(),
            build_script: defaults::BUILD_SCRIPT.to_string(),
            tracking_branch: defaults::TRACKING_BRANCH.to_string(),
        }
    }
}

impl RemoteBuildSettings {
    /// Load settings from git config (local + global).
    ///
    /// Empty values are ignored. If git itself cannot be started the
    /// defaults are returned; the preflight check reports the missing tool.
    pub fn load(git: &GitCommand<'_>) -> Result<Self> {
        let mut settings = Self::default();

        let get = |key: &str| -> Result<Option<String>> {
            Ok(git.config_get(key)?.filter(|value| !value.is_empty()))
        };

        let host = match get(keys::HOST) {
            Ok(host) => host,
            Err(err) => {
                log_debug!("Skipping git config settings: {err:#}");
                return Ok(settings);
            }
        };
        settings.host = host;
        settings.remote_path = get(keys::REMOTE_PATH)?;

        if let Some(value) = get(keys::BRANCH)? {
            settings.branch = value;
        }

        if let Some(value) = get(keys::BUILD_TYPE)? {
            settings.build_type = value;
        }

        if let Some(value) = get(keys::BUILD_SCRIPT)? {
            settings.build_script = value;
        }

        if let Some(value) = get(keys::TRACKING_BRANCH)? {
            settings.tracking_branch = value;
        }

        Ok(settings)
    }
}
