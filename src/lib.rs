//! remote-build: sync a local checkout to a remote build host and build there.
//!
//! The binary is a thin front-end over [`core::pipeline::execute`]; every
//! external command runs through a [`process::ProcessRunner`] so the whole
//! run can be driven by [`process::ScriptedRunner`] in tests.

pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod output;
pub mod process;
pub mod remote;
pub mod settings;
pub mod shell;
pub mod styles;
pub mod transfer;

/// Version string shown by `--version`.
pub const VERSION: &str = env!("REMOTE_BUILD_VERSION");
