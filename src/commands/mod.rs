/// Command modules for remote-build
///
/// Each module owns the clap definition and terminal rendering of one
/// command; the orchestration itself lives in the library's `core` module.
pub mod remote_build;
