//! Output abstraction layer separating terminal IO from orchestration logic.
//!
//! The command layer renders through `&mut dyn Output`; tests substitute
//! [`TestOutput`] to assert on what would have been printed.
//!
//! ```ignore
//! let mut output = CliOutput::new(OutputConfig::new(args.quiet, args.verbose));
//! output.info(&format!("Base commit: {base_commit}"));
//! output.result("Files synced, build skipped");
//! ```

mod cli;

pub use cli::CliOutput;
pub use test::{OutputEntry, TestOutput};

/// Configuration for output behavior.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Suppress informational output when true.
    pub quiet: bool,
    /// Enable debug and step output when true.
    pub verbose: bool,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }
}

/// Trait for abstracting output operations.
///
/// Implementors should respect `quiet` and `verbose` modes where noted.
pub trait Output {
    /// Display an informational message. Respects quiet mode.
    fn info(&mut self, msg: &str);

    /// Display an intermediate step. Only shown in verbose mode.
    fn step(&mut self, msg: &str);

    /// Display a primary result line. Respects quiet mode.
    fn result(&mut self, msg: &str);
}
