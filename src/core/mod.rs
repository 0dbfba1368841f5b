//! Orchestration logic for a remote build run.
//!
//! Each stage lives in its own module and reports through [`ProgressSink`]
//! so it never depends on a concrete `Output`. [`pipeline::execute`] runs the
//! stages in order and stops at the first failure.

pub mod build;
pub mod changes;
pub mod drift;
pub mod pipeline;
pub mod preflight;
pub mod reconcile;

use crate::output::Output;

// ─────────────────────────────────────────────────────────────────────────
// Progress reporting
// ─────────────────────────────────────────────────────────────────────────

/// Trait for core operations to report progress without depending on `Output`.
pub trait ProgressSink {
    /// Report a user-facing status line (hidden in quiet mode).
    fn on_info(&mut self, msg: &str);

    /// Report an intermediate step (shown in verbose mode).
    fn on_step(&mut self, msg: &str);
}

/// Adapter that forwards `ProgressSink` calls to an `Output` implementation.
///
/// ```ignore
/// let mut output = CliOutput::new(config);
/// let outcome = {
///     let mut sink = OutputSink(&mut output);
///     core::pipeline::execute(&build_config, &SystemRunner, &mut sink)?
/// };
/// ```
pub struct OutputSink<'a>(pub &'a mut dyn Output);

impl ProgressSink for OutputSink<'_> {
    fn on_info(&mut self, msg: &str) {
        self.0.info(msg);
    }

    fn on_step(&mut self, msg: &str) {
        self.0.step(msg);
    }
}

/// Sink that records every message, for tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub infos: Vec<String>,
    pub steps: Vec<String>,
}

impl ProgressSink for RecordingSink {
    fn on_info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
    }

    fn on_step(&mut self, msg: &str) {
        self.steps.push(msg.to_string());
    }
}
