//! CLI output implementation writing directly to stdout.

use super::{Output, OutputConfig};
use crate::styles::{self, colors_enabled};

/// Git-like output:
/// - `step()` → verbose only, dimmed
/// - `result()` → bold primary output
#[derive(Debug)]
pub struct CliOutput {
    config: OutputConfig,
}

impl CliOutput {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }
}

impl Output for CliOutput {
    fn info(&mut self, msg: &str) {
        if !self.config.quiet {
            println!("{msg}");
        }
    }

    fn step(&mut self, msg: &str) {
        if self.config.verbose && !self.config.quiet {
            if colors_enabled() {
                println!("{}{msg}{}", styles::DIM, styles::RESET);
            } else {
                println!("{msg}");
            }
        }
    }

    fn result(&mut self, msg: &str) {
        if !self.config.quiet {
            if colors_enabled() {
                println!("{}", styles::bold(msg));
            } else {
                println!("{msg}");
            }
        }
    }
}
