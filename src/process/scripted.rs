//! Scripted process runner for tests.

use super::{Invocation, ProcessOutput, ProcessRunner};
use anyhow::Result;
use std::cell::RefCell;

#[derive(Debug)]
struct Rule {
    needle: String,
    output: ProcessOutput,
    /// Remaining uses; `None` means unlimited.
    remaining: Option<usize>,
}

/// Answers invocations from a list of rules instead of spawning processes.
///
/// A rule matches when its needle is a substring of the invocation's
/// [`Invocation::command_line`]. Rules are tried in registration order and
/// one-shot rules are consumed when used, so a sequence of answers to the
/// same command can be scripted with several [`ScriptedRunner::once`] calls
/// followed by a fallback [`ScriptedRunner::on`]. Unmatched invocations
/// succeed with empty output.
///
/// ```ignore
/// let runner = ScriptedRunner::new()
///     .once("rev-parse HEAD", ProcessOutput::success("def456\n"))
///     .on("rev-parse HEAD", ProcessOutput::success("abc123\n"));
/// ```
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: RefCell<Vec<Rule>>,
    invocations: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every matching invocation with `output`.
    pub fn on(self, needle: &str, output: ProcessOutput) -> Self {
        self.push_rule(needle, output, None)
    }

    /// Answer the next matching invocation with `output`, then drop the rule.
    pub fn once(self, needle: &str, output: ProcessOutput) -> Self {
        self.push_rule(needle, output, Some(1))
    }

    fn push_rule(self, needle: &str, output: ProcessOutput, remaining: Option<usize>) -> Self {
        self.rules.borrow_mut().push(Rule {
            needle: needle.to_string(),
            output,
            remaining,
        });
        self
    }

    /// Every invocation seen so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Rendered command lines of every invocation seen so far.
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(Invocation::command_line)
            .collect()
    }

    /// Number of invocations whose command line contains `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.command_lines()
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        self.invocations.borrow_mut().push(invocation.clone());
        let line = invocation.command_line();

        let mut rules = self.rules.borrow_mut();
        let matched = rules
            .iter_mut()
            .find(|rule| rule.remaining != Some(0) && line.contains(&rule.needle));

        Ok(match matched {
            Some(rule) => {
                if let Some(remaining) = rule.remaining.as_mut() {
                    *remaining -= 1;
                }
                rule.output.clone()
            }
            None => ProcessOutput::success(""),
        })
    }
}
