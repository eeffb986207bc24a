//! External command invocation abstraction
//!
//! Every external tool this crate talks to (git, lcov, genhtml) goes through
//! the `CommandRunner` trait, so the version-control provider and the coverage
//! pipeline can be exercised in tests with canned output instead of spawning
//! real processes.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Captured result of one external command invocation
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Full standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Process exit status; -1 when terminated by a signal
    pub status: i32,
}

impl CommandOutput {
    /// Successful invocation with the given standard output
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            status: 0,
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Command invocation errors
#[derive(Error, Debug, Clone)]
pub enum RunnerError {
    #[error("failed to launch `{program}`: {message}")]
    Spawn { program: String, message: String },
}

/// Abstraction over process spawning for testable external-tool invocation
pub trait CommandRunner {
    /// Run `program` with `args`, blocking until it exits, and capture its
    /// standard output. A non-zero exit status is not an error at this level;
    /// callers decide whether it matters.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, RunnerError>;
}

/// Production runner backed by `std::process::Command`
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner {
    cwd: Option<PathBuf>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all commands with the given working directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, RunnerError> {
        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null());
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        let output = command.output().map_err(|e| RunnerError::Spawn {
            program: program.to_string(),
            message: e.to_string(),
        })?;
        log::debug!(
            "ran `{} {}` -> status {:?}",
            program,
            args.join(" "),
            output.status.code()
        );
        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            status: output.status.code().unwrap_or(-1),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // serialized against the coverage tests, which temporarily rewrite PATH
    #[test]
    #[serial]
    fn test_process_runner_captures_stdout() {
        let runner = ProcessRunner::new();
        let output = runner.run("echo", &["hello"]).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    fn test_process_runner_missing_program_is_spawn_error() {
        let runner = ProcessRunner::new();
        let result = runner.run("definitely-not-a-real-binary-xyz", &[]);
        assert!(matches!(result, Err(RunnerError::Spawn { .. })));
    }

    #[test]
    fn test_scripted_runner_replays_and_records() {
        let runner = fakes::ScriptedRunner::new().responds("git rev-parse HEAD", "abc123\n");
        let output = runner.run("git", &["rev-parse", "HEAD"]).unwrap();
        assert_eq!(output.stdout, "abc123\n");
        assert_eq!(runner.calls(), vec!["git rev-parse HEAD".to_string()]);
    }

    #[test]
    fn test_scripted_runner_defaults_to_empty_success() {
        let runner = fakes::ScriptedRunner::new();
        let output = runner.run("git", &["tag", "-l"]).unwrap();
        assert!(output.success());
        assert!(output.stdout.is_empty());
    }
}
