//! Coverage report generation
//!
//! Drives `lcov` and `genhtml` to capture coverage data from a build
//! directory and render an HTML report. Both executables must be resolvable
//! on the search path; a missing one aborts the pipeline before anything
//! runs.

use crate::core::error_handling::ContextualError;
use crate::core::runner::{CommandRunner, RunnerError};
use std::path::PathBuf;
use thiserror::Error;

/// Intermediate tracefile produced by the capture step and removed afterwards
const TRACEFILE: &str = "codecoverage.info";

/// Path filters excluded from the report when none are supplied
pub const DEFAULT_FILTERS: [&str; 3] = ["*/psl/tests/*", "*gtest*", "*build/*"];

/// Coverage pipeline options; unset fields fall back to the project layout
#[derive(Debug, Clone, Default)]
pub struct CoverageOptions {
    pub build_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Glob-style path filters to remove from the captured data
    pub filters: Vec<String>,
    /// Override for the gcov tool binary lcov invokes
    pub gcov_tool: Option<String>,
}

/// Coverage pipeline errors
#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("{message}")]
    MissingTool { name: String, message: String },
    #[error(transparent)]
    Runner(#[from] RunnerError),
    #[error("`{tool}` exited with status {status}")]
    ToolFailed { tool: String, status: i32 },
}

impl CoverageError {
    fn missing_tool(name: &str) -> Self {
        CoverageError::MissingTool {
            name: name.to_string(),
            message: format!(
                "missing '{}', please install it and make it visible to the path",
                name
            ),
        }
    }
}

impl ContextualError for CoverageError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, CoverageError::MissingTool { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            CoverageError::MissingTool { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Capture and render a coverage report.
///
/// Fails fast naming whichever required executable is missing, then runs the
/// capture, filter, and render steps in order, propagating the first non-zero
/// exit status. The intermediate tracefile is removed on success.
pub fn generate<R: CommandRunner>(runner: &R, options: &CoverageOptions) -> Result<(), CoverageError> {
    for tool in ["lcov", "genhtml"] {
        if !is_tool(tool) {
            return Err(CoverageError::missing_tool(tool));
        }
    }

    run_pipeline(runner, options)?;

    if let Err(e) = std::fs::remove_file(TRACEFILE) {
        log::debug!("could not remove {}: {}", TRACEFILE, e);
    }
    Ok(())
}

// Argument assembly and invocation, separated from the PATH check so tests
// can drive it with a scripted runner.
fn run_pipeline<R: CommandRunner>(
    runner: &R,
    options: &CoverageOptions,
) -> Result<(), CoverageError> {
    let build_dir = options.build_dir.to_string_lossy().into_owned();
    let output_dir = options.output_dir.to_string_lossy().into_owned();

    let mut capture_args = vec![
        "--directory",
        build_dir.as_str(),
        "--capture",
        "--no-external",
        "--output-file",
        TRACEFILE,
        "-rc",
        "lcov_branch_coverage=1",
    ];
    if let Some(gcov_tool) = &options.gcov_tool {
        capture_args.push("--gcov-tool");
        capture_args.push(gcov_tool.as_str());
    }
    run_step(runner, "lcov", &capture_args)?;

    let filters: Vec<&str> = if options.filters.is_empty() {
        DEFAULT_FILTERS.to_vec()
    } else {
        options.filters.iter().map(String::as_str).collect()
    };
    let mut remove_args = vec![
        "--remove",
        TRACEFILE,
        "-o",
        "--no-external",
        "--output-file",
        TRACEFILE,
    ];
    remove_args.extend(filters);
    run_step(runner, "lcov", &remove_args)?;

    run_step(
        runner,
        "genhtml",
        &[TRACEFILE, "--output-directory", output_dir.as_str()],
    )?;
    log::info!("coverage report written to {}", output_dir);
    Ok(())
}

fn run_step<R: CommandRunner>(
    runner: &R,
    tool: &str,
    args: &[&str],
) -> Result<(), CoverageError> {
    let output = runner.run(tool, args)?;
    if !output.success() {
        return Err(CoverageError::ToolFailed {
            tool: tool.to_string(),
            status: output.status,
        });
    }
    Ok(())
}

/// Check whether `name` resolves to a file on the search path
fn is_tool(name: &str) -> bool {
    let Some(path_var) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path_var).any(|dir: PathBuf| dir.join(name).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runner::fakes::ScriptedRunner;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn options(build: &str, output: &str) -> CoverageOptions {
        CoverageOptions {
            build_dir: PathBuf::from(build),
            output_dir: PathBuf::from(output),
            filters: Vec::new(),
            gcov_tool: None,
        }
    }

    #[test]
    fn test_pipeline_argument_assembly() {
        let runner = ScriptedRunner::new();
        run_pipeline(&runner, &options("/proj", "/proj/build/coverage")).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            "lcov --directory /proj --capture --no-external --output-file codecoverage.info -rc lcov_branch_coverage=1"
        );
        assert_eq!(
            calls[1],
            "lcov --remove codecoverage.info -o --no-external --output-file codecoverage.info */psl/tests/* *gtest* *build/*"
        );
        assert_eq!(
            calls[2],
            "genhtml codecoverage.info --output-directory /proj/build/coverage"
        );
    }

    #[test]
    fn test_gcov_override_appends_to_capture_step() {
        let runner = ScriptedRunner::new();
        let mut opts = options("/proj", "/out");
        opts.gcov_tool = Some("gcov-12".to_string());
        run_pipeline(&runner, &opts).unwrap();
        assert!(runner.calls()[0].ends_with("--gcov-tool gcov-12"));
    }

    #[test]
    fn test_custom_filters_replace_defaults() {
        let runner = ScriptedRunner::new();
        let mut opts = options("/proj", "/out");
        opts.filters = vec!["*/vendor/*".to_string()];
        run_pipeline(&runner, &opts).unwrap();
        assert!(runner.calls()[1].ends_with("codecoverage.info */vendor/*"));
        assert!(!runner.calls()[1].contains("*gtest*"));
    }

    #[test]
    fn test_failed_step_aborts_pipeline() {
        let runner = ScriptedRunner::new().fails(
            "lcov --directory /proj --capture --no-external --output-file codecoverage.info -rc lcov_branch_coverage=1",
            2,
        );
        let result = run_pipeline(&runner, &options("/proj", "/out"));
        assert!(matches!(
            result,
            Err(CoverageError::ToolFailed { status: 2, .. })
        ));
        // neither the filter step nor genhtml ran
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    #[serial]
    fn test_missing_tool_fails_fast() {
        let empty = TempDir::new().unwrap();
        let saved_path = std::env::var_os("PATH");
        std::env::set_var("PATH", empty.path());

        let result = generate(&ScriptedRunner::new(), &options("/proj", "/out"));

        match saved_path {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }
        match result {
            Err(CoverageError::MissingTool { name, .. }) => assert_eq!(name, "lcov"),
            other => panic!("expected MissingTool, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_present_tools_pass_the_path_check() {
        let bin = TempDir::new().unwrap();
        fs::write(bin.path().join("lcov"), "#!/bin/sh\n").unwrap();
        fs::write(bin.path().join("genhtml"), "#!/bin/sh\n").unwrap();
        let saved_path = std::env::var_os("PATH");
        std::env::set_var("PATH", bin.path());

        let result = generate(&ScriptedRunner::new(), &options("/proj", "/out"));

        match saved_path {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }
        result.unwrap();
    }
}
