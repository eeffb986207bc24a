//! Command-line arguments
//!
//! Global logging flags plus one subcommand per pipeline. Default input and
//! output paths are resolved against the project layout at dispatch time, so
//! every path flag here is optional.

use crate::vcs::release::ReleaseKind;
use crate::vcs::types::VersionTriple;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "headwright")]
#[command(about = "Build-time header and coverage-report generation toolkit")]
#[command(version)]
pub struct Args {
    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "json"])]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Color output control:
    /// --color true forces color, --color false disables, unspecified = TTY detection
    #[arg(short = 'g', long = "color", value_name = "BOOL")]
    pub color: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Regenerate the project-info and configuration headers in sequence
    Generate {
        /// Rewrite both headers even when their markers are current
        #[arg(long)]
        force: bool,
    },

    /// Regenerate the configuration header from the settings document and template
    Config {
        /// Skip regeneration when the embedded input timestamps are current
        #[arg(long)]
        stale_only: bool,

        /// Settings document path
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,

        /// Template path
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,

        /// Generated header path
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Regenerate the project-info header from version-control metadata
    ProjectInfo {
        /// Skip regeneration when the embedded commit hash is current
        #[arg(long)]
        stale_only: bool,

        /// Generated header path
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// C++ namespace for the generated declarations
        #[arg(long, value_name = "NAME", default_value = "psl")]
        namespace: String,

        /// Credits file with contributor exemptions and aliases
        #[arg(long, value_name = "FILE")]
        credits: Option<PathBuf>,
    },

    /// Capture and render an lcov/genhtml coverage report
    Coverage {
        /// Build directory to capture coverage data from
        #[arg(long, value_name = "DIR")]
        build_dir: Option<PathBuf>,

        /// Report output directory
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Glob-style path filters to exclude from the report*
        #[arg(long = "filter", value_name = "GLOB", action = ArgAction::Append)]
        filters: Vec<String>,

        /// Override for the gcov tool binary lcov invokes
        #[arg(long, value_name = "TOOL")]
        gcov_tool: Option<String>,
    },

    /// Create an annotated release tag
    Tag {
        /// Which version component to increment
        #[arg(value_enum)]
        kind: ReleaseKind,

        /// Message embedded in the tag annotation
        #[arg(short, long, value_name = "TEXT")]
        message: Option<String>,
    },

    /// Delete a local release tag
    Untag {
        /// Version to delete (major.minor.patch)
        #[arg(value_parser = parse_version_triple)]
        version: VersionTriple,
    },
}

fn parse_version_triple(text: &str) -> Result<VersionTriple, String> {
    VersionTriple::parse(text)
        .ok_or_else(|| format!("`{}` is not a major.minor.patch version", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).expect("arguments parse")
    }

    #[test]
    fn test_generate_subcommand() {
        let args = parse(&["headwright", "generate"]);
        assert!(matches!(args.command, Command::Generate { force: false }));

        let args = parse(&["headwright", "generate", "--force"]);
        assert!(matches!(args.command, Command::Generate { force: true }));
    }

    #[test]
    fn test_config_paths_are_optional() {
        let args = parse(&["headwright", "config"]);
        match args.command {
            Command::Config {
                stale_only,
                settings,
                template,
                output,
            } => {
                assert!(!stale_only);
                assert!(settings.is_none());
                assert!(template.is_none());
                assert!(output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_project_info_defaults() {
        let args = parse(&["headwright", "project-info"]);
        match args.command {
            Command::ProjectInfo {
                stale_only,
                namespace,
                credits,
                ..
            } => {
                assert!(!stale_only);
                assert_eq!(namespace, "psl");
                assert!(credits.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_coverage_filters_accumulate() {
        let args = parse(&[
            "headwright",
            "coverage",
            "--filter",
            "*/vendor/*",
            "--filter",
            "*gtest*",
            "--gcov-tool",
            "gcov-12",
        ]);
        match args.command {
            Command::Coverage {
                filters, gcov_tool, ..
            } => {
                assert_eq!(filters, vec!["*/vendor/*", "*gtest*"]);
                assert_eq!(gcov_tool.as_deref(), Some("gcov-12"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_tag_kind_value_enum() {
        let args = parse(&["headwright", "tag", "minor", "-m", "midsummer release"]);
        match args.command {
            Command::Tag { kind, message } => {
                assert_eq!(kind, ReleaseKind::Minor);
                assert_eq!(message.as_deref(), Some("midsummer release"));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Args::try_parse_from(["headwright", "tag", "huge"]).is_err());
    }

    #[test]
    fn test_untag_requires_version_triple() {
        let args = parse(&["headwright", "untag", "1.2.3"]);
        match args.command {
            Command::Untag { version } => assert_eq!(version, VersionTriple::new(1, 2, 3)),
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Args::try_parse_from(["headwright", "untag", "v1.2.3"]).is_err());
    }

    #[test]
    fn test_global_logging_flags() {
        let args = parse(&[
            "headwright",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "generate",
        ]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.log_format.as_deref(), Some("json"));
        assert!(Args::try_parse_from(["headwright", "--log-level", "loud", "generate"]).is_err());
    }
}
