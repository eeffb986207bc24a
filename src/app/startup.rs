//! Application startup and command dispatch

use crate::app::cli::args::{Args, Command};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::paths::ProjectLayout;
use crate::core::runner::ProcessRunner;
use crate::coverage::{self, CoverageOptions};
use crate::generator::{config, project_info};
use crate::vcs::provider::{CreditsConfig, GitProvider};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

/// Parse arguments, initialise logging, and run the selected pipeline
pub fn startup() -> ExitCode {
    let args = Args::parse();

    let use_color = args
        .color
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    let log_file = args.log_file.as_ref().and_then(|p| p.to_str());
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file,
        use_color,
    ) {
        eprintln!("failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

// Recovered conditions (missing inputs, refused releases) exit successfully;
// hard errors have already been logged by the time this returns Err.
fn run(command: Command) -> Result<(), ()> {
    let layout = ProjectLayout::discover().map_err(|e| {
        log::error!("FATAL: cannot resolve the tool's own location: {}", e);
    })?;

    match command {
        Command::Generate { force } => {
            let provider = GitProvider::new();
            project_info::generate(&provider, &layout.project_header(), "psl", force)
                .map_err(|e| log_error_with_context(&e, "Project-info header generation"))?;
            config::generate(
                &layout.settings(),
                &layout.config_header(),
                &layout.config_template(),
                force,
            )
            .map_err(|e| log_error_with_context(&e, "Configuration header generation"))?;
            Ok(())
        }
        Command::Config {
            stale_only,
            settings,
            template,
            output,
        } => {
            let settings = settings.unwrap_or_else(|| layout.settings());
            let template = template.unwrap_or_else(|| layout.config_template());
            let output = output.unwrap_or_else(|| layout.config_header());
            config::generate(&settings, &output, &template, !stale_only)
                .map_err(|e| log_error_with_context(&e, "Configuration header generation"))?;
            Ok(())
        }
        Command::ProjectInfo {
            stale_only,
            output,
            namespace,
            credits,
        } => {
            let output = output.unwrap_or_else(|| layout.project_header());
            let credits = credits
                .map(|path| CreditsConfig::load_or_builtin(&path))
                .unwrap_or_else(CreditsConfig::builtin);
            let provider = GitProvider::new().with_credits(credits);
            project_info::generate(&provider, &output, &namespace, !stale_only)
                .map_err(|e| log_error_with_context(&e, "Project-info header generation"))?;
            Ok(())
        }
        Command::Coverage {
            build_dir,
            output_dir,
            filters,
            gcov_tool,
        } => {
            let build_dir = build_dir.unwrap_or_else(|| layout.root().to_path_buf());
            let output_dir = output_dir.unwrap_or_else(|| layout.coverage_output_dir());
            let options = CoverageOptions {
                build_dir,
                output_dir,
                filters,
                gcov_tool,
            };
            coverage::generate(&ProcessRunner::new(), &options)
                .map_err(|e| log_error_with_context(&e, "Coverage report generation"))?;
            Ok(())
        }
        Command::Tag { kind, message } => {
            let provider = GitProvider::new();
            provider
                .tag_release(kind, message.as_deref())
                .map(|_| ())
                .map_err(|e| {
                    log::error!("FATAL: {}", e);
                })
        }
        Command::Untag { version } => {
            let provider = GitProvider::new();
            provider.delete_local_tag(version).map_err(|e| {
                log::error!("FATAL: {}", e);
            })
        }
    }
}
