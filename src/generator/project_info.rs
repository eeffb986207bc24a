//! Project-info header generation
//!
//! Renders version-control metadata (version triple, commit hash and time,
//! contributor credits) into a C++ header. The current commit hash is embedded
//! in a `#define VERSION_SHA1` line which doubles as the staleness marker: a
//! later run at the same commit finds it verbatim and skips regeneration.

use crate::core::runner::CommandRunner;
use crate::generator::error::{GenerateResult, Outcome};
use crate::generator::BANNER_RULE;
use crate::vcs::provider::GitProvider;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Generate the project-info header at `output_path`, declaring everything
/// inside the given C++ `namespace`.
pub fn generate<R: CommandRunner>(
    provider: &GitProvider<R>,
    output_path: &Path,
    namespace: &str,
    force: bool,
) -> GenerateResult {
    let version = provider.version();
    let sha1 = provider.commit_hash();
    let unix_timestamp = provider.commit_timestamp();
    let utc_timestamp = DateTime::<Utc>::from_timestamp(unix_timestamp, 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    let marker = format!("#define VERSION_SHA1 \"{}\"", sha1);
    if output_path.exists() && !force {
        let existing = fs::read_to_string(output_path)?;
        if existing.contains(&marker) {
            log::info!("header file up to date");
            return Ok(Outcome::UpToDate);
        }
        log::info!("header file out of date, updating...");
    }

    // contributors are only needed when actually regenerating
    let credits = provider.contributors();

    let mut output = String::new();
    output.push_str(BANNER_RULE);
    output.push('\n');
    output.push_str("// generated header file don't edit.\n");
    output.push_str("// regenerate with `headwright project-info` instead.\n");
    output.push_str(BANNER_RULE);
    output.push('\n');
    output.push_str("#include <array>\n");
    output.push_str("#include <cstdint>\n");
    output.push_str("#include <string_view>\n");
    let _ = writeln!(output, "#define VERSION_TIME_UTC \"{}\"", utc_timestamp);
    let _ = writeln!(output, "#define VERSION_TIME_UNIX \"{}\"", unix_timestamp);
    let _ = writeln!(output, "#define VERSION_MAJOR \"{}\"", version.major);
    let _ = writeln!(output, "#define VERSION_MINOR \"{}\"", version.minor);
    let _ = writeln!(output, "#define VERSION_PATCH \"{}\"", version.patch);
    output.push_str(&marker);
    output.push('\n');
    let _ = writeln!(output, "#define VERSION \"{}\"", version);
    let _ = writeln!(output, "#define VERSION_FULL \"{}.{}\"", version, sha1);
    let _ = writeln!(output, "namespace {}", namespace);
    output.push_str("{\n");
    let _ = writeln!(
        output,
        "\tconstexpr std::uint64_t version_time_unix {{ {} }};",
        unix_timestamp
    );
    let _ = writeln!(
        output,
        "\tconstexpr std::uint32_t version_major {{ {} }};",
        version.major
    );
    let _ = writeln!(
        output,
        "\tconstexpr std::uint32_t version_minor {{ {} }};",
        version.minor
    );
    let _ = writeln!(
        output,
        "\tconstexpr std::uint32_t version_patch {{ {} }};",
        version.patch
    );
    output.push_str(
        "\tconstexpr std::uint32_t version {((version_major << 22) | (version_minor << 12) | version_patch)};\n",
    );
    if !credits.is_empty() {
        let _ = writeln!(
            output,
            "\tconstexpr std::array<std::string_view, {}> application_credits {{{{",
            credits.len()
        );
        for (index, contributor) in credits.iter().enumerate() {
            let separator = if index + 1 < credits.len() { "," } else { "" };
            let _ = writeln!(output, "\t\t\"{}\"{}", contributor.name, separator);
        }
        output.push_str("\t}};\n");
    }
    output.push_str("}\n");

    fs::write(output_path, output)?;
    log::info!("wrote {}", output_path.display());
    Ok(Outcome::Written)
}
