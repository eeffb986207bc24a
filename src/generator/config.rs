//! Configuration header generation
//!
//! Substitutes a JSON settings document into a text template and writes the
//! result behind a banner. The banner embeds the modification times of both
//! inputs; a later run whose inputs carry the same timestamps finds both
//! marker lines verbatim in the existing output and skips regeneration.

use crate::generator::error::{GenerateResult, Outcome};
use crate::generator::{template, BANNER_RULE};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Generate the configuration header at `output_path`.
///
/// Missing inputs are recovered with a warning and `Outcome::MissingInput`;
/// a malformed settings document is a hard error. The output file is fully
/// rewritten in one write, never left partially written.
pub fn generate(
    settings_path: &Path,
    output_path: &Path,
    template_path: &Path,
    force: bool,
) -> GenerateResult {
    if !settings_path.exists() {
        log::warn!("missing settings file at {}", settings_path.display());
        return Ok(Outcome::MissingInput);
    }
    if !template_path.exists() {
        log::warn!("missing template file at {}", template_path.display());
        return Ok(Outcome::MissingInput);
    }

    let settings_marker = format!(
        "// settings updated at {}.",
        modified_stamp(settings_path)?
    );
    let template_marker = format!(
        "// template updated at {}.",
        modified_stamp(template_path)?
    );

    if output_path.exists() && !force {
        let existing = fs::read_to_string(output_path)?;
        // textual containment, not a parsed comparison
        if existing.contains(&settings_marker) && existing.contains(&template_marker) {
            log::info!("config file up to date");
            return Ok(Outcome::UpToDate);
        }
        log::info!("config file out of date, updating...");
    }

    let settings: Map<String, Value> = serde_json::from_str(&fs::read_to_string(settings_path)?)?;
    let template_text = fs::read_to_string(template_path)?;
    let body = template::substitute(&template_text, &settings);

    let mut output = String::new();
    output.push_str(BANNER_RULE);
    output.push('\n');
    output.push_str("// generated header file don't edit.\n");
    output.push_str("// edit `settings.json` and the configuration template instead.\n");
    output.push_str(&settings_marker);
    output.push('\n');
    output.push_str(&template_marker);
    output.push('\n');
    output.push_str(BANNER_RULE);
    output.push('\n');
    output.push_str(&body);

    fs::write(output_path, output)?;
    log::info!("wrote {}", output_path.display());
    Ok(Outcome::Written)
}

// Modification time as fractional unix seconds; the same rendering is used
// for the marker line and the containment check, so the comparison is exact.
fn modified_stamp(path: &Path) -> std::io::Result<String> {
    let modified = fs::metadata(path)?.modified()?;
    let since_epoch = modified
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Ok(format!(
        "{}.{:09}",
        since_epoch.as_secs(),
        since_epoch.subsec_nanos()
    ))
}
