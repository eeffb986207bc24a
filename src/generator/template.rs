//! Placeholder substitution for configuration templates
//!
//! Tokens come in two forms: `$NAME` substitutes the setting value verbatim
//! and `$!NAME` substitutes the upper-cased value. The reserved `$INCLUDES`
//! token expands the composite `includes` setting into one include directive
//! per entry. Substitution is deliberately a left-to-right pass in document
//! key order over the already-substituted text, so a value containing another
//! placeholder token is itself substituted by a later key (cascading, not
//! simultaneous). Unresolved placeholders are left verbatim.

use serde_json::{Map, Value};

/// Reserved composite setting expanded through `$INCLUDES`
const INCLUDES_KEY: &str = "includes";

/// Apply every setting to `template` and return the substituted text
pub fn substitute(template: &str, settings: &Map<String, Value>) -> String {
    let mut text = template.to_string();
    for (name, value) in settings {
        let token = name.to_uppercase();
        match value {
            Value::Array(entries) => {
                if name == INCLUDES_KEY {
                    let directives = entries
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|entry| format!("#include <{}>", entry))
                        .collect::<Vec<_>>()
                        .join("\n");
                    text = text.replace(&format!("${}", token), &directives);
                }
            }
            Value::Object(_) => {}
            Value::String(scalar) => {
                text = text.replace(&format!("$!{}", token), &scalar.to_uppercase());
                text = text.replace(&format!("${}", token), scalar);
            }
            other => {
                // numbers, booleans, null substitute via their JSON rendering
                let rendered = other.to_string();
                text = text.replace(&format!("$!{}", token), &rendered.to_uppercase());
                text = text.replace(&format!("${}", token), &rendered);
            }
        }
    }
    text
}
