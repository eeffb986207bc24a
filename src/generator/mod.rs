//! Header generation pipelines
//!
//! Two pipelines share the same shape: derive a few scalar strings, substitute
//! tokens in a template, write a header with an embedded staleness marker so a
//! later run can decide whether regeneration is necessary without recomputing
//! the body.

pub mod config;
pub mod error;
pub mod project_info;
pub mod template;

/// Fixed first line of every generated header banner
pub(crate) const BANNER_RULE: &str =
    "// *****************************************************************************";
