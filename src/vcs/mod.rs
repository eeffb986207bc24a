//! Version-control metadata provider
//!
//! Wraps git queries behind an injectable command runner and exposes plain
//! values: the latest version triple, commit hash and timestamp, the
//! contributor registry, and release-tagging helpers built on top of them.

pub mod provider;
pub mod release;
pub mod types;
