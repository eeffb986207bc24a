//! Git metadata queries
//!
//! Every query degrades to an empty or zero value when the underlying git
//! invocation produces no output (no history, no tags, shallow clone); it is
//! the caller's responsibility to ensure a repository context exists.

use crate::core::runner::{CommandRunner, ProcessRunner};
use crate::vcs::types::{Contributor, VersionTriple};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// Exemption list and alias table used to build the contributor registry
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreditsConfig {
    /// Raw shortlog lines containing any of these substrings are dropped
    /// (service and bot accounts).
    #[serde(default)]
    pub exemptions: Vec<String>,
    /// Informal handle -> canonical contributor name
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl CreditsConfig {
    /// The built-in table used when no credits file is supplied
    pub fn builtin() -> Self {
        Self {
            exemptions: vec!["Travis-CI".to_string()],
            aliases: BTreeMap::from([("JessyDL".to_string(), "Jessy De Lannoit".to_string())]),
        }
    }

    /// Load a credits file, falling back to the built-in table when the file
    /// is absent or unreadable.
    pub fn load_or_builtin(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("ignoring malformed credits file {}: {}", path.display(), e);
                    Self::builtin()
                }
            },
            Err(_) => {
                log::debug!("no credits file at {}, using built-in table", path.display());
                Self::builtin()
            }
        }
    }
}

/// Version-control metadata provider over an injectable command runner
pub struct GitProvider<R: CommandRunner> {
    runner: R,
    credits: CreditsConfig,
    // The version triple is read by both header generation and release
    // tagging within one run; memoise it to avoid a second git spawn.
    version_cache: OnceLock<VersionTriple>,
}

impl GitProvider<ProcessRunner> {
    /// Provider spawning real git processes in the current directory
    pub fn new() -> Self {
        Self::with_runner(ProcessRunner::new())
    }
}

impl Default for GitProvider<ProcessRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> GitProvider<R> {
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            credits: CreditsConfig::builtin(),
            version_cache: OnceLock::new(),
        }
    }

    pub fn with_credits(mut self, credits: CreditsConfig) -> Self {
        self.credits = credits;
        self
    }

    /// Run a git query and return its standard output; empty string when the
    /// invocation could not be launched at all.
    pub(crate) fn query(&self, args: &[&str]) -> String {
        match self.runner.run("git", args) {
            Ok(output) => output.stdout,
            Err(e) => {
                log::debug!("git query failed: {}", e);
                String::new()
            }
        }
    }

    pub(crate) fn runner(&self) -> &R {
        &self.runner
    }

    /// All tags sorted by version, newest first; empty when none exist
    pub fn tags_sorted(&self) -> Vec<String> {
        self.query(&["tag", "-l", "--sort=-v:refname"])
            .lines()
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }

    /// Latest version triple from the version-sorted tag list; (0,0,0) when
    /// no tags exist. Memoised for the lifetime of the provider.
    pub fn version(&self) -> VersionTriple {
        *self.version_cache.get_or_init(|| {
            let tags = self.tags_sorted();
            let newest = tags.first().map(String::as_str).unwrap_or("");
            match VersionTriple::parse(newest) {
                Some(version) => version,
                None => {
                    if !newest.is_empty() {
                        log::debug!("ignoring non-semver tag `{}`", newest);
                    }
                    VersionTriple::ZERO
                }
            }
        })
    }

    /// Full hash of the current revision; empty string when unavailable
    pub fn commit_hash(&self) -> String {
        self.query(&["rev-parse", "HEAD"]).trim().to_string()
    }

    /// Commit time of the current revision in seconds since epoch; 0 when
    /// unavailable
    pub fn commit_timestamp(&self) -> i64 {
        self.query(&["log", "-1", "--pretty=format:%ct"])
            .trim()
            .parse()
            .unwrap_or(0)
    }

    /// Contributor registry from the full history, exemptions dropped and
    /// aliases coalesced. Order follows the shortlog output (commit count
    /// descending), first-seen wins for coalesced names.
    pub fn contributors(&self) -> Vec<Contributor> {
        let raw = self.query(&["shortlog", "-s", "-n", "--all", "--no-merges"]);
        let mut registry: Vec<Contributor> = Vec::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if self.credits.exemptions.iter().any(|ex| line.contains(ex.as_str())) {
                continue;
            }
            let mut parts = line.splitn(2, char::is_whitespace);
            let (Some(count_text), Some(raw_name)) = (parts.next(), parts.next()) else {
                continue;
            };
            let commits: u64 = count_text.parse().unwrap_or(0);
            let raw_name = raw_name.trim();
            let name = self
                .credits
                .aliases
                .get(raw_name)
                .map(String::as_str)
                .unwrap_or(raw_name);
            if let Some(existing) = registry.iter_mut().find(|c| c.name == name) {
                existing.commits += commits;
            } else {
                registry.push(Contributor {
                    name: name.to_string(),
                    commits,
                });
            }
        }
        registry
    }

    /// Commit message lines between the `baseline` tag and the current
    /// revision: blank lines dropped, sorted, de-duplicated. A zero baseline
    /// means "no baseline tag" and covers the entire history.
    pub fn changes_since(&self, baseline: VersionTriple) -> Vec<String> {
        let raw = if baseline.is_zero() {
            self.query(&["log", "--format=%B", "--no-merges"])
        } else {
            let range = format!("{}..HEAD", baseline);
            self.query(&["log", &range, "--format=%B", "--no-merges"])
        };
        let mut lines: Vec<String> = raw
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        lines.sort();
        lines.dedup();
        lines
    }
}
