//! Tag-based release helpers
//!
//! Composes the metadata queries into annotated release tags. A release whose
//! aggregated change log is shorter than three characters is refused, which
//! guards against tagging an accidental no-op release.

use crate::core::runner::{CommandRunner, RunnerError};
use crate::vcs::provider::GitProvider;
use crate::vcs::types::VersionTriple;
use std::fmt;
use thiserror::Error;

/// Minimum aggregated change-log length before a tag is created
const MIN_CHANGELOG_LEN: usize = 3;

/// Which component of the version triple a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReleaseKind {
    /// Increment patch
    Patch,
    /// Increment minor, reset patch
    Minor,
    /// Increment major, reset minor and patch
    Major,
}

impl ReleaseKind {
    /// Next version after a release of this kind on top of `current`
    pub fn bump(self, current: VersionTriple) -> VersionTriple {
        match self {
            ReleaseKind::Patch => VersionTriple::new(current.major, current.minor, current.patch + 1),
            ReleaseKind::Minor => VersionTriple::new(current.major, current.minor + 1, 0),
            ReleaseKind::Major => VersionTriple::new(current.major + 1, 0, 0),
        }
    }

    /// Baseline tag the change log is gathered from
    pub fn baseline(self, current: VersionTriple) -> VersionTriple {
        match self {
            ReleaseKind::Patch => current,
            ReleaseKind::Minor => VersionTriple::new(current.major, current.minor, 0),
            ReleaseKind::Major => VersionTriple::new(current.major, 0, 0),
        }
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReleaseKind::Patch => "patch",
            ReleaseKind::Minor => "minor",
            ReleaseKind::Major => "major",
        };
        f.write_str(label)
    }
}

/// Result of a tagging attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Annotated tag created for this version
    Tagged(VersionTriple),
    /// Change log too small, no tag created
    Refused,
}

/// Release tagging errors
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error(transparent)]
    Runner(#[from] RunnerError),
    #[error("git tag {tag} failed with status {status}")]
    TagFailed { tag: String, status: i32 },
}

impl<R: CommandRunner> GitProvider<R> {
    /// Create an annotated release tag for the next version of `kind`.
    ///
    /// The tag message embeds the release kind, the new version, the caller
    /// supplied message, and the change log gathered since the baseline tag.
    pub fn tag_release(
        &self,
        kind: ReleaseKind,
        message: Option<&str>,
    ) -> Result<ReleaseOutcome, ReleaseError> {
        let current = self.version();
        let next = kind.bump(current);
        let baseline = kind.baseline(current);
        let changes = self.changes_since(baseline).join("\n");
        if changes.len() < MIN_CHANGELOG_LEN {
            log::warn!(
                "unlikely small changes in {} release {}, please verify this is what you want to do",
                kind,
                next
            );
            return Ok(ReleaseOutcome::Refused);
        }

        let message_block = message
            .filter(|m| !m.is_empty())
            .map(|m| format!("\n{}\n", m))
            .unwrap_or_default();
        let tag_message = format!(
            "{} release {}\n{}\nchanges since {}:\n{}",
            kind, next, message_block, baseline, changes
        );
        let tag_name = next.to_string();
        self.run_tag_command(&["tag", "-a", &tag_name, "-m", &tag_message], &tag_name)?;
        log::info!("created {} release tag {}", kind, next);
        Ok(ReleaseOutcome::Tagged(next))
    }

    /// Remove a previously created local tag; undoes an accidental release
    pub fn delete_local_tag(&self, version: VersionTriple) -> Result<(), ReleaseError> {
        let tag_name = version.to_string();
        self.run_tag_command(&["tag", "-d", &tag_name], &tag_name)?;
        log::info!("deleted local tag {}", tag_name);
        Ok(())
    }

    fn run_tag_command(&self, args: &[&str], tag_name: &str) -> Result<(), ReleaseError> {
        let output = self.runner().run("git", args)?;
        if !output.success() {
            return Err(ReleaseError::TagFailed {
                tag: tag_name.to_string(),
                status: output.status,
            });
        }
        Ok(())
    }
}
