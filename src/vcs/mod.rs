//! Version control seam
//!
//! The sync core never talks to git directly. Commands receive a
//! [`VersionControl`] implementation: [`GitCli`] in the binary, an in-memory
//! fake in tests.

mod git;

pub use git::GitCli;

use crate::types::SyncError;

/// The four version-control effects the tool relies on.
///
/// Any failure is reported as [`SyncError::External`] carrying the command's
/// exit code and its output verbatim; callers abort on error.
pub trait VersionControl {
    /// Whether the working tree has anything uncommitted (including untracked files)
    fn has_uncommitted_changes(&self) -> Result<bool, SyncError>;

    /// Stage everything and commit it with `message`
    fn commit_all(&self, message: &str) -> Result<(), SyncError>;

    /// Push the current branch to its upstream
    fn push(&self) -> Result<(), SyncError>;

    /// Pull from upstream, rebasing local commits
    fn pull_rebase(&self) -> Result<(), SyncError>;
}

/// Commit everything if there is anything to commit.
///
/// Returns `true` when a commit was made.
pub fn commit_if_needed(vcs: &dyn VersionControl, message: &str) -> Result<bool, SyncError> {
    if !vcs.has_uncommitted_changes()? {
        return Ok(false);
    }
    vcs.commit_all(message)?;
    Ok(true)
}
