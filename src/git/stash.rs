// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Stash Coordinator.
//!
//! Uncommitted work is parked under a tag derived from a branch name and
//! picked up again by the same tag:
//!
//! ```text
//! stash(repo, "main")      dirty?  --yes-->  git stash push -m stash-for-main
//!                                  --no--->  no-op
//!
//! restore(repo, "main")    git stash list
//!                            stash@{0}: On main: stash-for-main-old   (ignored)
//!                            stash@{1}: On main: stash-for-main       <- exact match
//!                          git stash pop stash@{1}
//! ```
//!
//! Tags match exactly, so `stash-for-feat` never claims `stash-for-feat/x`.
//! When several stashes carry the same tag the most recent one wins and the
//! older ones are reported.

use tracing::{debug, info, warn};

use super::{GitRunner, RepoRef, query};
use crate::error::{GitError, SubgitError, SubgitResult};

/// Prefix of every stash message this tool creates.
pub const STASH_TAG_PREFIX: &str = "stash-for-";

/// Stash message for `branch`.
#[must_use]
pub fn stash_tag(branch: &str) -> String {
    format!("{STASH_TAG_PREFIX}{branch}")
}

/// One `git stash list` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashEntry {
    /// `stash@{n}`
    pub reference: String,
    pub message: String,
}

/// Parse `stash@{n}: On <branch>: <message>` lines, most recent first.
pub(crate) fn parse_stash_list(out: &str) -> Vec<StashEntry> {
    out.lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, ": ");
            let reference = parts.next()?;
            let _origin = parts.next()?;
            let message = parts.next()?;
            reference.starts_with("stash@{").then(|| StashEntry {
                reference: reference.to_string(),
                message: message.to_string(),
            })
        })
        .collect()
}

/// Result of [`StashCoordinator::stash`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StashOutcome {
    Stashed { tag: String },
    NoChanges,
}

/// Result of [`StashCoordinator::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored { stash: String },
    NotFound,
}

/// Stashes and restores work keyed by branch name.
#[derive(Debug, Clone, Copy)]
pub struct StashCoordinator<'a> {
    git: &'a GitRunner,
}

impl<'a> StashCoordinator<'a> {
    #[must_use]
    pub const fn new(git: &'a GitRunner) -> Self {
        Self { git }
    }

    /// Park tracked and staged changes under `stash-for-<branch>`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `status` or `stash push` fails.
    pub fn stash(&self, repo: &RepoRef, branch: &str) -> SubgitResult<StashOutcome> {
        if !query::has_tracked_changes(self.git, repo)? {
            info!(repo = %repo, "no changes to stash");
            return Ok(StashOutcome::NoChanges);
        }

        let tag = stash_tag(branch);
        self.git.run(repo, &["stash", "push", "-m", &tag])?;
        info!(repo = %repo, tag = %tag, "changes stashed");
        Ok(StashOutcome::Stashed { tag })
    }

    /// Most recent stash tagged exactly `stash-for-<branch>`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `stash list` fails.
    pub fn find(&self, repo: &RepoRef, branch: &str) -> SubgitResult<Option<StashEntry>> {
        let tag = stash_tag(branch);
        let listing = self.git.capture(repo, &["stash", "list"])?;
        let mut matches = parse_stash_list(&listing)
            .into_iter()
            .filter(|entry| entry.message == tag);

        let newest = matches.next();
        let orphaned = matches.count();
        if orphaned > 0 {
            warn!(repo = %repo, tag = %tag, orphaned, "older stashes with the same tag left in place");
        }
        Ok(newest)
    }

    /// Pop the most recent stash tagged for `branch`, if any.
    ///
    /// A missing stash is not an error.
    ///
    /// # Errors
    ///
    /// Returns `GitError::StashConflict` if the stash cannot be applied; the
    /// stash entry is kept for manual recovery.
    pub fn restore(&self, repo: &RepoRef, branch: &str) -> SubgitResult<RestoreOutcome> {
        let Some(entry) = self.find(repo, branch)? else {
            info!(repo = %repo, branch, "no stash to restore");
            return Ok(RestoreOutcome::NotFound);
        };

        debug!(repo = %repo, stash = %entry.reference, "restoring");
        match self.git.run(repo, &["stash", "pop", &entry.reference]) {
            Ok(()) => {
                info!(repo = %repo, stash = %entry.reference, "stash restored");
                Ok(RestoreOutcome::Restored {
                    stash: entry.reference,
                })
            }
            Err(SubgitError::Git(_)) => {
                warn!(repo = %repo, stash = %entry.reference, "stash could not be applied");
                Err(GitError::StashConflict {
                    repo: repo.name().to_string(),
                    stash: format!("{} ({})", entry.reference, entry.message),
                }
                .into())
            }
            Err(e) => Err(e),
        }
    }
}
