// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository enumeration.
//!
//! ```text
//! git submodule status --recursive
//!   " 1f0c... frontend/ee (heads/main)"   -> Current
//!   "+9a2b... server/ee (v1.2-3-g9a2b)"   -> Modified (checked-out commit differs)
//!   "-77de... vendor/lib"                  -> Uninitialized (excluded, warned)
//!   "U0000... shared"                      -> Conflicted
//!   " 5c3e... vendor/my lib (heads/main)"  -> path "vendor/my lib"
//! ```
//!
//! Nothing is cached: every call asks git again, so submodules added while
//! the process runs are picked up by the next operation.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{GitRunner, RepoRef};
use crate::error::{SubgitError, SubgitResult};

/// State character reported by `git submodule status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmoduleState {
    Current,
    Uninitialized,
    Modified,
    Conflicted,
}

impl SubmoduleState {
    const fn from_marker(marker: char) -> Option<Self> {
        match marker {
            ' ' => Some(Self::Current),
            '-' => Some(Self::Uninitialized),
            '+' => Some(Self::Modified),
            'U' => Some(Self::Conflicted),
            _ => None,
        }
    }
}

/// One line of `git submodule status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleEntry {
    pub path: String,
    pub commit: String,
    pub state: SubmoduleState,
}

/// Parse `git submodule status --recursive` output. Unparseable lines are dropped.
///
/// Paths may contain spaces.
pub(crate) fn parse_status(out: &str) -> Vec<SubmoduleEntry> {
    out.lines()
        .filter_map(|line| {
            let mut chars = line.chars();
            let state = SubmoduleState::from_marker(chars.next()?)?;
            let (commit, rest) = chars.as_str().split_once(' ')?;
            // The path runs to the end of the line, minus any " (describe)" suffix.
            let path = rest
                .strip_suffix(')')
                .and_then(|r| r.rsplit_once(" ("))
                .map_or(rest, |(path, _)| path);
            if commit.is_empty() || path.is_empty() {
                return None;
            }
            Some(SubmoduleEntry {
                path: path.to_string(),
                commit: commit.to_string(),
                state,
            })
        })
        .collect()
}

/// Discovers the base repository's submodules.
#[derive(Debug, Clone)]
pub struct Enumerator {
    root: PathBuf,
    fallback: Vec<String>,
}

impl Enumerator {
    /// `root` is the base repository's work tree; `fallback` is used only when
    /// git cannot list submodules.
    #[must_use]
    pub fn new(root: &Path, fallback: &[String]) -> Self {
        Self {
            root: root.to_path_buf(),
            fallback: fallback.to_vec(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn base(&self) -> RepoRef {
        RepoRef::base(&self.root)
    }

    /// Raw status entries in the order git reports them.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionError::NotARepository` if the root is not a work tree.
    pub fn entries(&self, git: &GitRunner) -> SubgitResult<Vec<SubmoduleEntry>> {
        let base = self.base();
        match git.capture(&base, &["submodule", "status", "--recursive"]) {
            Ok(out) => Ok(parse_status(&out)),
            Err(SubgitError::Git(e)) => {
                warn!(error = %e, "cannot list submodules; using configured default paths");
                Ok(self
                    .fallback
                    .iter()
                    .map(|path| SubmoduleEntry {
                        path: path.trim_end_matches('/').to_string(),
                        commit: String::new(),
                        state: SubmoduleState::Current,
                    })
                    .collect())
            }
            Err(e) => Err(e),
        }
    }

    /// Initialized submodules as repository references.
    ///
    /// Uninitialized submodules are logged and left out.
    ///
    /// # Errors
    ///
    /// Same as [`Enumerator::entries`].
    pub fn submodules(&self, git: &GitRunner) -> SubgitResult<Vec<RepoRef>> {
        let entries = self.entries(git)?;
        let mut repos = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.state == SubmoduleState::Uninitialized {
                warn!(repo = %entry.path, "submodule not initialized, skipping");
                continue;
            }
            repos.push(RepoRef::submodule(&self.root, &entry.path));
        }
        debug!(count = repos.len(), "submodules enumerated");
        Ok(repos)
    }

    /// Submodule paths as git reports them, initialized or not.
    ///
    /// # Errors
    ///
    /// Same as [`Enumerator::entries`].
    pub fn submodule_paths(&self, git: &GitRunner) -> SubgitResult<Vec<String>> {
        Ok(self.entries(git)?.into_iter().map(|e| e.path).collect())
    }

    /// Base repository followed by every initialized submodule.
    ///
    /// # Errors
    ///
    /// Same as [`Enumerator::entries`].
    pub fn all(&self, git: &GitRunner) -> SubgitResult<Vec<RepoRef>> {
        let mut repos = vec![self.base()];
        repos.extend(self.submodules(git)?);
        Ok(repos)
    }
}
