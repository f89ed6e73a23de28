// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only repository inspection.
//!
//! ```text
//! GitQuery (read) --> GixBackend (pure Rust gix, no subprocess)
//! ```
//!
//! Writes always go through the git CLI via [`crate::git::GitRunner`].

use crate::error::{GitError, GixError, SubgitResult};
use std::path::{Path, PathBuf};

/// Read-only git query operations.
///
/// Implementors provide methods to inspect repository state without modification.
pub trait GitQuery {
    /// Check if path is the root of a git work tree.
    ///
    /// A plain directory inside a work tree is not a repository of its own.
    fn is_git_repo(path: &Path) -> bool;

    /// Root of the work tree containing `path`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if no repository contains `path` or it is bare.
    fn work_tree_root(path: &Path) -> SubgitResult<PathBuf>;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> SubgitResult<Option<String>>;

    /// Check whether a merge is in progress (MERGE_HEAD present).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery fails.
    fn merge_in_progress(path: &Path) -> SubgitResult<bool>;
}

/// Pure Rust git backend using gix.
pub struct GixBackend;

impl GixBackend {
    fn discover(path: &Path) -> SubgitResult<gix::Repository> {
        gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))).into())
    }
}

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        let Ok(repo) = gix::discover(path) else {
            return false;
        };
        let (Some(workdir), Ok(path)) = (repo.workdir(), path.canonicalize()) else {
            return false;
        };
        workdir.canonicalize().is_ok_and(|root| root == path)
    }

    fn work_tree_root(path: &Path) -> SubgitResult<PathBuf> {
        let repo = Self::discover(path)?;
        repo.workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                GitError::UnexpectedOutput {
                    command: "discover".to_string(),
                    output: format!("{} is a bare repository", path.display()),
                }
                .into()
            })
    }

    fn current_branch(path: &Path) -> SubgitResult<Option<String>> {
        let repo = Self::discover(path)?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn merge_in_progress(path: &Path) -> SubgitResult<bool> {
        let repo = Self::discover(path)?;
        Ok(matches!(repo.state(), Some(gix::state::InProgress::Merge)))
    }
}
