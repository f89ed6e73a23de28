// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The base repository an invocation works on, plus the runner for it.

use std::path::Path;
use tracing::debug;

use super::backend::{GitQuery, GixBackend};
use super::submodules::Enumerator;
use super::{GitRunner, RepoRef};
use crate::error::{PreconditionError, SubgitResult};

/// Base repository, its submodule enumerator and the shared [`GitRunner`].
#[derive(Debug, Clone)]
pub struct Workspace {
    git: GitRunner,
    enumerator: Enumerator,
}

impl Workspace {
    /// Workspace rooted exactly at `root`.
    #[must_use]
    pub fn new(git: GitRunner, root: &Path, fallback_submodules: &[String]) -> Self {
        Self {
            git,
            enumerator: Enumerator::new(root, fallback_submodules),
        }
    }

    /// Workspace for the work tree containing `cwd`.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionError::NotARepository` if `cwd` is not inside a
    /// git work tree.
    pub fn discover(git: GitRunner, cwd: &Path, fallback_submodules: &[String]) -> SubgitResult<Self> {
        let root = GixBackend::work_tree_root(cwd).map_err(|_| PreconditionError::NotARepository {
            path: cwd.display().to_string(),
        })?;
        debug!(root = %root.display(), "base repository");
        Ok(Self::new(git, &root, fallback_submodules))
    }

    #[must_use]
    pub const fn git(&self) -> &GitRunner {
        &self.git
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.enumerator.root()
    }

    #[must_use]
    pub fn base(&self) -> RepoRef {
        self.enumerator.base()
    }

    /// Initialized submodules, freshly enumerated.
    ///
    /// # Errors
    ///
    /// Returns an error if the base repository cannot be queried.
    pub fn submodules(&self) -> SubgitResult<Vec<RepoRef>> {
        self.enumerator.submodules(&self.git)
    }

    /// Every submodule path git knows about, initialized or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the base repository cannot be queried.
    pub fn submodule_paths(&self) -> SubgitResult<Vec<String>> {
        self.enumerator.submodule_paths(&self.git)
    }

    /// Base repository first, then every initialized submodule.
    ///
    /// # Errors
    ///
    /// Returns an error if the base repository cannot be queried.
    pub fn all(&self) -> SubgitResult<Vec<RepoRef>> {
        self.enumerator.all(&self.git)
    }
}
