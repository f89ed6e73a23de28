// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository references.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A repository an operation targets: the base repository or one submodule.
///
/// Built fresh for every invocation and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRef {
    /// Logical name used in log messages (`base` or the submodule path).
    name: String,
    /// Path relative to the base repository root (`.` for the base).
    rel_path: PathBuf,
    /// Absolute working directory for git invocations.
    #[serde(skip)]
    abs_path: PathBuf,
}

impl RepoRef {
    pub const BASE_NAME: &'static str = "base";

    /// The base repository at `root`.
    #[must_use]
    pub fn base(root: &Path) -> Self {
        Self {
            name: Self::BASE_NAME.to_string(),
            rel_path: PathBuf::from("."),
            abs_path: root.to_path_buf(),
        }
    }

    /// A nested repository at `rel` below `root`.
    #[must_use]
    pub fn submodule(root: &Path, rel: &str) -> Self {
        let rel = rel.trim_end_matches('/');
        Self {
            name: rel.to_string(),
            rel_path: PathBuf::from(rel),
            abs_path: root.join(rel),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Working directory for git commands.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.abs_path
    }

    #[must_use]
    pub fn rel_path(&self) -> &Path {
        &self.rel_path
    }

    #[must_use]
    pub fn is_base(&self) -> bool {
        self.rel_path == Path::new(".")
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
