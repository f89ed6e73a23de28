// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit Message Classifier.
//!
//! ```text
//!   git diff --cached --no-renames    ---.
//!   git diff --cached --no-renames       |   StagedChanges
//!        --name-only --diff-filter=A|M|D ---'     |
//!                                                 v
//!   signals.rs   per-file +/- lines vs keyword regexes,
//!                paths vs wax globs          -> DiffAnalysis { DiffSignals, ... }
//!                                                 |
//!   rules.rs     fixed priority order             v
//!                test > docs > build > config > style > feat(api) > feat(ui)
//!                > feat(db) > fix > feat(fn) > refactor(fn) > refactor(del)
//!                > refactor(imports) > fallback
//!                                                 |
//!   scope.rs     first path segment -> scope      v
//!                                      Suggestions { primary, alternative? }
//! ```
//!
//! Only the base repository's index is inspected. The classifier never
//! commits; callers choose, edit or discard the suggestion. Output depends
//! only on the staged content, never on file order or time.

mod rules;
mod scope;
mod signals;


pub use scope::infer_scope;
pub use signals::{DiffAnalysis, DiffSignals, analyze};

use serde::Serialize;
use std::fmt;

use crate::error::SubgitResult;
use crate::git::{GitRunner, RepoRef};

/// Conventional commit types the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Test,
    Docs,
    Build,
    Config,
    Style,
    Refactor,
}

impl CommitType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Test => "test",
            Self::Docs => "docs",
            Self::Build => "build",
            Self::Config => "config",
            Self::Style => "style",
            Self::Refactor => "refactor",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed commit message: `type(scope): description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: CommitType,
    pub scope: Option<String>,
    pub description: String,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}({scope}): {}", self.kind, self.description),
            None => write!(f, "{}: {}", self.kind, self.description),
        }
    }
}

/// The primary suggestion and at most one alternative of a different type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub primary: Suggestion,
    pub alternative: Option<Suggestion>,
}

/// Staged content of one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedChanges {
    /// Unified diff of the index against HEAD.
    pub diff: String,
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
}

impl StagedChanges {
    /// Read the staged diff and file lists of `repo`.
    ///
    /// Rename detection is off, so a moved file counts as one deletion and
    /// one addition.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if any `git diff` invocation fails.
    pub fn from_git(git: &GitRunner, repo: &RepoRef) -> SubgitResult<Self> {
        let names = |filter: &str| -> SubgitResult<Vec<String>> {
            let flag = format!("--diff-filter={filter}");
            let out = git.capture(
                repo,
                &["diff", "--cached", "--no-renames", "--name-only", &flag],
            )?;
            Ok(out
                .lines()
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect())
        };

        Ok(Self {
            diff: git.capture(repo, &["diff", "--cached", "--no-renames", "--no-color"])?,
            added: names("A")?,
            modified: names("M")?,
            deleted: names("D")?,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    /// Every staged path, sorted and deduplicated.
    #[must_use]
    pub fn all_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self
            .added
            .iter()
            .chain(&self.modified)
            .chain(&self.deleted)
            .map(String::as_str)
            .collect();
        files.sort_unstable();
        files.dedup();
        files
    }
}

/// Classify staged changes. Returns `None` when nothing is staged.
///
/// # Errors
///
/// Returns an error only if a built-in pattern fails to compile.
pub fn classify(changes: &StagedChanges) -> SubgitResult<Option<Suggestions>> {
    if changes.is_empty() {
        return Ok(None);
    }
    let analysis = analyze(changes)?;
    let scope = infer_scope(&analysis.files);
    Ok(Some(rules::suggest(&analysis, scope.as_deref())))
}
