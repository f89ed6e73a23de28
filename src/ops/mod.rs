// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Multi-Repo Operation Driver.
//!
//! ```text
//!   targets: [base, frontend/ee, server/ee]     (sequential, in order)
//!       |
//!       v
//!   per target: git ... ----> Outcome { Success | Skipped(why) | Failed(why) }
//!       |
//!       v
//!   Report  --into_result()-->  Ok(report) | MultiRepoFailure { failed: [...] }
//! ```
//!
//! A failing target never stops the loop and nothing is rolled back: targets
//! that succeeded keep their changes. Validation and preconditions are
//! checked before the first git command runs.
//!
//! ```text
//! checkout.rs  checkout, checkout_with_stash
//! sync.rs      pull, push
//! commit.rs    add, commit
//! branch.rs    create_branch, tag
//! merge.rs     merge, merge_with_stash
//! status.rs    status, status_report
//! ```

pub mod branch;
pub mod checkout;
pub mod commit;
pub mod merge;
pub mod status;
pub mod sync;

#[cfg(test)]
mod tests;

use serde::Serialize;
use std::fmt;
use tracing::{error, info, warn};

use crate::error::{MultiRepoFailure, SubgitResult};
use crate::git::RepoRef;

/// What happened in one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "reason", rename_all = "lowercase")]
pub enum Outcome {
    Success,
    /// Nothing to do (nothing to stash or commit, detached HEAD, ...).
    Skipped(String),
    Failed(String),
}

impl Outcome {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    const fn severity(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Skipped(_) => 1,
            Self::Failed(_) => 2,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("ok"),
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
            Self::Failed(reason) => write!(f, "FAILED ({reason})"),
        }
    }
}

/// Outcome of one target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetOutcome {
    pub repo: RepoRef,
    pub outcome: Outcome,
}

/// Per-target outcomes of one multi-repository operation, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    operation: String,
    outcomes: Vec<TargetOutcome>,
}

impl Report {
    #[must_use]
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            outcomes: Vec::new(),
        }
    }

    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    #[must_use]
    pub fn outcomes(&self) -> &[TargetOutcome] {
        &self.outcomes
    }

    /// Outcome recorded for the repository named `name`.
    #[must_use]
    pub fn outcome_of(&self, name: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|t| t.repo.name() == name)
            .map(|t| &t.outcome)
    }

    pub fn success(&mut self, repo: &RepoRef) {
        info!(repo = %repo, op = %self.operation, "done");
        self.push(repo, Outcome::Success);
    }

    pub fn skipped(&mut self, repo: &RepoRef, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(repo = %repo, op = %self.operation, "skipped: {reason}");
        self.push(repo, Outcome::Skipped(reason));
    }

    pub fn failed(&mut self, repo: &RepoRef, reason: impl fmt::Display) {
        let reason = reason.to_string();
        error!(repo = %repo, op = %self.operation, "{reason}");
        self.push(repo, Outcome::Failed(reason));
    }

    /// Record `result` as success or failure.
    pub fn record(&mut self, repo: &RepoRef, result: SubgitResult<()>) {
        match result {
            Ok(()) => self.success(repo),
            Err(e) => self.failed(repo, e),
        }
    }

    /// Record a step that may itself decide to skip.
    pub fn record_outcome(&mut self, repo: &RepoRef, result: SubgitResult<Outcome>) {
        match result {
            Ok(Outcome::Success) => self.success(repo),
            Ok(Outcome::Skipped(reason)) => self.skipped(repo, reason),
            Ok(Outcome::Failed(reason)) => self.failed(repo, reason),
            Err(e) => self.failed(repo, e),
        }
    }

    fn push(&mut self, repo: &RepoRef, outcome: Outcome) {
        // Multi-phase operations report a target more than once; the worst outcome wins.
        if let Some(existing) = self.outcomes.iter_mut().find(|t| &t.repo == repo) {
            if outcome.severity() > existing.outcome.severity() {
                existing.outcome = outcome;
            }
            return;
        }
        self.outcomes.push(TargetOutcome {
            repo: repo.clone(),
            outcome,
        });
    }

    /// Names of targets that failed.
    #[must_use]
    pub fn failed_targets(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|t| t.outcome.is_failed())
            .map(|t| t.repo.name())
            .collect()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|t| !t.outcome.is_failed())
    }

    /// One `name: outcome` line per target.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let width = self
            .outcomes
            .iter()
            .map(|t| t.repo.name().len())
            .max()
            .unwrap_or(0);
        self.outcomes
            .iter()
            .map(|t| format!("{:<width$}  {}", t.repo.name(), t.outcome))
            .collect()
    }

    /// `Err(MultiRepoFailure)` if any target failed.
    ///
    /// # Errors
    ///
    /// Returns `MultiRepoFailure` listing the failed targets.
    pub fn into_result(self) -> SubgitResult<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(MultiRepoFailure {
            operation: self.operation.clone(),
            failed: self.failed_targets().into_iter().map(String::from).collect(),
        }
        .into())
    }
}
