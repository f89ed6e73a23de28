// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Staging and committing.

use tracing::{info, warn};

use super::Report;
use crate::error::{SubgitResult, ValidationError};
use crate::git::{RepoRef, Workspace, query};

/// `git add -A` in every target.
///
/// # Errors
///
/// Never fails as a whole; per-target failures are in the report.
pub fn add(workspace: &Workspace, targets: &[RepoRef]) -> SubgitResult<Report> {
    let mut report = Report::new("add");
    for repo in targets {
        report.record(repo, workspace.git().run(repo, &["add", "-A"]));
    }
    Ok(report)
}

/// Trim `message` and check it against the minimum length.
///
/// # Errors
///
/// Returns `ValidationError::MissingMessage` or `ValidationError::MessageTooShort`.
pub fn validate_message(message: &str, min_len: usize) -> SubgitResult<&str> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ValidationError::MissingMessage.into());
    }
    let len = message.chars().count();
    if len < min_len {
        return Err(ValidationError::MessageTooShort { min: min_len, len }.into());
    }
    Ok(message)
}

/// Commit staged changes, base repository first.
///
/// If the base commit fails no submodule is attempted. Repositories with
/// nothing staged are skipped.
///
/// # Errors
///
/// Returns a `ValidationError` for a missing or short message before any git
/// command runs.
pub fn commit(
    workspace: &Workspace,
    targets: &[RepoRef],
    message: &str,
    min_len: usize,
) -> SubgitResult<Report> {
    let message = validate_message(message, min_len)?;
    let git = workspace.git();
    let mut report = Report::new("commit");

    let (bases, submodules): (Vec<&RepoRef>, Vec<&RepoRef>) =
        targets.iter().partition(|r| r.is_base());

    for repo in bases.into_iter().chain(submodules) {
        let result = query::has_staged_changes(git, repo).and_then(|staged| {
            if staged {
                info!(repo = %repo, "committing");
                git.run(repo, &["commit", "-m", message]).map(|()| true)
            } else {
                Ok(false)
            }
        });

        match result {
            Ok(true) => report.success(repo),
            Ok(false) => report.skipped(repo, "nothing to commit"),
            Err(e) => {
                report.failed(repo, e);
                if repo.is_base() {
                    warn!("base commit failed, submodules not attempted");
                    break;
                }
            }
        }
    }
    Ok(report)
}
