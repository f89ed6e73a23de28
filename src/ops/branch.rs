// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch and tag creation.

use tracing::{debug, info};

use super::Report;
use crate::error::{SubgitResult, ValidationError};
use crate::git::refname::{BranchName, TagName};
use crate::git::{ORIGIN, RepoRef, Workspace, query};

/// Create and switch to `branch` in the base repository, then in every
/// other target.
///
/// # Errors
///
/// Returns `ValidationError::BranchExists` if the base repository already has
/// the branch; nothing is executed in that case.
pub fn create_branch(
    workspace: &Workspace,
    targets: &[RepoRef],
    branch: &BranchName,
) -> SubgitResult<Report> {
    let git = workspace.git();
    let base = workspace.base();
    if query::local_branch_exists(git, &base, branch.as_str())? {
        return Err(ValidationError::BranchExists {
            branch: branch.to_string(),
        }
        .into());
    }

    let mut report = Report::new(format!("create branch {branch}"));
    let rest = targets.iter().filter(|r| !r.is_base());
    for repo in std::iter::once(&base).chain(rest) {
        info!(repo = %repo, branch = %branch, "creating branch");
        report.record(repo, git.run(repo, &["checkout", "-b", branch.as_str()]));
    }
    Ok(report)
}

/// Create a lightweight tag in the base repository and every submodule and
/// push it to `origin`.
///
/// # Errors
///
/// Returns an error if the submodules cannot be enumerated; per-target
/// failures are in the report.
pub fn tag(workspace: &Workspace, tag: &TagName) -> SubgitResult<Report> {
    let git = workspace.git();
    let mut report = Report::new(format!("tag {tag}"));
    for repo in workspace.all()? {
        debug!(repo = %repo, tag = %tag, "tagging");
        let result = git
            .run(&repo, &["tag", tag.as_str()])
            .and_then(|()| git.run(&repo, &["push", ORIGIN, tag.as_str()]));
        report.record(&repo, result);
    }
    Ok(report)
}
