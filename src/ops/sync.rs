// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pull and push.
//!
//! ```text
//! pull  base        upstream required, else NoUpstream + remediation (nothing runs)
//!       submodule   detached => skip; no origin/<branch> => skip; else pull origin <branch>
//! push  any         upstream => push; else push --set-upstream origin <branch>
//! ```

use tracing::{debug, info, warn};

use super::{Outcome, Report};
use crate::error::{PreconditionError, SubgitResult};
use crate::git::{GitRunner, ORIGIN, RepoRef, Workspace, query};

/// Pull every target.
///
/// # Errors
///
/// Returns `PreconditionError::NoUpstream` (with the command that fixes it)
/// or `PreconditionError::DetachedHead` if the base repository is a target
/// and cannot be pulled; no target is touched in that case.
pub fn pull(workspace: &Workspace, targets: &[RepoRef]) -> SubgitResult<Report> {
    let git = workspace.git();
    if let Some(base) = targets.iter().find(|r| r.is_base()) {
        require_upstream(git, base)?;
    }

    let mut report = Report::new("pull");
    for repo in targets {
        info!(repo = %repo, "pulling");
        if repo.is_base() {
            report.record(repo, git.run(repo, &["pull"]));
            continue;
        }
        report.record_outcome(repo, pull_branch(git, repo));
    }
    Ok(report)
}

/// Fail unless `repo` is on a branch with an upstream.
fn require_upstream(git: &GitRunner, repo: &RepoRef) -> SubgitResult<String> {
    let Some(branch) = query::current_branch(repo)? else {
        return Err(PreconditionError::DetachedHead {
            repo: repo.name().to_string(),
        }
        .into());
    };
    if let Some(upstream) = query::upstream(git, repo)? {
        debug!(repo = %repo, upstream = %upstream, "upstream configured");
        return Ok(upstream);
    }
    warn!(repo = %repo, branch = %branch, "no upstream configured");
    Err(PreconditionError::NoUpstream {
        remediation: format!("git branch --set-upstream-to={ORIGIN}/{branch} {branch}"),
        branch,
    }
    .into())
}

/// Pull the current branch from its upstream, or from `origin/<branch>` when
/// there is no upstream but the remote has the branch.
///
/// Returns `Skipped` for a detached HEAD or a branch the remote lacks.
pub(crate) fn pull_branch(git: &GitRunner, repo: &RepoRef) -> SubgitResult<Outcome> {
    let Some(branch) = query::current_branch(repo)? else {
        return Ok(Outcome::Skipped("detached HEAD".to_string()));
    };
    if query::upstream(git, repo)?.is_some() {
        git.run(repo, &["pull"])?;
        return Ok(Outcome::Success);
    }
    if !query::remote_branch_exists(git, repo, &branch)? {
        return Ok(Outcome::Skipped(format!(
            "no remote branch {ORIGIN}/{branch}"
        )));
    }
    git.run(repo, &["pull", ORIGIN, &branch])?;
    Ok(Outcome::Success)
}

/// Push every target, setting the upstream where none is configured.
///
/// # Errors
///
/// Never fails as a whole; per-target failures are in the report.
pub fn push(workspace: &Workspace, targets: &[RepoRef]) -> SubgitResult<Report> {
    let mut report = Report::new("push");
    for repo in targets {
        report.record_outcome(repo, push_branch(workspace.git(), repo));
    }
    Ok(report)
}

fn push_branch(git: &GitRunner, repo: &RepoRef) -> SubgitResult<Outcome> {
    let Some(branch) = query::current_branch(repo)? else {
        return Ok(Outcome::Skipped("detached HEAD".to_string()));
    };
    if query::upstream(git, repo)?.is_some() {
        git.run(repo, &["push"])?;
    } else {
        info!(repo = %repo, branch = %branch, "no upstream, setting it while pushing");
        git.run(repo, &["push", "--set-upstream", ORIGIN, &branch])?;
    }
    Ok(Outcome::Success)
}
