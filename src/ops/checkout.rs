// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch switching.
//!
//! The stash-wrapped variant walks every repository through three phases,
//! finishing each phase everywhere (base first) before the next begins:
//!
//! ```text
//!            stash(current)        checkout + pull          restore
//! dirty  ->  STASHED          ->   SWITCHED           ->    pop stash-for-<target>
//! clean  ->  NOOP             ->   SWITCHED           ->    pop stash-for-<target> (usually none)
//!            STASHED          ->   checkout failed    ->    pop stash-for-<current> (own work back)
//!            stash failed     ->   (not attempted)
//! ```

use tracing::{info, warn};

use super::Report;
use super::sync::pull_branch;
use crate::error::SubgitResult;
use crate::git::refname::BranchName;
use crate::git::stash::{StashCoordinator, StashOutcome};
use crate::git::{GitRunner, RepoRef, Workspace, query};

/// Stash tag used when HEAD is detached.
const DETACHED_TAG: &str = "detached-HEAD";

/// Switch every target to `branch`, then pull it.
///
/// # Errors
///
/// Never fails as a whole; per-target failures are in the report.
pub fn checkout(
    workspace: &Workspace,
    targets: &[RepoRef],
    branch: &BranchName,
) -> SubgitResult<Report> {
    let git = workspace.git();
    let mut report = Report::new(format!("checkout {branch}"));
    for repo in targets {
        info!(repo = %repo, branch = %branch, "checking out");
        match switch_and_pull(git, repo, branch) {
            Ok(()) => report.success(repo),
            Err(e) => report.failed(repo, e),
        }
    }
    Ok(report)
}

fn switch_and_pull(git: &GitRunner, repo: &RepoRef, branch: &BranchName) -> SubgitResult<()> {
    git.run(repo, &["checkout", branch.as_str()])?;
    let pulled = pull_branch(git, repo)?;
    info!(repo = %repo, "pull after checkout: {pulled}");
    Ok(())
}

/// Per-repository progress through the stash-wrapped checkout.
#[derive(Debug)]
struct Parked {
    repo: RepoRef,
    /// Branch checked out before the switch (stash tag).
    original: String,
    stashed: bool,
    switched: bool,
}

/// Switch the base repository and every submodule to `branch`, parking
/// uncommitted work under the branch it belongs to.
///
/// Work is stashed as `stash-for-<current branch>` and, once switched, work
/// previously parked as `stash-for-<branch>` is restored. A repository whose
/// switch fails gets its own stash back so nothing stays hidden.
///
/// # Errors
///
/// Returns an error if the submodules cannot be enumerated; per-target
/// failures are in the report.
pub fn checkout_with_stash(workspace: &Workspace, branch: &BranchName) -> SubgitResult<Report> {
    let git = workspace.git();
    let stash = StashCoordinator::new(git);
    let mut report = Report::new(format!("checkout {branch} (with stash)"));

    let mut parked = Vec::new();
    for repo in workspace.all()? {
        let original = match query::current_branch(&repo) {
            Ok(current) => current.unwrap_or_else(|| DETACHED_TAG.to_string()),
            Err(e) => {
                report.failed(&repo, e);
                continue;
            }
        };
        match stash.stash(&repo, &original) {
            Ok(outcome) => parked.push(Parked {
                stashed: matches!(outcome, StashOutcome::Stashed { .. }),
                switched: false,
                original,
                repo,
            }),
            Err(e) => report.failed(&repo, format!("stash failed, not switching: {e}")),
        }
    }

    for entry in &mut parked {
        info!(repo = %entry.repo, from = %entry.original, to = %branch, "switching");
        if let Err(e) = git.run(&entry.repo, &["checkout", branch.as_str()]) {
            report.failed(&entry.repo, e);
            continue;
        }
        entry.switched = true;
        if let Err(e) = pull_branch(git, &entry.repo) {
            report.failed(&entry.repo, format!("pull after checkout failed: {e}"));
        }
    }

    for entry in &parked {
        let tag = if entry.switched {
            branch.as_str()
        } else if entry.stashed {
            warn!(repo = %entry.repo, "checkout failed, returning stashed work");
            entry.original.as_str()
        } else {
            continue;
        };
        match stash.restore(&entry.repo, tag) {
            Ok(_) => report.success(&entry.repo),
            Err(e) => report.failed(&entry.repo, e),
        }
    }

    Ok(report)
}
