// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merging `origin/<source>` into the current branch of each target.
//!
//! ```text
//! per target:  fetch origin <source>  ->  merge origin/<source>
//!                                             | fails
//!                                             v
//!                                   ask: merge --abort?   (target stays Failed)
//!
//! with stash:  stash(current) everywhere -> merge everywhere -> restore every stashed target
//! ```

use tracing::{info, warn};

use super::Report;
use crate::error::{SubgitResult, ValidationError};
use crate::git::refname::BranchName;
use crate::git::stash::{StashCoordinator, StashOutcome};
use crate::git::{GitRunner, ORIGIN, RepoRef, Workspace, query};
use crate::prompt::Prompt;

/// Merge `origin/<source>` into every target.
///
/// # Errors
///
/// Returns `ValidationError::SameBranch` before any command runs if a target
/// is on `source` itself.
pub fn merge(
    workspace: &Workspace,
    targets: &[RepoRef],
    source: &BranchName,
    prompt: &mut dyn Prompt,
) -> SubgitResult<Report> {
    reject_self_merge(targets, source)?;
    let mut report = Report::new(format!("merge {ORIGIN}/{source}"));
    for repo in targets {
        merge_one(workspace.git(), repo, source, prompt, &mut report);
    }
    Ok(report)
}

/// [`merge`] across the base repository and every submodule, with
/// uncommitted work stashed first and restored afterwards.
///
/// Restoration is attempted for every stashed target whether or not its merge
/// succeeded.
///
/// # Errors
///
/// Same as [`merge`], plus enumeration failures.
pub fn merge_with_stash(
    workspace: &Workspace,
    source: &BranchName,
    prompt: &mut dyn Prompt,
) -> SubgitResult<Report> {
    let targets = workspace.all()?;
    reject_self_merge(&targets, source)?;

    let git = workspace.git();
    let stash = StashCoordinator::new(git);
    let mut report = Report::new(format!("merge {ORIGIN}/{source} (with stash)"));

    let mut stashed: Vec<(&RepoRef, Option<String>)> = Vec::new();
    for repo in &targets {
        let branch = match query::current_branch(repo) {
            Ok(Some(branch)) => branch,
            Ok(None) => {
                report.skipped(repo, "detached HEAD");
                continue;
            }
            Err(e) => {
                report.failed(repo, e);
                continue;
            }
        };
        match stash.stash(repo, &branch) {
            Ok(StashOutcome::Stashed { .. }) => stashed.push((repo, Some(branch))),
            Ok(StashOutcome::NoChanges) => stashed.push((repo, None)),
            Err(e) => report.failed(repo, format!("stash failed, not merging: {e}")),
        }
    }

    for (repo, _) in &stashed {
        merge_one(git, repo, source, prompt, &mut report);
    }

    for (repo, branch) in &stashed {
        let Some(branch) = branch else { continue };
        if let Err(e) = stash.restore(repo, branch) {
            report.failed(repo, e);
        }
    }

    Ok(report)
}

fn reject_self_merge(targets: &[RepoRef], source: &BranchName) -> SubgitResult<()> {
    for repo in targets {
        if query::current_branch(repo)?.as_deref() == Some(source.as_str()) {
            warn!(repo = %repo, "refusing to merge a branch into itself");
            return Err(ValidationError::SameBranch {
                branch: source.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn merge_one(
    git: &GitRunner,
    repo: &RepoRef,
    source: &BranchName,
    prompt: &mut dyn Prompt,
    report: &mut Report,
) {
    let remote_ref = format!("{ORIGIN}/{source}");
    info!(repo = %repo, from = %remote_ref, "merging");

    if let Err(e) = git.run(repo, &["fetch", ORIGIN, source.as_str()]) {
        report.failed(repo, e);
        return;
    }
    let Err(e) = git.run(repo, &["merge", "--no-edit", &remote_ref]) else {
        report.success(repo);
        return;
    };

    let question = format!("Merge failed in {repo}. Abort it (git merge --abort)?");
    match prompt.confirm(&question, false) {
        Ok(true) => {
            if let Err(abort_err) = git.run(repo, &["merge", "--abort"]) {
                warn!(repo = %repo, error = %abort_err, "merge --abort failed");
            }
        }
        Ok(false) => info!(repo = %repo, "merge left in progress for manual resolution"),
        Err(prompt_err) => warn!(repo = %repo, error = %prompt_err, "no answer, merge left in progress"),
    }
    report.failed(repo, e);
}
