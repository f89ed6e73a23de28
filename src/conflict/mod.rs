// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule Conflict Resolver.
//!
//! ```text
//!   MERGE_HEAD present?  --no-->  PreconditionError::NoActiveMerge
//!          |
//!   diff --name-only --diff-filter=U
//!          |
//!   partition ---> regular files      (logged, left to the user's merge tool)
//!          '-----> submodule pointers
//!                      |  ls-tree HEAD / MERGE_HEAD  (+ log -1 if checked out)
//!                      v
//!   keep all | accept all | individually | latest upstream for all | cancel
//!                      |
//!   update-index --cacheinfo 160000,<sha>,<path>      (no commit)
//! ```
//!
//! A skipped conflict stays unmerged in the index.

#[cfg(test)]
mod tests;

use serde::Serialize;
use std::fmt::{self, Write as _};
use tracing::{info, warn};

use crate::error::{GitError, PreconditionError, SubgitResult, ValidationError};
use crate::git::backend::{GitQuery, GixBackend};
use crate::git::{GitRunner, ORIGIN, RepoRef, Workspace, query};
use crate::ops::{Outcome, Report};
use crate::prompt::Prompt;

/// Conflicted paths split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conflicts {
    /// Paths that are known submodules.
    pub submodules: Vec<String>,
    /// Everything else.
    pub files: Vec<String>,
}

/// Split `conflicted` into submodule pointers and regular files.
#[must_use]
pub fn partition(conflicted: &[String], submodule_paths: &[String]) -> Conflicts {
    let is_submodule = |path: &str| {
        let path = path.trim_end_matches('/');
        submodule_paths
            .iter()
            .any(|known| known.trim_end_matches('/') == path)
    };
    let (submodules, files) = conflicted
        .iter()
        .cloned()
        .partition(|path| is_submodule(path));
    Conflicts { submodules, files }
}

/// Both sides of one conflicted gitlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmoduleConflict {
    pub path: String,
    /// Commit recorded in `HEAD`.
    pub ours: Option<String>,
    /// Commit recorded in `MERGE_HEAD`.
    pub theirs: Option<String>,
    pub ours_log: Option<String>,
    pub theirs_log: Option<String>,
}

impl fmt::Display for SubmoduleConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |sha: &Option<String>, log: &Option<String>| match (sha, log) {
            (Some(_), Some(log)) => log.clone(),
            (Some(sha), None) => sha.clone(),
            (None, _) => "(absent)".to_string(),
        };
        write!(
            f,
            "{}\n    current:  {}\n    incoming: {}",
            self.path,
            side(&self.ours, &self.ours_log),
            side(&self.theirs, &self.theirs_log)
        )
    }
}

/// How to resolve one submodule conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Stage the `HEAD` commit.
    KeepCurrent,
    /// Stage the `MERGE_HEAD` commit.
    AcceptIncoming,
    /// Fetch and stage the tip of the submodule's upstream.
    Latest,
    /// Leave the path conflicted.
    Skip,
}

impl Resolution {
    const INDIVIDUAL: [Self; 4] = [Self::KeepCurrent, Self::AcceptIncoming, Self::Latest, Self::Skip];

    const fn label(self) -> &'static str {
        match self {
            Self::KeepCurrent => "Keep current (HEAD)",
            Self::AcceptIncoming => "Accept incoming (MERGE_HEAD)",
            Self::Latest => "Update to latest upstream",
            Self::Skip => "Skip (leave conflicted)",
        }
    }
}

const MENU: [&str; 5] = [
    "Keep current for all",
    "Accept incoming for all",
    "Resolve individually",
    "Update all to latest upstream",
    "Cancel",
];

/// Conflicts of the merge in progress, with both sides of every submodule
/// conflict looked up.
///
/// # Errors
///
/// Returns `PreconditionError::NoActiveMerge` when no merge is in progress.
pub fn inspect(workspace: &Workspace) -> SubgitResult<(Conflicts, Vec<SubmoduleConflict>)> {
    if !GixBackend::merge_in_progress(workspace.root())? {
        return Err(PreconditionError::NoActiveMerge.into());
    }
    let git = workspace.git();
    let base = workspace.base();

    let conflicted = query::conflicted_paths(git, &base)?;
    let mut known = workspace.submodule_paths()?;
    // A gitlink on either side marks a submodule even if `submodule status`
    // cannot list it mid-merge.
    for path in &conflicted {
        if !known.contains(path) && sides(git, &base, path)?.iter().any(Option::is_some) {
            known.push(path.clone());
        }
    }
    let conflicts = partition(&conflicted, &known);

    let details = conflicts
        .submodules
        .iter()
        .map(|path| describe(git, workspace, path))
        .collect::<SubgitResult<Vec<_>>>()?;
    Ok((conflicts, details))
}

fn sides(git: &GitRunner, base: &RepoRef, path: &str) -> SubgitResult<[Option<String>; 2]> {
    Ok([
        query::gitlink_commit(git, base, "HEAD", path)?,
        query::gitlink_commit(git, base, "MERGE_HEAD", path)?,
    ])
}

fn describe(git: &GitRunner, workspace: &Workspace, path: &str) -> SubgitResult<SubmoduleConflict> {
    let [ours, theirs] = sides(git, &workspace.base(), path)?;
    let sub = RepoRef::submodule(workspace.root(), path);
    let log = |sha: &Option<String>| -> SubgitResult<Option<String>> {
        match sha {
            Some(sha) if checked_out(&sub) => query::one_line_log(git, &sub, sha),
            _ => Ok(None),
        }
    };
    Ok(SubmoduleConflict {
        path: path.to_string(),
        ours_log: log(&ours)?,
        theirs_log: log(&theirs)?,
        ours,
        theirs,
    })
}

fn checked_out(sub: &RepoRef) -> bool {
    sub.path().join(".git").exists()
}

/// Interactively resolve the submodule conflicts of the merge in progress.
///
/// Stages the chosen gitlinks and never commits.
///
/// # Errors
///
/// Returns `PreconditionError::NoActiveMerge` when no merge is in progress,
/// or a prompt error.
pub fn resolve(workspace: &Workspace, prompt: &mut dyn Prompt) -> SubgitResult<Report> {
    let (conflicts, details) = inspect(workspace)?;
    let mut report = Report::new("resolve submodule conflicts");

    for file in &conflicts.files {
        warn!(path = %file, "file conflict, resolve it with your merge tool");
    }
    if details.is_empty() {
        info!("no submodule conflicts");
        return Ok(report);
    }

    let mut title = String::from("Submodule conflicts:");
    for conflict in &details {
        let _ = write!(title, "\n  {conflict}");
    }
    let plan: Vec<Resolution> = match prompt.choose(&title, &MENU)? {
        0 => vec![Resolution::KeepCurrent; details.len()],
        1 => vec![Resolution::AcceptIncoming; details.len()],
        2 => {
            let labels = Resolution::INDIVIDUAL.map(Resolution::label);
            details
                .iter()
                .map(|conflict| {
                    let pick = prompt.choose(&conflict.to_string(), &labels)?;
                    Ok(Resolution::INDIVIDUAL[pick])
                })
                .collect::<SubgitResult<_>>()?
        }
        3 => vec![Resolution::Latest; details.len()],
        4 => vec![Resolution::Skip; details.len()],
        other => return Err(ValidationError::InvalidChoice(other.to_string()).into()),
    };

    for (conflict, resolution) in details.iter().zip(plan) {
        let sub = RepoRef::submodule(workspace.root(), &conflict.path);
        let outcome = apply(workspace, conflict, resolution);
        report.record_outcome(&sub, outcome);
    }

    if report.outcomes().iter().any(|t| t.outcome == Outcome::Success) {
        info!("resolved submodules are staged; commit to finish the merge");
    }
    Ok(report)
}

fn apply(
    workspace: &Workspace,
    conflict: &SubmoduleConflict,
    resolution: Resolution,
) -> SubgitResult<Outcome> {
    let missing = |side: &str| Outcome::Failed(format!("no {side} commit recorded for {}", conflict.path));
    let sha = match resolution {
        Resolution::Skip => return Ok(Outcome::Skipped("left conflicted".to_string())),
        Resolution::KeepCurrent => match &conflict.ours {
            Some(sha) => sha.clone(),
            None => return Ok(missing("HEAD")),
        },
        Resolution::AcceptIncoming => match &conflict.theirs {
            Some(sha) => sha.clone(),
            None => return Ok(missing("MERGE_HEAD")),
        },
        Resolution::Latest => {
            let sub = RepoRef::submodule(workspace.root(), &conflict.path);
            if !checked_out(&sub) {
                return Ok(Outcome::Failed("not checked out, cannot fetch upstream".to_string()));
            }
            latest_upstream(workspace.git(), &sub)?
        }
    };
    stage_gitlink(workspace.git(), &workspace.base(), &conflict.path, &sha)?;
    info!(path = %conflict.path, commit = %sha, "staged submodule commit");
    Ok(Outcome::Success)
}

/// Fetch the submodule and check out the tip of `origin/HEAD`, falling back
/// to `origin/<current branch>`.
fn latest_upstream(git: &GitRunner, sub: &RepoRef) -> SubgitResult<String> {
    git.run(sub, &["fetch", ORIGIN])?;
    let head = format!("{ORIGIN}/HEAD");
    let sha = match query::resolve_commit(git, sub, &head) {
        Ok(sha) => sha,
        Err(_) => {
            let Some(branch) = query::current_branch(sub)? else {
                return Err(GitError::UnexpectedOutput {
                    command: format!("rev-parse {head}"),
                    output: format!("{sub} has no {head} and is on a detached HEAD"),
                }
                .into());
            };
            query::resolve_commit(git, sub, &format!("{ORIGIN}/{branch}"))?
        }
    };
    git.run(sub, &["checkout", "--quiet", &sha])?;
    Ok(sha)
}

fn stage_gitlink(git: &GitRunner, base: &RepoRef, path: &str, sha: &str) -> SubgitResult<()> {
    let entry = format!("160000,{sha},{path}");
    git.run(base, &["update-index", "--cacheinfo", &entry])
}
