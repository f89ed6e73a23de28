// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only queries answered by the git CLI.
//!
//! These run in dry-run mode too; only [`GitRunner::run`] is suppressed.

use super::backend::{GitQuery, GixBackend};
use super::{GitRunner, ORIGIN, RepoRef};
use crate::error::{GitError, SubgitResult};

/// Current branch, `None` when HEAD is detached.
///
/// # Errors
///
/// Returns an error if `repo` is not a repository.
pub fn current_branch(repo: &RepoRef) -> SubgitResult<Option<String>> {
    GitRunner::ensure_repository(repo)?;
    GixBackend::current_branch(repo.path())
}

/// Upstream of the current branch (`origin/main`), if one is configured.
///
/// # Errors
///
/// Returns an error only if git cannot be run in `repo`.
pub fn upstream(git: &GitRunner, repo: &RepoRef) -> SubgitResult<Option<String>> {
    let args = ["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"];
    if !git.succeeds(repo, &args)? {
        return Ok(None);
    }
    let name = git.capture(repo, &args)?;
    Ok(Some(name).filter(|n| !n.is_empty()))
}

/// Whether `refs/heads/<branch>` exists.
///
/// # Errors
///
/// Returns an error only if git cannot be run in `repo`.
pub fn local_branch_exists(git: &GitRunner, repo: &RepoRef, branch: &str) -> SubgitResult<bool> {
    let reference = format!("refs/heads/{branch}");
    git.succeeds(repo, &["show-ref", "--verify", "--quiet", &reference])
}

/// Whether `origin` has a branch named `branch`.
///
/// # Errors
///
/// Returns an error only if git cannot be run in `repo`.
pub fn remote_branch_exists(git: &GitRunner, repo: &RepoRef, branch: &str) -> SubgitResult<bool> {
    git.succeeds(repo, &["ls-remote", "--exit-code", "--heads", ORIGIN, branch])
}

/// Whether tracked files are modified or anything is staged.
///
/// Untracked files alone do not count; `stash push` would not take them.
/// Neither do submodules, which are stashed as targets of their own.
///
/// # Errors
///
/// Returns a `GitError` if `status` fails.
pub fn has_tracked_changes(git: &GitRunner, repo: &RepoRef) -> SubgitResult<bool> {
    let status = git.capture(
        repo,
        &["status", "--porcelain", "--untracked-files=no", "--ignore-submodules=all"],
    )?;
    Ok(!status.is_empty())
}

/// Whether the index differs from HEAD.
///
/// # Errors
///
/// Returns an error only if git cannot be run in `repo`.
pub fn has_staged_changes(git: &GitRunner, repo: &RepoRef) -> SubgitResult<bool> {
    Ok(!git.succeeds(repo, &["diff", "--cached", "--quiet"])?)
}

/// `git status --short` lines.
///
/// # Errors
///
/// Returns a `GitError` if `status` fails.
pub fn short_status(git: &GitRunner, repo: &RepoRef) -> SubgitResult<Vec<String>> {
    let out = git.capture(repo, &["status", "--short"])?;
    Ok(out.lines().map(str::to_string).collect())
}

/// Commits `(behind, ahead)` relative to the upstream.
///
/// # Errors
///
/// Returns `GitError::UnexpectedOutput` if `rev-list` prints something other
/// than two counts.
pub fn ahead_behind(git: &GitRunner, repo: &RepoRef) -> SubgitResult<(u32, u32)> {
    let out = git.capture(repo, &["rev-list", "--left-right", "--count", "@{u}...HEAD"])?;
    parse_counts(&out).ok_or_else(|| {
        GitError::UnexpectedOutput {
            command: "git rev-list --left-right --count @{u}...HEAD".to_string(),
            output: out,
        }
        .into()
    })
}

pub(crate) fn parse_counts(out: &str) -> Option<(u32, u32)> {
    let mut parts = out.split_whitespace();
    let behind = parts.next()?.parse().ok()?;
    let ahead = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((behind, ahead))
}

/// Number of stash entries.
///
/// # Errors
///
/// Returns a `GitError` if `stash list` fails.
pub fn stash_count(git: &GitRunner, repo: &RepoRef) -> SubgitResult<usize> {
    Ok(git.capture(repo, &["stash", "list"])?.lines().count())
}

/// Paths with unmerged index entries.
///
/// # Errors
///
/// Returns a `GitError` if `diff` fails.
pub fn conflicted_paths(git: &GitRunner, repo: &RepoRef) -> SubgitResult<Vec<String>> {
    let out = git.capture(repo, &["diff", "--name-only", "--diff-filter=U"])?;
    Ok(out
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Commit recorded for the gitlink at `path` in `treeish` (`HEAD`, `MERGE_HEAD`).
///
/// Returns `None` if the tree has no gitlink at that path.
///
/// # Errors
///
/// Returns a `GitError` if `ls-tree` fails.
pub fn gitlink_commit(
    git: &GitRunner,
    repo: &RepoRef,
    treeish: &str,
    path: &str,
) -> SubgitResult<Option<String>> {
    let out = git.capture(repo, &["ls-tree", treeish, "--", path])?;
    Ok(parse_gitlink(&out))
}

/// Parse `160000 commit <sha>\t<path>`.
pub(crate) fn parse_gitlink(out: &str) -> Option<String> {
    let line = out.lines().next()?;
    let (meta, _path) = line.split_once('\t')?;
    let mut fields = meta.split_whitespace();
    let mode = fields.next()?;
    let kind = fields.next()?;
    let sha = fields.next()?;
    (mode == "160000" && kind == "commit").then(|| sha.to_string())
}

/// `git log -1 --oneline <commit>`, or `None` if the commit is not present locally.
///
/// # Errors
///
/// Returns an error only if git cannot be run in `repo`.
pub fn one_line_log(git: &GitRunner, repo: &RepoRef, commit: &str) -> SubgitResult<Option<String>> {
    let spec = format!("{commit}^{{commit}}");
    if !git.succeeds(repo, &["cat-file", "-e", &spec])? {
        return Ok(None);
    }
    let line = git.capture(repo, &["log", "-1", "--oneline", commit])?;
    Ok(Some(line))
}

/// Resolve a revision to a full commit id.
///
/// # Errors
///
/// Returns a `GitError` if the revision does not exist.
pub fn resolve_commit(git: &GitRunner, repo: &RepoRef, rev: &str) -> SubgitResult<String> {
    let spec = format!("{rev}^{{commit}}");
    git.capture(repo, &["rev-parse", "--verify", "--quiet", &spec])
}
