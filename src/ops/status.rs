// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only status views.

use serde::Serialize;
use std::fmt::Write as _;
use tracing::warn;

use crate::error::SubgitResult;
use crate::git::{RepoRef, Workspace, query};

/// `git status --short` of one repository.
#[derive(Debug, Clone, Serialize)]
pub struct RepoStatus {
    pub repo: RepoRef,
    /// `None` when HEAD is detached.
    pub branch: Option<String>,
    pub lines: Vec<String>,
}

impl RepoStatus {
    /// Header line plus indented status lines.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!(
            "{} [{}]",
            self.repo.name(),
            self.branch.as_deref().unwrap_or("detached")
        );
        if self.lines.is_empty() {
            out.push_str("\n  clean");
        }
        for line in &self.lines {
            let _ = write!(out, "\n  {line}");
        }
        out
    }
}

/// Branch and short status of every target.
///
/// # Errors
///
/// Returns an error if a target is not a repository.
pub fn status(workspace: &Workspace, targets: &[RepoRef]) -> SubgitResult<Vec<RepoStatus>> {
    targets
        .iter()
        .map(|repo| {
            Ok(RepoStatus {
                repo: repo.clone(),
                branch: query::current_branch(repo)?,
                lines: query::short_status(workspace.git(), repo)?,
            })
        })
        .collect()
}

/// One row of the status report.
#[derive(Debug, Clone, Serialize)]
pub struct StatusRow {
    pub name: String,
    pub path: String,
    pub branch: Option<String>,
    pub upstream: Option<String>,
    /// Commits on HEAD not on the upstream.
    pub ahead: Option<u32>,
    /// Commits on the upstream not on HEAD.
    pub behind: Option<u32>,
    /// Entries in `git status --short`.
    pub changes: usize,
    pub stashes: usize,
}

/// Summary of the base repository and every submodule.
///
/// Ahead and behind counts are `None` when the upstream branch no longer
/// exists.
///
/// # Errors
///
/// Returns an error if a repository cannot be queried.
pub fn status_report(workspace: &Workspace) -> SubgitResult<Vec<StatusRow>> {
    let git = workspace.git();
    workspace
        .all()?
        .iter()
        .map(|repo| {
            let upstream = query::upstream(git, repo)?;
            let (behind, ahead) = match upstream {
                Some(_) => match query::ahead_behind(git, repo) {
                    Ok((behind, ahead)) => (Some(behind), Some(ahead)),
                    Err(e) => {
                        warn!(repo = %repo, error = %e, "upstream unavailable");
                        (None, None)
                    }
                },
                None => (None, None),
            };
            Ok(StatusRow {
                name: repo.name().to_string(),
                path: repo.rel_path().display().to_string(),
                branch: query::current_branch(repo)?,
                upstream,
                ahead,
                behind,
                changes: query::short_status(git, repo)?.len(),
                stashes: query::stash_count(git, repo)?,
            })
        })
        .collect()
}

/// Render report rows as an aligned text table.
#[must_use]
pub fn render_table(rows: &[StatusRow]) -> String {
    let headers = ["REPO", "BRANCH", "UPSTREAM", "AHEAD", "BEHIND", "CHANGES", "STASHES"];
    let cells: Vec<[String; 7]> = rows
        .iter()
        .map(|row| {
            let count = |n: Option<u32>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
            [
                row.name.clone(),
                row.branch.clone().unwrap_or_else(|| "(detached)".to_string()),
                row.upstream.clone().unwrap_or_else(|| "-".to_string()),
                count(row.ahead),
                count(row.behind),
                row.changes.to_string(),
                row.stashes.to_string(),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let mut line = |fields: &[&str]| {
        let rendered: Vec<String> = fields
            .iter()
            .zip(widths)
            .map(|(field, width)| format!("{field:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", rendered.join("  ").trim_end());
    };
    line(&headers);
    for row in &cells {
        let fields: Vec<&str> = row.iter().map(String::as_str).collect();
        line(&fields);
    }
    out
}
