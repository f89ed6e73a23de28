// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> ops / commit_msg / conflict
//!   repo       checkout, pull, push, add, commit, status
//!   branch     create-branch, create-prefixed-branch, create-tag, start-branch, merge
//!   message    generate-commit-message, smart-commit
//!   conflicts  resolve-submodule-conflicts
//!   report     status-report
//!   config     config, toggle-verbose, toggle-dry-run
//! ```
//!
//! Handlers print results to stdout; diagnostics go through `tracing`.

pub mod branch;
pub mod config;
pub mod conflicts;
pub mod message;
pub mod report;
pub mod repo;


use anyhow::Context;

use crate::cli::ScopeArgs;
use crate::config::Config;
use crate::error::{Result, SubgitResult, ValidationError};
use crate::git::{GitRunner, Workspace};
use crate::ops::Report;
use crate::prompt::Prompt;
use crate::scope::{self, ScopeKind};

/// Locate git and the repository containing the current directory.
///
/// # Errors
///
/// Returns an error if git is not installed or the current directory is not
/// inside a work tree.
pub fn open_workspace(config: &Config) -> Result<Workspace> {
    let git = GitRunner::locate(config.global.dry)?;
    let cwd = std::env::current_dir().context("cannot read the current directory")?;
    Ok(Workspace::discover(git, &cwd, &config.submodules.default_paths)?)
}

/// Scope from `--scope`, or asked for from `offered`.
pub(crate) fn scope_kind(
    prompt: &mut dyn Prompt,
    args: &ScopeArgs,
    title: &str,
    offered: &[ScopeKind],
) -> SubgitResult<ScopeKind> {
    let Some(arg) = args.scope else {
        return scope::choose(prompt, title, offered);
    };
    let kind = ScopeKind::from(arg);
    if offered.contains(&kind) {
        Ok(kind)
    } else {
        Err(ValidationError::InvalidChoice(format!("scope '{kind}' is not available here")).into())
    }
}

/// Resolved targets for a command without stash handling.
pub(crate) fn plain_targets(
    workspace: &Workspace,
    prompt: &mut dyn Prompt,
    args: &ScopeArgs,
    title: &str,
) -> SubgitResult<Vec<crate::git::RepoRef>> {
    let kind = scope_kind(prompt, args, title, &ScopeKind::PLAIN)?;
    Ok(scope::resolve(workspace, prompt, kind)?.targets)
}

/// Print the per-target summary and fail if any target failed.
pub(crate) fn finish(report: Report) -> Result<()> {
    for line in report.summary_lines() {
        println!("{line}");
    }
    report.into_result()?;
    Ok(())
}

/// Use `given` or ask `question`.
pub(crate) fn given_or_ask(
    prompt: &mut dyn Prompt,
    given: Option<&str>,
    question: &str,
) -> SubgitResult<String> {
    match given {
        Some(value) => Ok(value.to_string()),
        None => prompt.ask(question),
    }
}
