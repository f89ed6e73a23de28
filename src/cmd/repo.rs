// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! checkout, pull, push, add, commit and status.

use super::{finish, given_or_ask, plain_targets, scope_kind};
use crate::cli::{CheckoutArgs, CommitArgs, ScopeArgs};
use crate::config::Config;
use crate::error::Result;
use crate::git::Workspace;
use crate::git::refname::BranchName;
use crate::ops::{checkout, commit, status, sync};
use crate::prompt::Prompt;
use crate::scope::{self, ScopeKind};

/// Run the checkout command.
///
/// # Errors
///
/// Returns an error for an invalid branch name, an empty scope, or if any
/// target fails.
pub fn run_checkout_command(
    args: &CheckoutArgs,
    workspace: &Workspace,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    let branch = given_or_ask(prompt, args.branch.as_deref(), "Branch to check out")?;
    let branch = BranchName::parse(&branch)?;

    let kind = scope_kind(prompt, &args.scope, "Check out in", &ScopeKind::WITH_STASH)?;
    let report = if kind.stashes() {
        checkout::checkout_with_stash(workspace, &branch)?
    } else {
        let selection = scope::resolve(workspace, prompt, kind)?;
        checkout::checkout(workspace, &selection.targets, &branch)?
    };
    finish(report)
}

/// Run the pull command.
///
/// # Errors
///
/// Returns an error if the base repository has no upstream or any target fails.
pub fn run_pull_command(args: &ScopeArgs, workspace: &Workspace, prompt: &mut dyn Prompt) -> Result<()> {
    let targets = plain_targets(workspace, prompt, args, "Pull in")?;
    finish(sync::pull(workspace, &targets)?)
}

/// Run the push command.
///
/// # Errors
///
/// Returns an error if any target fails.
pub fn run_push_command(args: &ScopeArgs, workspace: &Workspace, prompt: &mut dyn Prompt) -> Result<()> {
    let targets = plain_targets(workspace, prompt, args, "Push from")?;
    finish(sync::push(workspace, &targets)?)
}

/// Run the add command.
///
/// # Errors
///
/// Returns an error if any target fails.
pub fn run_add_command(args: &ScopeArgs, workspace: &Workspace, prompt: &mut dyn Prompt) -> Result<()> {
    let targets = plain_targets(workspace, prompt, args, "Stage changes in")?;
    finish(commit::add(workspace, &targets)?)
}

/// Run the commit command.
///
/// The message is validated before the scope is asked for.
///
/// # Errors
///
/// Returns an error for a missing or short message, or if any target fails.
pub fn run_commit_command(
    args: &CommitArgs,
    config: &Config,
    workspace: &Workspace,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    let message = given_or_ask(prompt, args.message.as_deref(), "Commit message")?;
    let min_len = config.commit.min_message_len;
    let message = commit::validate_message(&message, min_len)?;

    let targets = plain_targets(workspace, prompt, &args.scope, "Commit in")?;
    finish(commit::commit(workspace, &targets, message, min_len)?)
}

/// Run the status command.
///
/// # Errors
///
/// Returns an error if a target cannot be queried.
pub fn run_status_command(args: &ScopeArgs, workspace: &Workspace, prompt: &mut dyn Prompt) -> Result<()> {
    let targets = plain_targets(workspace, prompt, args, "Status of")?;
    for repo in status::status(workspace, &targets)? {
        println!("{}", repo.render());
    }
    Ok(())
}
