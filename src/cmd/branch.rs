// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch, tag and merge commands.

use tracing::info;

use super::{finish, given_or_ask, plain_targets, scope_kind};
use crate::cli::{CreateBranchArgs, MergeArgs, PrefixedBranchArgs, ScopeArgs, StartBranchArgs, TagArgs};
use crate::config::Config;
use crate::error::{Result, ValidationError};
use crate::git::Workspace;
use crate::git::refname::{BranchName, TagName, slugify};
use crate::ops::{branch, merge};
use crate::prompt::Prompt;
use crate::scope::{self, ScopeKind};

/// Run the create-branch command.
///
/// # Errors
///
/// Returns an error for an invalid or existing branch name, or if any
/// target fails.
pub fn run_create_branch_command(
    args: &CreateBranchArgs,
    workspace: &Workspace,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    let name = BranchName::parse(&args.name)?;
    create(&name, &args.scope, workspace, prompt)
}

/// Run the create-prefixed-branch command.
///
/// # Errors
///
/// Same as [`run_create_branch_command`].
pub fn run_create_prefixed_branch_command(
    args: &PrefixedBranchArgs,
    workspace: &Workspace,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    let name = BranchName::with_prefix(&args.prefix, &args.name)?;
    create(&name, &args.scope, workspace, prompt)
}

/// Run the start-branch command: type from the argument or a menu of the
/// configured prefixes, name asked for and slugified.
///
/// # Errors
///
/// Returns an error for an unknown type, a name that slugifies to nothing,
/// or any create-branch error.
pub fn run_start_branch_command(
    args: &StartBranchArgs,
    config: &Config,
    workspace: &Workspace,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    let prefixes = &config.branches.prefixes;
    let kind = match &args.kind {
        Some(kind) if prefixes.contains(kind) => kind.clone(),
        Some(kind) => return Err(ValidationError::InvalidChoice(kind.clone()).into()),
        None => {
            let options: Vec<&str> = prefixes.iter().map(String::as_str).collect();
            prefixes[prompt.choose("Branch type", &options)?].clone()
        }
    };

    let description = prompt.ask("Short description")?;
    let name = BranchName::with_prefix(&kind, &slugify(&description))?;
    info!(branch = %name, "starting branch");
    create(&name, &ScopeArgs::default(), workspace, prompt)
}

fn create(
    name: &BranchName,
    scope: &ScopeArgs,
    workspace: &Workspace,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    let targets = plain_targets(workspace, prompt, scope, "Create branch in")?;
    finish(branch::create_branch(workspace, &targets, name)?)
}

/// Run the create-tag command.
///
/// # Errors
///
/// Returns an error for an invalid tag name or if any target fails.
pub fn run_create_tag_command(args: &TagArgs, workspace: &Workspace) -> Result<()> {
    let tag = TagName::parse(&args.name)?;
    finish(branch::tag(workspace, &tag)?)
}

/// Run the merge command.
///
/// A submodule scope lets the user pick which submodules to merge.
///
/// # Errors
///
/// Returns an error for an invalid branch name, a self-merge, or if any
/// target fails.
pub fn run_merge_command(args: &MergeArgs, workspace: &Workspace, prompt: &mut dyn Prompt) -> Result<()> {
    let source = given_or_ask(prompt, args.branch.as_deref(), "Branch to merge from origin")?;
    let source = BranchName::parse(&source)?;

    let report = match scope_kind(prompt, &args.scope, "Merge into", &ScopeKind::WITH_STASH)? {
        ScopeKind::AllWithStash => merge::merge_with_stash(workspace, &source, prompt)?,
        ScopeKind::Submodules => {
            let targets = scope::pick_submodules(workspace, prompt, "Submodules to merge into")?;
            merge::merge(workspace, &targets, &source, prompt)?
        }
        kind => {
            let selection = scope::resolve(workspace, prompt, kind)?;
            merge::merge(workspace, &selection.targets, &source, prompt)?
        }
    };
    finish(report)
}
