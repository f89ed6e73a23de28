// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for subgit using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! subgit [global options] <command>
//!   checkout [BRANCH] [--scope S]        pull [--scope S]      push [--scope S]
//!   add [--scope S]                      commit [-m MSG] [--scope S]
//!   status [--scope S]                   status-report [--json]
//!   create-branch NAME [--scope S]       create-prefixed-branch PREFIX NAME [--scope S]
//!   create-tag NAME                      start-branch [TYPE]
//!   merge [BRANCH] [--scope S]           resolve-submodule-conflicts
//!   generate-commit-message [--json]     smart-commit
//!   toggle-verbose                       toggle-dry-run
//!   config
//! ```
//!
//! Without `--scope` the target repositories are asked for interactively.

pub mod global;

#[cfg(test)]
mod tests;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::cli::global::GlobalOptions;
use crate::scope::ScopeKind;

/// Git orchestration across a repository and its submodules.
#[derive(Debug, Parser)]
#[command(
    name = "subgit",
    author,
    version,
    about = "Git orchestration across a repository and its submodules",
    long_about = "subgit Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs checkout, pull, push, commit, branch, tag and merge\n\
                  uniformly across a base repository and its submodules.",
    after_help = "SETTINGS:\n\n\
                  subgit reads `subgit.toml` in the current directory if present,\n\
                  then every --config file, then SUBGIT_* environment variables\n\
                  (SUBGIT_GLOBAL_DRY, SUBGIT_GLOBAL_VERBOSE). Command-line flags\n\
                  override all of them."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Switches branch, then pulls.
    Checkout(CheckoutArgs),

    /// Pulls the current branch.
    Pull(ScopeArgs),

    /// Pushes the current branch, setting the upstream when missing.
    Push(ScopeArgs),

    /// Stages all changes (`git add -A`).
    Add(ScopeArgs),

    /// Commits the base repository first, then the others.
    Commit(CommitArgs),

    /// Shows branch and short status.
    Status(ScopeArgs),

    /// Creates a branch, refusing names that exist in the base repository.
    CreateBranch(CreateBranchArgs),

    /// Creates `<prefix>/<name>`.
    CreatePrefixedBranch(PrefixedBranchArgs),

    /// Creates a tag everywhere and pushes it.
    CreateTag(TagArgs),

    /// Merges `origin/<branch>` into the current branches.
    Merge(MergeArgs),

    /// Picks a branch type and name, then creates the branch.
    StartBranch(StartBranchArgs),

    /// Suggests a conventional commit message for the staged changes.
    GenerateCommitMessage(JsonArgs),

    /// Commits the base repository with a suggested message.
    SmartCommit,

    /// Resolves submodule pointer conflicts of the merge in progress.
    ResolveSubmoduleConflicts,

    /// Branch, upstream, ahead/behind, changes and stashes of every repository.
    StatusReport(JsonArgs),

    /// Flips `global.verbose` in the local settings file.
    ToggleVerbose,

    /// Flips `global.dry` in the local settings file.
    ToggleDryRun,

    /// Lists the effective configuration.
    Config,
}

/// Target scope given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    Base,
    Submodules,
    Folders,
    All,
    AllWithStash,
}

impl From<ScopeArg> for ScopeKind {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Base => Self::Base,
            ScopeArg::Submodules => Self::Submodules,
            ScopeArg::Folders => Self::Folders,
            ScopeArg::All => Self::All,
            ScopeArg::AllWithStash => Self::AllWithStash,
        }
    }
}

/// Scope selection; asked interactively when omitted.
#[derive(Debug, Clone, Default, Args)]
pub struct ScopeArgs {
    /// Repositories to act on.
    #[arg(short = 's', long, value_enum)]
    pub scope: Option<ScopeArg>,
}

#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    /// Branch to switch to; asked for when omitted.
    pub branch: Option<String>,

    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// Commit message; asked for when omitted.
    #[arg(short = 'm', long)]
    pub message: Option<String>,

    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Debug, Clone, Args)]
pub struct CreateBranchArgs {
    /// Branch name.
    pub name: String,

    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PrefixedBranchArgs {
    /// Branch type, e.g. `feature`.
    pub prefix: String,

    /// Branch name below the prefix.
    pub name: String,

    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Debug, Clone, Args)]
pub struct TagArgs {
    /// Tag name.
    pub name: String,
}

#[derive(Debug, Clone, Args)]
pub struct MergeArgs {
    /// Branch on `origin` to merge; asked for when omitted.
    pub branch: Option<String>,

    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(Debug, Clone, Args)]
pub struct StartBranchArgs {
    /// Branch type (one of `branches.prefixes`); asked for when omitted.
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct JsonArgs {
    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
