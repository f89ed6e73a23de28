// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Suggested commit messages.

use tracing::{info, warn};

use super::finish;
use crate::cli::JsonArgs;
use crate::commit_msg::{StagedChanges, Suggestions, classify};
use crate::config::Config;
use crate::error::{PreconditionError, Result, SubgitResult};
use crate::git::{Workspace, query};
use crate::ops::commit;
use crate::prompt::Prompt;

fn suggest(workspace: &Workspace) -> SubgitResult<Option<Suggestions>> {
    let changes = StagedChanges::from_git(workspace.git(), &workspace.base())?;
    classify(&changes)
}

/// Run the generate-commit-message command. Never commits.
///
/// # Errors
///
/// Returns an error if the staged diff cannot be read.
pub fn run_generate_commit_message_command(args: &JsonArgs, workspace: &Workspace) -> Result<()> {
    let suggestions = suggest(workspace)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }
    match suggestions {
        Some(s) => {
            println!("{}", s.primary);
            if let Some(alternative) = &s.alternative {
                println!("alternative: {alternative}");
            }
        }
        None => warn!("nothing staged in the base repository"),
    }
    Ok(())
}

/// Run the smart-commit command: stage if needed, pick or edit a suggested
/// message, commit the base repository.
///
/// # Errors
///
/// Returns an error if nothing ends up staged, the message is invalid, or
/// the commit fails.
pub fn run_smart_commit_command(
    config: &Config,
    workspace: &Workspace,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    let git = workspace.git();
    let base = workspace.base();

    if !query::has_staged_changes(git, &base)?
        && prompt.confirm("Nothing is staged. Stage all changes (git add -A)?", true)?
    {
        git.run(&base, &["add", "-A"])?;
    }
    let Some(suggestions) = suggest(workspace)? else {
        return Err(PreconditionError::NothingStaged {
            repo: base.name().to_string(),
        }
        .into());
    };

    let mut candidates = vec![suggestions.primary.to_string()];
    if let Some(alternative) = &suggestions.alternative {
        candidates.push(alternative.to_string());
    }
    let edit = candidates.len();
    let mut options: Vec<&str> = candidates.iter().map(String::as_str).collect();
    options.extend(["Edit message", "Cancel"]);

    let pick = prompt.choose("Commit message", &options)?;
    let message = match pick {
        i if i < edit => candidates[i].clone(),
        i if i == edit => prompt.ask("Commit message")?,
        _ => {
            info!("commit cancelled");
            return Ok(());
        }
    };

    finish(commit::commit(
        workspace,
        &[base],
        &message,
        config.commit.min_message_len,
    )?)
}
