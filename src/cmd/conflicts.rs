// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::finish;
use crate::conflict;
use crate::error::Result;
use crate::git::Workspace;
use crate::prompt::Prompt;

/// Run the resolve-submodule-conflicts command.
///
/// # Errors
///
/// Returns an error when no merge is in progress or a chosen resolution fails.
pub fn run_resolve_conflicts_command(workspace: &Workspace, prompt: &mut dyn Prompt) -> Result<()> {
    let report = conflict::resolve(workspace, prompt)?;
    if report.outcomes().is_empty() {
        println!("No submodule conflicts.");
        return Ok(());
    }
    finish(report)
}
