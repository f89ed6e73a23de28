// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::JsonArgs;
use crate::error::Result;
use crate::git::Workspace;
use crate::ops::status::{render_table, status_report};

/// Run the status-report command.
///
/// # Errors
///
/// Returns an error if a repository cannot be queried.
pub fn run_status_report_command(args: &JsonArgs, workspace: &Workspace) -> Result<()> {
    let rows = status_report(workspace)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render_table(&rows));
    }
    Ok(())
}
