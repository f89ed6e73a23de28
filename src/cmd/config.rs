// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for subgit.

use std::path::Path;

use crate::config::settings::{Toggle, toggle};
use crate::config::{Config, SETTINGS_FILE};
use crate::error::Result;

/// Display the effective options, then the layers they were merged from.
pub fn run_config_command(config: &Config, layers: &[String]) {
    for line in config.format_options() {
        println!("{line}");
    }
    if !layers.is_empty() {
        println!();
        println!("Loaded from (later wins):");
        for layer in layers {
            println!("  {layer}");
        }
    }
}

/// Flip `toggle` in the settings file of the current directory.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or written.
pub fn run_toggle_command(which: Toggle, config: &Config) -> Result<()> {
    let current = match which {
        Toggle::Verbose => config.global.verbose,
        Toggle::DryRun => config.global.dry,
    };
    let value = toggle(Path::new(SETTINGS_FILE), which, current)?;
    println!("global.{} = {value}", which.key());
    Ok(())
}
