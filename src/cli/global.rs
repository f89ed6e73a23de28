// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional settings files (can repeat)
//! --dry-run         ← Log mutating git commands instead of running them
//! --verbose         ← Log every git invocation
//! --quiet           ← Only log what changed
//! --log-level N     ← Console verbosity (0-5), overrides --verbose/--quiet
//! --log-file FILE   ← Also log to FILE
//!
//! Precedence: CLI flags > SUBGIT_* env > --config > subgit.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Additional TOML settings file(s), loaded after `subgit.toml`.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true, action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Log mutating git commands instead of running them.
    #[arg(short = 'n', long = "dry-run", global = true)]
    pub dry_run: bool,

    /// Log every git invocation.
    #[arg(short = 'v', long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log only outcomes, not every git invocation.
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true,
          value_parser = clap::value_parser!(u8).range(0..=5))]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Command-line flags as `(key, value)` configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides = Vec::new();

        if self.dry_run {
            overrides.push(("global.dry", true.into()));
        }
        if self.verbose {
            overrides.push(("global.verbose", true.into()));
        }
        if self.quiet {
            overrides.push(("global.verbose", false.into()));
        }
        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file", path.display().to_string().into()));
        }

        overrides
    }
}
