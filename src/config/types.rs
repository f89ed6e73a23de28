// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: GlobalConfig, SubmodulesConfig, CommitConfig, BranchesConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log every git invocation (console level DEBUG instead of INFO).
    pub verbose: bool,
    /// Log mutating git commands instead of running them.
    pub dry: bool,
    /// Optional log file, written at TRACE level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            verbose: true,
            dry: false,
            log_file: None,
        }
    }
}

/// Submodule discovery settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmodulesConfig {
    /// Paths used when `git submodule status --recursive` cannot run.
    pub default_paths: Vec<String>,
}

/// Commit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommitConfig {
    /// Shortest accepted commit message (after trimming).
    pub min_message_len: usize,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self { min_message_len: 3 }
    }
}

/// Branch naming settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BranchesConfig {
    /// Branch types offered by `start-branch`.
    pub prefixes: Vec<String>,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        Self {
            prefixes: ["feature", "bugfix", "hotfix", "release", "chore", "docs"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
