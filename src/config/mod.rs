// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. subgit.toml (cwd)
//! 3. --config FILE (repeatable)
//! 4. SUBGIT_* env vars
//! 5. CLI flags (--dry-run, --verbose, --quiet)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SUBGIT_GLOBAL_DRY=true      → global.dry = true
//! SUBGIT_GLOBAL_VERBOSE=false → global.verbose = false
//! ```

pub mod loader;
pub mod settings;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};
use crate::git::refname::BranchName;

use loader::ConfigLoader;
use types::{BranchesConfig, CommitConfig, GlobalConfig, SubmodulesConfig};

/// Name of the per-directory settings file.
pub const SETTINGS_FILE: &str = "subgit.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "SUBGIT";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Submodule discovery.
    pub submodules: SubmodulesConfig,
    /// Commit settings.
    pub commit: CommitConfig,
    /// Branch naming.
    pub branches: BranchesConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use subgit::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("subgit.toml")
    ///     .with_env_prefix("SUBGIT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Reject values no command could work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero minimum message length or
    /// a branch prefix that is not a valid ref component.
    pub fn validate(&self) -> Result<()> {
        if self.commit.min_message_len == 0 {
            return Err(ConfigError::InvalidValue {
                section: "commit".to_string(),
                key: "min_message_len".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        for prefix in &self.branches.prefixes {
            if BranchName::parse(prefix).is_err() || prefix.contains('/') {
                return Err(ConfigError::InvalidValue {
                    section: "branches".to_string(),
                    key: "prefixes".to_string(),
                    message: format!("'{prefix}' is not a valid branch prefix"),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Format configuration options for display, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("global.verbose", self.global.verbose.to_string());
        options.insert("global.dry", self.global.dry.to_string());
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "submodules.default_paths",
            self.submodules.default_paths.join(", "),
        );
        options.insert(
            "commit.min_message_len",
            self.commit.min_message_len.to_string(),
        );
        options.insert("branches.prefixes", self.branches.prefixes.join(", "));

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
