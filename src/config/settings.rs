// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persisted toggles in the local settings file.
//!
//! ```text
//! toggle-verbose  → [global] verbose = !effective
//! toggle-dry-run  → [global] dry     = !effective
//! ```
//!
//! Other tables and keys in the file are preserved.

use anyhow::Context;
use std::path::Path;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// A `[global]` boolean that can be flipped from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Verbose,
    DryRun,
}

impl Toggle {
    /// Key under `[global]`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::DryRun => "dry",
        }
    }
}

/// Write `!current` for `toggle` into the settings file at `path`.
///
/// `current` is the effective value after every configuration layer, so the
/// toggle flips what the user actually sees rather than what the file says.
///
/// # Errors
///
/// Returns an error if the file exists but is not valid TOML, if `[global]`
/// is not a table, or if the file cannot be written.
pub fn toggle(path: &Path, toggle: Toggle, current: bool) -> Result<bool> {
    let mut document: toml::Table = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        content.parse().map_err(|e: toml::de::Error| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
    } else {
        toml::Table::new()
    };

    let global = document
        .entry("global")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()))
        .as_table_mut()
        .ok_or_else(|| ConfigError::InvalidValue {
            section: "global".to_string(),
            key: toggle.key().to_string(),
            message: "[global] is not a table".to_string(),
        })?;

    let value = !current;
    global.insert(toggle.key().to_string(), toml::Value::Boolean(value));

    let rendered = toml::to_string(&document).context("failed to render settings")?;
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(file = %path.display(), key = toggle.key(), value, "setting toggled");

    Ok(value)
}
