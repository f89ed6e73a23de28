// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! defaults < subgit.toml (optional) < --config FILE... < SUBGIT_* env < set()
//!
//! SUBGIT_GLOBAL__DRY=true                   -> global.dry
//! SUBGIT_COMMIT__MIN_MESSAGE_LEN=5          -> commit.min_message_len
//! SUBGIT_SUBMODULES__DEFAULT_PATHS=a/b,c/d  -> submodules.default_paths
//! ```
//!
//! Sections and keys are separated by a double underscore because keys
//! themselves contain single underscores.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::Result;

/// Keys whose environment value is a comma-separated list.
const ENV_LIST_KEYS: [&str; 2] = ["submodules.default_paths", "branches.prefixes"];

/// A source that contributed to the configuration, in load order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Layer {
    File { path: PathBuf, required: bool },
    Inline,
    Env { prefix: String },
}

/// Builder collecting configuration layers; later layers win.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    layers: Vec<Layer>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            layers: Vec::new(),
        }
    }

    /// Add a TOML file that must exist.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Add a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), false)
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        if required || path.exists() {
            self.layers.push(Layer::File {
                path: path.to_path_buf(),
                required,
            });
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.layers.push(Layer::Inline);
        self
    }

    /// Read `<PREFIX>_<SECTION>__<KEY>` variables at build time.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self.layers.push(Layer::Env {
            prefix: prefix.to_string(),
        });
        self
    }

    /// Override `key` after every other layer.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is not a valid configuration path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("invalid override {key}: {e}"))?;
        Ok(self)
    }

    /// One line per contributing layer, in load order.
    #[must_use]
    pub fn describe_layers(&self) -> Vec<String> {
        self.layers
            .iter()
            .map(|layer| match layer {
                Layer::File { path, required: true } => format!("file      {}", path.display()),
                Layer::File { path, required: false } => format!("settings  {}", path.display()),
                Layer::Inline => "inline    <string>".to_string(),
                Layer::Env { prefix } => format!("env       {prefix}_*"),
            })
            .collect()
    }

    /// Merge every layer and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a file is not valid
    /// TOML, a key is unknown, a value has the wrong type or the merged
    /// configuration fails [`Config::validate`].
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(environment(prefix)),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment source for `prefix`.
pub(crate) fn environment(prefix: &str) -> Environment {
    ENV_LIST_KEYS.into_iter().fold(
        Environment::with_prefix(prefix)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(","),
        Environment::with_list_parse_key,
    )
}
