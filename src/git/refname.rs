// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch and tag name validation.
//!
//! ```text
//! rejected anywhere:  whitespace  ~ ^ : ? * [ \  ..  @{  //  control chars
//! rejected at edges:  leading - or /   trailing / . .lock
//! ```
//!
//! Validation happens before any git command runs.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{SubgitError, SubgitResult, ValidationError};

/// Characters and sequences git refuses anywhere in a ref name.
fn forbidden() -> SubgitResult<&'static Regex> {
    static FORBIDDEN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    FORBIDDEN
        .get_or_init(|| Regex::new(r"[\s~^:?*\[\\\x00-\x1f\x7f]|\.\.|@\{|//"))
        .as_ref()
        .map_err(|e| SubgitError::other(format!("invalid built-in pattern: {e}")))
}

fn validate(kind: &'static str, name: &str) -> SubgitResult<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName { kind }.into());
    }

    let invalid = |reason: &str| ValidationError::InvalidName {
        kind,
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if let Some(found) = forbidden()?.find(name) {
        let shown = found.as_str().escape_debug().to_string();
        return Err(invalid(&format!("contains forbidden sequence '{shown}'")).into());
    }
    if name.starts_with('-') || name.starts_with('/') {
        return Err(invalid("must not start with '-' or '/'").into());
    }
    if name.ends_with('/') || name.ends_with('.') || name.ends_with(".lock") {
        return Err(invalid("must not end with '/', '.' or '.lock'").into());
    }
    if name == "@" || name.split('/').any(|part| part.starts_with('.')) {
        return Err(invalid("path components must not start with '.'").into());
    }
    Ok(())
}

/// A branch name that git will accept as `refs/heads/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    /// Validate `name` as a branch name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` or `ValidationError::InvalidName`.
    pub fn parse(name: &str) -> SubgitResult<Self> {
        validate("branch", name)?;
        Ok(Self(name.to_string()))
    }

    /// `<prefix>/<name>`, validated as a whole.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if either part is empty or the result is invalid.
    pub fn with_prefix(prefix: &str, name: &str) -> SubgitResult<Self> {
        let prefix = prefix.trim_end_matches('/');
        validate("branch prefix", prefix)?;
        validate("branch", name)?;
        Self::parse(&format!("{prefix}/{name}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tag name that git will accept as `refs/tags/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    /// Validate `name` as a tag name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` or `ValidationError::InvalidName`.
    pub fn parse(name: &str) -> SubgitResult<Self> {
        validate("tag", name)?;
        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turn free text into a branch-name component.
///
/// Lowercases, maps whitespace and `_` to `-`, drops characters git rejects,
/// and collapses repeated separators.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        let mapped = if ch.is_whitespace() || ch == '_' {
            '-'
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' || ch == '/' {
            ch.to_ascii_lowercase()
        } else {
            continue;
        };
        let last = slug.chars().last();
        if matches!(mapped, '-' | '.' | '/') && last == Some(mapped) {
            continue;
        }
        slug.push(mapped);
    }
    slug.trim_matches(|c| matches!(c, '-' | '.' | '/')).to_string()
}
