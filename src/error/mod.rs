// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!               SubgitError (~24 bytes)
//!                      |
//!   +--------+---------+--------+--------+--------+---------+
//!   v        v         v        v        v        v         v
//! Valid.  Precond.    Git     Config  Process  MultiRepo  Io/Other
//!  Box      Box       Box      Box      Box      Box      Box<str>
//!
//! Validation    bad branch/tag name, missing or short message
//! Precondition  not a repository, no active merge, no upstream
//! Git           git exited non-zero (per-target failure)
//! MultiRepo     aggregate of failed targets, no rollback
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SubgitError`].
pub type SubgitResult<T> = std::result::Result<T, SubgitError>;

/// Top-level error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum SubgitError {
    /// Input was rejected before any git command ran.
    #[error("invalid input: {0}")]
    Validation(#[from] Box<ValidationError>),

    /// A required repository state is missing.
    #[error("precondition failed: {0}")]
    Precondition(#[from] Box<PreconditionError>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// One or more targets of a multi-repository operation failed.
    #[error("{0}")]
    MultiRepo(#[from] Box<MultiRepoFailure>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl SubgitError {
    /// Create a [`SubgitError::Other`] from a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for SubgitError {
                fn from(err: $error) -> Self {
                    SubgitError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ValidationError => Validation,
    PreconditionError => Precondition,
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    MultiRepoFailure => MultiRepo,
    std::io::Error => Io,
}

// --- Validation Errors ---

/// Rejected user input. Never reaches git.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A branch or tag name was empty.
    #[error("{kind} name cannot be empty")]
    EmptyName { kind: &'static str },

    /// A branch or tag name contains forbidden characters.
    #[error("invalid {kind} name '{name}': {reason}")]
    InvalidName {
        kind: &'static str,
        name: String,
        reason: String,
    },

    /// Commit message missing.
    #[error("commit message is required")]
    MissingMessage,

    /// Commit message shorter than the configured minimum.
    #[error("commit message must be at least {min} characters (got {len})")]
    MessageTooShort { min: usize, len: usize },

    /// Branch already exists locally in the base repository.
    #[error("branch '{branch}' already exists in the base repository")]
    BranchExists { branch: String },

    /// Attempt to merge a branch into itself.
    #[error("cannot merge '{branch}' into itself")]
    SameBranch { branch: String },

    /// Menu answer outside the offered range.
    #[error("invalid choice '{0}'")]
    InvalidChoice(String),

    /// User declined to continue.
    #[error("cancelled")]
    Cancelled,
}

// --- Precondition Errors ---

/// Missing repository state required by an operation.
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// Directory is not the root of a git work tree.
    #[error("not a git repository: {path}")]
    NotARepository { path: String },

    /// Conflict resolution invoked outside a merge.
    #[error("no active merge (MERGE_HEAD not found)")]
    NoActiveMerge,

    /// Current branch has no upstream configured.
    #[error("branch '{branch}' has no upstream; run: {remediation}")]
    NoUpstream { branch: String, remediation: String },

    /// HEAD is detached where a branch is required.
    #[error("HEAD is detached in {repo}")]
    DetachedHead { repo: String },

    /// Folder given in a scope selection does not exist.
    #[error("folder does not exist: {0}")]
    FolderNotFound(String),

    /// Scope resolved to zero repositories.
    #[error("no repositories selected for {scope}")]
    NoTargets { scope: String },

    /// Nothing staged for a commit that requires staged changes.
    #[error("nothing staged in {repo}")]
    NothingStaged { repo: String },
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command exited non-zero.
    #[error("`{command}` failed in {repo}{}", format_code(*.code))]
    CommandFailed {
        command: String,
        repo: String,
        code: Option<i32>,
        message: String,
    },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Git printed something we could not parse.
    #[error("unexpected output from `{command}`: {output}")]
    UnexpectedOutput { command: String, output: String },

    /// `stash pop` could not apply cleanly; the stash entry is kept.
    #[error("stash {stash} could not be applied in {repo}; resolve manually")]
    StashConflict { repo: String, stash: String },
}

fn format_code(code: Option<i32>) -> String {
    code.map_or_else(String::new, |c| format!(" (exit code {c})"))
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Multi-repository failures ---

/// Aggregate failure of a multi-repository operation.
///
/// Targets that succeeded keep their changes; there is no rollback.
#[derive(Debug, Error)]
#[error("{operation} failed in: {}", failed.join(", "))]
pub struct MultiRepoFailure {
    pub operation: String,
    pub failed: Vec<String>,
}
