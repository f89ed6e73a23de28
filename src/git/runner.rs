// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command execution.
//!
//! ```text
//!   run(repo, args)      mutating; inherits stdio; skipped in dry-run
//!   capture(repo, args)  read-only; stdout as String
//!   succeeds(repo, args) read-only; exit status as bool
//!             |
//!             v
//!     ensure_repository()  (not a repo => PreconditionError, nothing spawned)
//!             |
//!             v
//!     Command::new(git)  current_dir = repo.path()
//! ```

use bon::Builder;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, error, info, trace};

use super::RepoRef;
use super::backend::{GitQuery, GixBackend};
use crate::error::{GitError, PreconditionError, ProcessError, SubgitResult};

/// Executes git subcommands against a repository working directory.
///
/// Constructed once from configuration and shared by every component, so
/// the dry-run toggle is explicit state instead of a global.
#[derive(Debug, Clone, Builder)]
pub struct GitRunner {
    #[builder(default)]
    dry_run: bool,
    #[builder(into, default = PathBuf::from("git"))]
    program: PathBuf,
}

impl GitRunner {
    /// Resolve `git` from `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if git is not installed.
    pub fn locate(dry_run: bool) -> SubgitResult<Self> {
        let program = which::which("git").map_err(|_| ProcessError::ExecutableNotFound {
            name: "git".to_string(),
        })?;
        debug!(git = %program.display(), dry_run, "git located");
        Ok(Self::builder().program(program).dry_run(dry_run).build())
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Run a mutating command with the process's stdio.
    ///
    /// In dry-run mode the command is logged and reported as successful.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionError::NotARepository` before spawning anything if
    /// `repo` is not a work tree, `ProcessError::SpawnFailed` if git cannot be
    /// started, and `GitError::CommandFailed` on a non-zero exit.
    pub fn run(&self, repo: &RepoRef, args: &[&str]) -> SubgitResult<()> {
        Self::ensure_repository(repo)?;
        let cmd_line = command_line(args);

        if self.dry_run {
            info!(repo = %repo, "[dry-run] {cmd_line}");
            return Ok(());
        }

        debug!(repo = %repo, cmd = %cmd_line, "exec");
        let status = self
            .command(repo.path(), args)
            .status()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }

        error!(repo = %repo, cmd = %cmd_line, code = ?status.code(), "git command failed");
        Err(GitError::CommandFailed {
            command: cmd_line,
            repo: repo.name().to_string(),
            code: status.code(),
            message: String::new(),
        }
        .into())
    }

    /// Run a read-only command and return its stdout without trailing whitespace.
    ///
    /// Executes even in dry-run mode.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GitRunner::run`]; the error message carries stderr.
    pub fn capture(&self, repo: &RepoRef, args: &[&str]) -> SubgitResult<String> {
        Self::ensure_repository(repo)?;
        let cmd_line = command_line(args);
        trace!(repo = %repo, cmd = %cmd_line, "capture");

        let output = self
            .command(repo.path(), args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(repo = %repo, cmd = %cmd_line, stderr = %message, "query failed");
            return Err(GitError::CommandFailed {
                command: cmd_line,
                repo: repo.name().to_string(),
                code: output.status.code(),
                message,
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    /// Run a read-only command and report whether it exited with status 0.
    ///
    /// # Errors
    ///
    /// Returns an error only if `repo` is not a work tree or git cannot be spawned.
    pub fn succeeds(&self, repo: &RepoRef, args: &[&str]) -> SubgitResult<bool> {
        Self::ensure_repository(repo)?;
        let cmd_line = command_line(args);
        let status = self
            .command(repo.path(), args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;
        trace!(repo = %repo, cmd = %cmd_line, ok = status.success(), "check");
        Ok(status.success())
    }

    /// Fail before spawning anything if `repo` is not a git work tree.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionError::NotARepository`.
    pub fn ensure_repository(repo: &RepoRef) -> SubgitResult<()> {
        if repo.path().is_dir() && GixBackend::is_git_repo(repo.path()) {
            Ok(())
        } else {
            Err(PreconditionError::NotARepository {
                path: repo.path().display().to_string(),
            }
            .into())
        }
    }

    fn command(&self, cwd: &Path, args: &[&str]) -> Command {
        let mut command = Command::new(&self.program);
        command.args(args).current_dir(cwd);
        command
    }
}

/// Render `git <args>` for logs, quoting arguments that contain spaces.
pub(crate) fn command_line(args: &[&str]) -> String {
    let mut cmd = String::from("git");
    for arg in args {
        if arg.contains(' ') {
            let _ = write!(cmd, " \"{arg}\"");
        } else {
            let _ = write!(cmd, " {arg}");
        }
    }
    cmd
}
