// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git access layer.
//!
//! ```text
//!        ops / conflict / commit_msg
//!           |            |
//!           v            v
//!      stash.rs     workspace.rs --> submodules.rs
//!           \          /
//!            v        v
//!   query.rs (CLI reads)   refname.rs
//!            |
//!            v
//!   ,-----------------------,
//!   |  runner (GitRunner)   |  run / capture / succeeds
//!   |  dry-run aware writes |
//!   '-----------+-----------'
//!               |
//!       backend (GitQuery)
//!       GixBackend: is_repo, root, branch, merge state
//! ```
//!
//! Every command is an argument list executed with the target repository as
//! its working directory; the process never changes its own cwd.

pub mod backend;
pub mod query;
pub mod refname;
pub mod repo;
pub mod runner;
pub mod stash;
pub mod submodules;
pub mod workspace;

pub use repo::RepoRef;
pub use runner::GitRunner;
pub use workspace::Workspace;

/// Remote every operation talks to.
pub const ORIGIN: &str = "origin";
