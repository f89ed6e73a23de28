// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                                      |
//!              ,-----------------------+------------------------,
//!              v               v               v                v
//!         scope (menu)    ops (driver)    commit_msg      conflict
//!              |               |          (classifier)    (gitlinks)
//!              +-------+-------+---------------+----------------'
//!                      v
//!   ,-------------------------------------------------,
//!   |  git   runner, queries, stash, submodules, refs |
//!   '-------------------------------------------------'
//!
//!   +-------------------------------------------------+
//!   |  prompt   trait, terminal, scripted answers     |
//!   +-------------------------------------------------+
//!   |  foundation   config, error, logging            |
//!   +-------------------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod commit_msg;
pub mod config;
pub mod conflict;
pub mod error;
pub mod git;
pub mod logging;
pub mod ops;
pub mod prompt;
pub mod scope;
