// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive Scope Selector.
//!
//! ```text
//!   menu choice            targets
//!   -----------------      --------------------------------------
//!   Base                   [base]
//!   Submodules             [every initialized submodule]  (none => error)
//!   Folders                [each listed dir that exists]  (none => error)
//!   All                    [base, submodules...]
//!   AllWithStash           [base, submodules...] + stash handling
//! ```

use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::error::{PreconditionError, SubgitResult};
use crate::git::{GitRunner, RepoRef, Workspace};
use crate::prompt::Prompt;

/// Which repositories an operation should act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScopeKind {
    Base,
    Submodules,
    Folders,
    All,
    AllWithStash,
}

impl ScopeKind {
    /// Menu offered by checkout and merge.
    pub const WITH_STASH: [Self; 5] = [
        Self::Base,
        Self::Submodules,
        Self::Folders,
        Self::All,
        Self::AllWithStash,
    ];

    /// Menu offered by operations without stash handling.
    pub const PLAIN: [Self; 4] = [Self::Base, Self::Submodules, Self::Folders, Self::All];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Base => "Base repository",
            Self::Submodules => "Submodule repositories",
            Self::Folders => "Specific folders",
            Self::All => "All (base + submodules)",
            Self::AllWithStash => "All, stashing uncommitted changes",
        }
    }

    #[must_use]
    pub const fn stashes(self) -> bool {
        matches!(self, Self::AllWithStash)
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved scope: the choice and the concrete target list.
#[derive(Debug, Clone)]
pub struct Selection {
    pub kind: ScopeKind,
    pub targets: Vec<RepoRef>,
}

/// Ask which scope to use, then resolve it.
///
/// # Errors
///
/// Returns a `ValidationError` for an invalid menu answer and a
/// `PreconditionError` if the scope resolves to no repositories.
pub fn select(
    workspace: &Workspace,
    prompt: &mut dyn Prompt,
    title: &str,
    offered: &[ScopeKind],
) -> SubgitResult<Selection> {
    let kind = choose(prompt, title, offered)?;
    resolve(workspace, prompt, kind)
}

/// Ask which of `offered` to use.
///
/// # Errors
///
/// Returns a `ValidationError` for an invalid menu answer.
pub fn choose(prompt: &mut dyn Prompt, title: &str, offered: &[ScopeKind]) -> SubgitResult<ScopeKind> {
    let labels: Vec<&str> = offered.iter().map(|k| k.label()).collect();
    Ok(offered[prompt.choose(title, &labels)?])
}

/// Resolve `kind` into targets; asks for the folder list when needed.
///
/// # Errors
///
/// Returns `PreconditionError::NoTargets` if the scope is empty.
pub fn resolve(
    workspace: &Workspace,
    prompt: &mut dyn Prompt,
    kind: ScopeKind,
) -> SubgitResult<Selection> {
    let targets = match kind {
        ScopeKind::Base => vec![workspace.base()],
        ScopeKind::Submodules => {
            let subs = workspace.submodules()?;
            if subs.is_empty() {
                warn!("no submodules found");
                return Err(no_targets(kind));
            }
            subs
        }
        ScopeKind::Folders => {
            let answer = prompt.ask("Folders (space separated)")?;
            folders(workspace, &answer)?
        }
        ScopeKind::All | ScopeKind::AllWithStash => workspace.all()?,
    };
    info!(scope = %kind, count = targets.len(), "targets selected");
    Ok(Selection { kind, targets })
}

/// Targets for a whitespace-separated folder list relative to the base root.
///
/// Missing directories and directories that are not repositories of their
/// own (an uninitialized submodule, a plain subfolder) are logged and skipped.
///
/// # Errors
///
/// Returns `PreconditionError::NoTargets` if none of the folders is a repository.
pub fn folders(workspace: &Workspace, input: &str) -> SubgitResult<Vec<RepoRef>> {
    let root = workspace.root();
    let mut targets: Vec<RepoRef> = Vec::new();
    for folder in input.split_whitespace() {
        let folder = folder.trim_end_matches('/');
        if !root.join(folder).is_dir() {
            warn!(folder, "{}", PreconditionError::FolderNotFound(folder.to_string()));
            continue;
        }
        let repo = if folder == "." || folder.is_empty() {
            workspace.base()
        } else {
            RepoRef::submodule(root, folder)
        };
        if let Err(e) = GitRunner::ensure_repository(&repo) {
            warn!(folder, "skipped: {e}");
            continue;
        }
        if !targets.contains(&repo) {
            targets.push(repo);
        }
    }
    if targets.is_empty() {
        return Err(no_targets(ScopeKind::Folders));
    }
    Ok(targets)
}

/// Let the user pick submodules by index.
///
/// # Errors
///
/// Returns `PreconditionError::NoTargets` when there are no submodules.
pub fn pick_submodules(
    workspace: &Workspace,
    prompt: &mut dyn Prompt,
    title: &str,
) -> SubgitResult<Vec<RepoRef>> {
    let subs = workspace.submodules()?;
    if subs.is_empty() {
        warn!("no submodules found");
        return Err(no_targets(ScopeKind::Submodules));
    }
    let names: Vec<&str> = subs.iter().map(RepoRef::name).collect();
    let picked = prompt.choose_many(title, &names)?;
    Ok(picked.into_iter().map(|i| subs[i].clone()).collect())
}

fn no_targets(kind: ScopeKind) -> crate::error::SubgitError {
    PreconditionError::NoTargets {
        scope: kind.label().to_lowercase(),
    }
    .into()
}
