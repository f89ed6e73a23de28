// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared fixtures: a base repository with two submodules, each with a bare
//! `origin` in the same temporary directory.
//!
//! ```text
//! <tmp>/remotes/base.git  frontend-ee.git  server-ee.git
//! <tmp>/work              base, on main, upstream origin/main
//! <tmp>/work/frontend/ee  submodule, on main
//! <tmp>/work/server/ee    submodule, on main
//! ```

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use subgit::git::{GitRunner, Workspace};
use tempfile::TempDir;

pub const SUBMODULES: [&str; 2] = ["frontend/ee", "server/ee"];

/// Run git in `cwd`, panicking on failure; returns trimmed stdout.
pub fn git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed in {}: {}",
        cwd.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn configure_user(cwd: &Path) {
    git(&["config", "user.email", "test@example.com"], cwd);
    git(&["config", "user.name", "Test"], cwd);
}

/// Repository on `main` with one committed `README.md`.
pub fn init_repo(path: &Path, readme: &str) {
    std::fs::create_dir_all(path).expect("failed to create repo dir");
    git(&["init", "-q", "-b", "main"], path);
    configure_user(path);
    std::fs::write(path.join("README.md"), readme).expect("failed to write README");
    git(&["add", "README.md"], path);
    git(&["commit", "-q", "-m", "initial"], path);
}

pub struct Fixture {
    _temp: TempDir,
    pub root: PathBuf,
    pub remotes: PathBuf,
}

impl Fixture {
    /// Base repository with `frontend/ee` and `server/ee` checked out on `main`.
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let remotes = temp.path().join("remotes");
        let seeds = temp.path().join("seeds");
        let root = temp.path().join("work");

        for sub in SUBMODULES {
            let name = sub.replace('/', "-");
            let seed = seeds.join(&name);
            init_repo(&seed, &format!("{name}\n"));
            let bare = remotes.join(format!("{name}.git"));
            git(
                &["clone", "-q", "--bare", path_str(&seed), path_str(&bare)],
                temp.path(),
            );
        }

        init_repo(&root, "base\n");
        for sub in SUBMODULES {
            let url = remotes.join(format!("{}.git", sub.replace('/', "-")));
            git(
                &[
                    "-c",
                    "protocol.file.allow=always",
                    "submodule",
                    "add",
                    "-q",
                    path_str(&url),
                    sub,
                ],
                &root,
            );
            configure_user(&root.join(sub));
        }
        git(&["commit", "-q", "-m", "add submodules"], &root);

        let base_remote = remotes.join("base.git");
        git(&["init", "-q", "--bare", path_str(&base_remote)], temp.path());
        git(&["remote", "add", "origin", path_str(&base_remote)], &root);
        git(&["push", "-q", "-u", "origin", "main"], &root);

        Self {
            _temp: temp,
            root,
            remotes,
        }
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::new(GitRunner::builder().build(), &self.root, &[])
    }

    pub fn sub(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn branch_of(&self, rel: &str) -> String {
        let path = if rel == "base" { self.root.clone() } else { self.sub(rel) };
        git(&["rev-parse", "--abbrev-ref", "HEAD"], &path)
    }

    pub fn stash_list(&self, rel: &str) -> String {
        git(&["stash", "list"], &self.sub(rel))
    }
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}
