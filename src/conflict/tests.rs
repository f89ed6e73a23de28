// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Conflicts, SubmoduleConflict, inspect, partition};
use crate::error::{PreconditionError, SubgitError};
use crate::git::{GitRunner, Workspace};
use std::process::Command;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_partition_known_submodule_paths() {
    let conflicted = strings(&["frontend/ee", "src/main.rs", "server/ee", "README.md"]);
    let known = strings(&["frontend/ee", "server/ee", "docs/site"]);
    assert_eq!(
        partition(&conflicted, &known),
        Conflicts {
            submodules: strings(&["frontend/ee", "server/ee"]),
            files: strings(&["src/main.rs", "README.md"]),
        }
    );
}

#[test]
fn test_partition_ignores_trailing_slash_and_prefixes() {
    let known = strings(&["frontend/ee/"]);
    let conflicts = partition(&strings(&["frontend/ee", "frontend/ee2", "frontend"]), &known);
    assert_eq!(conflicts.submodules, ["frontend/ee"]);
    assert_eq!(conflicts.files, ["frontend/ee2", "frontend"]);
}

#[test]
fn test_partition_without_submodules() {
    let conflicts = partition(&strings(&["a.txt"]), &[]);
    assert!(conflicts.submodules.is_empty());
    assert_eq!(conflicts.files, ["a.txt"]);
}

#[test]
fn test_conflict_display_prefers_log_line() {
    let conflict = SubmoduleConflict {
        path: "server/ee".to_string(),
        ours: Some("1111111111111111111111111111111111111111".to_string()),
        theirs: Some("2222222222222222222222222222222222222222".to_string()),
        ours_log: Some("1111111 fix login".to_string()),
        theirs_log: None,
    };
    insta::assert_snapshot!(conflict.to_string(), @r"
    server/ee
        current:  1111111 fix login
        incoming: 2222222222222222222222222222222222222222
    ");
}

#[test]
fn test_inspect_requires_active_merge() {
    let temp = tempfile::tempdir().unwrap();
    let status = Command::new("git")
        .args(["init", "-q", "-b", "main"])
        .current_dir(temp.path())
        .status()
        .unwrap();
    assert!(status.success());

    let ws = Workspace::new(GitRunner::builder().build(), temp.path(), &[]);
    let err = inspect(&ws).unwrap_err();
    let SubgitError::Precondition(p) = &err else {
        panic!("expected precondition error, got {err}");
    };
    assert!(matches!(**p, PreconditionError::NoActiveMerge));
}
