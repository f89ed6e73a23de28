// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::commit::{add, commit, validate_message};
use super::status::{StatusRow, render_table, status};
use super::sync::pull;
use super::{Outcome, Report};
use crate::error::{PreconditionError, SubgitError, ValidationError};
use crate::git::{GitRunner, RepoRef, Workspace};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git(args: &[&str], cwd: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_repo() -> (TempDir, Workspace) {
    let temp = tempfile::tempdir().unwrap();
    git(&["init", "-q", "-b", "main"], temp.path());
    git(&["config", "user.email", "test@example.com"], temp.path());
    git(&["config", "user.name", "Test"], temp.path());
    git(&["commit", "-q", "--allow-empty", "-m", "initial"], temp.path());
    let ws = Workspace::new(GitRunner::builder().build(), temp.path(), &[]);
    (temp, ws)
}

// --- Report ---

#[test]
fn test_report_worst_outcome_wins() {
    let root = Path::new("/tmp/ws");
    let base = RepoRef::base(root);
    let sub = RepoRef::submodule(root, "lib");
    let mut report = Report::new("checkout");

    report.success(&base);
    report.failed(&base, "checkout failed");
    report.success(&base);
    report.skipped(&sub, "nothing to stash");
    report.success(&sub);

    assert_eq!(
        report.outcome_of("base"),
        Some(&Outcome::Failed("checkout failed".to_string()))
    );
    assert_eq!(
        report.outcome_of("lib"),
        Some(&Outcome::Skipped("nothing to stash".to_string()))
    );
    assert_eq!(report.outcomes().len(), 2);
    assert_eq!(report.failed_targets(), ["base"]);
}

#[test]
fn test_report_into_result() {
    let root = Path::new("/tmp/ws");
    let mut report = Report::new("push");
    report.success(&RepoRef::base(root));
    report.skipped(&RepoRef::submodule(root, "a"), "detached HEAD");
    assert!(report.clone().into_result().is_ok());

    report.failed(&RepoRef::submodule(root, "b"), "rejected");
    report.failed(&RepoRef::submodule(root, "c"), "rejected");
    let err = report.into_result().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"push failed in: b, c");
}

#[test]
fn test_report_summary_lines() {
    let root = Path::new("/tmp/ws");
    let mut report = Report::new("commit");
    report.success(&RepoRef::base(root));
    report.skipped(&RepoRef::submodule(root, "frontend/ee"), "nothing to commit");
    assert_eq!(
        report.summary_lines(),
        [
            "base         ok",
            "frontend/ee  skipped (nothing to commit)",
        ]
    );
}

// --- commit ---

#[test]
fn test_validate_message() {
    assert_eq!(validate_message("  fix bug  ", 3).unwrap(), "fix bug");
    assert!(matches!(
        validate_message("   ", 3).unwrap_err(),
        SubgitError::Validation(v) if matches!(*v, ValidationError::MissingMessage)
    ));
    let err = validate_message("ab", 3).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid input: commit message must be at least 3 characters (got 2)"
    );
}

#[test]
fn test_commit_skips_when_nothing_staged() {
    let (_temp, ws) = init_repo();
    let report = commit(&ws, &[ws.base()], "valid message", 3).unwrap();
    assert_eq!(
        report.outcome_of("base"),
        Some(&Outcome::Skipped("nothing to commit".to_string()))
    );
    assert!(report.is_success());
}

#[test]
fn test_add_then_commit() {
    let (temp, ws) = init_repo();
    std::fs::write(temp.path().join("new.txt"), "hello\n").unwrap();

    assert!(add(&ws, &[ws.base()]).unwrap().is_success());
    let report = commit(&ws, &[ws.base()], "add new file", 3).unwrap();
    assert_eq!(report.outcome_of("base"), Some(&Outcome::Success));

    let statuses = status(&ws, &[ws.base()]).unwrap();
    assert!(statuses[0].lines.is_empty());
    assert_eq!(statuses[0].branch.as_deref(), Some("main"));
    assert_eq!(statuses[0].render(), "base [main]\n  clean");
}

// --- pull ---

#[test]
fn test_pull_without_upstream_fails_fast() {
    let (_temp, ws) = init_repo();
    let err = pull(&ws, &[ws.base()]).unwrap_err();
    let SubgitError::Precondition(p) = &err else {
        panic!("expected precondition error, got {err}");
    };
    assert!(matches!(**p, PreconditionError::NoUpstream { .. }));
    insta::assert_snapshot!(
        err.to_string(),
        @"precondition failed: branch 'main' has no upstream; run: git branch --set-upstream-to=origin/main main"
    );
}

// --- status table ---

#[test]
fn test_render_table() {
    let rows = vec![
        StatusRow {
            name: "base".to_string(),
            path: ".".to_string(),
            branch: Some("main".to_string()),
            upstream: Some("origin/main".to_string()),
            ahead: Some(1),
            behind: Some(0),
            changes: 2,
            stashes: 0,
        },
        StatusRow {
            name: "server/ee".to_string(),
            path: "server/ee".to_string(),
            branch: None,
            upstream: None,
            ahead: None,
            behind: None,
            changes: 0,
            stashes: 1,
        },
    ];
    insta::assert_snapshot!(render_table(&rows), @r"
    REPO       BRANCH      UPSTREAM     AHEAD  BEHIND  CHANGES  STASHES
    base       main        origin/main  1      0       2        0
    server/ee  (detached)  -            -      -       0        1
    ");
}
