// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the multi-repository operations.
//!
//! Every test builds a real base repository with two submodules.

mod common;

use common::{Fixture, SUBMODULES, git, path_str};
use subgit::error::{SubgitError, ValidationError};
use subgit::git::refname::{BranchName, TagName};
use subgit::ops::branch::{create_branch, tag};
use subgit::ops::checkout::{checkout, checkout_with_stash};
use subgit::ops::commit::commit;
use subgit::ops::merge::{merge, merge_with_stash};
use subgit::ops::status::{render_table, status_report};
use subgit::ops::sync::{pull, push};
use subgit::ops::Outcome;
use subgit::prompt::ScriptedPrompt;
use subgit::scope::{ScopeKind, folders, select};

fn branch(name: &str) -> BranchName {
    BranchName::parse(name).unwrap()
}

fn skipped(reason: &str) -> Outcome {
    Outcome::Skipped(reason.to_string())
}

// =============================================================================
// Checkout with stash
// =============================================================================

#[test]
fn checkout_with_stash_parks_and_restores_per_branch() {
    let fx = Fixture::new();
    let frontend = fx.sub("frontend/ee");
    git(&["branch", "release/v1"], &fx.root);
    for sub in SUBMODULES {
        git(&["branch", "release/v1"], &fx.sub(sub));
    }

    // Work parked earlier for release/v1.
    git(&["checkout", "-q", "release/v1"], &frontend);
    std::fs::write(frontend.join("README.md"), "release work\n").unwrap();
    git(&["stash", "push", "-q", "-m", "stash-for-release/v1"], &frontend);
    git(&["checkout", "-q", "main"], &frontend);

    // Uncommitted work on main, in frontend/ee only.
    std::fs::write(frontend.join("README.md"), "main work\n").unwrap();

    let ws = fx.workspace();
    let report = checkout_with_stash(&ws, &branch("release/v1")).unwrap();
    assert!(report.is_success(), "{:#?}", report.summary_lines());

    for repo in ["base", "frontend/ee", "server/ee"] {
        assert_eq!(fx.branch_of(repo), "release/v1", "{repo} not switched");
        assert_eq!(report.outcome_of(repo), Some(&Outcome::Success));
    }
    assert_eq!(
        std::fs::read_to_string(frontend.join("README.md")).unwrap(),
        "release work\n"
    );
    let frontend_stashes = fx.stash_list("frontend/ee");
    assert!(frontend_stashes.contains("stash-for-main"), "{frontend_stashes}");
    assert!(!frontend_stashes.contains("stash-for-release/v1"), "{frontend_stashes}");
    assert!(fx.stash_list("server/ee").is_empty());
    assert!(git(&["stash", "list"], &fx.root).is_empty());
}

#[test]
fn checkout_with_stash_returns_work_when_switch_fails() {
    let fx = Fixture::new();
    let server = fx.sub("server/ee");
    git(&["branch", "release/v1"], &fx.root);
    git(&["branch", "release/v1"], &fx.sub("frontend/ee"));
    // server/ee has no release/v1 branch.
    std::fs::write(server.join("README.md"), "unsaved\n").unwrap();

    let report = checkout_with_stash(&fx.workspace(), &branch("release/v1")).unwrap();

    assert!(report.outcome_of("server/ee").is_some_and(Outcome::is_failed));
    assert_eq!(fx.branch_of("server/ee"), "main");
    assert_eq!(std::fs::read_to_string(server.join("README.md")).unwrap(), "unsaved\n");
    assert!(fx.stash_list("server/ee").is_empty());
    assert!(report.into_result().is_err());
}

#[test]
fn plain_folder_is_never_treated_as_a_repository() {
    let fx = Fixture::new();
    std::fs::create_dir(fx.root.join("docs")).unwrap();
    git(&["branch", "release/v1"], &fx.root);
    let ws = fx.workspace();

    let selected = folders(&ws, "docs server/ee").unwrap();
    let names: Vec<&str> = selected.iter().map(|r| r.name()).collect();
    assert_eq!(names, ["server/ee"]);

    let docs = subgit::git::RepoRef::submodule(&fx.root, "docs");
    let report = checkout(&ws, &[docs], &branch("release/v1")).unwrap();
    assert!(report.outcome_of("docs").is_some_and(Outcome::is_failed));
    assert_eq!(fx.branch_of("base"), "main");
}

// =============================================================================
// Branches and tags
// =============================================================================

#[test]
fn create_branch_existing_in_base_touches_nothing() {
    let fx = Fixture::new();
    git(&["branch", "feature/x"], &fx.root);
    let ws = fx.workspace();

    let err = create_branch(&ws, &ws.all().unwrap(), &branch("feature/x")).unwrap_err();
    let SubgitError::Validation(v) = &err else {
        panic!("expected validation error, got {err}");
    };
    assert!(matches!(**v, ValidationError::BranchExists { .. }));

    assert_eq!(fx.branch_of("base"), "main");
    for sub in SUBMODULES {
        assert_eq!(fx.branch_of(sub), "main");
        assert!(git(&["branch", "--list", "feature/x"], &fx.sub(sub)).is_empty());
    }
}

#[test]
fn create_branch_in_base_and_selected_submodule() {
    let fx = Fixture::new();
    let ws = fx.workspace();
    let targets = vec![ws.base(), subgit::git::RepoRef::submodule(&fx.root, "server/ee")];

    let report = create_branch(&ws, &targets, &branch("feature/y")).unwrap();
    assert!(report.is_success());
    assert_eq!(fx.branch_of("base"), "feature/y");
    assert_eq!(fx.branch_of("server/ee"), "feature/y");
    assert_eq!(fx.branch_of("frontend/ee"), "main");
}

#[test]
fn tag_is_pushed_everywhere() {
    let fx = Fixture::new();
    let report = tag(&fx.workspace(), &TagName::parse("v1.0").unwrap()).unwrap();
    assert!(report.is_success(), "{:#?}", report.summary_lines());

    for remote in ["base.git", "frontend-ee.git", "server-ee.git"] {
        let bare = fx.remotes.join(remote);
        let tags = git(&["tag", "--list"], &bare);
        assert_eq!(tags, "v1.0", "{remote}");
    }
}

// =============================================================================
// Pull and push
// =============================================================================

#[test]
fn push_without_upstream_sets_it() {
    let fx = Fixture::new();
    let server = fx.sub("server/ee");
    git(&["checkout", "-q", "-b", "topic"], &server);
    git(&["checkout", "-q", "-b", "feature/base"], &fx.root);
    let ws = fx.workspace();

    let report = push(&ws, &ws.all().unwrap()).unwrap();
    assert!(report.is_success(), "{:#?}", report.summary_lines());

    assert_eq!(
        git(&["rev-parse", "--abbrev-ref", "topic@{u}"], &server),
        "origin/topic"
    );
    assert_eq!(
        git(&["rev-parse", "--abbrev-ref", "feature/base@{u}"], &fx.root),
        "origin/feature/base"
    );
    let heads = git(
        &["ls-remote", "--heads", path_str(&fx.remotes.join("server-ee.git")), "topic"],
        &fx.root,
    );
    assert!(heads.ends_with("refs/heads/topic"), "{heads}");
}

#[test]
fn pull_skips_detached_and_unpublished_submodules() {
    let fx = Fixture::new();
    git(&["checkout", "-q", "--detach"], &fx.sub("frontend/ee"));
    git(&["checkout", "-q", "-b", "local-only"], &fx.sub("server/ee"));
    let ws = fx.workspace();

    let report = pull(&ws, &ws.all().unwrap()).unwrap();
    assert!(report.is_success(), "{:#?}", report.summary_lines());
    assert_eq!(report.outcome_of("base"), Some(&Outcome::Success));
    assert_eq!(report.outcome_of("frontend/ee"), Some(&skipped("detached HEAD")));
    assert_eq!(
        report.outcome_of("server/ee"),
        Some(&skipped("no remote branch origin/local-only"))
    );
}

// =============================================================================
// Commit
// =============================================================================

#[cfg(unix)]
#[test]
fn failed_base_commit_stops_before_submodules() {
    use std::os::unix::fs::PermissionsExt;

    let fx = Fixture::new();
    let hook = fx.root.join(".git/hooks/pre-commit");
    std::fs::create_dir_all(hook.parent().unwrap()).unwrap();
    std::fs::write(&hook, "#!/bin/sh\nexit 1\n").unwrap();
    std::fs::set_permissions(&hook, std::fs::Permissions::from_mode(0o755)).unwrap();

    std::fs::write(fx.root.join("notes.txt"), "base change\n").unwrap();
    git(&["add", "notes.txt"], &fx.root);
    let frontend = fx.sub("frontend/ee");
    std::fs::write(frontend.join("README.md"), "staged\n").unwrap();
    git(&["add", "README.md"], &frontend);

    let ws = fx.workspace();
    let report = commit(&ws, &ws.all().unwrap(), "add notes", 3).unwrap();

    assert!(report.outcome_of("base").is_some_and(Outcome::is_failed));
    assert_eq!(report.outcome_of("frontend/ee"), None);
    assert_eq!(report.outcome_of("server/ee"), None);
    assert_eq!(git(&["diff", "--cached", "--name-only"], &frontend), "README.md");
    assert!(report.into_result().is_err());
}

#[test]
fn commit_skips_repositories_with_nothing_staged() {
    let fx = Fixture::new();
    let server = fx.sub("server/ee");
    std::fs::write(server.join("README.md"), "changed\n").unwrap();
    git(&["add", "README.md"], &server);
    let ws = fx.workspace();

    let report = commit(&ws, &ws.all().unwrap(), "update readme", 3).unwrap();
    assert!(report.is_success());
    assert_eq!(report.outcome_of("base"), Some(&skipped("nothing to commit")));
    assert_eq!(report.outcome_of("frontend/ee"), Some(&skipped("nothing to commit")));
    assert_eq!(report.outcome_of("server/ee"), Some(&Outcome::Success));
    assert_eq!(git(&["log", "-1", "--format=%s"], &server), "update readme");
}

// =============================================================================
// Merge
// =============================================================================

/// Publish a `develop` branch adding `feature.txt` in `repo`, then return to `main`.
fn publish_develop(repo: &std::path::Path) {
    git(&["checkout", "-q", "-b", "develop"], repo);
    std::fs::write(repo.join("feature.txt"), "feature\n").unwrap();
    git(&["add", "feature.txt"], repo);
    git(&["commit", "-q", "-m", "add feature"], repo);
    git(&["push", "-q", "origin", "develop"], repo);
    git(&["checkout", "-q", "main"], repo);
}

#[test]
fn merge_with_stash_keeps_uncommitted_work() {
    let fx = Fixture::new();
    publish_develop(&fx.root);
    for sub in SUBMODULES {
        publish_develop(&fx.sub(sub));
    }
    let server = fx.sub("server/ee");
    std::fs::write(server.join("README.md"), "dirty\n").unwrap();

    let mut prompt = ScriptedPrompt::default();
    let report = merge_with_stash(&fx.workspace(), &branch("develop"), &mut prompt).unwrap();
    assert!(report.is_success(), "{:#?}", report.summary_lines());

    assert!(server.join("feature.txt").exists());
    assert!(fx.root.join("feature.txt").exists());
    assert_eq!(std::fs::read_to_string(server.join("README.md")).unwrap(), "dirty\n");
    assert!(fx.stash_list("server/ee").is_empty());
}

#[test]
fn merge_with_stash_restores_work_after_conflict() {
    let fx = Fixture::new();
    publish_develop(&fx.root);
    publish_develop(&fx.sub("frontend/ee"));

    let server = fx.sub("server/ee");
    git(&["checkout", "-q", "-b", "develop"], &server);
    std::fs::write(server.join("shared.txt"), "develop\n").unwrap();
    git(&["add", "shared.txt"], &server);
    git(&["commit", "-q", "-m", "develop side"], &server);
    git(&["push", "-q", "origin", "develop"], &server);
    git(&["checkout", "-q", "main"], &server);
    std::fs::write(server.join("shared.txt"), "main\n").unwrap();
    git(&["add", "shared.txt"], &server);
    git(&["commit", "-q", "-m", "main side"], &server);
    std::fs::write(server.join("README.md"), "dirty\n").unwrap();

    let mut prompt = ScriptedPrompt::new(["y"]);
    let report = merge_with_stash(&fx.workspace(), &branch("develop"), &mut prompt).unwrap();

    assert!(matches!(report.outcome_of("server/ee"), Some(Outcome::Failed(_))));
    assert_eq!(report.outcome_of("base"), Some(&Outcome::Success));
    assert_eq!(report.outcome_of("frontend/ee"), Some(&Outcome::Success));
    assert_eq!(prompt.asked().len(), 1);

    // Merge aborted, then the stash popped back onto main.
    assert_eq!(git(&["status", "--porcelain"], &server), "M README.md");
    assert_eq!(std::fs::read_to_string(server.join("shared.txt")).unwrap(), "main\n");
    assert_eq!(std::fs::read_to_string(server.join("README.md")).unwrap(), "dirty\n");
    assert!(fx.stash_list("server/ee").is_empty());
}

#[test]
fn merge_rejects_branch_into_itself() {
    let fx = Fixture::new();
    let ws = fx.workspace();
    let mut prompt = ScriptedPrompt::default();

    let err = merge(&ws, &[ws.base()], &branch("main"), &mut prompt).unwrap_err();
    let SubgitError::Validation(v) = &err else {
        panic!("expected validation error, got {err}");
    };
    assert!(matches!(**v, ValidationError::SameBranch { .. }));
}

// =============================================================================
// Scope and status
// =============================================================================

#[test]
fn scope_menu_resolves_submodules() {
    let fx = Fixture::new();
    let mut prompt = ScriptedPrompt::new(["2"]);
    let selection = select(&fx.workspace(), &mut prompt, "Pull in", &ScopeKind::PLAIN).unwrap();
    assert_eq!(selection.kind, ScopeKind::Submodules);
    let names: Vec<&str> = selection.targets.iter().map(|r| r.name()).collect();
    assert_eq!(names, SUBMODULES);
}

#[test]
fn status_report_covers_every_repository() {
    let fx = Fixture::new();
    std::fs::write(fx.sub("frontend/ee").join("README.md"), "edit\n").unwrap();

    let rows = status_report(&fx.workspace()).unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["base", "frontend/ee", "server/ee"]);

    assert_eq!(rows[0].upstream.as_deref(), Some("origin/main"));
    assert_eq!((rows[0].ahead, rows[0].behind), (Some(0), Some(0)));
    assert_eq!(rows[1].branch.as_deref(), Some("main"));
    assert_eq!(rows[1].changes, 1);
    assert_eq!(rows[2].changes, 0);
}

#[test]
fn status_report_survives_deleted_upstream() {
    let fx = Fixture::new();
    let server = fx.sub("server/ee");
    git(&["checkout", "-q", "-b", "feature/gone"], &server);
    git(&["push", "-q", "-u", "origin", "feature/gone"], &server);
    git(&["push", "-q", "origin", "--delete", "feature/gone"], &server);
    git(&["fetch", "-q", "--prune", "origin"], &server);

    let rows = status_report(&fx.workspace()).unwrap();
    let row = rows.iter().find(|r| r.name == "server/ee").unwrap();
    assert_eq!(row.branch.as_deref(), Some("feature/gone"));
    assert_eq!((row.ahead, row.behind), (None, None));
    assert_eq!((rows[0].ahead, rows[0].behind), (Some(0), Some(0)));

    let table = render_table(&rows);
    let line = table.lines().find(|l| l.starts_with("server/ee")).unwrap();
    assert!(line.contains(" - "), "{line}");
}
