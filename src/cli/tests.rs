// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command, ScopeArg};
use crate::scope::ScopeKind;
use clap::Parser;

#[test]
fn test_parse_checkout_with_scope() {
    let cli = Cli::try_parse_from(["subgit", "checkout", "release/v1", "--scope", "all-with-stash"])
        .unwrap();
    let Command::Checkout(args) = cli.command else {
        panic!("expected checkout, got {:?}", cli.command);
    };
    assert_eq!(args.branch.as_deref(), Some("release/v1"));
    assert_eq!(args.scope.scope, Some(ScopeArg::AllWithStash));
    assert_eq!(ScopeKind::from(ScopeArg::AllWithStash), ScopeKind::AllWithStash);
}

#[test]
fn test_parse_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "subgit", "push", "-n", "-q", "-l", "4", "--config", "a.toml", "--config", "b.toml",
    ])
    .unwrap();
    assert!(matches!(cli.command, Command::Push(_)));
    assert!(cli.global.dry_run);
    assert!(cli.global.quiet);
    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.global.configs.len(), 2);

    let keys: Vec<&str> = cli.global.to_config_overrides().iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, ["global.dry", "global.verbose"]);
}

#[test]
fn test_verbose_conflicts_with_quiet() {
    assert!(Cli::try_parse_from(["subgit", "-v", "-q", "status"]).is_err());
}

#[test]
fn test_log_level_range() {
    assert!(Cli::try_parse_from(["subgit", "-l", "6", "status"]).is_err());
}

#[test]
fn test_parse_prefixed_branch_and_commit() {
    let cli = Cli::try_parse_from(["subgit", "create-prefixed-branch", "feature", "login"]).unwrap();
    let Command::CreatePrefixedBranch(args) = cli.command else {
        panic!("expected create-prefixed-branch");
    };
    assert_eq!((args.prefix.as_str(), args.name.as_str()), ("feature", "login"));
    assert_eq!(args.scope.scope, None);

    let cli = Cli::try_parse_from(["subgit", "commit", "-m", "fix login", "-s", "base"]).unwrap();
    let Command::Commit(args) = cli.command else {
        panic!("expected commit");
    };
    assert_eq!(args.message.as_deref(), Some("fix login"));
    assert_eq!(args.scope.scope, Some(ScopeArg::Base));
}

#[test]
fn test_parse_json_flags() {
    for name in ["generate-commit-message", "status-report"] {
        let cli = Cli::try_parse_from(["subgit", name, "--json"]).unwrap();
        match cli.command {
            Command::GenerateCommitMessage(args) | Command::StatusReport(args) => {
                assert!(args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

#[test]
fn test_command_is_required() {
    assert!(Cli::try_parse_from(["subgit"]).is_err());
}
