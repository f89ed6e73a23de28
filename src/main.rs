// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   config / toggles             (no repository needed)
//!   everything else              Workspace::discover(cwd) first
//! ```

use std::process::ExitCode;

use subgit::cli::global::GlobalOptions;
use subgit::cli::{self, Command};
use subgit::cmd::branch::{
    run_create_branch_command, run_create_prefixed_branch_command, run_create_tag_command,
    run_merge_command, run_start_branch_command,
};
use subgit::cmd::config::{run_config_command, run_toggle_command};
use subgit::cmd::conflicts::run_resolve_conflicts_command;
use subgit::cmd::message::{run_generate_commit_message_command, run_smart_commit_command};
use subgit::cmd::open_workspace;
use subgit::cmd::report::run_status_report_command;
use subgit::cmd::repo::{
    run_add_command, run_checkout_command, run_commit_command, run_pull_command, run_push_command,
    run_status_command,
};
use subgit::config::settings::Toggle;
use subgit::config::{Config, ENV_PREFIX, SETTINGS_FILE};
use subgit::logging::{LogConfig, LogLevel, init_logging};
use subgit::prompt::TerminalPrompt;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let (config, layers) = match load_config(&cli.global) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&cli.global, &config);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli, &config, &layers) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(global: &GlobalOptions, config: &Config) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or_else(|| LogLevel::from_verbose(config.global.verbose));

    LogConfig::builder()
        .with_console_level(console_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

fn dispatch_command(
    cli: &cli::Cli,
    config: &Config,
    layers: &[String],
) -> subgit::error::Result<()> {
    let mut prompt = TerminalPrompt::stdio();
    let workspace = || open_workspace(config);

    match &cli.command {
        Command::Checkout(args) => run_checkout_command(args, &workspace()?, &mut prompt),
        Command::Pull(args) => run_pull_command(args, &workspace()?, &mut prompt),
        Command::Push(args) => run_push_command(args, &workspace()?, &mut prompt),
        Command::Add(args) => run_add_command(args, &workspace()?, &mut prompt),
        Command::Commit(args) => run_commit_command(args, config, &workspace()?, &mut prompt),
        Command::Status(args) => run_status_command(args, &workspace()?, &mut prompt),
        Command::CreateBranch(args) => {
            run_create_branch_command(args, &workspace()?, &mut prompt)
        }
        Command::CreatePrefixedBranch(args) => {
            run_create_prefixed_branch_command(args, &workspace()?, &mut prompt)
        }
        Command::CreateTag(args) => run_create_tag_command(args, &workspace()?),
        Command::Merge(args) => run_merge_command(args, &workspace()?, &mut prompt),
        Command::StartBranch(args) => {
            run_start_branch_command(args, config, &workspace()?, &mut prompt)
        }
        Command::GenerateCommitMessage(args) => {
            run_generate_commit_message_command(args, &workspace()?)
        }
        Command::SmartCommit => run_smart_commit_command(config, &workspace()?, &mut prompt),
        Command::ResolveSubmoduleConflicts => {
            run_resolve_conflicts_command(&workspace()?, &mut prompt)
        }
        Command::StatusReport(args) => run_status_report_command(args, &workspace()?),
        Command::ToggleVerbose => run_toggle_command(Toggle::Verbose, config),
        Command::ToggleDryRun => run_toggle_command(Toggle::DryRun, config),
        Command::Config => {
            run_config_command(config, layers);
            Ok(())
        }
    }
}

/// Effective configuration plus a description of the layers it came from.
fn load_config(global: &GlobalOptions) -> subgit::error::Result<(Config, Vec<String>)> {
    let mut loader = Config::builder().add_toml_file_optional(SETTINGS_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    let layers = loader.describe_layers();
    Ok((loader.build()?, layers))
}
