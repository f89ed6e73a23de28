// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration layering as the binary assembles it: settings file, then
//! `--config` files, then `SUBGIT_*` variables, then command-line overrides.

use std::path::Path;
use std::process::Command;

use subgit::cli::{self, Cli};
use subgit::config::settings::{Toggle, toggle};
use subgit::config::Config;

fn load(settings: &Path, cli: &Cli) -> Config {
    let mut loader = Config::builder().add_toml_file_optional(settings);
    for path in &cli.global.configs {
        loader = loader.add_toml_file(path);
    }
    for (key, value) in cli.global.to_config_overrides() {
        loader = loader.set(key, value).unwrap();
    }
    loader.build().unwrap()
}

#[test]
fn explicit_files_override_settings_and_flags_override_files() {
    let temp = tempfile::tempdir().unwrap();
    let settings = temp.path().join("subgit.toml");
    std::fs::write(
        &settings,
        "[global]\nverbose = true\n\n[commit]\nmin_message_len = 5\n",
    )
    .unwrap();
    let team = temp.path().join("team.toml");
    std::fs::write(
        &team,
        "[commit]\nmin_message_len = 10\n\n[branches]\nprefixes = [\"feature\", \"spike\"]\n",
    )
    .unwrap();

    let cli = cli::parse_from([
        "subgit",
        "--config",
        team.to_str().unwrap(),
        "-q",
        "-n",
        "status",
    ]);
    let config = load(&settings, &cli);

    assert_eq!(config.commit.min_message_len, 10);
    assert_eq!(config.branches.prefixes, ["feature", "spike"]);
    assert!(!config.global.verbose, "-q overrides the settings file");
    assert!(config.global.dry);
}

#[test]
fn missing_settings_file_yields_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let cli = cli::parse_from(["subgit", "status"]);
    let config = load(&temp.path().join("subgit.toml"), &cli);
    assert_eq!(config.format_options(), Config::default().format_options());
}

#[test]
fn toggle_flips_the_effective_value() {
    let temp = tempfile::tempdir().unwrap();
    let settings = temp.path().join("subgit.toml");
    std::fs::write(&settings, "[submodules]\ndefault_paths = [\"frontend/ee\"]\n").unwrap();
    let cli = cli::parse_from(["subgit", "toggle-dry-run"]);

    let before = load(&settings, &cli);
    assert!(!before.global.dry);

    assert!(toggle(&settings, Toggle::DryRun, before.global.dry).unwrap());
    let after = load(&settings, &cli);
    assert!(after.global.dry);
    assert_eq!(after.submodules.default_paths, ["frontend/ee"]);

    assert!(!toggle(&settings, Toggle::DryRun, after.global.dry).unwrap());
    assert!(!load(&settings, &cli).global.dry);
}

#[test]
fn config_command_reads_environment_layer() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("subgit.toml"), "[commit]\nmin_message_len = 4\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_subgit"))
        .arg("config")
        .current_dir(temp.path())
        .env("SUBGIT_SUBMODULES__DEFAULT_PATHS", "frontend/ee,server/ee")
        .env("SUBGIT_COMMIT__MIN_MESSAGE_LEN", "7")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value_of = |key: &str| {
        stdout
            .lines()
            .find(|l| l.starts_with(key))
            .and_then(|l| l.split_once(" = "))
            .map(|(_, v)| v.to_string())
    };
    assert_eq!(value_of("submodules.default_paths").as_deref(), Some("frontend/ee, server/ee"));
    assert_eq!(value_of("commit.min_message_len").as_deref(), Some("7"));
    assert!(stdout.contains("settings  subgit.toml"), "{stdout}");
    assert!(stdout.contains("env       SUBGIT_*"), "{stdout}");
}
