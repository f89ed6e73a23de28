// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::settings::{Toggle, toggle};
use super::loader::environment;
use super::{Config, ConfigLoader};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.global.verbose, "verbose defaults to on");
    assert!(!config.global.dry, "dry-run defaults to off");
    assert!(config.submodules.default_paths.is_empty());
    assert_eq!(config.commit.min_message_len, 3);
    assert!(config.branches.prefixes.iter().any(|p| p == "feature"));
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
verbose = false
dry = true

[submodules]
default_paths = ["frontend/ee", "server/ee"]

[commit]
min_message_len = 10
"#;

    let config = Config::parse(toml).unwrap();
    assert!(!config.global.verbose);
    assert!(config.global.dry);
    assert_eq!(
        config.submodules.default_paths,
        ["frontend/ee", "server/ee"]
    );
    assert_eq!(config.commit.min_message_len, 10);
}

#[test]
fn test_config_rejects_unknown_keys() {
    let result = Config::parse("[global]\nbogus = 1");
    assert!(result.is_err());
}

#[test]
fn test_config_rejects_zero_message_len() {
    let err = Config::parse("[commit]\nmin_message_len = 0").unwrap_err();
    assert!(err.to_string().contains("min_message_len"), "{err}");
}

#[test]
fn test_config_rejects_invalid_prefix() {
    let err = Config::parse("[branches]\nprefixes = [\"bad name\"]").unwrap_err();
    assert!(err.to_string().contains("bad name"), "{err}");
}

#[test]
fn test_set_override_wins() {
    let config = Config::builder()
        .add_toml_str("[global]\n dry = false")
        .set("global.dry", true)
        .unwrap()
        .build()
        .unwrap();
    assert!(config.global.dry, "set override should take effect");
}

#[test]
fn test_later_string_overrides_earlier() {
    let config = Config::builder()
        .add_toml_str("[global]\n verbose = true")
        .add_toml_str("[global]\n verbose = false")
        .build()
        .unwrap();
    assert!(!config.global.verbose);
}

#[test]
fn test_loader_describes_contributing_layers() {
    let loader = ConfigLoader::new()
        .add_toml_file_optional("/nonexistent/subgit.toml")
        .add_toml_str("[global]\n dry = true")
        .add_toml_file("/etc/team.toml")
        .with_env_prefix("SUBGIT");

    insta::assert_snapshot!(loader.describe_layers().join("\n"), @r"
    inline    <string>
    file      /etc/team.toml
    env       SUBGIT_*
    ");
}

fn from_env(vars: &[(&str, &str)]) -> Result<Config, config::ConfigError> {
    let vars = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    config::Config::builder()
        .add_source(environment("SUBGIT").source(Some(vars)))
        .build()?
        .try_deserialize()
}

#[test]
fn test_env_layer_reads_keys_with_underscores() {
    let config = from_env(&[
        ("SUBGIT_GLOBAL__DRY", "true"),
        ("SUBGIT_COMMIT__MIN_MESSAGE_LEN", "5"),
        ("SUBGIT_SUBMODULES__DEFAULT_PATHS", "frontend/ee,server/ee"),
    ])
    .unwrap();

    assert!(config.global.dry);
    assert_eq!(config.commit.min_message_len, 5);
    assert_eq!(config.submodules.default_paths, ["frontend/ee", "server/ee"]);
}

#[test]
fn test_env_layer_single_item_list() {
    let config = from_env(&[("SUBGIT_BRANCHES__PREFIXES", "feature")]).unwrap();
    assert_eq!(config.branches.prefixes, ["feature"]);
}

#[test]
fn test_env_layer_ignores_other_prefixes() {
    let config = from_env(&[("OTHER_GLOBAL__DRY", "true"), ("SUBGITX_GLOBAL__DRY", "true")]).unwrap();
    assert!(!config.global.dry);
}

#[test]
fn test_format_options_sorted_and_aligned() {
    let config = Config::default();
    let options = config.format_options();
    let keys: Vec<_> = options
        .iter()
        .map(|line| line.split_whitespace().next().unwrap_or_default())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
    assert!(options.iter().any(|l| l.ends_with("= true") && l.starts_with("global.verbose")));
}

#[test]
fn test_toggle_creates_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("subgit.toml");

    let value = toggle(&path, Toggle::DryRun, false).unwrap();
    assert!(value);

    let config = Config::builder().add_toml_file(&path).build().unwrap();
    assert!(config.global.dry);
}

#[test]
fn test_toggle_preserves_other_keys() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("subgit.toml");
    std::fs::write(
        &path,
        "[global]\ndry = true\n\n[submodules]\ndefault_paths = [\"server/ee\"]\n",
    )
    .unwrap();

    let value = toggle(&path, Toggle::Verbose, true).unwrap();
    assert!(!value);

    let config = Config::builder().add_toml_file(&path).build().unwrap();
    assert!(!config.global.verbose);
    assert!(config.global.dry);
    assert_eq!(config.submodules.default_paths, ["server/ee"]);
}

#[test]
fn test_toggle_rejects_broken_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("subgit.toml");
    std::fs::write(&path, "[global\n").unwrap();

    assert!(toggle(&path, Toggle::Verbose, true).is_err());
}
