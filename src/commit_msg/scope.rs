// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

/// First path segment -> conventional-commit scope.
const SCOPES: &[(&[&str], &str)] = &[
    (&["frontend", "client", "ui", "web"], "frontend"),
    (&["backend", "server", "api"], "backend"),
    (&["docs", "doc", "documentation"], "docs"),
    (&["test", "tests", "spec", "__tests__"], "test"),
    (&["config", "configs", ".github"], "config"),
    (&["scripts", "tools", "bin"], "scripts"),
    (&["db", "database", "migrations"], "db"),
    (&["lib", "libs", "packages", "shared", "common"], "lib"),
    (&["infra", "deploy", "k8s", "docker"], "infra"),
];

/// Scope of the first file in sorted order, if its top directory is known.
///
/// Files at the repository root have no scope.
#[must_use]
pub fn infer_scope(files: &[String]) -> Option<String> {
    let first = files.iter().min()?;
    let (segment, _) = first.split_once('/')?;
    let segment = segment.to_ascii_lowercase();
    SCOPES
        .iter()
        .find(|(dirs, _)| dirs.contains(&segment.as_str()))
        .map(|(_, scope)| (*scope).to_string())
}
