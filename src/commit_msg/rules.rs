// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Priority rules turning signals into suggestions.

use super::signals::{DiffAnalysis, DiffSignals};
use super::{CommitType, Suggestion, Suggestions};

/// Names shown before collapsing the rest into "N more".
const MAX_NAMES: usize = 3;

/// Display name of a path: file name without extension(s).
pub(crate) fn display_name(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.find('.') {
        Some(0) | None => file,
        Some(dot) => &file[..dot],
    }
}

/// `a`, `a and b`, `a, b and c`, `a, b, c and 2 more`.
pub(crate) fn join_names(paths: &[String]) -> String {
    let mut names: Vec<&str> = paths.iter().map(|p| display_name(p)).collect();
    names.dedup();
    match names.as_slice() {
        [] => "files".to_string(),
        [one] => (*one).to_string(),
        [init @ .., last] if names.len() <= MAX_NAMES => {
            format!("{} and {last}", init.join(", "))
        }
        _ => format!(
            "{} and {} more",
            names[..MAX_NAMES].join(", "),
            names.len() - MAX_NAMES
        ),
    }
}

/// `subset` if non-empty, otherwise every staged file.
fn or_all<'a>(subset: &'a [String], all: &'a [String]) -> &'a [String] {
    if subset.is_empty() { all } else { subset }
}

/// Every rule that applies, in priority order; the fallback always applies.
fn candidates(a: &DiffAnalysis) -> Vec<(CommitType, String)> {
    let s = a.signals;
    let names = join_names(&a.files);
    let mut out = Vec::new();

    if s.contains(DiffSignals::TESTS) {
        let tests = or_all(&a.test_files, &a.files);
        let verb = if tests.iter().all(|t| a.added.contains(t)) { "add" } else { "update" };
        out.push((CommitType::Test, format!("{verb} tests for {}", join_names(tests))));
    }
    if s.contains(DiffSignals::DOCS_ONLY) {
        let verb = if a.files == a.added { "add" } else { "update" };
        out.push((CommitType::Docs, format!("{verb} {names} documentation")));
    }
    if s.contains(DiffSignals::DEPENDENCIES) {
        let manifests = join_names(&a.manifest_files);
        out.push((CommitType::Build, format!("update dependencies in {manifests}")));
    }
    if s.contains(DiffSignals::CONFIG) {
        let configs = join_names(&a.config_files);
        out.push((CommitType::Config, format!("update {configs} configuration")));
    }
    if s.contains(DiffSignals::STYLES) {
        let styles = join_names(or_all(&a.style_files, &a.files));
        out.push((CommitType::Style, format!("update styles in {styles}")));
    }
    if s.contains(DiffSignals::API) {
        out.push((CommitType::Feat, format!("add API endpoints in {names}")));
    }
    if s.contains(DiffSignals::UI) {
        out.push((CommitType::Feat, format!("update UI components in {names}")));
    }
    if s.contains(DiffSignals::DATABASE) {
        out.push((CommitType::Feat, format!("update database schema in {names}")));
    }
    if s.contains(DiffSignals::ERROR_HANDLING) {
        out.push((CommitType::Fix, format!("improve error handling in {names}")));
    }
    if s.contains(DiffSignals::NEW_FUNCTIONS) {
        out.push((CommitType::Feat, format!("add new functionality to {names}")));
    }
    if s.contains(DiffSignals::MODIFIED_FUNCTIONS) {
        out.push((CommitType::Refactor, format!("refactor {names}")));
    }
    if s.contains(DiffSignals::DELETIONS) {
        let description = if a.deleted.is_empty() {
            format!("remove unused code from {names}")
        } else {
            format!("remove {}", join_names(&a.deleted))
        };
        out.push((CommitType::Refactor, description));
    }
    if s.contains(DiffSignals::MANY_IMPORTS) {
        out.push((CommitType::Refactor, format!("reorganize imports in {names}")));
    }

    out.push(fallback(a, &names));
    out
}

/// Picked by file count when no signal applies.
fn fallback(a: &DiffAnalysis, names: &str) -> (CommitType, String) {
    if a.files == a.added {
        (CommitType::Feat, format!("add {names}"))
    } else if a.files == a.deleted {
        (CommitType::Refactor, format!("remove {names}"))
    } else if a.files.len() > MAX_NAMES {
        (CommitType::Refactor, format!("update {} files", a.files.len()))
    } else {
        (CommitType::Refactor, format!("update {names}"))
    }
}

/// Primary suggestion plus the first lower-priority one of a different type.
pub(crate) fn suggest(analysis: &DiffAnalysis, scope: Option<&str>) -> Suggestions {
    let make = |(kind, description): (CommitType, String)| Suggestion {
        kind,
        scope: scope.map(str::to_string),
        description,
    };

    let mut ranked = candidates(analysis).into_iter();
    // The fallback is always last, so there is at least one candidate.
    let (kind, description) = ranked
        .next()
        .unwrap_or((CommitType::Refactor, "update files".to_string()));
    let alternative = ranked.find(|(k, _)| *k != kind).map(make);

    Suggestions {
        primary: make((kind, description)),
        alternative,
    }
}
