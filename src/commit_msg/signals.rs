// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Signal extraction from staged diffs.
//!
//! Path signals come from wax globs over the staged file lists; content
//! signals from regexes over added and removed lines. Documentation files
//! contribute path signals only, so prose that mentions `describe(` or
//! `catch` does not look like code.

use bitflags::bitflags;
use regex::Regex;
use std::sync::OnceLock;
use wax::{Glob, Program};

use super::StagedChanges;
use crate::error::{SubgitError, SubgitResult};

bitflags! {
    /// Boolean facts about a staged change set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DiffSignals: u32 {
        /// Test files or test-framework constructs.
        const TESTS = 1 << 0;
        /// Every staged file is documentation.
        const DOCS_ONLY = 1 << 1;
        /// Dependency manifests or lock files.
        const DEPENDENCIES = 1 << 2;
        /// Configuration files.
        const CONFIG = 1 << 3;
        /// Stylesheets or styling constructs.
        const STYLES = 1 << 4;
        /// HTTP route declarations.
        const API = 1 << 5;
        /// UI component markup or new component files.
        const UI = 1 << 6;
        /// SQL statements, `.sql` files or migrations.
        const DATABASE = 1 << 7;
        const ERROR_HANDLING = 1 << 8;
        /// More function definitions added than removed.
        const NEW_FUNCTIONS = 1 << 9;
        /// Function definitions removed or rewritten.
        const MODIFIED_FUNCTIONS = 1 << 10;
        /// Deleted files, or more lines removed than added.
        const DELETIONS = 1 << 11;
        /// Three or more added import lines.
        const MANY_IMPORTS = 1 << 12;
        const IMPORTS = 1 << 13;
        const EXPORTS = 1 << 14;
        const LOGGING = 1 << 15;
        const COMMENTS = 1 << 16;
    }
}

impl DiffSignals {
    /// Flag names in declaration order, lowercase.
    #[must_use]
    pub fn names(self) -> Vec<String> {
        self.iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect()
    }
}

/// Everything the rules look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffAnalysis {
    pub signals: DiffSignals,
    /// Every staged path, sorted.
    pub files: Vec<String>,
    pub added: Vec<String>,
    pub deleted: Vec<String>,
    pub test_files: Vec<String>,
    pub doc_files: Vec<String>,
    pub manifest_files: Vec<String>,
    pub config_files: Vec<String>,
    pub style_files: Vec<String>,
    pub import_count: usize,
    pub lines_added: usize,
    pub lines_removed: usize,
}

struct Patterns {
    function: Regex,
    import: Regex,
    export: Regex,
    error_handling: Regex,
    logging: Regex,
    test: Regex,
    comment: Regex,
    style: Regex,
    sql: Regex,
    api: Regex,
    ui: Regex,
}

impl Patterns {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            function: Regex::new(concat!(
                r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?(?:fn|def|func|function)\s+\w+",
                r"|^\s*(?:export\s+)?(?:const|let|var)\s+\w+\s*=\s*(?:async\s*)?(?:\([^)]*\)|\w+)\s*=>",
                r"|^\s*(?:public|private|protected|static)\s+[\w<>\[\],\s]*\w+\s*\(",
            ))?,
            import: Regex::new(concat!(
                r"^\s*(?:import\s|from\s+[\w.]+\s+import\s|use\s+\w|#include\s|@import\s)",
                r"|\brequire\s*\(",
            ))?,
            export: Regex::new(
                r"^\s*(?:export\s|module\.exports|exports\.|pub\s+(?:fn|struct|enum|trait|mod|use|const|type)\s)",
            )?,
            error_handling: Regex::new(concat!(
                r"\b(?:try|catch|except|finally|raise|throw|throws|rescue)\b",
                r"|panic!|\bErr\(|\bResult<|\.catch\(|\.map_err\(",
            ))?,
            logging: Regex::new(concat!(
                r"\bconsole\.(?:log|warn|error|info|debug)\b|\blogg(?:er|ing)\.\w+",
                r"|\b(?:trace|debug|info|warn|error)!\(|\be?println!\(|\blog\.(?:debug|info|warn|error)\b",
            ))?,
            test: Regex::new(concat!(
                r"\b(?:describe|it|test|expect|beforeEach|afterEach)\s*\(|\bassert\w*!?\s*\(",
                r"|#\[test\]|#\[cfg\(test\)\]|\bdef\s+test_\w+|@Test\b|\bfunc\s+Test\w*\(",
            ))?,
            comment: Regex::new(r"^\s*(?://|/\*|\*\s|\*/|<!--|#\s|#$|--\s)")?,
            style: Regex::new(
                r"@media\b|!important\b|\bstyled\.\w+|\bclassName\s*=|\bstyle\s*=\s*\{",
            )?,
            sql: Regex::new(concat!(
                r"(?i)\b(?:create|alter|drop)\s+(?:table|index|view)\b|\binsert\s+into\b",
                r"|\bselect\s+.+\s+from\b|\bdelete\s+from\b|\bupdate\s+\w+\s+set\b",
            ))?,
            api: Regex::new(concat!(
                r"\b(?:app|router|server|api)\.(?:get|post|put|patch|delete)\s*\(",
                r"|@(?:Get|Post|Put|Patch|Delete|Request)Mapping\b|@app\.route\b",
                r"|#\[(?:get|post|put|patch|delete)\(|\.route\(\s*",
            ))?,
            ui: Regex::new(concat!(
                r"<[A-Z]\w*[\s/>]|\buse(?:State|Effect|Memo|Callback|Ref|Context)\s*\(",
                r"|<template>|\bv-(?:if|for|model)=|\bReact\.",
            ))?,
        })
    }
}

fn patterns() -> SubgitResult<&'static Patterns> {
    static PATTERNS: OnceLock<Result<Patterns, regex::Error>> = OnceLock::new();
    PATTERNS
        .get_or_init(Patterns::new)
        .as_ref()
        .map_err(|e| SubgitError::other(format!("invalid built-in pattern: {e}")))
}

struct PathGlobs {
    docs: Vec<Glob<'static>>,
    manifests: Vec<Glob<'static>>,
    config: Vec<Glob<'static>>,
    tests: Vec<Glob<'static>>,
    styles: Vec<Glob<'static>>,
    ui: Vec<Glob<'static>>,
    database: Vec<Glob<'static>>,
}

impl PathGlobs {
    fn new() -> SubgitResult<Self> {
        fn build(patterns: &[&'static str]) -> SubgitResult<Vec<Glob<'static>>> {
            patterns
                .iter()
                .map(|&pattern| {
                    Glob::new(pattern).map_err(|e| {
                        SubgitError::other(format!("invalid glob pattern '{pattern}': {e}"))
                    })
                })
                .collect()
        }

        Ok(Self {
            docs: build(&[
                "**/*.{md,markdown,rst,adoc,txt}",
                "**/{docs,doc,documentation}/**",
                "**/{LICENSE,CHANGELOG,AUTHORS,CONTRIBUTING}*",
            ])?,
            manifests: build(&[
                "**/{package.json,package-lock.json,yarn.lock,pnpm-lock.yaml}",
                "**/{Cargo.toml,Cargo.lock,go.mod,go.sum,Gemfile,Gemfile.lock}",
                "**/{requirements*.txt,Pipfile,Pipfile.lock,pyproject.toml,poetry.lock}",
                "**/{composer.json,composer.lock,pom.xml,build.gradle,build.gradle.kts}",
            ])?,
            config: build(&[
                "**/*.{json,yaml,yml,toml,ini,cfg,conf,properties}",
                "**/*.config.{js,cjs,mjs,ts}",
                "**/.env*",
                "**/.github/**",
                "**/{.gitignore,.gitattributes,.gitmodules,.editorconfig,Dockerfile,Makefile}",
            ])?,
            tests: build(&[
                "**/{test,tests,spec,__tests__}/**",
                "**/*{_test,.test,_spec,.spec}.*",
                "**/test_*",
            ])?,
            styles: build(&["**/*.{css,scss,sass,less,styl}"])?,
            ui: build(&["**/*.{jsx,tsx,vue,svelte}"])?,
            database: build(&["**/*.sql", "**/migrations/**"])?,
        })
    }

    fn any(globs: &[Glob<'static>], path: &str) -> bool {
        globs.iter().any(|glob| glob.is_match(path))
    }

    fn is_manifest(&self, path: &str) -> bool {
        Self::any(&self.manifests, path)
    }

    fn is_doc(&self, path: &str) -> bool {
        !self.is_manifest(path) && Self::any(&self.docs, path)
    }

    fn is_config(&self, path: &str) -> bool {
        !self.is_manifest(path) && Self::any(&self.config, path)
    }
}

/// Added and removed lines of one file in a unified diff.
#[derive(Debug, Default)]
pub(crate) struct FileDiff<'a> {
    pub path: &'a str,
    pub added: Vec<&'a str>,
    pub removed: Vec<&'a str>,
}

/// Split `git diff` output per file. Only lines inside hunks are content.
pub(crate) fn split_diff(diff: &str) -> Vec<FileDiff<'_>> {
    let mut files: Vec<FileDiff<'_>> = Vec::new();
    let mut in_hunk = false;
    for line in diff.lines() {
        if let Some(header) = line.strip_prefix("diff --git ") {
            in_hunk = false;
            let path = header.rsplit_once(" b/").map_or(header, |(_, b)| b);
            files.push(FileDiff {
                path,
                ..FileDiff::default()
            });
            continue;
        }
        if line.starts_with("@@") {
            in_hunk = true;
            continue;
        }
        let Some(file) = files.last_mut().filter(|_| in_hunk) else {
            continue;
        };
        if let Some(added) = line.strip_prefix('+') {
            file.added.push(added);
        } else if let Some(removed) = line.strip_prefix('-') {
            file.removed.push(removed);
        }
    }
    files
}

fn sorted(list: &[String]) -> Vec<String> {
    let mut list = list.to_vec();
    list.sort_unstable();
    list.dedup();
    list
}

/// Compute signals for `changes`.
///
/// # Errors
///
/// Returns an error only if a built-in pattern fails to compile.
pub fn analyze(changes: &StagedChanges) -> SubgitResult<DiffAnalysis> {
    let p = patterns()?;
    let globs = PathGlobs::new()?;

    let files: Vec<String> = changes.all_files().into_iter().map(str::to_string).collect();
    let select = |pred: &dyn Fn(&str) -> bool| -> Vec<String> {
        files.iter().filter(|f| pred(f)).cloned().collect()
    };

    let mut analysis = DiffAnalysis {
        test_files: select(&|f| PathGlobs::any(&globs.tests, f)),
        doc_files: select(&|f| globs.is_doc(f)),
        manifest_files: select(&|f| globs.is_manifest(f)),
        config_files: select(&|f| globs.is_config(f)),
        style_files: select(&|f| PathGlobs::any(&globs.styles, f)),
        added: sorted(&changes.added),
        deleted: sorted(&changes.deleted),
        ..DiffAnalysis::default()
    };

    let mut signals = DiffSignals::empty();
    let (mut added_defs, mut removed_defs) = (0_usize, 0_usize);

    for file in split_diff(&changes.diff) {
        analysis.lines_added += file.added.len();
        analysis.lines_removed += file.removed.len();
        if globs.is_doc(file.path) {
            continue;
        }

        for line in &file.added {
            if p.comment.is_match(line) {
                signals |= DiffSignals::COMMENTS;
                continue;
            }
            if p.function.is_match(line) {
                added_defs += 1;
            }
            if p.import.is_match(line) {
                analysis.import_count += 1;
            }
            let content = [
                (&p.export, DiffSignals::EXPORTS),
                (&p.error_handling, DiffSignals::ERROR_HANDLING),
                (&p.logging, DiffSignals::LOGGING),
                (&p.test, DiffSignals::TESTS),
                (&p.style, DiffSignals::STYLES),
                (&p.sql, DiffSignals::DATABASE),
                (&p.api, DiffSignals::API),
                (&p.ui, DiffSignals::UI),
            ];
            for (regex, flag) in content {
                if regex.is_match(line) {
                    signals |= flag;
                }
            }
        }

        removed_defs += file
            .removed
            .iter()
            .filter(|line| !p.comment.is_match(line) && p.function.is_match(line))
            .count();
    }

    let any_path = |globs: &[Glob<'static>], list: &[String]| {
        list.iter().any(|f| PathGlobs::any(globs, f))
    };
    if !analysis.test_files.is_empty() {
        signals |= DiffSignals::TESTS;
    }
    signals.set(
        DiffSignals::DOCS_ONLY,
        !files.is_empty() && analysis.doc_files.len() == files.len(),
    );
    signals.set(DiffSignals::DEPENDENCIES, !analysis.manifest_files.is_empty());
    signals.set(DiffSignals::CONFIG, !analysis.config_files.is_empty());
    if !analysis.style_files.is_empty() {
        signals |= DiffSignals::STYLES;
    }
    if any_path(&globs.ui, &analysis.added) {
        signals |= DiffSignals::UI;
    }
    if any_path(&globs.database, &files) {
        signals |= DiffSignals::DATABASE;
    }
    signals.set(DiffSignals::NEW_FUNCTIONS, added_defs > removed_defs);
    signals.set(DiffSignals::MODIFIED_FUNCTIONS, removed_defs > 0);
    signals.set(
        DiffSignals::DELETIONS,
        !analysis.deleted.is_empty() || analysis.lines_removed > analysis.lines_added,
    );
    signals.set(DiffSignals::IMPORTS, analysis.import_count > 0);
    signals.set(DiffSignals::MANY_IMPORTS, analysis.import_count >= 3);

    analysis.signals = signals;
    analysis.files = files;
    Ok(analysis)
}
