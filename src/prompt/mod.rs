// subgit: Git orchestration across a repository and its submodules
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive input.
//!
//! ```text
//! Prompt (trait)
//!   +-- TerminalPrompt<R: BufRead, W: Write>   stdin / stderr in the binary
//!   '-- ScriptedPrompt                         queued answers for tests
//! ```
//!
//! Menus are numbered from 1. End of input cancels the operation.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{SubgitResult, ValidationError};

/// Source of answers for interactive workflows.
pub trait Prompt {
    /// Free-form answer, trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Cancelled` at end of input.
    fn ask(&mut self, question: &str) -> SubgitResult<String>;

    /// Zero-based index of the chosen option.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidChoice` for an answer outside the menu
    /// and `ValidationError::Cancelled` at end of input.
    fn choose(&mut self, title: &str, options: &[&str]) -> SubgitResult<usize>;

    /// Zero-based indices of several options, answered as space-separated
    /// numbers or `all`. Order follows the menu, duplicates are dropped.
    ///
    /// # Errors
    ///
    /// Same as [`Prompt::choose`]; an empty answer is an invalid choice.
    fn choose_many(&mut self, title: &str, options: &[&str]) -> SubgitResult<Vec<usize>>;

    /// Yes/no question; an empty answer yields `default`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidChoice` for anything but y/yes/n/no.
    fn confirm(&mut self, question: &str, default: bool) -> SubgitResult<bool>;
}

/// Map a 1-based menu answer to an index.
pub(crate) fn parse_choice(answer: &str, len: usize) -> SubgitResult<usize> {
    match answer.trim().parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
        _ => Err(ValidationError::InvalidChoice(answer.trim().to_string()).into()),
    }
}

pub(crate) fn parse_choices(answer: &str, len: usize) -> SubgitResult<Vec<usize>> {
    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("all") || answer.eq_ignore_ascii_case("a") {
        return Ok((0..len).collect());
    }
    if answer.is_empty() {
        return Err(ValidationError::InvalidChoice(String::new()).into());
    }

    let mut picked = vec![false; len];
    for token in answer.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        picked[parse_choice(token, len)?] = true;
    }
    Ok(picked
        .into_iter()
        .enumerate()
        .filter_map(|(i, on)| on.then_some(i))
        .collect())
}

pub(crate) fn parse_yes_no(answer: &str, default: bool) -> SubgitResult<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(ValidationError::InvalidChoice(other.to_string()).into()),
    }
}

/// Line-based prompt over any reader and writer.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stderr> {
    /// Read from stdin and print prompts to stderr, keeping stdout for results.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self, prompt: &str) -> SubgitResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(ValidationError::Cancelled.into());
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn ask(&mut self, question: &str) -> SubgitResult<String> {
        self.read_answer(&format!("{question}: "))
    }

    fn choose(&mut self, title: &str, options: &[&str]) -> SubgitResult<usize> {
        writeln!(self.output, "{title}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {option}", i + 1)?;
        }
        let answer = self.read_answer(&format!("Choose [1-{}]: ", options.len()))?;
        parse_choice(&answer, options.len())
    }

    fn choose_many(&mut self, title: &str, options: &[&str]) -> SubgitResult<Vec<usize>> {
        writeln!(self.output, "{title}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {option}", i + 1)?;
        }
        let answer = self.read_answer("Numbers separated by spaces, or 'all': ")?;
        parse_choices(&answer, options.len())
    }

    fn confirm(&mut self, question: &str, default: bool) -> SubgitResult<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let answer = self.read_answer(&format!("{question} {hint} "))?;
        parse_yes_no(&answer, default)
    }
}

/// Prompt that replays prepared answers, for tests and non-interactive use.
///
/// Every question asked is recorded in [`ScriptedPrompt::asked`].
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Questions and menu titles in the order they were asked.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, question: &str) -> SubgitResult<String> {
        self.asked.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| ValidationError::Cancelled.into())
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> SubgitResult<String> {
        Ok(self.next(question)?.trim().to_string())
    }

    fn choose(&mut self, title: &str, options: &[&str]) -> SubgitResult<usize> {
        let answer = self.next(title)?;
        parse_choice(&answer, options.len())
    }

    fn choose_many(&mut self, title: &str, options: &[&str]) -> SubgitResult<Vec<usize>> {
        let answer = self.next(title)?;
        parse_choices(&answer, options.len())
    }

    fn confirm(&mut self, question: &str, default: bool) -> SubgitResult<bool> {
        let answer = self.next(question)?;
        parse_yes_no(&answer, default)
    }
}
