// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! Line-based questions for the `cr` workflow.

use std::io::{BufRead, Write};

use dialoguer::{Confirm, Input};

use crate::error::{Error, Result};

pub trait Prompt {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Free text answer; empty when the user just presses Enter.
    fn input(&mut self, question: &str) -> Result<String>;
}

/// dialoguer prompts, for an interactive terminal.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()?)
    }

    fn input(&mut self, question: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }
}

/// Plain `question (y/n):` prompts over any reader/writer pair, used when
/// stdin is piped.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        write!(self.writer, "{question} (y/n): ")?;
        self.writer.flush()?;

        // EOF is a refusal: never act on a closed stdin
        let Some(answer) = self.read_line()? else {
            return Err(Error::Cancelled);
        };

        Ok(match answer.to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }

    fn input(&mut self, question: &str) -> Result<String> {
        write!(self.writer, "{question}\n> ")?;
        self.writer.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }
}
