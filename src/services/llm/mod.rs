// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

pub mod openai;
pub mod retry;

use crate::config::ProviderConfig;
use crate::error::GeneratorError;

pub(crate) const SYSTEM_PROMPT: &str = r#"You write git commit messages from staged diffs.

RULES:
1. First line: a conventional commit title, "type: subject" or "type(scope): subject"
2. Types: feat, fix, refactor, docs, test, chore, style, perf, build, ci, revert
3. Subject is lowercase, imperative, specific, under 72 characters, no period
4. After a blank line, a short markdown bullet list of the notable changes
5. Output only the commit message, no preamble and no code fences"#;

/// Produces a commit message draft from a diff.
#[async_trait]
pub trait CommitMessageGenerator: Send + Sync {
    /// One request, no formatting: the text comes back as the backend sent it.
    async fn generate(&self, diff: &str, hint: &str) -> Result<String, GeneratorError>;

    fn name(&self) -> &str;
}

/// Known providers. All of them speak the chat-completions protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    Gemini,
}

impl Provider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAI => "https://api.openai.com/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAI => "gpt-4o-mini",
            Self::Gemini => "gemini-2.0-flash",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::Gemini => write!(f, "gemini"),
        }
    }
}

impl FromStr for Provider {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Err(GeneratorError::NoProvider),
            "openai" => Ok(Self::OpenAI),
            "gemini" => Ok(Self::Gemini),
            other => Err(GeneratorError::UnsupportedProvider {
                provider: other.to_string(),
            }),
        }
    }
}

pub fn create_generator(
    config: &ProviderConfig,
) -> Result<Box<dyn CommitMessageGenerator>, GeneratorError> {
    let provider: Provider = config.provider.parse()?;
    Ok(Box::new(openai::ChatCompletionsGenerator::new(
        provider, config,
    )?))
}

/// Builds generators for the `cr` workflow; swapped out in tests.
pub trait GeneratorFactory {
    fn create(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn CommitMessageGenerator>, GeneratorError>;
}

pub struct DefaultGeneratorFactory;

impl GeneratorFactory for DefaultGeneratorFactory {
    fn create(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn CommitMessageGenerator>, GeneratorError> {
        create_generator(config)
    }
}

/// User message carrying the hint and the diff.
pub(crate) fn build_user_prompt(diff: &str, hint: &str) -> String {
    let hint = hint.trim();
    if hint.is_empty() {
        format!("Write a commit message for this diff:\n\n{diff}")
    } else {
        format!(
            "The author describes the change as: {hint}\n\nWrite a commit message for this diff:\n\n{diff}"
        )
    }
}
