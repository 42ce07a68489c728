// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Failures of the commit message backend.
///
/// None of these abort a commit: the composer falls back to the user's title
/// and the diff statistics when generation fails.
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    #[error("No LLM provider configured")]
    #[diagnostic(
        code(gitter::generator::no_provider),
        help("Set one with: gitter config --provider openai")
    )]
    NoProvider,

    #[error("Unsupported LLM provider '{provider}'")]
    #[diagnostic(
        code(gitter::generator::unsupported_provider),
        help("Supported providers: openai, gemini")
    )]
    UnsupportedProvider { provider: String },

    #[error("{provider} requires an API key")]
    #[diagnostic(
        code(gitter::generator::missing_api_key),
        help("Set one with: gitter config --api-key <key>")
    )]
    MissingApiKey { provider: String },

    #[error("Request to {provider} failed: {message}")]
    #[diagnostic(code(gitter::generator::transport))]
    Transport { provider: String, message: String },

    #[error("Unexpected response from {provider}: {message}")]
    #[diagnostic(code(gitter::generator::protocol))]
    Protocol { provider: String, message: String },

    #[error("{provider} returned no commit message")]
    #[diagnostic(code(gitter::generator::empty_result))]
    EmptyResult { provider: String },
}

impl GeneratorError {
    /// Only network-level failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Not a git repository")]
    #[diagnostic(
        code(gitter::git::not_repo),
        help("Run this command inside a git repository")
    )]
    NotAGitRepo,

    #[error("'git' command not found")]
    #[diagnostic(
        code(gitter::git::not_found),
        help("Ensure Git is installed and in your PATH")
    )]
    GitNotFound,

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Configuration error: {0}")]
    #[diagnostic(code(gitter::config::error))]
    Config(String),

    #[error("Git error: {0}")]
    #[diagnostic(code(gitter::git::error))]
    Git(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(gitter::keyring::error),
        help("Check your system keychain configuration")
    )]
    Keyring(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
