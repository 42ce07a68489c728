// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::ffi::OsString;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "gitter")]
#[command(version)]
#[command(about = "A smart git wrapper with LLM-drafted commit messages", long_about = None)]
#[command(after_help = "Any other command is passed straight to git, e.g. `gitter status`.")]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Create a commit with a generated message
    Cr {
        /// Message hint for the generator; skips the prompt
        #[arg(short, long)]
        message: Option<String>,

        /// Auto-confirm staging and committing
        #[arg(short = 'y', long)]
        yes: bool,

        /// Print message only, don't commit
        #[arg(long)]
        dry_run: bool,

        /// Show the staged diff before generating
        #[arg(long)]
        show_diff: bool,
    },
    /// Configure the LLM provider and API key
    ///
    /// Without flags, prints the current configuration. Positional arguments
    /// are forwarded to `git config`.
    Config {
        /// Write a commented default config file
        #[arg(long, conflicts_with_all = ["provider", "api_key", "model", "git_args"])]
        init: bool,

        /// LLM provider (openai, gemini)
        #[arg(short, long)]
        provider: Option<String>,

        /// API key for the LLM provider
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Model name
        #[arg(long)]
        model: Option<String>,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        git_args: Vec<OsString>,
    },
    /// Print the version number of gitter
    Version,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    #[command(external_subcommand)]
    Git(Vec<OsString>),
}
