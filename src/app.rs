// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::ffi::OsString;
use std::io::IsTerminal;

use clap::CommandFactory;
use console::style;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::config::{Config, ProviderConfig, SettingsUpdate};
use crate::error::Result;
use crate::services::git::{GitService, SystemGit};
use crate::services::llm::DefaultGeneratorFactory;
use crate::services::prompt::{LinePrompt, Prompt, TerminalPrompt};
use crate::services::workflow::{CommitOptions, CommitWorkflow, SystemClock};

pub struct App {
    cli: Cli,
    cancel_token: CancellationToken,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Run the selected command and return the process exit code.
    pub async fn run(&mut self) -> Result<i32> {
        let Some(ref cmd) = self.cli.command else {
            Cli::command().print_help()?;
            return Ok(0);
        };

        match cmd {
            Commands::Cr {
                message,
                yes,
                dry_run,
                show_diff,
            } => {
                let opts = CommitOptions {
                    hint: message.clone(),
                    yes: *yes,
                    dry_run: *dry_run,
                    show_diff: *show_diff,
                };
                self.commit(&opts).await?;
                Ok(0)
            }
            Commands::Config {
                init,
                provider,
                api_key,
                model,
                git_args,
            } => {
                if !git_args.is_empty() {
                    let mut args = vec![OsString::from("config")];
                    args.extend(git_args.iter().cloned());
                    return GitService::new(&SystemGit).passthrough(&args);
                }
                if *init {
                    let path = Config::create_default()?;
                    println!("Created config: {}", path.display());
                    return Ok(0);
                }
                let update = SettingsUpdate {
                    provider: provider.clone(),
                    api_key: api_key.clone(),
                    model: model.clone(),
                };
                self.configure(&update)?;
                Ok(0)
            }
            Commands::Version => {
                println!("gitter version {}", env!("CARGO_PKG_VERSION"));
                Ok(0)
            }
            Commands::Completions { shell } => {
                let mut cmd = Cli::command();
                clap_complete::generate(*shell, &mut cmd, "gitter", &mut std::io::stdout());
                Ok(0)
            }
            Commands::Git(args) => GitService::new(&SystemGit).passthrough(args),
        }
    }

    async fn commit(&self, opts: &CommitOptions) -> Result<()> {
        let provider = provider_config_or_local(Config::load());

        // Setup Ctrl+C handler with CancellationToken
        let cancel = self.cancel_token.clone();
        tokio::spawn(async move {
            signal::ctrl_c().await.ok();
            cancel.cancel();
        });

        let is_interactive = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        let mut prompt: Box<dyn Prompt> = if is_interactive {
            Box::new(TerminalPrompt)
        } else {
            Box::new(LinePrompt::new(std::io::stdin().lock(), std::io::stderr()))
        };

        let mut workflow = CommitWorkflow::new(
            &SystemGit,
            prompt.as_mut(),
            &DefaultGeneratorFactory,
            &SystemClock,
            provider,
            self.cancel_token.clone(),
        );
        let outcome = workflow.run(opts).await?;
        debug!(?outcome, "cr finished");
        Ok(())
    }

    fn configure(&self, update: &SettingsUpdate) -> Result<()> {
        if update.is_empty() {
            let config = Config::load()?;
            println!(
                "Provider: {}",
                config.provider.as_deref().unwrap_or("(none, local messages only)")
            );
            println!(
                "API Key: {}",
                if config.api_key.is_some() { "[set]" } else { "[not set]" }
            );
            if let Some(ref model) = config.model {
                println!("Model: {model}");
            }
            if let Some(ref base_url) = config.base_url {
                println!("Base URL: {base_url}");
            }
            println!("Timeout: {}s", config.timeout_secs);
            println!("Max retries: {}", config.max_retries);
            if let Some(path) = Config::config_path() {
                let status = if path.exists() { "found" } else { "not found" };
                println!("Config file: {} ({})", path.display(), status);
            }
            return Ok(());
        }

        let path = Config::save_settings(update)?;
        debug!(path = %path.display(), "config saved");

        eprintln!("{} Configuration updated successfully.", style("✓").green().bold());
        if let Some(ref provider) = update.provider {
            println!("Provider: {}", provider.to_lowercase());
        }
        if let Some(ref model) = update.model {
            println!("Model: {model}");
        }
        if update.api_key.is_some() {
            println!("API Key: [set]");
        }
        Ok(())
    }
}

/// A broken config never blocks a commit: fall back to local-only messages.
fn provider_config_or_local(loaded: Result<Config>) -> ProviderConfig {
    match loaded {
        Ok(config) => {
            debug!(
                provider = config.provider.as_deref().unwrap_or("none"),
                api_key = config.api_key.is_some(),
                timeout_secs = config.timeout_secs,
                "config loaded"
            );
            config.provider_config()
        }
        Err(e) => {
            warn!(error = %e, "config unusable, composing locally");
            eprintln!(
                "{} could not load config, using simple message generator: {e}",
                style("warning:").yellow().bold()
            );
            ProviderConfig::new("", None)
        }
    }
}
