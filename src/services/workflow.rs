// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! The `gitter cr` flow: stage, diff, draft, confirm, commit.

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::domain::{ComposedMessage, DiffTotals, GeneratedMessage};
use crate::error::{Error, Result};
use crate::services::composer::CommitComposer;
use crate::services::diff_stats::parse_diff_stats;
use crate::services::git::{GitRunner, GitService};
use crate::services::llm::GeneratorFactory;
use crate::services::prompt::Prompt;

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Title used when the user gives no message: `new git commit on <repo> <date>`.
pub fn default_title(toplevel: Option<&Path>, today: NaiveDate) -> String {
    let repo_name = toplevel
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned());

    match repo_name {
        Some(name) => format!("new git commit on {} {}", name, today.format("%Y-%m-%d")),
        None => "new git commit".to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    /// Message hint; skips the interactive question
    pub hint: Option<String>,
    /// Answer yes to every question
    pub yes: bool,
    /// Print the message, don't commit
    pub dry_run: bool,
    /// Print the staged diff before generating
    pub show_diff: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed(String),
    DryRun(String),
    /// Message rejected; `unstaged` tells whether the index was reset
    Declined { unstaged: bool },
    /// Nothing staged and the user chose not to stage
    NothingStaged,
    /// Staged diff was empty
    NoChanges,
}

pub struct CommitWorkflow<'a> {
    git: GitService<'a>,
    prompt: &'a mut dyn Prompt,
    factory: &'a dyn GeneratorFactory,
    clock: &'a dyn Clock,
    provider: ProviderConfig,
    cancel: CancellationToken,
}

impl<'a> CommitWorkflow<'a> {
    pub fn new(
        runner: &'a dyn GitRunner,
        prompt: &'a mut dyn Prompt,
        factory: &'a dyn GeneratorFactory,
        clock: &'a dyn Clock,
        provider: ProviderConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            git: GitService::new(runner),
            prompt,
            factory,
            clock,
            provider,
            cancel,
        }
    }

    pub async fn run(&mut self, opts: &CommitOptions) -> Result<CommitOutcome> {
        self.git.ensure_available()?;
        self.git.ensure_repo()?;

        if self.git.has_staged_changes()? {
            print_status("Working on currently staged changes.");
        } else {
            let stage = opts.yes
                || self.prompt.confirm(
                    "No files are currently staged. Stage all changed files?",
                    false,
                )?;
            if !stage {
                print_info("Operation cancelled. No files were staged.");
                return Ok(CommitOutcome::NothingStaged);
            }
            print_status("Staging all changed files...");
            self.git.stage_all()?;
        }

        print_status("Generating diff...");
        let diff = self.git.staged_diff()?;
        if diff.trim().is_empty() {
            print_info("No changes to commit.");
            self.git.unstage_all()?;
            return Ok(CommitOutcome::NoChanges);
        }

        if opts.show_diff {
            eprintln!("{}", style("--- DIFF ---").dim());
            eprintln!("{}", diff);
            eprintln!("{}", style("--- END DIFF ---").dim());
        }

        let stats = parse_diff_stats(&diff);
        let totals = DiffTotals::from_stats(&stats);
        debug!(
            files = totals.files_changed,
            lines = totals.lines_changed,
            chars = totals.chars_changed,
            "diff parsed"
        );
        print_info(&format!(
            "{} files changed ({} lines)",
            totals.files_changed, totals.lines_changed
        ));

        let hint = self.ask_hint(opts)?;
        let generated = self.generate(&diff, &hint).await?;
        let message = CommitComposer::compose(&generated, &stats, &hint);

        self.finish(message, opts)
    }

    fn ask_hint(&mut self, opts: &CommitOptions) -> Result<String> {
        let answer = match opts.hint {
            Some(ref hint) => hint.trim().to_string(),
            None if opts.yes => String::new(),
            None => self
                .prompt
                .input("Please enter a commit message (or press Enter for a default):")?,
        };

        if !answer.is_empty() {
            return Ok(answer);
        }

        let title = default_title(self.git.toplevel().as_deref(), self.clock.today());
        print_info(&format!(
            "No commit message provided. Using default: \"{title}\""
        ));
        Ok(title)
    }

    async fn generate(&self, diff: &str, hint: &str) -> Result<GeneratedMessage> {
        let generator = match self.factory.create(&self.provider) {
            Ok(generator) => generator,
            Err(e) => {
                // Local-only mode is a normal setup, not worth a warning
                debug!(error = %e, "no message generator, composing locally");
                return Ok(Err(e));
            }
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!(
            "Generating commit message with {}...",
            generator.name()
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let generated = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                spinner.finish_and_clear();
                return Err(Error::Cancelled);
            }
            result = generator.generate(diff, hint) => result,
        };
        spinner.finish_and_clear();

        match generated {
            Ok(ref text) => info!(
                provider = generator.name(),
                chars = text.len(),
                "message generated"
            ),
            Err(ref e) => {
                warn!(provider = generator.name(), error = %e, "generation failed");
                print_warning(&format!(
                    "LLM message generation failed, falling back to simple message: {e}"
                ));
            }
        }

        Ok(generated)
    }

    fn finish(&mut self, message: ComposedMessage, opts: &CommitOptions) -> Result<CommitOutcome> {
        let text = message.to_message();

        if opts.dry_run {
            println!("{text}");
            return Ok(CommitOutcome::DryRun(text));
        }

        eprintln!("\n{}", style("--- Generated Commit Message ---").bold());
        eprint!("{}", style(&text).green());
        eprintln!("{}", style("--------------------------------").bold());

        let confirmed = opts.yes || self.prompt.confirm("Confirm commit with this message?", true)?;
        if !confirmed {
            print_info("Commit cancelled. Changes are still staged.");
            let unstage = self.prompt.confirm("Would you like to unstage the changes?", false)?;
            if unstage {
                self.git.unstage_all()?;
                print_info("Changes have been unstaged.");
            }
            return Ok(CommitOutcome::Declined { unstaged: unstage });
        }

        print_status("Committing...");
        self.git.commit(&text)?;
        eprintln!("{} Commit successful.", style("✓").green().bold());
        Ok(CommitOutcome::Committed(text))
    }
}

fn print_status(msg: &str) {
    eprintln!("{} {}", style("→").cyan(), msg);
}

fn print_info(msg: &str) {
    eprintln!("{} {}", style("info:").cyan(), msg);
}

fn print_warning(msg: &str) {
    eprintln!("{} {}", style("warning:").yellow().bold(), msg);
}
