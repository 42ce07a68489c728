// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Captured result of a git invocation.
#[derive(Debug, Clone, Default)]
pub struct GitOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Launches the `git` binary. The workflow only talks to git through this.
pub trait GitRunner: Send + Sync {
    /// Run with captured stdout/stderr.
    fn output(&self, args: &[&str]) -> std::io::Result<GitOutput>;

    /// Run attached to the terminal and return git's exit code.
    fn passthrough(&self, args: &[OsString]) -> std::io::Result<i32>;
}

/// Runs the system `git` from `PATH` in the current directory.
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn output(&self, args: &[&str]) -> std::io::Result<GitOutput> {
        let output = Command::new("git")
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(GitOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn passthrough(&self, args: &[OsString]) -> std::io::Result<i32> {
        let status = Command::new("git").args(args).status()?;
        // Killed by a signal: no code to forward
        Ok(status.code().unwrap_or(1))
    }
}

pub struct GitService<'a> {
    runner: &'a dyn GitRunner,
}

impl<'a> GitService<'a> {
    pub fn new(runner: &'a dyn GitRunner) -> Self {
        Self { runner }
    }

    fn run(&self, args: &[&str]) -> Result<GitOutput> {
        debug!(?args, "git");
        match self.runner.output(args) {
            Ok(output) => Ok(output),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::GitNotFound),
            Err(e) => Err(e.into()),
        }
    }

    fn run_checked(&self, args: &[&str]) -> Result<GitOutput> {
        let output = self.run(args)?;
        if !output.success() {
            return Err(Error::Git(format!(
                "git {} failed: {}",
                args.join(" "),
                output.stderr.trim()
            )));
        }
        Ok(output)
    }

    pub fn ensure_available(&self) -> Result<()> {
        match self.run(&["version"]) {
            Ok(output) if output.success() => Ok(()),
            Ok(_) | Err(Error::GitNotFound) => Err(Error::GitNotFound),
            Err(e) => Err(e),
        }
    }

    pub fn ensure_repo(&self) -> Result<()> {
        let output = self.run(&["rev-parse", "--is-inside-work-tree"])?;
        if output.success() && output.stdout.trim() == "true" {
            Ok(())
        } else {
            Err(Error::NotAGitRepo)
        }
    }

    /// `git diff --cached --quiet` exits 1 when something is staged.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let output = self.run(&["diff", "--cached", "--quiet"])?;
        match output.code {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(Error::Git(output.stderr.trim().to_string())),
        }
    }

    pub fn stage_all(&self) -> Result<()> {
        self.run_checked(&["add", "."]).map(|_| ())
    }

    pub fn unstage_all(&self) -> Result<()> {
        self.run_checked(&["reset"]).map(|_| ())
    }

    pub fn staged_diff(&self) -> Result<String> {
        // --no-ext-diff: external diff tools would break parsing
        self.run_checked(&["diff", "--staged", "--no-ext-diff", "--no-color"])
            .map(|o| o.stdout)
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.run_checked(&["commit", "-m", message]).map(|_| ())
    }

    /// Repository root, if git can tell.
    pub fn toplevel(&self) -> Option<PathBuf> {
        let output = self.run(&["rev-parse", "--show-toplevel"]).ok()?;
        let path = output.stdout.trim();
        (output.success() && !path.is_empty()).then(|| PathBuf::from(path))
    }

    pub fn passthrough(&self, args: &[OsString]) -> Result<i32> {
        self.ensure_available()?;
        debug!(?args, "passing through to git");
        Ok(self.runner.passthrough(args)?)
    }
}
