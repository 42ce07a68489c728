// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::collections::{HashMap, VecDeque};
use std::ffi::OsString;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use gitter::config::ProviderConfig;
use gitter::domain::FileChangeStat;
use gitter::error::{Error, GeneratorError, Result};
use gitter::services::git::{GitOutput, GitRunner};
use gitter::services::llm::{CommitMessageGenerator, GeneratorFactory};
use gitter::services::prompt::Prompt;
use gitter::services::workflow::Clock;

/// Build a FileChangeStat with explicit counts
#[allow(dead_code)]
pub fn make_stat(path: &str, lines: usize, chars: usize) -> FileChangeStat {
    FileChangeStat {
        path: path.to_string(),
        lines_changed: lines,
        chars_changed: chars,
    }
}

#[allow(dead_code)]
pub fn ok_output(stdout: &str) -> GitOutput {
    GitOutput {
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

#[allow(dead_code)]
pub fn exit_output(code: i32) -> GitOutput {
    GitOutput {
        code: Some(code),
        stdout: String::new(),
        stderr: String::new(),
    }
}

/// Git runner answering from a table keyed by the joined arguments.
/// Unknown commands succeed with empty output. Every call is recorded.
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedGit {
    responses: HashMap<String, GitOutput>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedGit {
    /// A repository with staged changes producing `diff`
    pub fn with_staged_diff(diff: &str) -> Self {
        Self::default()
            .respond("rev-parse --is-inside-work-tree", ok_output("true\n"))
            .respond("rev-parse --show-toplevel", ok_output("/home/dev/projects/demo\n"))
            .respond("diff --cached --quiet", exit_output(1))
            .respond("diff --staged --no-ext-diff --no-color", ok_output(diff))
    }

    pub fn respond(mut self, args: &str, output: GitOutput) -> Self {
        self.responses.insert(args.to_string(), output);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }
}

impl GitRunner for ScriptedGit {
    fn output(&self, args: &[&str]) -> std::io::Result<GitOutput> {
        let key = args.join(" ");
        self.calls.lock().unwrap().push(key.clone());
        Ok(self.responses.get(&key).cloned().unwrap_or_else(|| ok_output("")))
    }

    fn passthrough(&self, args: &[OsString]) -> std::io::Result<i32> {
        let key = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(key);
        Ok(0)
    }
}

/// Prompt answering from queues; running out of answers cancels.
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedPrompt {
    pub confirms: VecDeque<bool>,
    pub inputs: VecDeque<String>,
    pub questions: Vec<String>,
}

#[allow(dead_code)]
impl ScriptedPrompt {
    pub fn new(confirms: &[bool], inputs: &[&str]) -> Self {
        Self {
            confirms: confirms.iter().copied().collect(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            questions: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, question: &str, _default: bool) -> Result<bool> {
        self.questions.push(question.to_string());
        self.confirms.pop_front().ok_or(Error::Cancelled)
    }

    fn input(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        self.inputs.pop_front().ok_or(Error::Cancelled)
    }
}

#[allow(dead_code)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[allow(dead_code)]
pub fn fixed_clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
}

/// Canned generator outcome
#[allow(dead_code)]
#[derive(Clone)]
pub enum Canned {
    Text(String),
    TransportFailure,
    NoProvider,
}

struct CannedGenerator(Canned);

#[async_trait]
impl CommitMessageGenerator for CannedGenerator {
    async fn generate(&self, _diff: &str, _hint: &str) -> std::result::Result<String, GeneratorError> {
        match self.0 {
            Canned::Text(ref text) => Ok(text.clone()),
            _ => Err(GeneratorError::Transport {
                provider: "canned".into(),
                message: "connection refused".into(),
            }),
        }
    }

    fn name(&self) -> &str {
        "canned"
    }
}

#[allow(dead_code)]
pub struct CannedFactory(pub Canned);

impl GeneratorFactory for CannedFactory {
    fn create(
        &self,
        _config: &ProviderConfig,
    ) -> std::result::Result<Box<dyn CommitMessageGenerator>, GeneratorError> {
        match self.0 {
            Canned::NoProvider => Err(GeneratorError::NoProvider),
            ref other => Ok(Box::new(CannedGenerator(other.clone()))),
        }
    }
}

/// Two-file diff: one modified file, one deletion that must be skipped
#[allow(dead_code)]
pub const SAMPLE_DIFF: &str = "\
diff --git a/src/lib.rs b/src/lib.rs
index 3b18e51..a9c2f4d 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,3 +1,3 @@
 pub mod cli;
-pub mod old;
+pub mod new;
 pub mod util;
diff --git a/legacy.txt b/legacy.txt
deleted file mode 100644
index e69de29..0000000
--- a/legacy.txt
+++ /dev/null
@@ -1 +0,0 @@
-gone
";
