// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fmt::Write;

use crate::domain::{ComposedMessage, FileChangeStat, GeneratedMessage};
use crate::services::formatter;

/// Title used when neither the model nor the user supplied a usable one.
pub const GENERIC_TITLE: &str = "chore: update files";

pub const NO_CHANGES_LINE: &str = "No specific file changes detected in diff.";

pub struct CommitComposer;

impl CommitComposer {
    /// Merge backend output, diff stats and a fallback title into a commit
    /// message. Never fails: a backend error falls back to `fallback_title`.
    pub fn compose(
        generated: &GeneratedMessage,
        stats: &[FileChangeStat],
        fallback_title: &str,
    ) -> ComposedMessage {
        let (title, body) = match generated {
            Ok(text) => Self::split_generated(text),
            Err(_) => Self::split_fallback(fallback_title),
        };

        let changes = Self::changes_section(stats);
        let body = if body.is_empty() {
            changes
        } else {
            format!("{body}\n\n{changes}")
        };

        ComposedMessage { title, body }
    }

    fn split_generated(text: &str) -> (String, String) {
        let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
        let first = first.trim();

        if first.contains(':') {
            (first.to_string(), Self::format_body(rest))
        } else {
            (GENERIC_TITLE.to_string(), Self::format_body(text))
        }
    }

    fn split_fallback(fallback_title: &str) -> (String, String) {
        let (first, rest) = fallback_title
            .split_once('\n')
            .unwrap_or((fallback_title, ""));
        let first = first.trim();

        let title = if first.is_empty() {
            GENERIC_TITLE
        } else {
            first
        };
        (title.to_string(), Self::format_body(rest))
    }

    fn format_body(raw: &str) -> String {
        let normalized = formatter::normalize(raw);
        let lines: Vec<&str> = normalized.lines().collect();

        // Drop blank lines around the body; the composer owns the separators.
        let start = lines.iter().position(|l| !l.trim().is_empty());
        let end = lines.iter().rposition(|l| !l.trim().is_empty());
        match (start, end) {
            (Some(s), Some(e)) => lines[s..=e]
                .iter()
                .map(|l| l.trim_end())
                .collect::<Vec<_>>()
                .join("\n"),
            _ => String::new(),
        }
    }

    /// The `Changes:` section, always newline-terminated.
    pub fn changes_section(stats: &[FileChangeStat]) -> String {
        if stats.is_empty() {
            return format!("{NO_CHANGES_LINE}\n");
        }

        let mut out = String::from("Changes:\n");
        for stat in stats {
            let _ = writeln!(
                out,
                "- {} ({} lines, {} characters)",
                stat.path, stat.lines_changed, stat.chars_changed
            );
        }
        out
    }
}
