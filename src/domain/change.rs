// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

/// Per-file change statistics extracted from one `diff --git` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChangeStat {
    /// Path on the new side of the diff, without the `b/` prefix
    pub path: String,
    /// Number of added plus removed lines
    pub lines_changed: usize,
    /// UTF-8 byte length of those lines, marker stripped and whitespace trimmed
    pub chars_changed: usize,
}

impl FileChangeStat {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lines_changed: 0,
            chars_changed: 0,
        }
    }

    pub(crate) fn record_line(&mut self, content: &str) {
        self.lines_changed += 1;
        self.chars_changed += content.trim().len();
    }
}

/// Totals across a parsed diff, used for status output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffTotals {
    pub files_changed: usize,
    pub lines_changed: usize,
    pub chars_changed: usize,
}

impl DiffTotals {
    pub fn from_stats(stats: &[FileChangeStat]) -> Self {
        stats.iter().fold(
            Self {
                files_changed: stats.len(),
                ..Self::default()
            },
            |acc, s| Self {
                lines_changed: acc.lines_changed + s.lines_changed,
                chars_changed: acc.chars_changed + s.chars_changed,
                ..acc
            },
        )
    }
}
