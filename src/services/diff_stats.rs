// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! Per-file statistics from `git diff` output.

use tracing::trace;

use crate::domain::FileChangeStat;

const FILE_MARKER: &str = "diff --git";
const NEW_FILE_HEADER: &str = "+++ ";
const DELETED_FILE_MODE: &str = "deleted file mode";
const DEV_NULL: &str = "/dev/null";

/// Parse unified diff text into one stat per file block, in input order.
///
/// Blocks that delete a file, or whose new-side path cannot be found, produce
/// no stat. The parser never fails: anything unrecognised just counts as zero.
pub fn parse_diff_stats(diff: &str) -> Vec<FileChangeStat> {
    diff.split(FILE_MARKER)
        .filter(|block| !block.trim().is_empty())
        .filter_map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> Option<FileChangeStat> {
    let Some(path) = resolve_new_path(block) else {
        trace!(
            header = block.lines().next().unwrap_or("").trim(),
            "skipping diff block without a new-side path"
        );
        return None;
    };

    let mut stat = FileChangeStat::new(path);
    for line in block.lines() {
        if is_changed_line(line) {
            stat.record_line(&line[1..]);
        }
    }
    Some(stat)
}

fn is_changed_line(line: &str) -> bool {
    (line.starts_with('+') && !line.starts_with("++"))
        || (line.starts_with('-') && !line.starts_with("---"))
}

/// Find the path a block writes to, or `None` when it is a deletion.
fn resolve_new_path(block: &str) -> Option<String> {
    if block.lines().any(|l| l.starts_with(DELETED_FILE_MODE)) {
        return None;
    }

    let raw = block
        .lines()
        .find_map(|l| l.strip_prefix(NEW_FILE_HEADER))
        .map(|p| p.split('\t').next().unwrap_or(p))
        .or_else(|| block.lines().find_map(binary_new_side))
        .or_else(|| header_new_side(block.lines().next()?))?;

    let path = unquote(raw.trim());
    if path == DEV_NULL {
        return None;
    }

    let path = path.strip_prefix("b/").unwrap_or(&path).to_string();
    if path.is_empty() { None } else { Some(path) }
}

/// `Binary files a/x.png and b/x.png differ`
fn binary_new_side(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("Binary files ")?.strip_suffix(" differ")?;
    rest.rsplit_once(" and ").map(|(_, new)| new)
}

/// The remainder of the `diff --git` line, ` a/x b/x`.
fn header_new_side(header: &str) -> Option<&str> {
    header
        .trim()
        .rfind(" b/")
        .map(|idx| &header.trim()[idx + 1..])
}

/// Undo git's C-style quoting for the escapes that show up in paths.
fn unquote(path: &str) -> String {
    let Some(inner) = path
        .strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
    else {
        return path.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
