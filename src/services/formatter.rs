// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! Bullet normalization for generated commit bodies.
//!
//! Models mix `*` and `-` bullets and nest them inconsistently (`- * item`,
//! `*   **Scope:** text`). Commit renderers expect one markdown dialect, so
//! every bullet is rewritten to a top-level `- ` or nested `  - ` dash bullet.

const NESTED_BULLET: &str = "  - ";
const TOP_BULLET: &str = "- ";

#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    /// `- *   **Scope:** text`
    NestedEmphasis(&'a str),
    /// `- * text`
    NestedStar(&'a str),
    /// `*   **Scope:** text`
    StarEmphasis(&'a str),
    /// `* text`
    TopStar(&'a str),
    /// `- text`, already canonical
    Dash,
    Text(&'a str),
}

/// Rewrite every bullet in `text` to dash form. Total and idempotent.
pub fn normalize(text: &str) -> String {
    text.split('\n')
        .map(normalize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_line(line: &str) -> String {
    match classify(line) {
        LineKind::Blank | LineKind::Dash => line.to_string(),
        LineKind::NestedEmphasis(rest)
        | LineKind::NestedStar(rest)
        | LineKind::StarEmphasis(rest) => bullet(NESTED_BULLET, rest),
        LineKind::TopStar(rest) => bullet(TOP_BULLET, rest),
        LineKind::Text(trimmed) => trimmed.to_string(),
    }
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if let Some(after_dash) = trimmed.strip_prefix(TOP_BULLET) {
        if after_dash.starts_with("*   **") {
            return LineKind::NestedEmphasis(after_dash[1..].trim());
        }
        if let Some(rest) = star_marker(after_dash) {
            return LineKind::NestedStar(rest);
        }
        return LineKind::Dash;
    }

    if trimmed.starts_with("*   **") {
        return LineKind::StarEmphasis(trimmed[1..].trim());
    }
    if let Some(rest) = star_marker(trimmed) {
        return LineKind::TopStar(rest);
    }

    LineKind::Text(trimmed)
}

/// Strip a leading `*` used as a list marker (followed by whitespace or
/// nothing). `**bold**` is emphasis and is left alone.
fn star_marker(s: &str) -> Option<&str> {
    let rest = s.strip_prefix('*')?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest.trim_start()),
        Some(_) => None,
    }
}

fn bullet(prefix: &str, rest: &str) -> String {
    // Collapse stacked markers like `* * item` into a single bullet.
    let mut text = rest.trim();
    while let Some(inner) = star_marker(text) {
        text = inner.trim();
    }

    if text.is_empty() {
        String::new()
    } else {
        format!("{prefix}{text}")
    }
}
