// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fmt;

use crate::error::GeneratorError;

/// Backend output as handed to the composer: the raw text, or why there is none.
pub type GeneratedMessage = std::result::Result<String, GeneratorError>;

/// Final commit message, owned by the caller once composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub title: String,
    pub body: String,
}

impl ComposedMessage {
    /// Render as commit message text: title, blank line, body.
    pub fn to_message(&self) -> String {
        if self.body.is_empty() {
            format!("{}\n", self.title)
        } else {
            format!("{}\n\n{}", self.title, self.body)
        }
    }
}

impl fmt::Display for ComposedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_message())
    }
}
