// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use gitter::services::composer::CommitComposer;
use gitter::services::diff_stats::parse_diff_stats;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let (generated, diff) = text.split_once('\0').unwrap_or((&*text, ""));
    let stats = parse_diff_stats(diff);

    let message = CommitComposer::compose(&Ok(generated.to_string()), &stats, "fallback");
    assert!(!message.title.trim().is_empty());
    assert!(message.to_message().ends_with('\n'));
});
