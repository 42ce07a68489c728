// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

#![no_main]

use gitter::domain::DiffTotals;
use gitter::services::diff_stats::parse_diff_stats;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(diff) = std::str::from_utf8(data) else {
        return;
    };
    let stats = parse_diff_stats(diff);
    for stat in &stats {
        assert!(!stat.path.is_empty());
        assert!(stat.path != "/dev/null");
    }
    let totals = DiffTotals::from_stats(&stats);
    assert_eq!(totals.files_changed, stats.len());
});
