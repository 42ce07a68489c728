// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

//! Bounded retries for transport failures.

use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use tracing::warn;

use crate::error::GeneratorError;

const INITIAL_INTERVAL_MS: u64 = 500;
const MAX_INTERVAL_SECS: u64 = 5;

/// Run `attempt` once, plus up to `max_retries` more times while it fails
/// with a transient error. Any other error is returned immediately.
pub async fn retry_transient<T, Fut, F>(max_retries: u32, mut attempt: F) -> Result<T, GeneratorError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeneratorError>>,
{
    let mut backoff = ExponentialBackoff {
        initial_interval: Duration::from_millis(INITIAL_INTERVAL_MS),
        max_interval: Duration::from_secs(MAX_INTERVAL_SECS),
        max_elapsed_time: None,
        ..Default::default()
    };

    let mut retries = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && retries < max_retries => {
                retries += 1;
                let wait = backoff
                    .next_backoff()
                    .unwrap_or(Duration::from_secs(MAX_INTERVAL_SECS));
                warn!(retry = retries, max_retries, error = %e, "retrying request");
                tokio::time::sleep(wait).await;
            }
            Err(e) => return Err(e),
        }
    }
}
