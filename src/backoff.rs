use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::ClientOptions;

/// Delay after a failed attempt: `backoff_base * 2^attempt`.
pub(crate) fn transport_backoff(options: &ClientOptions, attempt: usize) -> Duration {
    let exp = attempt.min(16) as u32;
    let multiplier = 1u64 << exp;
    Duration::from_millis(options.backoff_base_ms.saturating_mul(multiplier))
}

/// Delay after a 429 that carries no usable `Retry-After`.
pub(crate) fn rate_limit_delay(options: &ClientOptions, attempt: usize) -> Duration {
    let step = (attempt as u64).saturating_add(1);
    Duration::from_millis(options.rate_limit_step_ms.saturating_mul(step))
}

/// Reads `Retry-After` as whole seconds. HTTP-date values are not supported.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
