// src/decision.rs

// result record returned by check and get

/// Result of an admission decision with metadata for HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluxGateDecision {
    /// Whether the request should be rejected
    pub limited: bool,
    /// Requests left before rejection, never negative
    pub remaining: u64,
    /// When the current window (or oldest bucket, or next refill) rolls over, in ms
    pub reset: u64,
    /// Unclamped count; exceeds `limit` once a caller runs over
    pub current: i64,
    /// The configured max
    pub limit: i64,
    /// The configured window duration in ms
    pub window: u64,
}

impl FluxGateDecision {
    pub(crate) fn from_count(current: i64, limit: i64, reset: u64, window: u64) -> Self {
        Self {
            limited: current > limit,
            remaining: remaining(limit, current),
            reset,
            current,
            limit,
            window,
        }
    }

    /// Whole seconds until `reset`, rounded up, when the request was rejected.
    pub fn retry_after_seconds(&self, now: u64) -> Option<u64> {
        if !self.limited {
            return None;
        }
        Some(self.reset.saturating_sub(now).div_ceil(1000))
    }

    /// Standard rate-limit response headers as `(name, value)` pairs.
    /// `Retry-After` is only present on rejected requests.
    pub fn headers(&self, now: u64) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("X-RateLimit-Limit", self.limit.to_string()),
            ("X-RateLimit-Remaining", self.remaining.to_string()),
            ("X-RateLimit-Reset", self.reset.to_string()),
        ];
        if let Some(retry_after) = self.retry_after_seconds(now) {
            headers.push(("Retry-After", retry_after.to_string()));
        }
        headers
    }
}

// max(limit - current, 0) without overflowing on extreme configs
pub(crate) fn remaining(limit: i64, current: i64) -> u64 {
    u64::try_from(limit.saturating_sub(current)).unwrap_or(0)
}

// saturating u64 -> i64 for counters
pub(crate) fn as_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
