// src/engine/token_bucket.rs

// continuously refilled token bucket

// dependencies
use super::AdmissionEngine;
use crate::decision::{FluxGateDecision, remaining};
use crate::entry::TokenBucketState;

/// Largest capacity an `f64` token count represents exactly (2^53).
pub(crate) const MAX_EXACT_CAPACITY: i64 = 1 << 53;

/// Bucket of `max` tokens refilled by `refill_rate` every `refill_interval_ms`.
///
/// Every request spends one token, even from an empty bucket, so `tokens`
/// records how deep into deficit a caller has gone. Partial ticks carry over
/// by leaving `last_refill` untouched until a whole tick has elapsed.
pub(crate) struct TokenBucket {
    max: i64,
    capacity: f64,
    refill_rate: f64,
    refill_interval_ms: u64,
    window_ms: u64,
}

impl TokenBucket {
    pub(crate) fn new(max: i64, refill_rate: f64, refill_interval_ms: u64, window_ms: u64) -> Self {
        Self {
            max,
            capacity: max as f64,
            refill_rate,
            refill_interval_ms,
            window_ms,
        }
    }

    /// Token level after refilling up to `now`, or `None` if no whole tick has passed.
    fn refilled(&self, state: &TokenBucketState, now: u64) -> Option<f64> {
        let ticks = now.saturating_sub(state.last_refill) / self.refill_interval_ms;
        if ticks == 0 {
            return None;
        }
        let added = ticks as f64 * self.refill_rate;
        // a starved bucket restarts from what was just added, not from its deficit
        Some((state.tokens + added).max(added).min(self.capacity))
    }

    fn decision(&self, tokens: f64, last_refill: u64) -> FluxGateDecision {
        let current = self.max.saturating_sub(tokens.floor() as i64);
        FluxGateDecision {
            limited: tokens < 0.0,
            remaining: remaining(self.max, current),
            reset: last_refill.saturating_add(self.refill_interval_ms),
            current,
            limit: self.max,
            window: self.window_ms,
        }
    }
}

impl AdmissionEngine for TokenBucket {
    type State = TokenBucketState;

    fn fresh(&self, now: u64) -> TokenBucketState {
        TokenBucketState {
            tokens: self.capacity,
            last_refill: now,
        }
    }

    fn admit(&self, state: &mut TokenBucketState, now: u64) -> FluxGateDecision {
        if let Some(tokens) = self.refilled(state, now) {
            state.tokens = tokens;
            state.last_refill = now;
        }
        state.tokens -= 1.0;
        self.decision(state.tokens, state.last_refill)
    }

    fn inspect(&self, state: Option<&TokenBucketState>, now: u64) -> FluxGateDecision {
        match state {
            Some(state) => match self.refilled(state, now) {
                Some(tokens) => self.decision(tokens, now),
                None => self.decision(state.tokens, state.last_refill),
            },
            None => self.decision(self.capacity, now),
        }
    }

    // a bucket that would be full again is indistinguishable from a fresh one
    fn is_expired(&self, state: &TokenBucketState, now: u64) -> bool {
        self.refilled(state, now).unwrap_or(state.tokens) >= self.capacity
    }
}
