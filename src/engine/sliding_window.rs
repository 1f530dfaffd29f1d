// src/engine/sliding_window.rs

// sliding window over precision-sized buckets

// dependencies
use super::AdmissionEngine;
use crate::decision::{FluxGateDecision, as_count};
use crate::entry::SlidingWindowState;
use std::collections::BTreeMap;

/// Histogram of per-bucket counts summed over the trailing window.
///
/// A bucket stamped `ts` stops counting once `floor(now) - window >= ts`, so a
/// key under sustained load holds at most `ceil(window / precision)` buckets.
pub(crate) struct SlidingWindow {
    window_ms: u64,
    max: i64,
    precision_ms: u64,
}

impl SlidingWindow {
    pub(crate) fn new(window_ms: u64, max: i64, precision_ms: u64) -> Self {
        Self {
            window_ms,
            max,
            precision_ms,
        }
    }

    // precision is validated non-zero before an engine is built
    fn round(&self, now: u64) -> u64 {
        now - now % self.precision_ms
    }

    // buckets at or below the cutoff have left the window; None while the
    // window still reaches back before time zero
    fn cutoff(&self, rounded_now: u64) -> Option<u64> {
        rounded_now.checked_sub(self.window_ms)
    }

    fn live(&self, buckets: &BTreeMap<u64, u64>, cutoff: Option<u64>) -> impl Iterator<Item = (u64, u64)> {
        buckets
            .iter()
            .map(|(&ts, &count)| (ts, count))
            .filter(move |&(ts, _)| cutoff.is_none_or(|cutoff| ts > cutoff))
    }

    fn reset_for(&self, oldest: Option<u64>, rounded_now: u64) -> u64 {
        oldest.unwrap_or(rounded_now).saturating_add(self.window_ms)
    }
}

impl AdmissionEngine for SlidingWindow {
    type State = SlidingWindowState;

    fn fresh(&self, now: u64) -> SlidingWindowState {
        SlidingWindowState {
            buckets: BTreeMap::new(),
            window_end: self.round(now).saturating_add(self.window_ms),
        }
    }

    fn admit(&self, state: &mut SlidingWindowState, now: u64) -> FluxGateDecision {
        let rounded_now = self.round(now);
        if let Some(cutoff) = self.cutoff(rounded_now) {
            state.buckets.retain(|&ts, _| ts > cutoff);
        }

        let previous = state
            .buckets
            .values()
            .fold(0u64, |total, &count| total.saturating_add(count));
        let total = previous.saturating_add(1);

        let bucket = state.buckets.entry(rounded_now).or_insert(0);
        *bucket = bucket.saturating_add(1);

        let newest = state.buckets.keys().next_back().copied().unwrap_or(rounded_now);
        state.window_end = newest.saturating_add(self.window_ms);

        let oldest = state.buckets.keys().next().copied();
        FluxGateDecision::from_count(
            as_count(total),
            self.max,
            self.reset_for(oldest, rounded_now),
            self.window_ms,
        )
    }

    // read-only: expired buckets are skipped, not pruned
    fn inspect(&self, state: Option<&SlidingWindowState>, now: u64) -> FluxGateDecision {
        let rounded_now = self.round(now);
        let (total, oldest) = match state {
            Some(state) => {
                let cutoff = self.cutoff(rounded_now);
                let oldest = self.live(&state.buckets, cutoff).map(|(ts, _)| ts).next();
                let total = self
                    .live(&state.buckets, cutoff)
                    .fold(0u64, |total, (_, count)| total.saturating_add(count));
                (total, oldest)
            }
            None => (0, None),
        };

        FluxGateDecision::from_count(
            as_count(total),
            self.max,
            self.reset_for(oldest, rounded_now),
            self.window_ms,
        )
    }

    fn is_expired(&self, state: &SlidingWindowState, now: u64) -> bool {
        let newest = state.buckets.keys().next_back();
        match (self.cutoff(self.round(now)), newest) {
            (_, None) => true,
            (Some(cutoff), Some(&newest)) => newest <= cutoff,
            (None, Some(_)) => false,
        }
    }
}
