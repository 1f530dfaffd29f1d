// src/engine/fixed_window.rs

// fixed window counter

// dependencies
use super::AdmissionEngine;
use crate::decision::{FluxGateDecision, as_count};
use crate::entry::FixedWindowState;

/// One counter per key that resets when its window closes.
///
/// The counter keeps climbing past `max` so callers can see how far over a
/// run went. The request that reaches exactly `max` is the last one admitted.
pub(crate) struct FixedWindow {
    window_ms: u64,
    max: i64,
}

impl FixedWindow {
    pub(crate) fn new(window_ms: u64, max: i64) -> Self {
        Self { window_ms, max }
    }

    fn decision(&self, count: u64, reset: u64) -> FluxGateDecision {
        FluxGateDecision::from_count(as_count(count), self.max, reset, self.window_ms)
    }
}

impl AdmissionEngine for FixedWindow {
    type State = FixedWindowState;

    fn fresh(&self, now: u64) -> FixedWindowState {
        FixedWindowState {
            count: 0,
            window_end: now.saturating_add(self.window_ms),
        }
    }

    fn admit(&self, state: &mut FixedWindowState, now: u64) -> FluxGateDecision {
        if now >= state.window_end {
            state.count = 1;
            state.window_end = now.saturating_add(self.window_ms);
        } else {
            state.count = state.count.saturating_add(1);
        }
        self.decision(state.count, state.window_end)
    }

    fn inspect(&self, state: Option<&FixedWindowState>, now: u64) -> FluxGateDecision {
        match state {
            Some(state) if now < state.window_end => self.decision(state.count, state.window_end),
            _ => self.decision(0, now.saturating_add(self.window_ms)),
        }
    }

    fn is_expired(&self, state: &FixedWindowState, now: u64) -> bool {
        state.window_end <= now
    }
}
