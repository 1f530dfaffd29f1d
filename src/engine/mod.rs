// src/engine/mod.rs

//! Admission engines, one per counting discipline.
//!
//! Each engine owns the shape of its [`Entry`](crate::Entry) variant and the rules for
//! admitting, inspecting and expiring it. The store hands an engine exactly one
//! entry for the duration of one operation.

// dependencies
use crate::config::{Algorithm, FluxGateConfig};
use crate::decision::FluxGateDecision;
use crate::entry::EntryState;
use crate::key::TrackedKey;
use crate::store::EntryStore;

mod fixed_window;
mod sliding_window;
mod token_bucket;

pub(crate) use fixed_window::FixedWindow;
pub(crate) use sliding_window::SlidingWindow;
pub(crate) use token_bucket::{MAX_EXACT_CAPACITY, TokenBucket};

/// Common contract for the counting disciplines.
pub(crate) trait AdmissionEngine: Send + Sync {
    type State: EntryState + Clone;

    /// State for a key seen for the first time at `now`.
    fn fresh(&self, now: u64) -> Self::State;

    /// Count one request against `state` and report the outcome.
    fn admit(&self, state: &mut Self::State, now: u64) -> FluxGateDecision;

    /// Report status without counting. `None` means the key is untracked.
    fn inspect(&self, state: Option<&Self::State>, now: u64) -> FluxGateDecision;

    /// Whether dropping `state` at `now` would change nothing a caller can observe.
    fn is_expired(&self, state: &Self::State, now: u64) -> bool;
}

/// The engine selected for a gate. Fixed at construction, so there is no
/// per-call "unknown algorithm" path.
pub(crate) enum Engine {
    FixedWindow(FixedWindow),
    SlidingWindow(SlidingWindow),
    TokenBucket(TokenBucket),
}

impl Engine {
    pub(crate) fn from_config(config: &FluxGateConfig) -> Self {
        match config.algorithm {
            Algorithm::FixedWindow => {
                Engine::FixedWindow(FixedWindow::new(config.window_ms, config.max))
            }
            Algorithm::SlidingWindow => Engine::SlidingWindow(SlidingWindow::new(
                config.window_ms,
                config.max,
                config.precision_ms,
            )),
            Algorithm::TokenBucket => Engine::TokenBucket(TokenBucket::new(
                config.max,
                config.refill_rate,
                config.refill_interval_ms,
                config.window_ms,
            )),
        }
    }

    pub(crate) fn admit(&self, store: &EntryStore, key: TrackedKey, now: u64) -> FluxGateDecision {
        match self {
            Engine::FixedWindow(engine) => store.admit(engine, key, now),
            Engine::SlidingWindow(engine) => store.admit(engine, key, now),
            Engine::TokenBucket(engine) => store.admit(engine, key, now),
        }
    }

    pub(crate) fn inspect(&self, store: &EntryStore, key: &TrackedKey, now: u64) -> FluxGateDecision {
        match self {
            Engine::FixedWindow(engine) => store.inspect(engine, key, now),
            Engine::SlidingWindow(engine) => store.inspect(engine, key, now),
            Engine::TokenBucket(engine) => store.inspect(engine, key, now),
        }
    }

    pub(crate) fn sweep(&self, store: &EntryStore, now: u64) -> usize {
        match self {
            Engine::FixedWindow(engine) => store.sweep(engine, now),
            Engine::SlidingWindow(engine) => store.sweep(engine, now),
            Engine::TokenBucket(engine) => store.sweep(engine, now),
        }
    }
}
