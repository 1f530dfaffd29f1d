// src/entry.rs

// per-key state records, one shape per algorithm

// dependencies
use std::collections::BTreeMap;

/// State for one tracked key.
///
/// The store owns the live record. Values handed out by
/// [`FluxGate::peek`](crate::FluxGate::peek) are clones, so mutating them never
/// reaches the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    FixedWindow(FixedWindowState),
    SlidingWindow(SlidingWindowState),
    TokenBucket(TokenBucketState),
}

/// Counter for the window `[window_end - window, window_end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedWindowState {
    pub count: u64,
    pub window_end: u64,
}

/// Per-bucket counts keyed by bucket start (`now` floored to the precision).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingWindowState {
    pub buckets: BTreeMap<u64, u64>,
    /// Newest bucket timestamp plus the window: when the last counted request rolls off.
    pub window_end: u64,
}

/// Continuous-refill bucket. `tokens` goes negative once the caller overdraws it.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenBucketState {
    pub tokens: f64,
    pub last_refill: u64,
}

/// Moves a concrete state in and out of the [`Entry`] enum.
pub(crate) trait EntryState: Sized {
    fn from_entry(entry: &Entry) -> Option<&Self>;
    /// Borrow the state out of `entry`, first overwriting an entry of another shape.
    fn get_or_replace(entry: &mut Entry, fresh: impl FnOnce() -> Self) -> &mut Self;
    fn into_entry(self) -> Entry;
}

macro_rules! entry_state {
    ($state:ty, $variant:ident) => {
        impl EntryState for $state {
            fn from_entry(entry: &Entry) -> Option<&Self> {
                match entry {
                    Entry::$variant(state) => Some(state),
                    _ => None,
                }
            }

            fn get_or_replace(entry: &mut Entry, fresh: impl FnOnce() -> Self) -> &mut Self {
                if !matches!(entry, Entry::$variant(_)) {
                    *entry = Entry::$variant(fresh());
                }
                match entry {
                    Entry::$variant(state) => state,
                    _ => unreachable!("entry was just replaced"),
                }
            }

            fn into_entry(self) -> Entry {
                Entry::$variant(self)
            }
        }
    };
}

entry_state!(FixedWindowState, FixedWindow);
entry_state!(SlidingWindowState, SlidingWindow);
entry_state!(TokenBucketState, TokenBucket);
