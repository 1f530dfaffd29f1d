// src/store.rs

// keyed entry storage and the eviction pass

// dependencies
use crate::decision::FluxGateDecision;
use crate::engine::AdmissionEngine;
use crate::entry::{Entry, EntryState};
use crate::key::TrackedKey;
use dashmap::DashMap;

/// Owns every per-key entry.
///
/// Read-modify-write on a key happens under that key's shard lock, so two
/// concurrent `admit` calls for the same key never lose an increment.
#[derive(Debug, Default)]
pub(crate) struct EntryStore {
    entries: DashMap<TrackedKey, Entry>,
}

impl EntryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn admit<E: AdmissionEngine>(&self, engine: &E, key: TrackedKey, now: u64) -> FluxGateDecision {
        let mut slot = self
            .entries
            .entry(key)
            .or_insert_with(|| engine.fresh(now).into_entry());
        let state = E::State::get_or_replace(slot.value_mut(), || engine.fresh(now));
        engine.admit(state, now)
    }

    pub(crate) fn inspect<E: AdmissionEngine>(&self, engine: &E, key: &TrackedKey, now: u64) -> FluxGateDecision {
        match self.entries.get(key) {
            Some(entry) => engine.inspect(E::State::from_entry(entry.value()), now),
            None => engine.inspect(None, now),
        }
    }

    /// Clone of the live entry for `key`.
    pub(crate) fn snapshot(&self, key: &TrackedKey) -> Option<Entry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Single pass dropping every entry the engine reports as expired.
    /// Entries of another shape cannot be read by this engine and go too.
    pub(crate) fn sweep<E: AdmissionEngine>(&self, engine: &E, now: u64) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = E::State::from_entry(entry).is_some_and(|state| !engine.is_expired(state, now));
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&self) {
        self.entries.clear();
    }
}
