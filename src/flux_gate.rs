// src/flux_gate.rs

// flux-gate: request admission tracking over (resource, caller) pairs.

// dependencies
use crate::clock::{Clock, SystemClock};
use crate::config::{Algorithm, FluxGateConfig};
use crate::decision::FluxGateDecision;
use crate::engine::Engine;
use crate::entry::Entry;
use crate::errors::FluxGateError;
use crate::key::TrackedKey;
use crate::scheduler::{Scheduler, TaskHandle, ThreadScheduler, lock};
use crate::store::EntryStore;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// The main FluxGate model.
/// C is the clock type, defaulting to SystemClock.
/// State lives in a shared core so the sweep task can reach it through a `Weak`
/// without keeping the gate alive.
pub struct FluxGate<C = SystemClock>
where
    C: Clock,
{
    core: Arc<GateCore<C>>,
    scheduler: Arc<dyn Scheduler>,
    sweep: Mutex<Option<TaskHandle>>,
    sweeping: AtomicBool,
}

impl<C> fmt::Debug for FluxGate<C>
where
    C: Clock + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluxGate")
            .field("config", &self.core.config)
            .field("clock", &self.core.clock)
            .field("tracked", &self.core.store.len())
            .field("sweeping", &self.sweeping.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

struct GateCore<C> {
    config: FluxGateConfig,
    engine: Engine,
    store: EntryStore,
    clock: C,
}

impl<C: Clock> GateCore<C> {
    fn sweep(&self) -> usize {
        let now = self.clock.now();
        let removed = self.engine.sweep(&self.store, now);
        tracing::debug!(removed, remaining = self.store.len(), "swept expired entries");
        removed
    }
}

// methods for the FluxGate type
impl<C> FluxGate<C>
where
    C: Clock + 'static,
{
    /// Create a gate from a config object. The eviction sweep, when enabled,
    /// runs on a background thread.
    pub fn with_config(config: FluxGateConfig, clock: C) -> Result<Self, FluxGateError> {
        Self::with_scheduler(config, clock, Arc::new(ThreadScheduler))
    }

    /// Create a gate whose eviction sweep is driven by `scheduler`.
    pub fn with_scheduler(
        config: FluxGateConfig,
        clock: C,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, FluxGateError> {
        config.validate()?;

        tracing::info!(
            algorithm = %config.algorithm,
            window_ms = config.window_ms,
            max = config.max,
            cleanup = config.cleanup_enabled,
            "creating flux gate"
        );

        let gate = Self {
            core: Arc::new(GateCore {
                engine: Engine::from_config(&config),
                store: EntryStore::new(),
                config,
                clock,
            }),
            scheduler,
            sweep: Mutex::new(None),
            sweeping: AtomicBool::new(false),
        };
        gate.ensure_sweep();
        Ok(gate)
    }

    /// Count a request for `caller` against `resource` and report the outcome.
    pub fn check(&self, resource: &str, caller: &str) -> FluxGateDecision {
        self.ensure_sweep();

        let now = self.core.clock.now();
        let key = TrackedKey::encode(resource, caller);
        let decision = self.core.engine.admit(&self.core.store, key, now);

        if decision.limited {
            tracing::trace!(
                resource,
                caller,
                current = decision.current,
                limit = decision.limit,
                "request limited"
            );
        }
        decision
    }

    /// Report status without counting a request. Never mutates stored state.
    pub fn get(&self, resource: &str, caller: &str) -> FluxGateDecision {
        let now = self.core.clock.now();
        let key = TrackedKey::encode(resource, caller);
        self.core.engine.inspect(&self.core.store, &key, now)
    }

    /// Copy of the raw state for a pair, or `None` if it was never seen or has been evicted.
    pub fn peek(&self, resource: &str, caller: &str) -> Option<Entry> {
        self.core.store.snapshot(&TrackedKey::encode(resource, caller))
    }

    /// Number of tracked keys, including expired ones the sweep has not reached yet.
    pub fn size(&self) -> usize {
        self.core.store.len()
    }

    /// Drop every entry and stop the sweep. The gate stays usable; the next
    /// `check` restarts the sweep if cleanup is enabled.
    pub fn clear(&self) {
        self.stop_sweep();
        self.core.store.clear();
    }

    /// Run one eviction pass now. Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        self.core.sweep()
    }

    /// Whether the periodic sweep is currently scheduled.
    pub fn is_sweeping(&self) -> bool {
        self.sweeping.load(Ordering::Acquire)
    }

    // accessor method to return the config
    pub fn config(&self) -> &FluxGateConfig {
        &self.core.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.core.config.algorithm
    }

    fn ensure_sweep(&self) {
        if !self.core.config.cleanup_enabled || self.sweeping.load(Ordering::Acquire) {
            return;
        }

        let mut slot = lock(&self.sweep);
        if slot.is_some() {
            return;
        }

        let interval_ms = self.core.config.cleanup_interval_ms;
        let core = Arc::downgrade(&self.core);
        let handle = self.scheduler.schedule_every(
            Duration::from_millis(interval_ms),
            Arc::new(move || {
                if let Some(core) = core.upgrade() {
                    core.sweep();
                }
            }),
        );

        // left unscheduled, the next check tries again
        let Some(handle) = handle else {
            tracing::warn!(interval_ms, "eviction sweep could not be scheduled");
            return;
        };
        *slot = Some(handle);
        self.sweeping.store(true, Ordering::Release);
        tracing::info!(interval_ms, "eviction sweep started");
    }

    fn stop_sweep(&self) {
        let handle = lock(&self.sweep).take();
        self.sweeping.store(false, Ordering::Release);
        if let Some(handle) = handle {
            handle.cancel();
            tracing::info!("eviction sweep stopped");
        }
    }
}
