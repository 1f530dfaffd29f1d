// src/clock.rs

// clock module definition and implementations

// dependencies
use std::time::{SystemTime, UNIX_EPOCH};

/// Clock trait to abstract time retrieval.
/// Implementors must be thread-safe (Send + Sync).
/// The `now` method returns the current wall-clock time in milliseconds.
/// Swapping the clock lets tests drive logical time deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// SystemClock implementation using the system time.
/// Returns milliseconds since the Unix epoch.
/// A system clock set before the epoch reads as 0 rather than failing the request.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            Err(err) => {
                tracing::warn!(error = %err, "system clock is before the unix epoch");
                0
            }
        }
    }
}

// blanket impl so a shared clock can be handed to several gates
impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}
