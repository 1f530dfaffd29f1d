// src/lib.rs

//! # Flux Gate
//!
//! An in-process request admission tracker. Each (resource, caller) pair is
//! counted with one of three disciplines: fixed window, sliding window or
//! token bucket. Expired state is evicted by a periodic sweep.
//!
//! ## Quick Example
//!
//! ```rust
//! use flux_gate::{Algorithm, FluxGate, FluxGateConfig, SystemClock};
//!
//! let config = FluxGateConfig::new(Algorithm::SlidingWindow, 1_000, 5);
//! let gate = FluxGate::with_config(config, SystemClock).unwrap();
//!
//! let decision = gate.check("/api/search", "203.0.113.7");
//! if decision.limited {
//!     println!("Rate limited - {} over the limit", decision.current - decision.limit);
//! } else {
//!     println!("Request allowed, {} remaining", decision.remaining);
//! }
//! ```

// private modules
mod clock;
mod config;
mod decision;
mod engine;
mod entry;
mod errors;
mod flux_gate;
mod key;
mod scheduler;
mod store;

// public API exports
pub use clock::{Clock, SystemClock};
pub use config::{Algorithm, FluxGateConfig};
pub use decision::FluxGateDecision;
pub use entry::{Entry, FixedWindowState, SlidingWindowState, TokenBucketState};
pub use errors::FluxGateError;
pub use flux_gate::FluxGate;
pub use key::TrackedKey;
pub use scheduler::{ManualScheduler, Scheduler, Task, TaskHandle, ThreadScheduler};
