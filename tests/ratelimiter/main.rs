// tests/ratelimiter/main.rs

// test modules
mod fixtures;
mod config_tests;
mod fixed_window_tests;
mod sliding_window_tests;

// Re-export common test utilities
pub use fixtures::gate::{manual_gate, thread_gate};
pub use fixtures::test_clock::TestClock;
