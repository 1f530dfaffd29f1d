// tests/ratelimiter/fixtures/mod.rs
