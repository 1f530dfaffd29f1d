// src/key.rs

// lookup key derived from a (resource, caller) pair

// dependencies
use std::fmt;

/// Opaque lookup key for one tracked (resource, caller) pair.
///
/// The resource is length-prefixed, so `("a:b", "c")` and `("a", "b:c")` stay
/// distinct no matter which characters either field contains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackedKey(String);

impl TrackedKey {
    pub fn encode(resource: &str, caller: &str) -> Self {
        let mut key = String::with_capacity(resource.len() + caller.len() + 8);
        key.push_str(&resource.len().to_string());
        key.push(':');
        key.push_str(resource);
        key.push_str(caller);
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
