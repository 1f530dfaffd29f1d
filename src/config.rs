// src/config.rs

//! Configuration types for the flux gate

// dependencies
use crate::engine::MAX_EXACT_CAPACITY;
use crate::errors::FluxGateError;
use std::fmt;
use std::str::FromStr;

/// Counting discipline used by a gate. Chosen once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    #[default]
    FixedWindow,
    SlidingWindow,
    TokenBucket,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::FixedWindow => "fixed-window",
            Algorithm::SlidingWindow => "sliding-window",
            Algorithm::TokenBucket => "token-bucket",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// accepts kebab, snake and camel spellings, anything else is a configuration error
impl FromStr for Algorithm {
    type Err = FluxGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "fixedwindow" => Ok(Algorithm::FixedWindow),
            "slidingwindow" => Ok(Algorithm::SlidingWindow),
            "tokenbucket" => Ok(Algorithm::TokenBucket),
            _ => Err(FluxGateError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Configuration for flux gate behavior.
///
/// Immutable once handed to [`FluxGate`](crate::FluxGate). All durations are milliseconds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FluxGateConfig {
    pub(crate) algorithm: Algorithm,
    pub(crate) window_ms: u64,
    pub(crate) max: i64,
    pub(crate) cleanup_interval_ms: u64,
    pub(crate) cleanup_enabled: bool,
    pub(crate) refill_rate: f64,
    pub(crate) refill_interval_ms: u64,
    pub(crate) precision_ms: u64,
}

impl Default for FluxGateConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::FixedWindow,
            window_ms: 60_000,
            max: 60,
            cleanup_interval_ms: 30_000,
            cleanup_enabled: true,
            refill_rate: 1.0,
            refill_interval_ms: 1_000,
            precision_ms: 100,
        }
    }
}

impl FluxGateConfig {
    /// Create a new configuration for `algorithm` allowing `max` requests per `window_ms`.
    /// Every other field takes its default.
    pub fn new(algorithm: Algorithm, window_ms: u64, max: i64) -> Self {
        Self {
            algorithm,
            window_ms,
            max,
            ..Self::default()
        }
    }

    /// Builder-style: set the algorithm
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Builder-style: set the window duration
    pub fn window_ms(mut self, window_ms: u64) -> Self {
        self.window_ms = window_ms;
        self
    }

    /// Builder-style: set the max count (token bucket capacity)
    pub fn max(mut self, max: i64) -> Self {
        self.max = max;
        self
    }

    /// Builder-style: set the eviction sweep interval
    pub fn cleanup_interval_ms(mut self, cleanup_interval_ms: u64) -> Self {
        self.cleanup_interval_ms = cleanup_interval_ms;
        self
    }

    /// Builder-style: enable or disable the eviction sweep
    pub fn cleanup(mut self, enabled: bool) -> Self {
        self.cleanup_enabled = enabled;
        self
    }

    /// Builder-style: tokens added per refill tick
    pub fn refill_rate(mut self, refill_rate: f64) -> Self {
        self.refill_rate = refill_rate;
        self
    }

    /// Builder-style: length of one refill tick
    pub fn refill_interval_ms(mut self, refill_interval_ms: u64) -> Self {
        self.refill_interval_ms = refill_interval_ms;
        self
    }

    /// Builder-style: sliding window bucket width
    pub fn precision_ms(mut self, precision_ms: u64) -> Self {
        self.precision_ms = precision_ms;
        self
    }

    pub fn get_algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn get_window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn get_max(&self) -> i64 {
        self.max
    }

    pub fn cleanup_enabled(&self) -> bool {
        self.cleanup_enabled
    }

    pub fn get_cleanup_interval_ms(&self) -> u64 {
        self.cleanup_interval_ms
    }

    /// Validate the configuration.
    ///
    /// `max <= 0` and `window_ms == 0` are accepted: the first rejects every
    /// request, the second makes each window last a single instant. A token
    /// bucket capacity must stay within ±2^53.
    pub fn validate(&self) -> Result<(), FluxGateError> {
        if self.precision_ms == 0 {
            return Err(FluxGateError::InvalidPrecision);
        }
        if self.refill_interval_ms == 0 {
            return Err(FluxGateError::InvalidRefillInterval);
        }
        if !self.refill_rate.is_finite() || self.refill_rate < 0.0 {
            return Err(FluxGateError::InvalidRefillRate);
        }
        if self.cleanup_enabled && self.cleanup_interval_ms == 0 {
            return Err(FluxGateError::InvalidCleanupInterval);
        }
        // tokens are f64; past 2^53 a single spent token is no longer visible
        if self.algorithm == Algorithm::TokenBucket
            && self.max.unsigned_abs() > MAX_EXACT_CAPACITY.unsigned_abs()
        {
            return Err(FluxGateError::InvalidCapacity);
        }
        Ok(())
    }
}
