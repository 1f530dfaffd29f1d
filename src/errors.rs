// src/errors.rs

// error handling for the flux gate type

/// Error type for FluxGate configuration issues.
///
/// Every variant is raised while building a gate. Once a gate exists, `check`
/// and `get` accept any input and never fail.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FluxGateError {
    #[error("Unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),
    #[error("Bucket precision must be positive")]
    InvalidPrecision,
    #[error("Refill interval must be positive")]
    InvalidRefillInterval,
    #[error("Refill rate must be a finite, non-negative number")]
    InvalidRefillRate,
    #[error("Cleanup interval must be positive when cleanup is enabled")]
    InvalidCleanupInterval,
    #[error("Token bucket capacity must be within ±2^53")]
    InvalidCapacity,
}
