// tests/ratelimiter/config_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::test_clock::TestClock;
    use flux_gate::{Algorithm, FluxGate, FluxGateConfig, FluxGateError};

    // Config validation tests
    #[test]
    fn config_rejects_zero_precision() {
        let config = FluxGateConfig::default().precision_ms(0);
        let result = config.validate();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), FluxGateError::InvalidPrecision));
    }

    #[test]
    fn config_rejects_zero_refill_interval() {
        let config = FluxGateConfig::default().refill_interval_ms(0);
        assert!(matches!(
            config.validate().unwrap_err(),
            FluxGateError::InvalidRefillInterval
        ));
    }

    #[test]
    fn config_rejects_negative_refill_rate() {
        let config = FluxGateConfig::default().refill_rate(-1.0);
        assert!(matches!(
            config.validate().unwrap_err(),
            FluxGateError::InvalidRefillRate
        ));
    }

    #[test]
    fn config_rejects_zero_cleanup_interval() {
        let config = FluxGateConfig::default().cleanup_interval_ms(0);
        assert!(matches!(
            config.validate().unwrap_err(),
            FluxGateError::InvalidCleanupInterval
        ));
    }

    #[test]
    fn config_accepts_degenerate_limits() {
        assert!(FluxGateConfig::default().max(0).validate().is_ok());
        assert!(FluxGateConfig::default().max(-5).validate().is_ok());
        assert!(FluxGateConfig::default().window_ms(0).validate().is_ok());
    }

    // Test config builder pattern
    #[test]
    fn config_builder_pattern_works() {
        let config = FluxGateConfig::default()
            .algorithm(Algorithm::TokenBucket)
            .window_ms(2_000)
            .max(10)
            .refill_rate(2.0)
            .refill_interval_ms(250)
            .precision_ms(50)
            .cleanup(false);

        assert!(config.validate().is_ok());
        assert_eq!(config.get_algorithm(), Algorithm::TokenBucket);
        assert_eq!(config.get_window_ms(), 2_000);
        assert_eq!(config.get_max(), 10);
        assert!(!config.cleanup_enabled());

        let limiter = FluxGate::with_config(config, TestClock::new(0)).unwrap();
        assert_eq!(limiter.algorithm(), Algorithm::TokenBucket);
        assert_eq!(limiter.config().get_max(), 10);
    }

    // Constructor tests with config
    #[test]
    fn constructor_with_invalid_config_fails() {
        let config = FluxGateConfig::default().precision_ms(0);
        let result = FluxGate::with_config(config, TestClock::new(0));
        assert!(matches!(result, Err(FluxGateError::InvalidPrecision)));
    }

    #[test]
    fn constructor_with_valid_config_succeeds() {
        let config = FluxGateConfig::new(Algorithm::SlidingWindow, 1_000, 5).cleanup(false);
        let result = FluxGate::with_config(config, TestClock::new(0));
        assert!(result.is_ok());
    }

    #[test]
    fn algorithm_selected_from_a_string() {
        let algorithm: Algorithm = "sliding-window".parse().unwrap();
        let config = FluxGateConfig::new(algorithm, 1_000, 5).cleanup(false);
        let limiter = FluxGate::with_config(config, TestClock::new(0)).unwrap();
        assert_eq!(limiter.algorithm(), Algorithm::SlidingWindow);
    }
}
