// tests/ratelimiter/fixed_window_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::gate::manual_gate;
    use flux_gate::{Algorithm, Entry, FluxGateConfig};

    fn config(window_ms: u64, max: i64) -> FluxGateConfig {
        FluxGateConfig::new(Algorithm::FixedWindow, window_ms, max)
    }

    #[test]
    fn first_request_always_allowed() {
        let (gate, _, _) = manual_gate(config(1_000, 1));
        let decision = gate.check("/login", "client1");
        assert!(!decision.limited);
        assert_eq!(decision.current, 1);
        assert_eq!(decision.remaining, 0);
    }

    #[test]
    fn third_request_over_a_max_of_two_is_limited() {
        let (gate, clock, _) = manual_gate(config(1_000, 2));
        let decisions: Vec<_> = (0..3)
            .map(|_| {
                clock.advance(10);
                gate.check("/login", "client1")
            })
            .collect();

        let limited: Vec<_> = decisions.iter().map(|d| d.limited).collect();
        let current: Vec<_> = decisions.iter().map(|d| d.current).collect();
        assert_eq!(limited, [false, false, true]);
        assert_eq!(current, [1, 2, 3]);
    }

    #[test]
    fn window_expiry_resets_the_count() {
        let (gate, clock, _) = manual_gate(config(1_000, 2));
        for _ in 0..4 {
            gate.check("/login", "client1");
        }

        clock.advance(1_001);
        let decision = gate.check("/login", "client1");
        assert_eq!(decision.current, 1);
        assert!(!decision.limited);
        assert_eq!(decision.reset, 2_001);
    }

    #[test]
    fn overrun_is_reported_unclamped() {
        let (gate, _, _) = manual_gate(config(60_000, 3));
        let last = (0..10).map(|_| gate.check("/upload", "greedy")).last().unwrap();
        assert_eq!(last.current, 10);
        assert_eq!(last.remaining, 0);
        assert!(last.limited);
    }

    #[test]
    fn reset_is_fixed_for_the_whole_window() {
        let (gate, clock, _) = manual_gate(config(1_000, 5));
        clock.set_time(200);
        let first = gate.check("/feed", "reader");
        clock.set_time(900);
        let second = gate.check("/feed", "reader");
        assert_eq!(first.reset, 1_200);
        assert_eq!(second.reset, 1_200);
    }

    #[test]
    fn peek_exposes_raw_counter_state() {
        let (gate, clock, _) = manual_gate(config(1_000, 5));
        clock.set_time(100);
        gate.check("/feed", "reader");
        gate.check("/feed", "reader");

        match gate.peek("/feed", "reader") {
            Some(Entry::FixedWindow(state)) => {
                assert_eq!(state.count, 2);
                assert_eq!(state.window_end, 1_100);
            }
            other => panic!("Expected fixed window entry, got: {:?}", other),
        }
    }

    #[test]
    fn zero_max_rejects_every_request() {
        let (gate, _, _) = manual_gate(config(1_000, 0));
        assert!(gate.check("/admin", "anyone").limited);
        assert!(gate.check("/admin", "anyone").limited);
    }
}
