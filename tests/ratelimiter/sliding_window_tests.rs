// tests/ratelimiter/sliding_window_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::gate::manual_gate;
    use flux_gate::{Algorithm, Entry, FluxGateConfig};

    fn config() -> FluxGateConfig {
        FluxGateConfig::new(Algorithm::SlidingWindow, 1_000, 5).precision_ms(100)
    }

    #[test]
    fn five_rapid_requests_pass_and_the_sixth_is_limited() {
        let (gate, clock, _) = manual_gate(config());
        for i in 1..=5 {
            clock.advance(1);
            let decision = gate.check("/search", "client1");
            assert!(!decision.limited, "request {} should pass", i);
        }
        let decision = gate.check("/search", "client1");
        assert!(decision.limited);
        assert_eq!(decision.current, 6);
    }

    #[test]
    fn requests_roll_off_bucket_by_bucket() {
        let (gate, clock, _) = manual_gate(config());
        for _ in 0..3 {
            gate.check("/search", "client1");
        }
        clock.set_time(400);
        gate.check("/search", "client1");
        gate.check("/search", "client1");

        // past the window for bucket 0, not for bucket 400
        clock.set_time(1_050);
        let decision = gate.check("/search", "client1");
        assert_eq!(decision.current, 3);
        assert!(!decision.limited);
        assert_eq!(decision.reset, 1_400);

        clock.set_time(1_450);
        let decision = gate.check("/search", "client1");
        assert_eq!(decision.current, 2);
    }

    #[test]
    fn smoother_than_a_fixed_window_at_the_boundary() {
        let (gate, clock, _) = manual_gate(config());
        clock.set_time(900);
        for _ in 0..5 {
            gate.check("/search", "client1");
        }

        // a fixed window opened at 0 would have reset here
        clock.set_time(1_000);
        assert!(gate.check("/search", "client1").limited);
    }

    #[test]
    fn stale_buckets_are_pruned_on_admit() {
        let (gate, clock, _) = manual_gate(config());
        for t in [0, 100, 200, 300] {
            clock.set_time(t);
            gate.check("/search", "client1");
        }
        clock.set_time(1_250);
        gate.check("/search", "client1");

        match gate.peek("/search", "client1") {
            Some(Entry::SlidingWindow(state)) => {
                let stamps: Vec<_> = state.buckets.keys().copied().collect();
                assert_eq!(stamps, [300, 1_200]);
                assert_eq!(state.window_end, 2_200);
            }
            other => panic!("Expected sliding window entry, got: {:?}", other),
        }
    }

    #[test]
    fn zero_window_counts_only_the_current_request() {
        let (gate, clock, _) = manual_gate(config().window_ms(0).max(1));
        clock.set_time(500);

        let current: Vec<_> = (0..3).map(|_| gate.check("/search", "client1").current).collect();
        assert_eq!(current, [1, 1, 1]);
        assert!(!gate.check("/search", "client1").limited);

        // the request just counted has already left a zero-length window
        assert_eq!(gate.get("/search", "client1").current, 0);
    }

    #[test]
    fn get_leaves_stale_buckets_in_place() {
        let (gate, clock, _) = manual_gate(config());
        gate.check("/search", "client1");
        clock.set_time(500);
        gate.check("/search", "client1");

        clock.set_time(1_100);
        assert_eq!(gate.get("/search", "client1").current, 1);
        match gate.peek("/search", "client1") {
            Some(Entry::SlidingWindow(state)) => assert_eq!(state.buckets.len(), 2),
            other => panic!("Expected sliding window entry, got: {:?}", other),
        }
    }
}
