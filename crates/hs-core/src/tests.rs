//! Unit tests for hs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CoreError, EdgeId, NodeId, ParticipantId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::from_index(42).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(ParticipantId::default(), ParticipantId::INVALID);
    }

    #[test]
    fn from_index_rejects_sentinel_and_overflow() {
        assert!(matches!(
            NodeId::from_index(u32::MAX as usize),
            Err(CoreError::IdOverflow { what: "NodeId", .. })
        ));
        assert!(EdgeId::from_index(u32::MAX as usize + 10).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(ParticipantId(7).to_string(), "ParticipantId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{CoreError, SimClock, Step};

    #[test]
    fn step_arithmetic() {
        let s = Step(10);
        assert_eq!(s + 5, Step(15));
        assert_eq!(s.offset(3), Step(13));
        assert_eq!(Step(15).since(s), 5);
        assert_eq!(Step(3).since(s), 0);
    }

    #[test]
    fn clock_accumulates_deltas() {
        let mut clock = SimClock::new();
        clock.advance(0.5).unwrap();
        clock.advance(1.5).unwrap();
        assert_eq!(clock.current_step(), Step(2));
        assert!((clock.time() - 2.0).abs() < 1e-12);
        assert!((clock.delta_time() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn clock_rejects_bad_delta() {
        let mut clock = SimClock::new();
        assert!(matches!(clock.advance(-1.0), Err(CoreError::InvalidTimeStep(_))));
        assert!(clock.advance(f64::NAN).is_err());
        assert_eq!(clock.current_step(), Step::ZERO);
    }

    #[test]
    fn reset_keeps_delta() {
        let mut clock = SimClock::new();
        clock.advance(2.0).unwrap();
        clock.reset();
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.current_step(), Step::ZERO);
        assert_eq!(clock.delta_time(), 2.0);
    }

    #[test]
    fn display_format() {
        let mut clock = SimClock::new();
        clock.advance(0.25).unwrap();
        assert_eq!(clock.to_string(), "S1 (t=0.250)");
    }
}

#[cfg(test)]
mod rng {
    use crate::{ParticipantId, ParticipantRng, SimRng};

    #[test]
    fn participant_rng_deterministic() {
        let weights = [1.0, 2.0, 3.0, 4.0];
        let mut a = ParticipantRng::new(99, ParticipantId(5));
        let mut b = ParticipantRng::new(99, ParticipantId(5));
        for _ in 0..20 {
            assert_eq!(a.weighted_index(&weights), b.weighted_index(&weights));
        }
    }

    #[test]
    fn weighted_index_degenerate_inputs() {
        let mut rng = ParticipantRng::new(1, ParticipantId(0));
        assert_eq!(rng.weighted_index(&[]), None);
        assert_eq!(rng.weighted_index(&[0.0, 0.0]), None);
        assert_eq!(rng.weighted_index(&[0.0, 1.0, 0.0]), Some(1));
    }

    #[test]
    fn sim_rng_index_bounds() {
        let mut rng = SimRng::new(7);
        assert_eq!(rng.index(0), None);
        for _ in 0..100 {
            let i = rng.index(3).unwrap();
            assert!(i < 3);
        }
    }

    #[test]
    fn child_rngs_differ_by_offset() {
        let mut root_a = SimRng::new(3);
        let mut root_b = SimRng::new(3);
        let mut c1 = root_a.child(1);
        let mut c2 = root_b.child(2);
        let xs: Vec<u32> = (0..8).map(|_| c1.gen_range(0..1_000_000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| c2.gen_range(0..1_000_000)).collect();
        assert_ne!(xs, ys);
    }
}
