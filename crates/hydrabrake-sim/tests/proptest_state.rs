//! Property tests for the brake state machine.
//!
//! These tests use `proptest` to generate initial states and input sequences
//! and verify that the bounds of the update rule hold after every tick.

use hydrabrake_sim::prelude::*;
use proptest::prelude::*;

/// Strategy for a value in `[0, 1]`, endpoints included.
fn unit_interval() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), 0.0..=1.0f64]
}

/// Strategy for a state with pedal and pad anywhere in `[0, 1]`.
fn bounded_state() -> impl Strategy<Value = SimulationState> {
    (
        any::<bool>(),
        unit_interval(),
        unit_interval(),
        -720.0..720.0f64,
        -9.0..9.0f64,
    )
        .prop_map(
            |(brake_engaged, pedal_position, pad_engagement, disc_rotation, car_offset)| {
                SimulationState {
                    brake_engaged,
                    pedal_position,
                    pad_engagement,
                    disc_rotation,
                    car_offset,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn braking_keeps_pedal_and_pad_bounded_and_rising(
        initial in bounded_state(),
        ticks in 1..120usize,
    ) {
        let tuning = BrakeTuning::default();
        let mut state = initial;
        for _ in 0..ticks {
            let next = state.advance(true, &tuning);
            prop_assert!((0.0..=1.0).contains(&next.pedal_position));
            prop_assert!((0.0..=1.0).contains(&next.pad_engagement));
            prop_assert!(next.pedal_position >= state.pedal_position);
            prop_assert!(next.pad_engagement >= state.pad_engagement);
            state = next;
        }
    }

    #[test]
    fn releasing_keeps_pedal_and_pad_bounded_and_falling(
        initial in bounded_state(),
        ticks in 1..120usize,
    ) {
        let tuning = BrakeTuning::default();
        let mut state = initial;
        for _ in 0..ticks {
            let next = state.advance(false, &tuning);
            prop_assert!((0.0..=1.0).contains(&next.pedal_position));
            prop_assert!((0.0..=1.0).contains(&next.pad_engagement));
            prop_assert!(next.pedal_position <= state.pedal_position);
            prop_assert!(next.pad_engagement <= state.pad_engagement);
            state = next;
        }
    }

    #[test]
    fn disc_rotation_never_decreases(
        initial in bounded_state(),
        inputs in prop::collection::vec(any::<bool>(), 1..200),
    ) {
        let tuning = BrakeTuning::default();
        let mut state = initial;
        for engaged in inputs {
            let next = state.advance(engaged, &tuning);
            prop_assert!(
                next.disc_rotation > state.disc_rotation,
                "disc went from {} to {}", state.disc_rotation, next.disc_rotation
            );
            state = next;
        }
    }

    #[test]
    fn braking_from_rest_never_crosses_stopping_distance(ticks in 1..300usize) {
        let tuning = BrakeTuning::default();
        let mut state = SimulationState::default();
        for _ in 0..ticks {
            let next = state.advance(true, &tuning);
            prop_assert!(next.car_offset < state.car_offset);
            prop_assert!(next.car_offset > -tuning.stopping_distance);
            state = next;
        }
    }

    #[test]
    fn any_valid_tuning_keeps_bounds(
        pedal_gain in 0.01..=1.0f64,
        pad_gain in 0.01..=1.0f64,
        clamp_drag in 0.0..0.99f64,
        inputs in prop::collection::vec(any::<bool>(), 1..100),
    ) {
        let tuning = BrakeTuning { pedal_gain, pad_gain, clamp_drag, ..Default::default() };
        prop_assert!(tuning.validate().is_ok());

        let mut state = SimulationState::default();
        for engaged in inputs {
            state.step(engaged, &tuning);
            prop_assert!((0.0..=1.0).contains(&state.pedal_position));
            prop_assert!((0.0..=1.0).contains(&state.pad_engagement));
        }
    }

    #[test]
    fn snapshot_hash_is_deterministic(
        inputs in prop::collection::vec(any::<bool>(), 0..60),
    ) {
        let tuning = BrakeTuning::default();
        let run = || {
            let mut state = SimulationState::default();
            for &engaged in &inputs {
                state.step(engaged, &tuning);
            }
            StateSnapshot::capture(&state, inputs.len() as u64)
        };
        prop_assert_eq!(run().hash, run().hash);
    }
}

#[test]
fn long_braking_settles_short_of_stopping_distance() {
    let tuning = BrakeTuning::default();
    let mut state = SimulationState::default();
    for tick in 0..5_000 {
        let next = state.advance(true, &tuning);
        // Strictly decreasing until f64 rounding pins it just above the limit.
        assert!(
            next.car_offset <= state.car_offset,
            "tick {tick}: offset rose from {} to {}",
            state.car_offset,
            next.car_offset
        );
        assert!(
            next.car_offset > -tuning.stopping_distance,
            "tick {tick}: offset {} reached the stopping distance",
            next.car_offset
        );
        state = next;
    }
    assert!(state.car_offset < -9.999);
}

#[test]
fn fifty_ticks_from_any_corner_converge() {
    let tuning = BrakeTuning::default();
    for (pedal, pad) in [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (0.5, 0.25)] {
        let mut state = SimulationState {
            pedal_position: pedal,
            pad_engagement: pad,
            ..Default::default()
        };
        for _ in 0..50 {
            state = state.advance(true, &tuning);
        }
        assert!((1.0 - state.pedal_position) < 1e-4);
        assert!((1.0 - state.pad_engagement) < 1e-4);
    }
}
