//! Integration tests for the deterministic replay system.
//!
//! These tests record interactive-style sessions (brake pressed and
//! released at arbitrary ticks), replay them on fresh tick loops, and check
//! checkpoint verification, divergence detection, and JSON round trips of
//! [`ReplayLog`].

use hydrabrake_engine::replay::{replay, ReplayEntry, ReplayLog, ReplayRecorder};
use hydrabrake_engine::tick::{TickConfig, TickLoop};
use hydrabrake_sim::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Inputs for a session: `(tick, event)` pairs, ticks ascending.
const SESSION: &[(u64, BrakeInput)] = &[
    (12, BrakeInput::EngageBrake),
    (13, BrakeInput::EngageBrake),
    (80, BrakeInput::ReleaseBrake),
    (95, BrakeInput::EngageBrake),
    (150, BrakeInput::ReleaseBrake),
];

/// Record `ticks` ticks of [`SESSION`] starting from `tick_loop`'s current
/// state.
fn record(tick_loop: &mut TickLoop, ticks: u64, interval: u64) -> ReplayLog {
    let mut recorder = ReplayRecorder::new(tick_loop.capture_snapshot(), interval);
    let start = tick_loop.tick_count();
    for tick in start..start + ticks {
        let inputs: Vec<BrakeInput> = SESSION
            .iter()
            .filter(|(t, _)| *t == tick)
            .map(|&(_, input)| input)
            .collect();
        recorder.record_tick(tick, &inputs, Some(tick_loop.state_hash()));
        for &input in &inputs {
            tick_loop.handle_input(input);
        }
        tick_loop.tick();
    }
    recorder.finish()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn replay_from_start_matches_recording() {
    let mut original = TickLoop::new(TickConfig::default());
    let log = record(&mut original, 240, 20);

    let mut replayed = TickLoop::new(TickConfig::default());
    let result = replay(&mut replayed, &log).expect("replay");

    assert!(result.completed);
    assert_eq!(result.ticks_replayed, 240);
    assert!(result.first_divergence.is_none());
    assert_eq!(replayed.state_hash(), original.state_hash());
    assert_eq!(replayed.tick_count(), original.tick_count());
}

#[test]
fn replay_from_mid_session_snapshot() {
    let mut original = TickLoop::new(TickConfig::default());
    original.handle_input(BrakeInput::EngageBrake);
    original.run_ticks(50);
    let log = record(&mut original, 120, 7);
    assert_eq!(log.initial_snapshot.tick, 50);

    // The replaying loop starts somewhere else entirely.
    let mut replayed = TickLoop::new(TickConfig::default());
    replayed.run_ticks(999);
    let result = replay(&mut replayed, &log).expect("replay");

    assert!(result.completed);
    assert_eq!(replayed.state(), original.state());
    assert_eq!(replayed.tick_count(), 170);
}

#[test]
fn replay_from_snapshot_with_pending_release() {
    let mut original = TickLoop::new(TickConfig::default());
    original.handle_input(BrakeInput::EngageBrake);
    original.run_ticks(10);
    // Released after tick 10 ran, so the state still says engaged.
    original.handle_input(BrakeInput::ReleaseBrake);
    let log = record(&mut original, 60, 5);
    assert!(log.initial_snapshot.state.brake_engaged);
    assert!(!log.initial_snapshot.brake_latched);

    let mut replayed = TickLoop::new(TickConfig::default());
    replayed.handle_input(BrakeInput::EngageBrake);
    let result = replay(&mut replayed, &log).expect("replay");

    assert!(result.completed, "diverged: {:?}", result.first_divergence);
    assert_eq!(replayed.state(), original.state());
    assert_eq!(replayed.state_hash(), original.state_hash());
}

#[test]
fn different_tuning_diverges_at_first_checkpoint_after_input() {
    let mut original = TickLoop::new(TickConfig::default());
    let log = record(&mut original, 200, 10);

    let mut replayed = TickLoop::new(TickConfig {
        tuning: BrakeTuning {
            drift_rate: 0.6,
            ..Default::default()
        },
        ..Default::default()
    });
    let result = replay(&mut replayed, &log).expect("replay");

    // Drift only matters once the brake is engaged at tick 12, so states
    // first differ at the tick 20 checkpoint.
    assert!(!result.completed);
    let divergence = result.first_divergence.expect("divergence");
    assert_eq!(divergence.tick, 20);
    assert_ne!(divergence.expected_hash, divergence.actual_hash);
}

#[test]
fn duplicate_inputs_replay_like_the_original_latch() {
    let mut original = TickLoop::new(TickConfig::default());
    let log = record(&mut original, 20, 0);

    // Both EngageBrake events are kept, even though the second was a no-op.
    assert_eq!(
        log.entries
            .iter()
            .filter(|e| matches!(e, ReplayEntry::Input { .. }))
            .count(),
        2
    );

    let mut replayed = TickLoop::new(TickConfig::default());
    let result = replay(&mut replayed, &log).expect("replay");
    assert!(result.completed);
}

#[test]
fn corrupted_initial_snapshot_is_an_error() {
    let mut original = TickLoop::new(TickConfig::default());
    let mut log = record(&mut original, 30, 10);
    log.initial_snapshot.state.pedal_position = 0.5;

    let mut replayed = TickLoop::new(TickConfig::default());
    assert!(replay(&mut replayed, &log).is_err());
    assert_eq!(replayed.tick_count(), 0);
}

#[test]
fn log_json_round_trip_replays() {
    let mut original = TickLoop::new(TickConfig::default());
    let log = record(&mut original, 160, 16);

    let json = log.to_json().expect("serialize");
    assert!(json.contains("EngageBrake"));
    let restored = ReplayLog::from_json(&json).expect("parse");

    let mut replayed = TickLoop::new(TickConfig::default());
    let result = replay(&mut replayed, &restored).expect("replay");
    assert!(result.completed);
    assert_eq!(replayed.state_hash(), original.state_hash());
}

#[test]
fn empty_log_restores_snapshot_only() {
    let mut original = TickLoop::new(TickConfig::default());
    original.run_ticks(10);
    let log = ReplayRecorder::new(original.capture_snapshot(), 10).finish();

    let mut replayed = TickLoop::new(TickConfig::default());
    let result = replay(&mut replayed, &log).expect("replay");
    assert!(result.completed);
    assert_eq!(result.ticks_replayed, 0);
    assert_eq!(replayed.state_hash(), original.state_hash());
}
