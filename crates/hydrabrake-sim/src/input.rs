//! Logical input events and the brake latch.
//!
//! The frame loop translates raw key presses into [`BrakeInput`] events and
//! feeds them to an [`InputLatch`]. The latch is edge-triggered and
//! idempotent: engaging an already engaged brake is a no-op, and only the
//! resulting flag is read by the state machine each tick.

use serde::{Deserialize, Serialize};

/// A logical input event consumed by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrakeInput {
    /// Press the brake pedal.
    EngageBrake,
    /// Let go of the brake pedal.
    ReleaseBrake,
    /// Stop the simulation at the next tick boundary.
    Exit,
}

/// Latched brake intent plus a sticky exit request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLatch {
    brake_engaged: bool,
    exit_requested: bool,
}

impl InputLatch {
    /// A latch with the brake released and no exit requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns `true` if the latch changed.
    pub fn apply(&mut self, input: BrakeInput) -> bool {
        let changed = match input {
            BrakeInput::EngageBrake => !std::mem::replace(&mut self.brake_engaged, true),
            BrakeInput::ReleaseBrake => std::mem::replace(&mut self.brake_engaged, false),
            BrakeInput::Exit => !std::mem::replace(&mut self.exit_requested, true),
        };

        if changed {
            tracing::debug!(?input, "input latch changed");
        }
        changed
    }

    /// Whether the brake is currently held.
    pub fn brake_engaged(&self) -> bool {
        self.brake_engaged
    }

    /// Whether an exit has been requested. Once set, it stays set.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_latch_is_released() {
        let latch = InputLatch::new();
        assert!(!latch.brake_engaged());
        assert!(!latch.exit_requested());
    }

    #[test]
    fn repeated_engage_is_idempotent() {
        let mut latch = InputLatch::new();
        assert!(latch.apply(BrakeInput::EngageBrake));
        assert!(!latch.apply(BrakeInput::EngageBrake));
        assert!(latch.brake_engaged());
    }

    #[test]
    fn release_when_released_is_noop() {
        let mut latch = InputLatch::new();
        assert!(!latch.apply(BrakeInput::ReleaseBrake));
        assert!(!latch.brake_engaged());
    }

    #[test]
    fn engage_then_release() {
        let mut latch = InputLatch::new();
        latch.apply(BrakeInput::EngageBrake);
        assert!(latch.apply(BrakeInput::ReleaseBrake));
        assert!(!latch.brake_engaged());
    }

    #[test]
    fn exit_is_sticky_and_independent_of_brake() {
        let mut latch = InputLatch::new();
        latch.apply(BrakeInput::EngageBrake);
        assert!(latch.apply(BrakeInput::Exit));
        assert!(!latch.apply(BrakeInput::Exit));
        latch.apply(BrakeInput::ReleaseBrake);
        assert!(latch.exit_requested());
        assert!(!latch.brake_engaged());
    }

    #[test]
    fn input_serializes_as_variant_name() {
        let json = serde_json::to_string(&BrakeInput::EngageBrake).unwrap();
        assert_eq!(json, "\"EngageBrake\"");
    }
}
