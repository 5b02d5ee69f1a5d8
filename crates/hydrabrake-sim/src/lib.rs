//! Hydrabrake Sim -- the animation state machine behind the hydraulic brake demo.
//!
//! This crate owns the only mutable entity of the simulation, the
//! [`SimulationState`](state::SimulationState), and the fixed rule that
//! advances it by one tick given a single binary input (brake engaged or
//! released). Nothing here touches a window or a GPU, so every property of
//! the state machine can be exercised headless.
//!
//! # Quick Start
//!
//! ```
//! use hydrabrake_sim::prelude::*;
//!
//! let tuning = BrakeTuning::default();
//! let state = SimulationState::default().advance(true, &tuning);
//!
//! assert!((state.pedal_position - 0.2).abs() < 1e-12);
//! assert!((state.car_offset + 0.5).abs() < 1e-12);
//! assert_eq!(state.mode(), BrakeMode::Braking);
//! ```

#![deny(unsafe_code)]

pub mod input;
pub mod snapshot;
pub mod state;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// A [`BrakeTuning`](state::BrakeTuning) value that would break the state
/// machine's bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    /// An interpolation gain must lie in `(0, 1]` to stay a convex step.
    #[error("gain '{name}' must be in (0, 1], got {value}")]
    GainOutOfRange { name: &'static str, value: f64 },

    /// A per-tick rate must be finite and non-negative.
    #[error("rate '{name}' must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    /// The clamp drag must leave a positive floor on the braking spin rate.
    #[error("clamp_drag must be in [0, 1), got {0}")]
    ClampDragOutOfRange(f64),

    /// The braking asymptote must sit a positive distance from rest.
    #[error("stopping_distance must be finite and positive, got {0}")]
    InvalidStoppingDistance(f64),
}

/// Errors produced when capturing, serializing, or verifying a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The stored hash does not match the hash recomputed from the data.
    #[error("snapshot hash mismatch at tick {tick}: stored {expected}, recomputed {actual}")]
    HashMismatch {
        tick: u64,
        expected: String,
        actual: String,
    },

    /// The snapshot could not be converted to or from JSON.
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::input::{BrakeInput, InputLatch};
    pub use crate::snapshot::{latched_state_hash, state_hash, StateSnapshot};
    pub use crate::state::{BrakeMode, BrakeTuning, SimulationState};
    pub use crate::{SnapshotError, TuningError};
}
