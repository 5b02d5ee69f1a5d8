//! State snapshots with BLAKE3 hashing.
//!
//! A [`StateSnapshot`] pairs a [`SimulationState`] with the tick it was taken
//! at, the brake intent latched for the next tick, and a BLAKE3 hex digest of
//! all three. The latched intent can differ from `state.brake_engaged` when
//! an input arrived after the last tick; restoring it is what lets a resumed
//! run follow the original trajectory. The hash makes determinism checks
//! cheap: two runs fed the same inputs must produce the same hash at every
//! tick, and a snapshot that was edited after capture fails
//! [`StateSnapshot::verify`].
//!
//! # Usage
//!
//! ```
//! use hydrabrake_sim::prelude::*;
//!
//! let state = SimulationState::default().advance(true, &BrakeTuning::default());
//! let snapshot = StateSnapshot::capture(&state, 1);
//! assert_eq!(snapshot.hash.len(), 64);
//! assert!(snapshot.verify().is_ok());
//!
//! let json = snapshot.to_json().unwrap();
//! let restored = StateSnapshot::from_json(&json).unwrap();
//! assert_eq!(restored.state, state);
//! ```

use serde::{Deserialize, Serialize};

use crate::state::SimulationState;
use crate::SnapshotError;

/// A hashed copy of the simulation state at a given tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// The captured state.
    pub state: SimulationState,
    /// Brake intent the next tick will advance with.
    pub brake_latched: bool,
    /// Number of ticks executed when the state was captured.
    pub tick: u64,
    /// BLAKE3 hex digest (64 lowercase hex chars) of `state`,
    /// `brake_latched` and `tick`.
    pub hash: String,
}

/// Compute the BLAKE3 hex digest of a state at a tick, with no input pending.
///
/// Equivalent to [`latched_state_hash`] with `brake_latched` equal to
/// `state.brake_engaged`.
pub fn state_hash(state: &SimulationState, tick: u64) -> String {
    latched_state_hash(state, state.brake_engaged, tick)
}

/// Compute the BLAKE3 hex digest of a state, its latched brake intent and a
/// tick.
///
/// The digest covers the canonical JSON encoding of all three, so equal
/// inputs always produce equal digests.
pub fn latched_state_hash(state: &SimulationState, brake_latched: bool, tick: u64) -> String {
    #[derive(Serialize)]
    struct HashableState<'a> {
        state: &'a SimulationState,
        brake_latched: bool,
        tick: u64,
    }

    // Plain struct of bools and finite floats: serialization cannot fail.
    let json_bytes = serde_json::to_vec(&HashableState {
        state,
        brake_latched,
        tick,
    })
    .expect("SimulationState should always be JSON-serializable");

    blake3::hash(&json_bytes).to_hex().to_string()
}

impl StateSnapshot {
    /// Capture `state` at `tick` with no input pending, and compute its hash.
    pub fn capture(state: &SimulationState, tick: u64) -> Self {
        Self::capture_latched(state, state.brake_engaged, tick)
    }

    /// Capture `state` at `tick` together with the brake intent latched for
    /// the next tick.
    pub fn capture_latched(state: &SimulationState, brake_latched: bool, tick: u64) -> Self {
        Self {
            state: state.clone(),
            brake_latched,
            tick,
            hash: latched_state_hash(state, brake_latched, tick),
        }
    }

    /// Recompute the hash and compare it with the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::HashMismatch`] if the data no longer matches
    /// the hash it was captured with.
    pub fn verify(&self) -> Result<(), SnapshotError> {
        let actual = latched_state_hash(&self.state, self.brake_latched, self.tick);
        if actual != self.hash {
            return Err(SnapshotError::HashMismatch {
                tick: self.tick,
                expected: self.hash.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Serialize to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a snapshot from JSON and verify its hash.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Serialization`] for malformed JSON and
    /// [`SnapshotError::HashMismatch`] if the data was altered.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.verify()?;
        Ok(snapshot)
    }
}
