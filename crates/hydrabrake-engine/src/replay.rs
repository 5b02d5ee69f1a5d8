//! Deterministic replay with input recording and checkpoint verification.
//!
//! The recorder captures every [`BrakeInput`] with the tick it was applied
//! at, plus periodic state hash checkpoints, producing a [`ReplayLog`]. The
//! log can be replayed against a [`TickLoop`] to verify determinism: the
//! initial snapshot is restored, inputs are re-fed at their ticks, and
//! state hashes are compared at each checkpoint.
//!
//! # Recording and replaying
//!
//! ```
//! use hydrabrake_engine::replay::{replay, ReplayRecorder};
//! use hydrabrake_engine::tick::{TickConfig, TickLoop};
//! use hydrabrake_sim::prelude::*;
//!
//! let mut tick_loop = TickLoop::new(TickConfig::default());
//! let mut recorder = ReplayRecorder::new(tick_loop.capture_snapshot(), 10);
//!
//! for tick in 0..120 {
//!     let inputs: &[BrakeInput] = match tick {
//!         10 => &[BrakeInput::EngageBrake],
//!         70 => &[BrakeInput::ReleaseBrake],
//!         _ => &[],
//!     };
//!     recorder.record_tick(tick, inputs, Some(tick_loop.state_hash()));
//!     for &input in inputs {
//!         tick_loop.handle_input(input);
//!     }
//!     tick_loop.tick();
//! }
//! let log = recorder.finish();
//!
//! let mut fresh = TickLoop::new(TickConfig::default());
//! let result = replay(&mut fresh, &log).expect("well-formed log");
//! assert!(result.completed);
//! assert!(result.first_divergence.is_none());
//! assert_eq!(fresh.state(), tick_loop.state());
//! ```

use std::collections::BTreeMap;

use hydrabrake_sim::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tick::TickLoop;

// ---------------------------------------------------------------------------
// ReplayError
// ---------------------------------------------------------------------------

/// Ways a [`ReplayLog`] can fail to replay.
///
/// A divergence is not an error; it is reported in [`ReplayResult`].
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Two checkpoints were recorded for the same tick.
    #[error("replay log contains duplicate checkpoint at tick {0}")]
    DuplicateCheckpoint(u64),

    /// An entry lies outside the recorded tick range and would never be
    /// applied.
    #[error("replay entry at tick {tick} is outside the recorded range {start}..{end}")]
    EntryOutOfRange { tick: u64, start: u64, end: u64 },

    /// The recorded tick range does not fit in `u64`.
    #[error("tick range overflow: start tick {start} + {total} ticks exceeds u64::MAX")]
    TickOverflow { start: u64, total: u64 },

    /// The initial snapshot failed verification.
    #[error("failed to restore initial snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    /// The log could not be converted to or from JSON.
    #[error("replay log serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// ReplayLog
// ---------------------------------------------------------------------------

/// A complete recording: initial snapshot plus ordered inputs and
/// checkpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayLog {
    /// Replay begins by restoring this snapshot.
    pub initial_snapshot: StateSnapshot,
    /// Number of ticks to run from the initial snapshot.
    pub total_ticks: u64,
    /// Inputs and checkpoints, in recording order.
    pub entries: Vec<ReplayEntry>,
}

impl ReplayLog {
    /// Serialize the log to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a log from JSON. The snapshot is verified at replay time.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of recorded input events.
    pub fn input_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, ReplayEntry::Input { .. }))
            .count()
    }
}

// ---------------------------------------------------------------------------
// ReplayEntry
// ---------------------------------------------------------------------------

/// One entry in a [`ReplayLog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReplayEntry {
    /// An input event applied just before the given tick executed.
    Input {
        /// The tick the event was applied at.
        tick: u64,
        /// The event.
        event: BrakeInput,
    },
    /// A state hash taken before the given tick executed.
    Checkpoint {
        /// The tick the hash was taken at.
        tick: u64,
        /// BLAKE3 hex digest of the state at this tick.
        state_hash: String,
    },
}

// ---------------------------------------------------------------------------
// ReplayResult
// ---------------------------------------------------------------------------

/// The outcome of replaying a [`ReplayLog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayResult {
    /// Whether every recorded tick ran without divergence.
    pub completed: bool,
    /// Ticks executed before stopping.
    pub ticks_replayed: u64,
    /// The first checkpoint whose hash did not match, if any.
    pub first_divergence: Option<ReplayDivergence>,
}

/// A checkpoint that did not reproduce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayDivergence {
    /// The checkpoint tick.
    pub tick: u64,
    /// Hash stored in the log.
    pub expected_hash: String,
    /// Hash computed during replay.
    pub actual_hash: String,
}

// ---------------------------------------------------------------------------
// ReplayRecorder
// ---------------------------------------------------------------------------

/// Records a simulation run into a [`ReplayLog`].
///
/// Call [`record_tick`](Self::record_tick) once per tick, before executing
/// it, with the inputs applied at that tick. Ticks start at the initial
/// snapshot's tick and run without gaps.
pub struct ReplayRecorder {
    log: ReplayLog,
    checkpoint_interval: u64,
}

impl ReplayRecorder {
    /// Start recording from `initial`.
    ///
    /// With a `checkpoint_interval` of 10, checkpoints land on ticks 0, 10,
    /// 20, and so on. An interval of 0 checkpoints every tick a hash is
    /// supplied for.
    pub fn new(initial: StateSnapshot, checkpoint_interval: u64) -> Self {
        Self {
            log: ReplayLog {
                initial_snapshot: initial,
                total_ticks: 0,
                entries: Vec::new(),
            },
            checkpoint_interval,
        }
    }

    /// The tick the next [`record_tick`](Self::record_tick) call must pass.
    pub fn next_tick(&self) -> u64 {
        self.log.initial_snapshot.tick + self.log.total_ticks
    }

    /// Record one tick's inputs and, on the interval, its state hash.
    ///
    /// # Panics
    ///
    /// Panics if `tick` is not [`next_tick`](Self::next_tick): the first call
    /// must pass the initial snapshot's tick, and each later call the tick
    /// after the previous one.
    pub fn record_tick(&mut self, tick: u64, inputs: &[BrakeInput], state_hash: Option<String>) {
        let expected = self.next_tick();
        assert!(
            tick == expected,
            "ReplayRecorder::record_tick: got tick {tick}, expected tick {expected}"
        );
        self.log.total_ticks += 1;

        if let Some(state_hash) = state_hash {
            let due = self.checkpoint_interval == 0 || tick % self.checkpoint_interval == 0;
            if due {
                self.log
                    .entries
                    .push(ReplayEntry::Checkpoint { tick, state_hash });
            }
        }

        self.log.entries.extend(
            inputs
                .iter()
                .map(|&event| ReplayEntry::Input { tick, event }),
        );
    }

    /// Finish recording and return the log.
    pub fn finish(self) -> ReplayLog {
        tracing::debug!(
            ticks = self.log.total_ticks,
            entries = self.log.entries.len(),
            "replay recording finished"
        );
        self.log
    }
}

// ---------------------------------------------------------------------------
// replay()
// ---------------------------------------------------------------------------

/// Replay `log` on `tick_loop`, stopping at the first divergent checkpoint.
///
/// For each tick from the snapshot's tick: compare the checkpoint (if any),
/// apply that tick's inputs in recorded order, then execute the tick.
///
/// # Errors
///
/// Returns an error for a malformed log (duplicate checkpoints, entries
/// outside the recorded tick range) or a snapshot that fails verification.
/// All validation happens before `tick_loop` is touched.
pub fn replay(tick_loop: &mut TickLoop, log: &ReplayLog) -> Result<ReplayResult, ReplayError> {
    let start = log.initial_snapshot.tick;
    let total = log.total_ticks;
    let end = start
        .checked_add(total)
        .ok_or(ReplayError::TickOverflow { start, total })?;

    let mut inputs: BTreeMap<u64, Vec<BrakeInput>> = BTreeMap::new();
    let mut checkpoints: BTreeMap<u64, &str> = BTreeMap::new();

    for entry in &log.entries {
        let tick = match entry {
            ReplayEntry::Input { tick, .. } | ReplayEntry::Checkpoint { tick, .. } => *tick,
        };
        if !(start..end).contains(&tick) {
            return Err(ReplayError::EntryOutOfRange { tick, start, end });
        }

        match entry {
            ReplayEntry::Input { event, .. } => inputs.entry(tick).or_default().push(*event),
            ReplayEntry::Checkpoint { state_hash, .. } => {
                if checkpoints.insert(tick, state_hash).is_some() {
                    return Err(ReplayError::DuplicateCheckpoint(tick));
                }
            }
        }
    }

    tick_loop.restore_from_snapshot(&log.initial_snapshot)?;

    let mut ticks_replayed = 0;
    for tick in start..end {
        if let Some(&expected) = checkpoints.get(&tick) {
            let actual = tick_loop.state_hash();
            if actual != expected {
                tracing::warn!(tick, expected, actual = %actual, "replay diverged");
                return Ok(ReplayResult {
                    completed: false,
                    ticks_replayed,
                    first_divergence: Some(ReplayDivergence {
                        tick,
                        expected_hash: expected.to_owned(),
                        actual_hash: actual,
                    }),
                });
            }
        }

        for &event in inputs.get(&tick).into_iter().flatten() {
            tick_loop.handle_input(event);
        }
        tick_loop.tick();
        ticks_replayed += 1;
    }

    Ok(ReplayResult {
        completed: true,
        ticks_replayed,
        first_divergence: None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
