//! Fixed-timestep tick loop for the brake simulation.
//!
//! The [`TickLoop`] owns the single [`SimulationState`] and the
//! [`InputLatch`] that feeds it. Each tick:
//!
//! 1. The latched brake flag is read.
//! 2. The state advances by one step of the brake recurrences.
//! 3. The tick counter advances.
//!
//! Inputs only change the latch; the state itself is written in exactly one
//! place, [`TickLoop::tick`]. With the same tuning and the same inputs at the
//! same ticks, two loops produce bit-identical states.
//!
//! The windowed frontend pairs the loop with a [`FramePacer`] to keep ticks
//! at the configured rate in wall-clock time. Headless callers (tests,
//! replay) just call [`TickLoop::tick`] as fast as they like.
//!
//! # Example
//!
//! ```
//! use hydrabrake_engine::tick::{TickConfig, TickLoop};
//! use hydrabrake_sim::prelude::*;
//!
//! let mut tick_loop = TickLoop::new(TickConfig::default());
//! tick_loop.handle_input(BrakeInput::EngageBrake);
//! tick_loop.run_ticks(60);
//!
//! assert_eq!(tick_loop.tick_count(), 60);
//! assert!(tick_loop.state().pedal_position > 0.99);
//! assert!(tick_loop.state().car_offset < 0.0);
//! ```

use std::time::{Duration, Instant};

use hydrabrake_sim::prelude::*;

use crate::render::draw::DrawCall;
use crate::scene::{self, Pose};

// ---------------------------------------------------------------------------
// TickConfig
// ---------------------------------------------------------------------------

/// Configuration for the fixed-timestep tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Fixed time step in seconds per tick. Must be positive and finite.
    pub fixed_dt: f64,
    /// Recurrence constants for the brake state machine.
    pub tuning: BrakeTuning,
}

impl Default for TickConfig {
    /// 60 Hz, default tuning.
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            tuning: BrakeTuning::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// TickDiagnostics
// ---------------------------------------------------------------------------

/// Timing diagnostics for the last tick.
#[derive(Debug, Clone, Default)]
pub struct TickDiagnostics {
    /// Wall-clock time spent advancing the state.
    pub update_time: Duration,
}

// ---------------------------------------------------------------------------
// TickLoop
// ---------------------------------------------------------------------------

/// The deterministic fixed-timestep driver of [`SimulationState`].
pub struct TickLoop {
    state: SimulationState,
    latch: InputLatch,
    tick_counter: u64,
    fixed_dt: f64,
    config: TickConfig,
    last_diagnostics: TickDiagnostics,
}

impl TickLoop {
    /// Create a tick loop at the rest state, tick 0.
    ///
    /// # Panics
    ///
    /// Panics if `fixed_dt` is not positive and finite, or if the tuning
    /// fails [`BrakeTuning::validate`]. Use [`TickLoop::try_new`] to handle
    /// a bad tuning as an error.
    pub fn new(config: TickConfig) -> Self {
        assert!(
            config.fixed_dt > 0.0 && config.fixed_dt.is_finite(),
            "fixed_dt must be positive and finite, got {}",
            config.fixed_dt
        );
        if let Err(err) = config.tuning.validate() {
            panic!("invalid brake tuning: {err}");
        }
        Self {
            state: SimulationState::default(),
            latch: InputLatch::new(),
            tick_counter: 0,
            fixed_dt: config.fixed_dt,
            config,
            last_diagnostics: TickDiagnostics::default(),
        }
    }

    /// Like [`TickLoop::new`], but reports an invalid tuning instead of
    /// panicking.
    ///
    /// # Panics
    ///
    /// Still panics on a non-positive or non-finite `fixed_dt`.
    pub fn try_new(config: TickConfig) -> Result<Self, TuningError> {
        config.tuning.validate()?;
        Ok(Self::new(config))
    }

    /// Feed one input event to the latch. Returns `true` if the latch changed.
    ///
    /// Takes effect at the next [`tick`](Self::tick).
    pub fn handle_input(&mut self, input: BrakeInput) -> bool {
        let changed = self.latch.apply(input);
        if changed {
            tracing::info!(tick = self.tick_counter, ?input, "brake input");
        }
        changed
    }

    /// Advance the simulation by one fixed step.
    pub fn tick(&mut self) -> &SimulationState {
        let start = Instant::now();
        self.state
            .step(self.latch.brake_engaged(), &self.config.tuning);
        self.tick_counter += 1;
        self.last_diagnostics = TickDiagnostics {
            update_time: start.elapsed(),
        };

        tracing::trace!(
            tick = self.tick_counter,
            pedal = self.state.pedal_position,
            pad = self.state.pad_engagement,
            disc = self.state.disc_rotation,
            car = self.state.car_offset,
            "tick"
        );
        &self.state
    }

    /// Run `count` ticks with the current latch.
    pub fn run_ticks(&mut self, count: u64) {
        for _ in 0..count {
            self.tick();
        }
    }

    // -- accessors ----------------------------------------------------------

    /// The number of ticks executed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_counter
    }

    /// The current simulation time in seconds.
    ///
    /// Computed as `tick_count * fixed_dt`, not accumulated.
    pub fn sim_time(&self) -> f64 {
        self.tick_counter as f64 * self.fixed_dt
    }

    /// The fixed time step in seconds per tick.
    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// The current simulation state.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// The render pose for the current state.
    pub fn pose(&self) -> Pose {
        Pose::from(&self.state)
    }

    /// The draw list for the current state.
    pub fn compose_frame(&self) -> Vec<DrawCall> {
        scene::compose(&self.pose())
    }

    /// Whether the brake is latched on (applies from the next tick).
    pub fn brake_engaged(&self) -> bool {
        self.latch.brake_engaged()
    }

    /// Whether an exit has been requested.
    pub fn exit_requested(&self) -> bool {
        self.latch.exit_requested()
    }

    /// The tuning this loop advances with.
    pub fn tuning(&self) -> &BrakeTuning {
        &self.config.tuning
    }

    /// Diagnostics from the last tick.
    pub fn last_diagnostics(&self) -> &TickDiagnostics {
        &self.last_diagnostics
    }

    // -- snapshots ----------------------------------------------------------

    /// BLAKE3 hash of the current state, latched brake intent and tick.
    pub fn state_hash(&self) -> String {
        latched_state_hash(&self.state, self.latch.brake_engaged(), self.tick_counter)
    }

    /// Capture the current state, latched brake intent and tick.
    pub fn capture_snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture_latched(&self.state, self.latch.brake_engaged(), self.tick_counter)
    }

    /// Replace the state, tick counter and latched brake intent with a
    /// snapshot's.
    ///
    /// The snapshot hash is verified first; on mismatch nothing changes.
    /// A pending exit request is kept.
    pub fn restore_from_snapshot(&mut self, snapshot: &StateSnapshot) -> Result<(), SnapshotError> {
        snapshot.verify()?;

        self.state = snapshot.state.clone();
        self.tick_counter = snapshot.tick;
        self.latch.apply(if snapshot.brake_latched {
            BrakeInput::EngageBrake
        } else {
            BrakeInput::ReleaseBrake
        });

        tracing::debug!(tick = snapshot.tick, "restored snapshot");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FramePacer
// ---------------------------------------------------------------------------

/// Most ticks run for a single frame before the pacer gives up catching up.
pub const MAX_CATCH_UP: u32 = 5;

/// Wall-clock scheduling of fixed ticks.
///
/// Deadlines are spaced exactly one step apart from the start instant, so
/// ticks do not drift with frame jitter. After a stall longer than
/// [`MAX_CATCH_UP`] steps the pacer runs the maximum and resynchronizes to
/// `now` instead of trying to run every missed tick.
#[derive(Debug, Clone)]
pub struct FramePacer {
    step: Duration,
    next_deadline: Instant,
}

impl FramePacer {
    /// A pacer whose first tick is due one step after `start`.
    ///
    /// # Panics
    ///
    /// Panics if `fixed_dt` is not positive and finite, as [`TickLoop::new`]
    /// does.
    pub fn new(fixed_dt: f64, start: Instant) -> Self {
        assert!(
            fixed_dt > 0.0 && fixed_dt.is_finite(),
            "fixed_dt must be positive and finite, got {fixed_dt}"
        );
        let step = Duration::from_secs_f64(fixed_dt).max(Duration::from_nanos(1));
        Self {
            step,
            next_deadline: start + step,
        }
    }

    /// When the next tick is due.
    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    /// The wall-clock length of one tick.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// How many ticks are due at `now`, at most [`MAX_CATCH_UP`].
    ///
    /// Advances the deadline past every tick it reports.
    pub fn on_frame(&mut self, now: Instant) -> u32 {
        if now < self.next_deadline {
            return 0;
        }

        let behind = now - self.next_deadline;
        let due = behind.as_nanos() / self.step.as_nanos() + 1;
        if due > u128::from(MAX_CATCH_UP) {
            tracing::warn!(
                behind_ms = behind.as_millis() as u64,
                "frame loop fell behind, resyncing"
            );
            self.next_deadline = now + self.step;
            return MAX_CATCH_UP;
        }

        // `due` is at most MAX_CATCH_UP here.
        let due = due as u32;
        self.next_deadline += self.step * due;
        due
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
