//! Simulation state and the per-tick update rule.
//!
//! [`SimulationState`] is the single mutable entity of the demo. It is
//! advanced once per tick by [`SimulationState::advance`] (or the in-place
//! [`SimulationState::step`]) given one binary input: whether the brake is
//! engaged. Pedal and pad follow an exponential-approach recurrence toward a
//! target of `1.0` (engaged) or `0.0` (released), which is what gives the
//! assembly its eased, inertial look without modeling forces or masses.
//!
//! # Modes
//!
//! There are two continuous modes selected purely by the input flag:
//!
//! | Mode | Disc rotation per tick | Car offset |
//! |------|------------------------|------------|
//! | [`BrakeMode::Braking`] | `spin * (1 - pad * drag)`, floor `0.3` | drifts toward `-stopping_distance` |
//! | [`BrakeMode::FreeRolling`] | constant `3.0` | decays toward `0` |
//!
//! The switch between modes is immediate; only the poses are smoothed.

use serde::{Deserialize, Serialize};

use crate::TuningError;

// ---------------------------------------------------------------------------
// BrakeTuning
// ---------------------------------------------------------------------------

/// Tunable constants of the update rule.
///
/// The values have no physical units; they are chosen for the look of the
/// animation at 60 ticks per second. Pedal and pad gains are kept separate
/// even though they default to the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrakeTuning {
    /// Interpolation gain of the pedal toward its target, in `(0, 1]`.
    pub pedal_gain: f64,
    /// Interpolation gain of the pads toward their target, in `(0, 1]`.
    pub pad_gain: f64,
    /// Disc rotation per tick (degrees) while braking, before clamp drag.
    pub braking_spin_rate: f64,
    /// Fraction of the braking spin rate removed by fully clamped pads.
    pub clamp_drag: f64,
    /// Disc rotation per tick (degrees) while rolling freely.
    pub free_spin_rate: f64,
    /// Leftward drift of the car per tick at the start of braking.
    pub drift_rate: f64,
    /// Distance from rest the car approaches (never reaches) while braking.
    ///
    /// In `f64` the offset stops moving once the per-tick drift rounds away:
    /// with the defaults it settles at about `-9.99999999999998` after some
    /// 660 ticks and holds there, still short of `-stopping_distance`.
    pub stopping_distance: f64,
    /// Gain of the car's return toward its rest position when released.
    pub return_gain: f64,
}

impl Default for BrakeTuning {
    fn default() -> Self {
        Self {
            pedal_gain: 0.2,
            pad_gain: 0.2,
            braking_spin_rate: 1.5,
            clamp_drag: 0.8,
            free_spin_rate: 3.0,
            drift_rate: 0.5,
            stopping_distance: 10.0,
            return_gain: 0.1,
        }
    }
}

impl BrakeTuning {
    /// Check that every constant keeps the update rule bounded.
    ///
    /// # Errors
    ///
    /// Returns the first [`TuningError`] found, checking gains, then rates,
    /// then clamp drag, then stopping distance.
    pub fn validate(&self) -> Result<(), TuningError> {
        for (name, value) in [
            ("pedal_gain", self.pedal_gain),
            ("pad_gain", self.pad_gain),
            ("return_gain", self.return_gain),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(TuningError::GainOutOfRange { name, value });
            }
        }

        for (name, value) in [
            ("braking_spin_rate", self.braking_spin_rate),
            ("free_spin_rate", self.free_spin_rate),
            ("drift_rate", self.drift_rate),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::InvalidRate { name, value });
            }
        }

        if !(0.0..1.0).contains(&self.clamp_drag) {
            return Err(TuningError::ClampDragOutOfRange(self.clamp_drag));
        }

        if !(self.stopping_distance.is_finite() && self.stopping_distance > 0.0) {
            return Err(TuningError::InvalidStoppingDistance(self.stopping_distance));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BrakeMode
// ---------------------------------------------------------------------------

/// Which of the two continuous modes the state machine is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrakeMode {
    /// Brake engaged: pads clamp, disc slows, car drifts left.
    Braking,
    /// Brake released: disc spins at full rate, car returns to rest.
    FreeRolling,
}

// ---------------------------------------------------------------------------
// SimulationState
// ---------------------------------------------------------------------------

/// The evolving state of the brake assembly.
///
/// Every drawn pose is derived from these five fields; nothing else is
/// stored between ticks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// User intent, as of the last advance.
    pub brake_engaged: bool,
    /// `0.0` = released, `1.0` = fully pressed.
    pub pedal_position: f64,
    /// `0.0` = pads retracted, `1.0` = pads fully clamped.
    pub pad_engagement: f64,
    /// Cumulative rotation of both discs in degrees. Unbounded.
    pub disc_rotation: f64,
    /// Horizontal displacement of the car from rest; negative is left.
    pub car_offset: f64,
}

impl SimulationState {
    /// Return the state one tick later. Does not modify `self`.
    ///
    /// This is a total function: with pedal and pad in `[0, 1]` and a tuning
    /// that passes [`BrakeTuning::validate`], the result keeps both in
    /// `[0, 1]`, never decreases the disc rotation, and never moves the car
    /// past `-stopping_distance`.
    #[must_use]
    pub fn advance(&self, brake_engaged: bool, tuning: &BrakeTuning) -> Self {
        let mut next = self.clone();
        next.step(brake_engaged, tuning);
        next
    }

    /// Advance this state by one tick in place.
    pub fn step(&mut self, brake_engaged: bool, tuning: &BrakeTuning) {
        let target = if brake_engaged { 1.0 } else { 0.0 };

        self.brake_engaged = brake_engaged;
        self.pedal_position = approach(self.pedal_position, target, tuning.pedal_gain);
        self.pad_engagement = approach(self.pad_engagement, target, tuning.pad_gain);

        if brake_engaged {
            // Reads the pad value updated above.
            self.disc_rotation +=
                tuning.braking_spin_rate * (1.0 - self.pad_engagement * tuning.clamp_drag);
            self.car_offset -=
                tuning.drift_rate * (1.0 + self.car_offset / tuning.stopping_distance);
        } else {
            self.disc_rotation += tuning.free_spin_rate;
            self.car_offset = approach(self.car_offset, 0.0, tuning.return_gain);
        }
    }

    /// The mode selected by the last input flag.
    pub fn mode(&self) -> BrakeMode {
        if self.brake_engaged {
            BrakeMode::Braking
        } else {
            BrakeMode::FreeRolling
        }
    }
}

/// Exponential-approach recurrence: `x + (target - x) * k`.
fn approach(current: f64, target: f64, gain: f64) -> f64 {
    current + (target - current) * gain
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
