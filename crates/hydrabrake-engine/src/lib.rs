//! Hydrabrake engine -- scene, rendering, and frame loop for the hydraulic
//! brake demonstration.
//!
//! This crate builds on [`hydrabrake_sim`] to turn the brake state machine
//! into an animated picture: a fixed-timestep tick loop advances the state,
//! the scene module composes a draw list from it, and (behind the
//! `renderer` feature) a wgpu renderer draws that list in a winit window.
//!
//! # Quick Start
//!
//! ```
//! use hydrabrake_engine::prelude::*;
//!
//! let mut tick_loop = TickLoop::new(TickConfig::default());
//! tick_loop.handle_input(BrakeInput::EngageBrake);
//! tick_loop.run_ticks(30);
//!
//! let frame = tick_loop.compose_frame();
//! assert!(!frame.is_empty());
//! ```

#![deny(unsafe_code)]

pub mod render;
pub mod replay;
pub mod scene;
pub mod tick;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

/// Re-export the simulation crate for convenience.
pub use hydrabrake_sim;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common engine usage.
pub mod prelude {
    pub use hydrabrake_sim::prelude::*;

    pub use crate::render::draw::{Canvas, DrawCall, Primitive};
    pub use crate::replay::{
        replay, ReplayDivergence, ReplayEntry, ReplayError, ReplayLog, ReplayRecorder,
        ReplayResult,
    };
    pub use crate::scene::{compose, compose_into, Layer, Pose, DRAW_ORDER};
    pub use crate::tick::{FramePacer, TickConfig, TickDiagnostics, TickLoop, MAX_CATCH_UP};
}
