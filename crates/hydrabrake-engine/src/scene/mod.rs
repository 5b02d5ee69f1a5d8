//! Scene assembly: state in, draw list out.
//!
//! Every frame is a pure function of a [`Pose`]. Each [`Layer`] is one
//! drawing procedure over a [`Canvas`]; [`compose`] runs them in
//! [`DRAW_ORDER`], back to front. No procedure keeps state between frames,
//! so two calls with the same pose produce identical draw lists.
//!
//! ```
//! use hydrabrake_engine::scene::{compose, Pose};
//! use hydrabrake_sim::prelude::SimulationState;
//!
//! let pose = Pose::from(&SimulationState::default());
//! assert_eq!(compose(&pose), compose(&pose));
//! ```

pub mod background;
pub mod brake;
pub mod car;
pub mod hydraulics;
pub mod master_cylinder;
pub mod overlay;
pub mod palette;
pub mod pedal;
pub mod road;

use hydrabrake_sim::prelude::SimulationState;

use crate::render::draw::{Canvas, DrawCall};
use brake::BrakeSide;

/// Logical canvas width in pixels.
pub const CANVAS_WIDTH: f32 = 800.0;

/// Logical canvas height in pixels.
pub const CANVAS_HEIGHT: f32 = 600.0;

/// Render-facing projection of [`SimulationState`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Pedal travel in `[0, 1]`.
    pub pedal: f32,
    /// Pad engagement in `[0, 1]`.
    pub pad: f32,
    /// Disc rotation in degrees.
    pub disc_rotation: f32,
    /// Horizontal car displacement in pixels.
    pub car_offset: f32,
}

impl From<&SimulationState> for Pose {
    fn from(state: &SimulationState) -> Self {
        Self {
            pedal: state.pedal_position as f32,
            pad: state.pad_engagement as f32,
            // Keep f32 precision once the accumulated angle grows large.
            disc_rotation: state.disc_rotation.rem_euclid(360.0) as f32,
            car_offset: state.car_offset as f32,
        }
    }
}

/// One drawing procedure in the fixed back-to-front order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Background,
    Roadway,
    CarBody,
    Pedal,
    MasterCylinder,
    HydraulicLines,
    LeftBrake,
    RightBrake,
    Overlay,
}

/// Back to front. The overlay is last so text is never covered.
pub const DRAW_ORDER: [Layer; 9] = [
    Layer::Background,
    Layer::Roadway,
    Layer::CarBody,
    Layer::Pedal,
    Layer::MasterCylinder,
    Layer::HydraulicLines,
    Layer::LeftBrake,
    Layer::RightBrake,
    Layer::Overlay,
];

impl Layer {
    /// Record this layer's primitives.
    pub fn draw(self, canvas: &mut Canvas, pose: &Pose) {
        match self {
            Layer::Background => background::draw(canvas),
            Layer::Roadway => road::draw(canvas),
            Layer::CarBody => car::draw(canvas, pose.car_offset),
            Layer::Pedal => pedal::draw(canvas, pose.pedal),
            Layer::MasterCylinder => master_cylinder::draw(canvas, pose.pedal),
            Layer::HydraulicLines => hydraulics::draw(canvas, pose.pedal),
            Layer::LeftBrake => {
                brake::draw_assembly(canvas, BrakeSide::Left, pose.pad, pose.disc_rotation)
            }
            Layer::RightBrake => {
                brake::draw_assembly(canvas, BrakeSide::Right, pose.pad, pose.disc_rotation)
            }
            Layer::Overlay => overlay::draw(canvas, pose.car_offset),
        }
    }
}

/// Record every layer, in [`DRAW_ORDER`], onto `canvas`.
pub fn compose_into(canvas: &mut Canvas, pose: &Pose) {
    for layer in DRAW_ORDER {
        layer.draw(canvas, pose);
        debug_assert_eq!(canvas.depth(), 0, "{layer:?} left a transform scope open");
    }
}

/// The full frame for `pose`.
pub fn compose(pose: &Pose) -> Vec<DrawCall> {
    let mut canvas = Canvas::new();
    compose_into(&mut canvas, pose);
    canvas.into_calls()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_wraps_disc_rotation() {
        let state = SimulationState {
            disc_rotation: 725.0,
            ..Default::default()
        };
        assert_eq!(Pose::from(&state).disc_rotation, 5.0);
    }

    #[test]
    fn draw_order_lists_each_layer_once() {
        for (i, a) in DRAW_ORDER.iter().enumerate() {
            assert!(!DRAW_ORDER[i + 1..].contains(a), "{a:?} repeated");
        }
        assert_eq!(DRAW_ORDER.first(), Some(&Layer::Background));
        assert_eq!(DRAW_ORDER.last(), Some(&Layer::Overlay));
    }

    #[test]
    fn every_layer_draws_something_and_closes_its_scopes() {
        let pose = Pose {
            pedal: 0.6,
            pad: 0.6,
            disc_rotation: 45.0,
            car_offset: -3.0,
        };
        for layer in DRAW_ORDER {
            let mut canvas = Canvas::new();
            layer.draw(&mut canvas, &pose);
            assert!(!canvas.is_empty(), "{layer:?} drew nothing");
            assert_eq!(canvas.depth(), 0, "{layer:?} leaked a scope");
        }
    }

    #[test]
    fn compose_matches_layer_by_layer() {
        let pose = Pose::default();
        let mut expected = Canvas::new();
        for layer in DRAW_ORDER {
            layer.draw(&mut expected, &pose);
        }
        assert_eq!(compose(&pose), expected.into_calls());
    }
}
