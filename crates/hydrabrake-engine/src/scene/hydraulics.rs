//! Brake lines from the master cylinder to both slave cylinders, with
//! pressure arrows showing the direction of force transmission.

use glam::Vec2;

use super::master_cylinder::PISTON_TRAVEL;
use super::palette;
use crate::render::draw::Canvas;

const PIPE_WIDTH: f32 = 8.0;
const ARROW_WIDTH: f32 = 4.0;

const JUNCTION: Vec2 = Vec2::new(250.0, 300.0);
const LEFT_OUTLET: Vec2 = Vec2::new(180.0, 200.0);
const RIGHT_OUTLET: Vec2 = Vec2::new(320.0, 200.0);

pub fn draw(canvas: &mut Canvas, pedal: f32) {
    let push = pedal * PISTON_TRAVEL;

    canvas.polyline(
        [
            Vec2::new(180.0 + push, 485.0),
            Vec2::new(250.0, 485.0),
            JUNCTION,
        ],
        PIPE_WIDTH,
        palette::HYDRAULIC_PIPE,
    );
    for outlet in [LEFT_OUTLET, RIGHT_OUTLET] {
        canvas.polyline([JUNCTION, outlet], PIPE_WIDTH, palette::HYDRAULIC_PIPE);
    }

    let fork = Vec2::new(250.0, 310.0);
    canvas.arrow(
        Vec2::new(200.0 + push, 485.0),
        Vec2::new(245.0, 485.0),
        ARROW_WIDTH,
        palette::PRESSURE_ARROW,
    );
    canvas.arrow(fork, Vec2::new(185.0, 210.0), ARROW_WIDTH, palette::PRESSURE_ARROW);
    canvas.arrow(fork, Vec2::new(315.0, 210.0), ARROW_WIDTH, palette::PRESSURE_ARROW);
}
