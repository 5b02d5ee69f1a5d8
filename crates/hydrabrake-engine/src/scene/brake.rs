//! Wheel brake assemblies: slave cylinder, brake pad, rotating disc.
//!
//! Both wheels share one procedure parameterized by [`BrakeSide`]. The slave
//! piston retracts leftward on both sides; only the pad placement is
//! mirrored, so each pad closes on its disc from the outside.

use std::f32::consts::TAU;

use glam::{Affine2, Vec2};

use super::palette;
use crate::render::draw::Canvas;

/// Slave piston travel at full pad engagement, in pixels.
pub const PISTON_TRAVEL: f32 = 15.0;

/// Pad travel at full pad engagement, in pixels.
pub const PAD_TRAVEL: f32 = 18.0;

const SLAVE_SIZE: Vec2 = Vec2::new(40.0, 30.0);
const PAD_SIZE: Vec2 = Vec2::new(18.0, 40.0);

const DISC_RADIUS: f32 = 30.0;
const HOLE_COUNT: usize = 6;
const HOLE_DISTANCE: f32 = 18.0;
const HOLE_RADIUS: f32 = 4.0;
const HOLE_SIDES: usize = 8;

/// Which wheel an assembly belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrakeSide {
    Left,
    Right,
}

impl BrakeSide {
    /// Top-left corner of the slave cylinder body.
    pub const fn slave_origin(self) -> Vec2 {
        match self {
            BrakeSide::Left => Vec2::new(120.0, 180.0),
            BrakeSide::Right => Vec2::new(260.0, 180.0),
        }
    }

    /// Center of the disc.
    pub fn disc_center(self) -> Vec2 {
        self.slave_origin() + Vec2::new(40.0, 30.0)
    }

    /// Left edge of the pad at a pad engagement.
    pub fn pad_x(self, pad: f32) -> f32 {
        let slave = self.slave_origin();
        match self {
            BrakeSide::Left => slave.x - PAD_SIZE.x - pad * PAD_TRAVEL,
            BrakeSide::Right => slave.x + SLAVE_SIZE.x + pad * PAD_TRAVEL,
        }
    }
}

fn draw_slave_cylinder(canvas: &mut Canvas, origin: Vec2, pad: f32) {
    canvas.rect(origin.x, origin.y, SLAVE_SIZE.x, SLAVE_SIZE.y, palette::CYLINDER);

    let x = origin.x - 7.0 - pad * PISTON_TRAVEL;
    let mid = origin.y + 15.0;
    canvas.rect(x, origin.y + 8.0, 7.0, 14.0, palette::PISTON_BODY);
    canvas.circle(x + 7.0, mid, 3.5, palette::PISTON_TIP, 12);
    canvas.circle(x + 3.5, mid, 2.0, palette::PISTON_RING, 8);
}

/// Hole outline around the hole center at index `index`.
fn hole(index: usize) -> impl Iterator<Item = Vec2> {
    let center = Vec2::from_angle(TAU * index as f32 / HOLE_COUNT as f32) * HOLE_DISTANCE;
    (0..HOLE_SIDES)
        .map(move |i| center + Vec2::from_angle(TAU * i as f32 / HOLE_SIDES as f32) * HOLE_RADIUS)
}

fn draw_disc(canvas: &mut Canvas, center: Vec2, rotation_degrees: f32) {
    let mut disc = canvas.push(
        Affine2::from_translation(center) * Affine2::from_angle(rotation_degrees.to_radians()),
    );
    disc.circle(0.0, 0.0, DISC_RADIUS, palette::BRAKE_DISC, 32);
    for index in 0..HOLE_COUNT {
        disc.polygon(hole(index), palette::DISC_HOLE);
    }
}

/// One wheel's brake: slave cylinder, pad, then disc on top.
pub fn draw_assembly(canvas: &mut Canvas, side: BrakeSide, pad: f32, disc_rotation: f32) {
    let slave = side.slave_origin();
    draw_slave_cylinder(canvas, slave, pad);
    canvas.rect(
        side.pad_x(pad),
        slave.y + 10.0,
        PAD_SIZE.x,
        PAD_SIZE.y,
        palette::BRAKE_PAD,
    );
    draw_disc(canvas, side.disc_center(), disc_rotation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::draw::Primitive;

    #[test]
    fn pads_move_outward_on_opposite_sides() {
        assert_eq!(BrakeSide::Left.pad_x(0.0), 102.0);
        assert_eq!(BrakeSide::Left.pad_x(1.0), 84.0);
        assert_eq!(BrakeSide::Right.pad_x(0.0), 300.0);
        assert_eq!(BrakeSide::Right.pad_x(1.0), 318.0);
    }

    #[test]
    fn discs_sit_beside_their_slaves() {
        assert_eq!(BrakeSide::Left.disc_center(), Vec2::new(160.0, 210.0));
        assert_eq!(BrakeSide::Right.disc_center(), Vec2::new(300.0, 210.0));
    }

    #[test]
    fn disc_rotates_about_its_center() {
        let mut canvas = Canvas::new();
        draw_assembly(&mut canvas, BrakeSide::Left, 0.0, 90.0);
        assert_eq!(canvas.depth(), 0);

        let disc = canvas
            .calls()
            .iter()
            .find(|c| matches!(c.primitive, Primitive::Ellipse { radii, .. } if radii.x == DISC_RADIUS))
            .expect("disc is drawn");
        let center = disc.to_canvas(Vec2::ZERO);
        assert!((center - Vec2::new(160.0, 210.0)).length() < 1e-4);

        // A quarter turn carries the +X hole onto +Y.
        let moved = disc.to_canvas(Vec2::new(HOLE_DISTANCE, 0.0));
        assert!((moved - Vec2::new(160.0, 210.0 + HOLE_DISTANCE)).length() < 1e-3);
    }

    #[test]
    fn six_octagonal_holes() {
        let mut canvas = Canvas::new();
        draw_assembly(&mut canvas, BrakeSide::Right, 0.5, 0.0);
        let holes: Vec<usize> = canvas
            .calls()
            .iter()
            .filter_map(|c| match &c.primitive {
                Primitive::Polygon { points, .. } => Some(points.len()),
                _ => None,
            })
            .collect();
        assert_eq!(holes, vec![HOLE_SIDES; HOLE_COUNT]);
    }

    #[test]
    fn slave_piston_retracts_with_pad_engagement() {
        let piston_x = |pad: f32| {
            let mut canvas = Canvas::new();
            draw_assembly(&mut canvas, BrakeSide::Right, pad, 0.0);
            match canvas.calls()[1].primitive {
                Primitive::Rect { origin, .. } => origin.x,
                ref other => panic!("expected piston rect, got {other:?}"),
            }
        };
        assert_eq!(piston_x(0.0), 253.0);
        assert_eq!(piston_x(1.0), 238.0);
    }
}
