//! Brake pedal: static base and an arm rotating about its pivot.

use glam::{Affine2, Vec2};

use super::palette;
use crate::render::draw::Canvas;

/// Arm pivot, at the bottom of the arm.
pub const PIVOT: Vec2 = Vec2::new(95.0, 480.0);

/// Arm rotation at full travel, in degrees. Negative tilts the arm forward.
pub const FULL_TRAVEL_DEGREES: f32 = -30.0;

/// Arm transform for a pedal position in `[0, 1]`.
pub fn arm_transform(pedal: f32) -> Affine2 {
    Affine2::from_translation(PIVOT)
        * Affine2::from_angle((pedal * FULL_TRAVEL_DEGREES).to_radians())
}

pub fn draw(canvas: &mut Canvas, pedal: f32) {
    canvas.rect(80.0, 400.0, 30.0, 100.0, palette::CYLINDER);

    let mut arm = canvas.push(arm_transform(pedal));
    arm.rect(-10.0, -60.0, 20.0, 60.0, palette::BRAKE_PEDAL);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_arm_stands_upright() {
        let top = arm_transform(0.0).transform_point2(Vec2::new(0.0, -60.0));
        assert!((top - Vec2::new(95.0, 420.0)).length() < 1e-4);
    }

    #[test]
    fn pressed_arm_tilts_about_the_pivot() {
        let t = arm_transform(1.0);
        assert!((t.transform_point2(Vec2::ZERO) - PIVOT).length() < 1e-4);

        // Counter-clockwise on screen: the top of the arm swings left.
        let top = t.transform_point2(Vec2::new(0.0, -60.0));
        assert!(top.x < PIVOT.x);
        assert!((top.distance(PIVOT) - 60.0).abs() < 1e-3);
    }

    #[test]
    fn arm_scope_does_not_leak() {
        let mut canvas = Canvas::new();
        draw(&mut canvas, 0.5);
        assert_eq!(canvas.depth(), 0);
        assert_eq!(canvas.current_transform(), Affine2::IDENTITY);
        assert_eq!(canvas.len(), 2);
    }
}
