//! Master cylinder housing and the piston the pedal pushes.

use super::palette;
use crate::render::draw::Canvas;

/// Piston travel at full pedal, in pixels.
pub const PISTON_TRAVEL: f32 = 20.0;

/// Left edge of the piston for a pedal position.
pub fn piston_x(pedal: f32) -> f32 {
    120.0 + pedal * PISTON_TRAVEL
}

pub fn draw(canvas: &mut Canvas, pedal: f32) {
    canvas.rect(120.0, 470.0, 60.0, 30.0, palette::CYLINDER);

    let x = piston_x(pedal);
    canvas.rect(x + 2.0, 478.0, 10.0, 14.0, palette::PISTON_BODY);
    canvas.circle(x + 12.0, 485.0, 5.0, palette::PISTON_TIP, 16);
    canvas.circle(x + 7.0, 485.0, 3.0, palette::PISTON_RING, 12);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piston_follows_the_pedal() {
        assert_eq!(piston_x(0.0), 120.0);
        assert_eq!(piston_x(1.0), 140.0);
    }
}
