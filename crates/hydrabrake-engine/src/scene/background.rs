//! Static backdrop: sky, sun, clouds, grass.

use super::palette;
use super::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::render::draw::Canvas;

/// Each cloud is a fixed cluster of overlapping ellipses `(cx, cy, rx, ry)`.
const CLOUDS: [[(f32, f32, f32, f32); 3]; 2] = [
    [(180.0, 90.0, 40.0, 18.0), (220.0, 110.0, 30.0, 14.0), (160.0, 110.0, 22.0, 10.0)],
    [(500.0, 60.0, 32.0, 14.0), (530.0, 75.0, 22.0, 10.0), (480.0, 80.0, 18.0, 8.0)],
];

const GRASS_TOP: f32 = 320.0;

pub fn draw(canvas: &mut Canvas) {
    canvas.gradient_rect(
        0.0,
        0.0,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        palette::SKY_TOP,
        palette::SKY_BOTTOM,
    );
    canvas.circle(700.0, 80.0, 50.0, palette::SUN, 40);

    for (cx, cy, rx, ry) in CLOUDS.iter().flatten().copied() {
        canvas.ellipse(cx, cy, rx, ry, palette::CLOUD, 24);
    }

    canvas.rect(
        0.0,
        GRASS_TOP,
        CANVAS_WIDTH,
        CANVAS_HEIGHT - GRASS_TOP,
        palette::GRASS,
    );
}
