//! Static roadway: asphalt band, edge strips, dashed center line.

use super::palette;
use super::CANVAS_WIDTH;
use crate::render::draw::Canvas;

const ROAD_TOP: f32 = 260.0;
const ROAD_HEIGHT: f32 = 80.0;
const EDGE_HEIGHT: f32 = 8.0;
const DASH_WIDTH: f32 = 40.0;
const DASH_GAP: f32 = 32.0;
const DASH_HEIGHT: f32 = 8.0;

/// Left edges of the center-line dashes, one period apart, across the canvas.
pub fn dash_positions() -> impl Iterator<Item = f32> {
    let period = DASH_WIDTH + DASH_GAP;
    (0..)
        .map(move |i| i as f32 * period)
        .take_while(|&x| x < CANVAS_WIDTH)
}

pub fn draw(canvas: &mut Canvas) {
    canvas.rect(0.0, ROAD_TOP, CANVAS_WIDTH, ROAD_HEIGHT, palette::ROAD);
    canvas.rect(0.0, ROAD_TOP, CANVAS_WIDTH, EDGE_HEIGHT, palette::ROAD_EDGE);
    canvas.rect(
        0.0,
        ROAD_TOP + ROAD_HEIGHT - EDGE_HEIGHT,
        CANVAS_WIDTH,
        EDGE_HEIGHT,
        palette::ROAD_EDGE,
    );

    let center_y = ROAD_TOP + ROAD_HEIGHT / 2.0 - DASH_HEIGHT / 2.0;
    for x in dash_positions() {
        canvas.rect(x, center_y, DASH_WIDTH, DASH_HEIGHT, palette::ROAD_CENTER_LINE);
    }
}
