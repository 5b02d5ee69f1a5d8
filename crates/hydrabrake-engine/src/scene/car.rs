//! The car, translated horizontally by the simulated car offset.

use std::f32::consts::PI;

use glam::{Affine2, Vec2};

use super::palette;
use crate::render::draw::Canvas;

/// Boundary samples on the hull's arched top.
pub const DEFAULT_HULL_SAMPLES: usize = 16;

const HULL_CENTER: Vec2 = Vec2::new(220.0, 205.0);
const HULL_RADII: Vec2 = Vec2::new(100.0, 45.0);
const HULL_BASE_Y: f32 = 210.0;

const WHEEL_CENTERS: [f32; 2] = [150.0, 270.0];

// ---------------------------------------------------------------------------
// HullOutline
// ---------------------------------------------------------------------------

/// Vertices of the car body polygon.
///
/// Sweeps the angle over `π..=2π` (the upper half of an ellipse in a Y-down
/// canvas, left to right), then closes along the two base corners. The
/// outline is convex. A clone resumes from the same position; a fresh
/// outline starts over.
#[derive(Debug, Clone)]
pub struct HullOutline {
    samples: usize,
    next: usize,
}

impl HullOutline {
    /// An outline with `samples` arc points, at least two.
    pub fn new(samples: usize) -> Self {
        Self {
            samples: samples.max(2),
            next: 0,
        }
    }

    /// Total vertex count: the arc samples plus two base corners.
    pub fn vertex_count(&self) -> usize {
        self.samples + 2
    }
}

impl Default for HullOutline {
    fn default() -> Self {
        Self::new(DEFAULT_HULL_SAMPLES)
    }
}

impl Iterator for HullOutline {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        let i = self.next;
        let point = if i < self.samples {
            let angle = PI + PI * i as f32 / (self.samples - 1) as f32;
            HULL_CENTER + HULL_RADII * Vec2::new(angle.cos(), angle.sin())
        } else if i == self.samples {
            Vec2::new(HULL_CENTER.x + HULL_RADII.x, HULL_BASE_Y)
        } else if i == self.samples + 1 {
            Vec2::new(HULL_CENTER.x - HULL_RADII.x, HULL_BASE_Y)
        } else {
            return None;
        };
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.vertex_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HullOutline {}

/// Points of the smile on the front of the car.
fn face_arc() -> impl Iterator<Item = Vec2> {
    (0..13).map(|t| {
        let angle = PI * 0.15 + t as f32 * PI * 0.7 / 12.0;
        Vec2::new(200.0 + 18.0 * angle.cos(), 210.0 + 7.0 * angle.sin())
    })
}

pub fn draw(canvas: &mut Canvas, car_offset: f32) {
    let mut car = canvas.push(Affine2::from_translation(Vec2::new(car_offset, 0.0)));

    car.ellipse(210.0, 220.0, 70.0, 12.0, palette::CAR_SHADOW, 32);
    car.polygon(HullOutline::default(), palette::CAR_BODY);
    car.rect(120.0, 200.0, 200.0, 20.0, palette::CAR_ACCENT);

    car.ellipse(220.0, 150.0, 70.0, 28.0, palette::CAR_WINDOW, 32);
    car.ellipse(170.0, 155.0, 28.0, 18.0, palette::CAR_WINDOW, 24);
    car.ellipse(270.0, 155.0, 28.0, 18.0, palette::CAR_WINDOW, 24);

    car.rect(110.0, 200.0, 20.0, 12.0, palette::CAR_BUMPER);
    car.rect(290.0, 200.0, 20.0, 12.0, palette::CAR_BUMPER);
    car.circle(110.0, 206.0, 5.0, palette::CAR_HEADLIGHT, 16);
    car.circle(310.0, 206.0, 5.0, palette::CAR_HEADLIGHT, 16);

    for x in WHEEL_CENTERS {
        car.circle(x, 220.0, 18.0, palette::TIRE, 32);
        car.circle(x, 220.0, 9.0, palette::HUBCAP, 24);
    }

    car.polyline(face_arc(), 2.0, palette::FACE);
}
