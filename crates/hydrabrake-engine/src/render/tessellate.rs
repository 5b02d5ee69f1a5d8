//! Draw list to triangle list conversion.
//!
//! [`tessellate`] turns recorded [`DrawCall`]s into a flat list of colored
//! [`Vertex`] triangles in canvas coordinates, ready to upload to a vertex
//! buffer. It needs no GPU, so triangle counts and vertex placement are
//! checked in ordinary unit tests.
//!
//! | Primitive | Triangles |
//! |-----------|-----------|
//! | `Rect` | 2 |
//! | `Ellipse` | `segments` (fan around the center, at least 3) |
//! | `Polygon` | `points - 2` (fan from the first vertex) |
//! | `Polyline` | 2 per non-degenerate segment |
//! | `Arrow` | 2 per stroke: shaft plus two chevron strokes |
//! | `Text` | 2 per lit glyph pixel |

use std::f32::consts::TAU;

use glam::{Affine2, Vec2};

use super::draw::{arrow_head, Color, DrawCall, Fill, Primitive};
use super::text::TextRenderer;

/// A single vertex with 2D position and RGBA color, sent to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "renderer",
    derive(bytemuck_derive::Pod, bytemuck_derive::Zeroable)
)]
pub struct Vertex {
    /// Canvas-space position.
    pub position: [f32; 2],
    /// RGBA color.
    pub color: [f32; 4],
}

/// Fewest boundary samples an ellipse is drawn with.
const MIN_ELLIPSE_SEGMENTS: u32 = 3;

/// Convert a draw list into triangles, preserving draw order.
pub fn tessellate(calls: &[DrawCall], text: &TextRenderer) -> Vec<Vertex> {
    let mut out = TriangleWriter::default();
    for call in calls {
        out.transform = call.transform;
        match &call.primitive {
            Primitive::Rect { origin, size, fill } => {
                let (top, bottom) = match *fill {
                    Fill::Solid(color) => (color, color),
                    Fill::VerticalGradient { top, bottom } => (top, bottom),
                };
                out.rect(*origin, *size, top, bottom);
            }
            Primitive::Ellipse {
                center,
                radii,
                segments,
                color,
            } => {
                let segments = (*segments).max(MIN_ELLIPSE_SEGMENTS);
                let boundary = |i: u32| {
                    let angle = TAU * i as f32 / segments as f32;
                    *center + *radii * Vec2::new(angle.cos(), angle.sin())
                };
                for i in 0..segments {
                    out.triangle([*center, boundary(i), boundary(i + 1)], *color);
                }
            }
            Primitive::Polygon { points, color } => {
                if let Some((&first, rest)) = points.split_first() {
                    for pair in rest.windows(2) {
                        out.triangle([first, pair[0], pair[1]], *color);
                    }
                }
            }
            Primitive::Polyline {
                points,
                width,
                color,
            } => {
                for pair in points.windows(2) {
                    out.stroke(pair[0], pair[1], *width, *color);
                }
            }
            Primitive::Arrow {
                start,
                end,
                width,
                color,
            } => {
                out.stroke(*start, *end, *width, *color);
                for tip in arrow_head(*start, *end) {
                    out.stroke(*end, tip, *width, *color);
                }
            }
            Primitive::Text {
                origin,
                text: string,
                scale,
                color,
            } => {
                for pixel in text.glyph_pixels(string, *origin, *scale) {
                    out.rect(pixel, Vec2::splat(*scale), *color, *color);
                }
            }
        }
    }
    out.vertices
}

/// Accumulates triangles, mapping each local point through `transform`.
#[derive(Default)]
struct TriangleWriter {
    transform: Affine2,
    vertices: Vec<Vertex>,
}

impl TriangleWriter {
    fn push(&mut self, local: Vec2, color: Color) {
        self.vertices.push(Vertex {
            position: self.transform.transform_point2(local).to_array(),
            color,
        });
    }

    fn triangle(&mut self, points: [Vec2; 3], color: Color) {
        for p in points {
            self.push(p, color);
        }
    }

    fn rect(&mut self, origin: Vec2, size: Vec2, top: Color, bottom: Color) {
        let top_left = origin;
        let top_right = origin + Vec2::new(size.x, 0.0);
        let bottom_right = origin + size;
        let bottom_left = origin + Vec2::new(0.0, size.y);

        self.push(top_left, top);
        self.push(top_right, top);
        self.push(bottom_right, bottom);

        self.push(top_left, top);
        self.push(bottom_right, bottom);
        self.push(bottom_left, bottom);
    }

    /// A quad of thickness `width` centered on the segment `a -> b`.
    fn stroke(&mut self, a: Vec2, b: Vec2, width: f32, color: Color) {
        let Some(direction) = (b - a).try_normalize() else {
            return;
        };
        let offset = direction.perp() * (width * 0.5);
        self.triangle([a - offset, b - offset, b + offset], color);
        self.triangle([a - offset, b + offset, a + offset], color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::draw::{rgb, Canvas};

    const BLUE: Color = rgb(0.0, 0.0, 1.0);

    fn single(canvas: Canvas) -> Vec<Vertex> {
        tessellate(&canvas.into_calls(), &TextRenderer::new())
    }

    #[test]
    fn rect_is_two_triangles() {
        let mut canvas = Canvas::new();
        canvas.rect(10.0, 20.0, 30.0, 40.0, BLUE);
        let vertices = single(canvas);

        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0].position, [10.0, 20.0]);
        assert_eq!(vertices[2].position, [40.0, 60.0]);
    }

    #[test]
    fn gradient_colors_top_and_bottom_edges() {
        let top = rgb(1.0, 0.0, 0.0);
        let bottom = rgb(0.0, 1.0, 0.0);
        let mut canvas = Canvas::new();
        canvas.gradient_rect(0.0, 0.0, 800.0, 600.0, top, bottom);

        for v in single(canvas) {
            let expected = if v.position[1] == 0.0 { top } else { bottom };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn ellipse_is_a_fan_of_segments() {
        let mut canvas = Canvas::new();
        canvas.ellipse(0.0, 0.0, 10.0, 5.0, BLUE, 24);
        let vertices = single(canvas);

        assert_eq!(vertices.len(), 24 * 3);
        // Every third vertex is the fan center.
        assert!(vertices.iter().step_by(3).all(|v| v.position == [0.0, 0.0]));
    }

    #[test]
    fn degenerate_segment_count_is_clamped() {
        let mut canvas = Canvas::new();
        canvas.circle(0.0, 0.0, 1.0, BLUE, 0);
        assert_eq!(single(canvas).len(), 9);
    }

    #[test]
    fn polygon_fan_count() {
        let mut canvas = Canvas::new();
        canvas.polygon(
            (0..8).map(|i| Vec2::from_angle(i as f32 * TAU / 8.0) * 4.0),
            BLUE,
        );
        assert_eq!(single(canvas).len(), 6 * 3);
    }

    #[test]
    fn polygon_with_two_points_draws_nothing() {
        let mut canvas = Canvas::new();
        canvas.polygon([Vec2::ZERO, Vec2::ONE], BLUE);
        assert!(single(canvas).is_empty());
    }

    #[test]
    fn polyline_skips_zero_length_segments() {
        let mut canvas = Canvas::new();
        canvas.polyline(
            [Vec2::ZERO, Vec2::ZERO, Vec2::new(10.0, 0.0)],
            4.0,
            BLUE,
        );
        assert_eq!(single(canvas).len(), 6);
    }

    #[test]
    fn stroke_has_requested_width() {
        let mut canvas = Canvas::new();
        canvas.polyline([Vec2::ZERO, Vec2::new(10.0, 0.0)], 8.0, BLUE);
        let ys: Vec<f32> = single(canvas).iter().map(|v| v.position[1]).collect();
        let min = ys.iter().copied().fold(f32::INFINITY, f32::min);
        let max = ys.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!((max - min - 8.0).abs() < 1e-5);
    }

    #[test]
    fn arrow_is_three_strokes() {
        let mut canvas = Canvas::new();
        canvas.arrow(Vec2::ZERO, Vec2::new(50.0, 0.0), 4.0, BLUE);
        assert_eq!(single(canvas).len(), 3 * 6);
    }

    #[test]
    fn transform_is_applied_to_vertices() {
        let mut canvas = Canvas::new();
        {
            let mut scope = canvas.push(Affine2::from_translation(Vec2::new(5.0, 7.0)));
            scope.rect(0.0, 0.0, 1.0, 1.0, BLUE);
        }
        assert_eq!(single(canvas)[0].position, [5.0, 7.0]);
    }

    #[test]
    fn text_is_two_triangles_per_lit_pixel() {
        let text = TextRenderer::new();
        let lit = text.glyph_pixels("Car", Vec2::ZERO, 2.0).len();

        let mut canvas = Canvas::new();
        canvas.text(0.0, 0.0, "Car", 2.0, BLUE);
        assert_eq!(single(canvas).len(), lit * 6);
    }
}
