//! Draw list recording with an explicit transform stack.
//!
//! Scene procedures never talk to the GPU. They record [`DrawCall`]s into a
//! [`Canvas`]: one [`Primitive`] in local coordinates plus the affine
//! transform that was current when it was recorded. The host (the wgpu
//! scene renderer, or a test) interprets the list afterwards.
//!
//! # Coordinates
//!
//! Pixel space, origin at the top-left corner, Y increasing downward, the
//! same as window pixel coordinates.
//!
//! # Transform scopes
//!
//! [`Canvas::push`] composes a local transform onto the current one and
//! returns a [`TransformScope`] guard. The guard derefs to the canvas, so
//! nested drawing goes through it, and it restores the previous transform
//! when dropped. A rotation applied to the pedal arm therefore cannot leak
//! into the master cylinder drawn after it, whichever way the pedal
//! procedure returns.
//!
//! ```
//! use glam::{Affine2, Vec2};
//! use hydrabrake_engine::render::draw::Canvas;
//!
//! let mut canvas = Canvas::new();
//! {
//!     let mut arm = canvas.push(Affine2::from_translation(Vec2::new(95.0, 480.0)));
//!     arm.rect(-10.0, -60.0, 20.0, 60.0, [0.7, 0.1, 0.1, 1.0]);
//!     assert_eq!(arm.depth(), 1);
//! }
//! assert_eq!(canvas.depth(), 0);
//! assert_eq!(canvas.len(), 1);
//! ```

use std::ops::{Deref, DerefMut};

use glam::{Affine2, Vec2};

/// RGBA color, each channel `0.0..=1.0`.
pub type Color = [f32; 4];

/// Opaque color from RGB channels.
pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
    [r, g, b, 1.0]
}

/// Length of each chevron stroke at an arrow's tip.
pub const ARROW_HEAD_LENGTH: f32 = 12.0;

/// Angle (radians) between an arrow's shaft and each chevron stroke.
pub const ARROW_HEAD_SPREAD: f32 = 0.4;

// ---------------------------------------------------------------------------
// Primitive
// ---------------------------------------------------------------------------

/// How a rectangle is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    /// One color everywhere.
    Solid(Color),
    /// Linear interpolation from the top edge color to the bottom edge color.
    VerticalGradient {
        /// Color along the top edge.
        top: Color,
        /// Color along the bottom edge.
        bottom: Color,
    },
}

/// A shape in local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Filled axis-aligned rectangle.
    Rect {
        /// Top-left corner.
        origin: Vec2,
        /// Width and height.
        size: Vec2,
        /// Fill style.
        fill: Fill,
    },
    /// Filled ellipse approximated by a fan of `segments` boundary samples.
    Ellipse {
        /// Center point.
        center: Vec2,
        /// Horizontal and vertical radii.
        radii: Vec2,
        /// Number of boundary samples.
        segments: u32,
        /// Fill color.
        color: Color,
    },
    /// Filled convex polygon from an ordered vertex list.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Vec2>,
        /// Fill color.
        color: Color,
    },
    /// Stroked open path.
    Polyline {
        /// Path vertices in order.
        points: Vec<Vec2>,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Color,
    },
    /// Straight shaft with a two-stroke chevron at `end`.
    Arrow {
        /// Tail of the shaft.
        start: Vec2,
        /// Tip of the shaft, where the chevron sits.
        end: Vec2,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Color,
    },
    /// Bitmap text, top-left anchored.
    Text {
        /// Top-left corner of the first glyph.
        origin: Vec2,
        /// The string to draw.
        text: String,
        /// Size of one glyph pixel.
        scale: f32,
        /// Text color.
        color: Color,
    },
}

/// One recorded primitive and the transform it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Local-to-canvas transform current at record time.
    pub transform: Affine2,
    /// The shape, in local coordinates.
    pub primitive: Primitive,
}

impl DrawCall {
    /// Map a local point of this call to canvas coordinates.
    pub fn to_canvas(&self, local: Vec2) -> Vec2 {
        self.transform.transform_point2(local)
    }
}

/// The two chevron stroke endpoints of an arrow whose tip is at `end`.
///
/// The strokes point back along the shaft, each rotated by
/// [`ARROW_HEAD_SPREAD`] to either side.
pub fn arrow_head(start: Vec2, end: Vec2) -> [Vec2; 2] {
    let direction = end - start;
    let angle = direction.y.atan2(direction.x);
    [-ARROW_HEAD_SPREAD, ARROW_HEAD_SPREAD].map(|spread| {
        let a = angle + spread;
        end - ARROW_HEAD_LENGTH * Vec2::new(a.cos(), a.sin())
    })
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Ordered draw list plus the transform stack used while recording it.
#[derive(Debug, Clone)]
pub struct Canvas {
    calls: Vec<DrawCall>,
    current: Affine2,
    saved: Vec<Affine2>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// An empty canvas at the identity transform.
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            current: Affine2::IDENTITY,
            saved: Vec::new(),
        }
    }

    /// Enter a nested transform scope.
    ///
    /// Subsequent draws through the returned guard use
    /// `current * transform`. The previous transform is restored when the
    /// guard is dropped.
    pub fn push(&mut self, transform: Affine2) -> TransformScope<'_> {
        self.saved.push(self.current);
        self.current = self.current * transform;
        TransformScope { canvas: self }
    }

    /// Number of open transform scopes.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// The transform new draw calls are recorded with.
    pub fn current_transform(&self) -> Affine2 {
        self.current
    }

    /// Recorded calls, in draw order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Consume the canvas and return its draw list.
    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    fn record(&mut self, primitive: Primitive) {
        self.calls.push(DrawCall {
            transform: self.current,
            primitive,
        });
    }

    // -- shapes -------------------------------------------------------------

    /// Filled rectangle with its top-left corner at `(x, y)`.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.record(Primitive::Rect {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
            fill: Fill::Solid(color),
        });
    }

    /// Rectangle shaded from `top` to `bottom`.
    pub fn gradient_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        top: Color,
        bottom: Color,
    ) {
        self.record(Primitive::Rect {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
            fill: Fill::VerticalGradient { top, bottom },
        });
    }

    /// Filled circle.
    pub fn circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color, segments: u32) {
        self.ellipse(cx, cy, radius, radius, color, segments);
    }

    /// Filled ellipse.
    pub fn ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        radius_x: f32,
        radius_y: f32,
        color: Color,
        segments: u32,
    ) {
        self.record(Primitive::Ellipse {
            center: Vec2::new(cx, cy),
            radii: Vec2::new(radius_x, radius_y),
            segments,
            color,
        });
    }

    /// Filled polygon through `points`, in order.
    pub fn polygon(&mut self, points: impl IntoIterator<Item = Vec2>, color: Color) {
        self.record(Primitive::Polygon {
            points: points.into_iter().collect(),
            color,
        });
    }

    /// Stroked open path through `points`.
    pub fn polyline(&mut self, points: impl IntoIterator<Item = Vec2>, width: f32, color: Color) {
        self.record(Primitive::Polyline {
            points: points.into_iter().collect(),
            width,
            color,
        });
    }

    /// Arrow from `start` to `end` with a chevron at `end`.
    pub fn arrow(&mut self, start: Vec2, end: Vec2, width: f32, color: Color) {
        self.record(Primitive::Arrow {
            start,
            end,
            width,
            color,
        });
    }

    /// Bitmap text with its top-left corner at `(x, y)`.
    pub fn text(&mut self, x: f32, y: f32, text: &str, scale: f32, color: Color) {
        self.record(Primitive::Text {
            origin: Vec2::new(x, y),
            text: text.to_owned(),
            scale,
            color,
        });
    }
}

// ---------------------------------------------------------------------------
// TransformScope
// ---------------------------------------------------------------------------

/// Guard for a nested transform; restores the parent transform on drop.
#[derive(Debug)]
pub struct TransformScope<'a> {
    canvas: &'a mut Canvas,
}

impl Deref for TransformScope<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.canvas.saved.pop() {
            self.canvas.current = previous;
        }
    }
}
