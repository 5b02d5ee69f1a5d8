//! 2D primitive rendering for the brake scene.
//!
//! Drawing is split in two halves:
//!
//! - [`draw`], [`text`], and [`tessellate`] record scene primitives and turn
//!   them into colored triangles. They need no GPU and are always compiled.
//! - `renderer` and `app` own the wgpu surface and the winit window. They
//!   are feature-gated behind `renderer`; without the feature those modules
//!   compile to nothing.
//!
//! The renderer is a flat-shaded triangle pipeline with a fixed pixel-space
//! orthographic camera. No textures, no depth buffer: later draws cover
//! earlier ones.

pub mod draw;
pub mod tessellate;
pub mod text;

#[cfg(feature = "renderer")]
pub mod app;
#[cfg(feature = "renderer")]
pub mod renderer;

pub use draw::{Canvas, Color, DrawCall, Primitive};
pub use tessellate::{tessellate, Vertex};
pub use text::TextRenderer;

#[cfg(feature = "renderer")]
pub use app::run_windowed;
#[cfg(feature = "renderer")]
pub use renderer::{Camera2D, SceneRenderer};
