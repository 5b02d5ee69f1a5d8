//! Tests for the wgpu scene renderer's GPU-free parts.
//!
//! These tests cover the camera matrix and the vertex data the renderer
//! uploads for a real frame. No GPU context is required.

#[cfg(feature = "renderer")]
mod tests {
    use hydrabrake_engine::render::{tessellate, Camera2D, TextRenderer, Vertex};
    use hydrabrake_engine::scene::{compose, Pose, CANVAS_HEIGHT, CANVAS_WIDTH};

    fn approx(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-5 && (a[1] - b[1]).abs() < 1e-5
    }

    #[test]
    fn camera_default_is_canvas_sized() {
        let camera = Camera2D::default();
        assert_eq!(camera.width, CANVAS_WIDTH);
        assert_eq!(camera.height, CANVAS_HEIGHT);
    }

    #[test]
    fn camera_flips_y_for_top_left_origin() {
        let camera = Camera2D::default();
        assert!(approx(camera.to_clip([0.0, 0.0]), [-1.0, 1.0]));
        assert!(approx(camera.to_clip([800.0, 0.0]), [1.0, 1.0]));
        assert!(approx(camera.to_clip([0.0, 600.0]), [-1.0, -1.0]));
        assert!(approx(camera.to_clip([800.0, 600.0]), [1.0, -1.0]));
    }

    #[test]
    fn camera_matrix_is_column_major() {
        let m = Camera2D {
            width: 200.0,
            height: 100.0,
        }
        .orthographic_matrix();
        assert_eq!(m.len(), 16);
        // Translation lives in the last column.
        assert_eq!(&m[12..16], &[-1.0, 1.0, 0.0, 1.0]);
        assert_eq!(m[0], 0.01);
        assert_eq!(m[5], -0.02);
    }

    #[test]
    fn uploaded_camera_covers_the_whole_canvas() {
        // The uniform is written once, so the default camera must already be
        // the canvas-sized one every frame is drawn with.
        let camera = Camera2D::default();
        let canvas = Camera2D {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        };
        assert_eq!(camera.orthographic_matrix(), canvas.orthographic_matrix());
        let bytes: &[u8] = bytemuck::cast_slice(&camera.orthographic_matrix());
        assert_eq!(bytes.len(), 64);
    }

    #[test]
    fn frame_vertices_cast_to_bytes() {
        let vertices = tessellate(&compose(&Pose::default()), &TextRenderer::new());
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), vertices.len() * std::mem::size_of::<Vertex>());
    }

    #[test]
    fn every_frame_vertex_is_on_screen_or_near_it() {
        let camera = Camera2D::default();
        let vertices = tessellate(&compose(&Pose::default()), &TextRenderer::new());
        for v in &vertices {
            let [x, y] = camera.to_clip(v.position);
            // Arrow heads and the sun may poke slightly past the edges.
            assert!(x.abs() <= 1.2 && y.abs() <= 1.2, "vertex {v:?} far off screen");
        }
    }
}
