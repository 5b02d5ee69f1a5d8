//! Windowed application runner.
//!
//! Provides [`run_windowed`], which takes ownership of a [`TickLoop`] and
//! drives it inside a winit event loop. Ticks are scheduled by a
//! [`FramePacer`] at the loop's fixed rate; each `RedrawRequested` event
//! composes the current pose and renders it.
//!
//! This module is feature-gated behind `renderer`.

use std::sync::Arc;
use std::time::Instant;

use hydrabrake_sim::prelude::BrakeInput;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{WindowAttributes, WindowId};

use super::renderer::SceneRenderer;
use crate::tick::{FramePacer, TickLoop};

/// Map a physical key to its brake input, if it has one.
pub fn key_to_input(key: KeyCode) -> Option<BrakeInput> {
    match key {
        KeyCode::KeyF => Some(BrakeInput::EngageBrake),
        KeyCode::KeyR => Some(BrakeInput::ReleaseBrake),
        KeyCode::Escape => Some(BrakeInput::Exit),
        _ => None,
    }
}

/// Run the simulation in a window until it is closed or Escape is pressed.
///
/// Takes ownership of the tick loop and blocks until the event loop exits.
///
/// # Errors
///
/// Returns an error if the event loop cannot be created, or if the window
/// or renderer fails to initialize.
pub fn run_windowed(
    tick_loop: TickLoop,
    window_title: &str,
    width: u32,
    height: u32,
) -> Result<(), anyhow::Error> {
    let event_loop = EventLoop::new()?;

    let mut app = App {
        state: AppState::Pending {
            tick_loop,
            title: window_title.to_owned(),
            width,
            height,
        },
        init_failed: false,
    };

    event_loop.run_app(&mut app)?;

    if app.init_failed {
        return Err(anyhow::anyhow!(
            "failed to initialize windowed renderer (see logs for details)"
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Internal state machine
// ---------------------------------------------------------------------------

/// Winit 0.30 only allows window creation inside `resumed`, so the app
/// starts `Pending` and becomes `Running` once the window and renderer
/// exist.
enum AppState {
    Pending {
        tick_loop: TickLoop,
        title: String,
        width: u32,
        height: u32,
    },
    Running {
        tick_loop: TickLoop,
        renderer: SceneRenderer,
        pacer: FramePacer,
    },
    /// Placeholder while moving out of `Pending`.
    Transitioning,
}

struct App {
    state: AppState,
    /// Set when the window or renderer could not be created.
    init_failed: bool,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop) {
        self.init_failed = true;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let (tick_loop, title, width, height) =
            match std::mem::replace(&mut self.state, AppState::Transitioning) {
                AppState::Pending {
                    tick_loop,
                    title,
                    width,
                    height,
                } => (tick_loop, title, width, height),
                // Already running.
                other => {
                    self.state = other;
                    return;
                }
            };

        let window_attrs = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(winit::dpi::PhysicalSize::new(width, height))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!(error = %e, "failed to create window -- exiting");
                return self.fail(event_loop);
            }
        };

        match pollster::block_on(SceneRenderer::new(window.clone())) {
            Ok(renderer) => {
                tracing::info!(width, height, "window created");
                window.request_redraw();
                let pacer = FramePacer::new(tick_loop.fixed_dt(), Instant::now());
                event_loop.set_control_flow(ControlFlow::WaitUntil(pacer.next_deadline()));
                self.state = AppState::Running {
                    tick_loop,
                    renderer,
                    pacer,
                };
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize scene renderer -- exiting");
                self.fail(event_loop);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let AppState::Running {
            tick_loop,
            renderer,
            ..
        } = &mut self.state
        else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                tick_loop.handle_input(BrakeInput::Exit);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(input) = key_to_input(code) {
                    tick_loop.handle_input(input);
                }
            }
            WindowEvent::Resized(new_size) => {
                tracing::debug!(
                    width = new_size.width,
                    height = new_size.height,
                    "window resized"
                );
                renderer.resize(new_size);
            }
            WindowEvent::RedrawRequested => match renderer.render(&tick_loop.compose_frame()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    tracing::warn!("surface lost, reconfiguring");
                    renderer.resize(renderer.size());
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    tracing::error!("GPU out of memory -- exiting");
                    event_loop.exit();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "surface error during render");
                }
            },
            _ => {}
        }

        if tick_loop.exit_requested() {
            tracing::info!(ticks = tick_loop.tick_count(), "exit requested -- shutting down");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let AppState::Running {
            tick_loop,
            renderer,
            pacer,
        } = &mut self.state
        else {
            return;
        };

        let due = pacer.on_frame(Instant::now());
        for _ in 0..due {
            tick_loop.tick();
        }
        if due > 0 {
            renderer.window().request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(pacer.next_deadline()));
    }
}
