use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use marduk_canvas::logging::{LoggingConfig, init_logging};
use marduk_canvas::{ColorRgba, DrawOptions, Graphics, GraphicsConfig, RenderTarget, Viewport};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

mod gpu;
mod scene;

use gpu::{Gpu, GpuInit, SurfaceErrorAction};

const CLEAR: ColorRgba = ColorRgba::new(0.05, 0.05, 0.07, 1.0);

struct Surface {
    window: Arc<Window>,
    gpu: Gpu,
    gfx: Graphics,
}

impl Surface {
    fn create(event_loop: &ActiveEventLoop) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("marduk sketch")
            .with_inner_size(LogicalSize::new(960.0, 600.0));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(window.clone(), GpuInit::default()))
            .context("GPU initialization failed")?;
        let gfx = Graphics::new(gpu.device(), GraphicsConfig::default())
            .context("failed to create graphics context")?;

        Ok(Self { window, gpu, gfx })
    }

    /// Draws one frame. Returns `false` when the surface is unusable.
    fn redraw(&mut self, t: f32) -> bool {
        let size = self.gpu.size();
        let viewport = Viewport::new(size.width as f32, size.height as f32);
        if !viewport.is_valid() {
            // Minimized.
            return true;
        }

        let frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("surface error: {err}");
                return self.gpu.handle_surface_error(err) != SurfaceErrorAction::Fatal;
            }
        };

        let mut target = RenderTarget::new(
            self.gpu.device(),
            self.gpu.queue(),
            &frame.view,
            self.gpu.surface_format(),
            viewport,
        );
        target.clear(CLEAR);

        self.gfx.reset_shape();
        if let Err(e) = scene::paint(self.gfx.batch_mut(), t, viewport) {
            log::warn!("frame truncated: {e}");
        }
        self.gfx.draw(&mut target, DrawOptions::default());

        self.window.pre_present_notify();
        self.gpu.present(frame);
        true
    }
}

struct Sketch {
    surface: Option<Surface>,
    started: Instant,
}

impl ApplicationHandler for Sketch {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }
        match Surface::create(event_loop) {
            Ok(surface) => {
                surface.window.request_redraw();
                self.surface = Some(surface);
            }
            Err(e) => {
                log::error!("failed to start: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(surface) = &self.surface {
            surface.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(surface) = self.surface.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                surface.gpu.resize(new_size);
                surface.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let t = self.started.elapsed().as_secs_f32();
                if !surface.redraw(t) {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut sketch = Sketch {
        surface: None,
        started: Instant::now(),
    };
    event_loop
        .run_app(&mut sketch)
        .context("winit event loop terminated with error")?;
    Ok(())
}
