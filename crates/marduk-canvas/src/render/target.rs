use crate::coords::{ColorRgba, Viewport};

use super::{DrawParams, Mesh, Program, Uniforms};

/// A drawable surface.
///
/// Targets are borrowed for each draw and never owned by a [`Graphics`].
/// `draw` issues one triangle-list draw of `mesh` and returns once the
/// commands are submitted to the queue.
///
/// [`Graphics`]: super::Graphics
pub trait Target {
    /// Size in pixels.
    fn viewport(&self) -> Viewport;

    fn device(&self) -> &wgpu::Device;

    fn queue(&self) -> &wgpu::Queue;

    fn draw(&mut self, program: &mut Program, mesh: &Mesh, uniforms: &Uniforms, params: &DrawParams);

    #[inline]
    fn width(&self) -> f32 {
        self.viewport().width
    }

    #[inline]
    fn height(&self) -> f32 {
        self.viewport().height
    }
}

/// Texture-view target (usually the current swapchain image).
///
/// Every draw records its own render pass in a fresh encoder and submits it
/// right away, so consecutive draws land in call order and do not share
/// buffer writes.
pub struct RenderTarget<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub color_view: &'a wgpu::TextureView,
    pub format: wgpu::TextureFormat,
    pub viewport: Viewport,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        color_view: &'a wgpu::TextureView,
        format: wgpu::TextureFormat,
        viewport: Viewport,
    ) -> Self {
        Self {
            device,
            queue,
            color_view,
            format,
            viewport,
        }
    }

    /// Clears the whole view to `color`.
    pub fn clear(&mut self, color: ColorRgba) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("marduk canvas clear"),
            });
        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("marduk canvas clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: color.r as f64,
                            g: color.g as f64,
                            b: color.b as f64,
                            a: color.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

impl Target for RenderTarget<'_> {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn device(&self) -> &wgpu::Device {
        self.device
    }

    fn queue(&self) -> &wgpu::Queue {
        self.queue
    }

    fn draw(&mut self, program: &mut Program, mesh: &Mesh, uniforms: &Uniforms, params: &DrawParams) {
        program.ensure_pipeline(self.device, self.format, params);
        program.write_uniforms(self.queue, uniforms);

        let Some(pipeline) = program.pipeline(self.format, params) else { return };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("marduk canvas draw"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("marduk canvas pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, program.bind_group(), &[]);
            let Some(index_count) = mesh.bind(&mut rpass) else { return };
            rpass.draw_indexed(0..index_count, 0, 0..1);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }
}
