use std::collections::HashMap;

use crate::error::{GraphicsError, GraphicsResult};
use crate::shape::Vertex;

use super::{DrawParams, Uniforms};

/// WGSL source of the default shape program.
pub const DEFAULT_SHADER: &str = include_str!("shaders/shape.wgsl");

/// A compiled shader pipeline for shape batches.
///
/// Contract for custom WGSL:
/// - entry points `vs_main` and `fs_main`
/// - vertex inputs `@location(0) position: vec2<f32>` and
///   `@location(1) color: vec4<f32>`
/// - a uniform block matching [`Uniforms`] at `@group(0) @binding(0)`
/// - a single color output at `@location(0)`
///
/// Render pipelines are created lazily, one per `(target format,
/// DrawParams)` pair, and kept for the life of the program.
pub struct Program {
    label: String,
    module: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    uniform_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct PipelineKey {
    format: wgpu::TextureFormat,
    params: DrawParams,
}

impl Program {
    /// Compiles `source` and creates the uniform bindings.
    ///
    /// Compilation errors reported by the device come back as
    /// [`GraphicsError::ShaderCompile`]; warnings are logged.
    pub fn from_wgsl(device: &wgpu::Device, label: &str, source: &str) -> GraphicsResult<Self> {
        // Unscoped validation errors reach the device's panicking default handler.
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        let validation = pollster::block_on(scope.pop());

        let info = pollster::block_on(module.get_compilation_info());
        let mut errors = Vec::new();
        for msg in &info.messages {
            match msg.message_type {
                wgpu::CompilationMessageType::Error => errors.push(msg.message.clone()),
                wgpu::CompilationMessageType::Warning => {
                    log::warn!("shader `{label}`: {}", msg.message);
                }
                _ => {
                    log::debug!("shader `{label}`: {}", msg.message);
                }
            }
        }
        if errors.is_empty() {
            errors.extend(validation.map(|err| err.to_string()));
        }
        if !errors.is_empty() {
            return Err(GraphicsError::ShaderCompile {
                label: label.to_string(),
                message: errors.join("\n"),
            });
        }

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(Uniforms::min_binding_size()),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let uniform_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: Uniforms::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        log::debug!("program `{label}` compiled");

        Ok(Self {
            label: label.to_string(),
            module,
            pipeline_layout,
            uniform_ubo,
            bind_group,
            pipelines: HashMap::new(),
        })
    }

    /// Compiles the built-in shape shader.
    pub fn default_shapes(device: &wgpu::Device) -> GraphicsResult<Self> {
        Self::from_wgsl(device, "marduk shape program", DEFAULT_SHADER)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of render pipelines built so far.
    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    pub(crate) fn ensure_pipeline(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        params: &DrawParams,
    ) {
        let key = PipelineKey {
            format,
            params: *params,
        };
        if self.pipelines.contains_key(&key) {
            return;
        }

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label.as_str()),
            layout: Some(&self.pipeline_layout),

            vertex: wgpu::VertexState {
                module: &self.module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &self.module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: params.blend,
                    write_mask: params.write_mask,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: params.front_face,
                cull_mode: params.cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(scope.pop()) {
            log::error!("program `{}`: pipeline for {format:?} rejected: {err}", self.label);
            return;
        }

        log::debug!(
            "program `{}`: built pipeline for {format:?} ({} cached)",
            self.label,
            self.pipelines.len() + 1
        );
        self.pipelines.insert(key, pipeline);
    }

    pub(crate) fn pipeline(
        &self,
        format: wgpu::TextureFormat,
        params: &DrawParams,
    ) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(&PipelineKey {
            format,
            params: *params,
        })
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &Uniforms) {
        queue.write_buffer(&self.uniform_ubo, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
