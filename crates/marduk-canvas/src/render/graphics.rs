use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

use crate::error::GraphicsResult;
use crate::shape::ShapeBatch;

use super::program::DEFAULT_SHADER;
use super::{DrawParams, Mesh, Program, Target, Uniforms};

/// Construction parameters for [`Graphics`].
#[derive(Debug, Clone)]
pub struct GraphicsConfig {
    /// Debug label for the GPU objects. Default: `"marduk canvas"`.
    pub label: String,

    /// WGSL for the default program. Default: the built-in shape shader.
    ///
    /// Custom source must follow the contract documented on [`Program`].
    pub shader_source: Cow<'static, str>,

    /// Draw parameters used when a draw call does not pass any.
    /// Default: [`DrawParams::alpha`].
    pub draw_params: DrawParams,

    /// Initial CPU reservation for vertices. Default: 1024.
    pub vertex_capacity: usize,

    /// Initial CPU reservation for indices. Default: 1536.
    pub index_capacity: usize,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            label: "marduk canvas".to_string(),
            shader_source: Cow::Borrowed(DEFAULT_SHADER),
            draw_params: DrawParams::alpha(),
            vertex_capacity: 1024,
            index_capacity: 1536,
        }
    }
}

/// Per-call overrides for [`Graphics::draw`]. `None` fields use the
/// context's defaults.
#[derive(Default)]
pub struct DrawOptions<'a> {
    /// Default: the context's default program.
    pub program: Option<&'a mut Program>,
    /// Default: [`Uniforms::for_target`].
    pub uniforms: Option<Uniforms>,
    /// Default: the context's default draw parameters.
    pub params: Option<DrawParams>,
}

impl<'a> DrawOptions<'a> {
    pub fn with_program(mut self, program: &'a mut Program) -> Self {
        self.program = Some(program);
        self
    }

    pub fn with_uniforms(mut self, uniforms: Uniforms) -> Self {
        self.uniforms = Some(uniforms);
        self
    }

    pub fn with_params(mut self, params: DrawParams) -> Self {
        self.params = Some(params);
        self
    }
}

/// Immediate-mode rendering context for one drawable surface.
///
/// Owns the CPU shape batch, the GPU mesh it uploads into, a default
/// program and default draw parameters. Shape building goes through
/// `Deref<Target = ShapeBatch>`:
///
/// ```ignore
/// gfx.reset_shape();
/// gfx.rectangle(Rect::new(0.0, 0.0, 10.0, 10.0), ColorRgba::WHITE)?;
/// gfx.draw(&mut target, DrawOptions::default());
/// ```
///
/// One context per surface; drop it with (or before) the surface's device.
pub struct Graphics {
    batch: ShapeBatch,
    mesh: Mesh,
    program: Program,
    draw_params: DrawParams,
}

impl Graphics {
    /// Creates a context and compiles its default program.
    ///
    /// Shader compilation failure is returned as an error.
    pub fn new(device: &wgpu::Device, config: GraphicsConfig) -> GraphicsResult<Self> {
        let GraphicsConfig {
            label,
            shader_source,
            draw_params,
            vertex_capacity,
            index_capacity,
        } = config;

        let program = Program::from_wgsl(device, &label, &shader_source)?;
        log::debug!("graphics `{label}` created");

        Ok(Self {
            batch: ShapeBatch::with_capacity(vertex_capacity, index_capacity),
            mesh: Mesh::new(label),
            program,
            draw_params,
        })
    }

    /// The CPU batch being built.
    #[inline]
    pub fn batch(&self) -> &ShapeBatch {
        &self.batch
    }

    #[inline]
    pub fn batch_mut(&mut self) -> &mut ShapeBatch {
        &mut self.batch
    }

    #[inline]
    pub fn default_program(&self) -> &Program {
        &self.program
    }

    #[inline]
    pub fn default_draw_params(&self) -> DrawParams {
        self.draw_params
    }

    /// Replaces the default program.
    ///
    /// Setup-time only. To draw a frame with another program, pass it
    /// through [`DrawOptions`] instead.
    pub fn set_default_program(&mut self, program: Program) {
        self.program = program;
    }

    /// Replaces the default draw parameters.
    ///
    /// Setup-time only, like [`set_default_program`](Self::set_default_program).
    pub fn set_default_draw_params(&mut self, params: DrawParams) {
        self.draw_params = params;
    }

    /// Uploads the batch to the mesh and draws it on `target` as one
    /// triangle list.
    ///
    /// The whole batch is re-uploaded every call. The batch itself is left
    /// intact; call `reset_shape` to start the next one. An empty batch
    /// issues no draw.
    pub fn draw<T: Target + ?Sized>(&mut self, target: &mut T, options: DrawOptions<'_>) {
        let DrawOptions {
            program,
            uniforms,
            params,
        } = options;

        self.mesh
            .upload_vertices(target.device(), target.queue(), self.batch.vertices());
        self.mesh
            .upload_indices(target.device(), target.queue(), self.batch.indices());

        if self.mesh.index_count() == 0 {
            log::trace!("graphics: empty batch, draw skipped");
            return;
        }

        let program = program.unwrap_or(&mut self.program);
        let uniforms = uniforms.unwrap_or_else(|| Uniforms::for_target(&*target));
        let params = params.unwrap_or(self.draw_params);

        log::trace!(
            "graphics: drawing {} vertices / {} indices with `{}`",
            self.mesh.vertex_count(),
            self.mesh.index_count(),
            program.label()
        );
        target.draw(program, &self.mesh, &uniforms, &params);
    }
}

impl Deref for Graphics {
    type Target = ShapeBatch;

    fn deref(&self) -> &ShapeBatch {
        &self.batch
    }
}

impl DerefMut for Graphics {
    fn deref_mut(&mut self) -> &mut ShapeBatch {
        &mut self.batch
    }
}
