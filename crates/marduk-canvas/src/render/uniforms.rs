use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;

use super::Target;

/// Per-draw shader globals bound at `@group(0) @binding(0)`.
///
/// `projection` is column-major, as WGSL reads `mat4x4<f32>`.
/// `target_size` is the target's size in pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub projection: [[f32; 4]; 4],
    pub target_size: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl Uniforms {
    /// Default uniforms for a target: pixel-space orthographic projection
    /// plus the target size.
    pub fn for_target<T: Target + ?Sized>(target: &T) -> Self {
        Self::for_viewport(target.viewport())
    }

    /// Orthographic projection mapping `0..width` × `0..height` (top-left
    /// origin, +Y down) onto clip space, with near/far at −1/1.
    ///
    /// A degenerate size projects as if it were one pixel wide/high;
    /// `target_size` still carries the real size.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let w = viewport.width.max(1.0);
        let h = viewport.height.max(1.0);
        Self {
            projection: ortho(0.0, w, h, 0.0, -1.0, 1.0),
            target_size: [viewport.width, viewport.height],
            _pad: [0.0; 2],
        }
    }

    /// Size of the uniform block in bytes.
    pub(crate) const SIZE: u64 = std::mem::size_of::<Uniforms>() as u64;

    pub(crate) fn min_binding_size() -> std::num::NonZeroU64 {
        // 80 bytes by construction.
        std::num::NonZeroU64::new(Self::SIZE).unwrap_or(std::num::NonZeroU64::MIN)
    }
}

/// Column-major orthographic projection.
fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> [[f32; 4]; 4] {
    let rl = right - left;
    let tb = top - bottom;
    let fnr = far - near;
    [
        [2.0 / rl, 0.0, 0.0, 0.0],
        [0.0, 2.0 / tb, 0.0, 0.0],
        [0.0, 0.0, -2.0 / fnr, 0.0],
        [
            -(right + left) / rl,
            -(top + bottom) / tb,
            -(far + near) / fnr,
            1.0,
        ],
    ]
}
