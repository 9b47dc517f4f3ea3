/// Fixed-function state for a draw: blending, write mask, culling.
///
/// Each distinct value compiles its own pipeline inside a [`Program`]
/// (cached), so keep the set of values used per frame small.
///
/// [`Program`]: super::Program
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DrawParams {
    pub blend: Option<wgpu::BlendState>,
    pub write_mask: wgpu::ColorWrites,
    pub cull_mode: Option<wgpu::Face>,
    pub front_face: wgpu::FrontFace,
}

impl DrawParams {
    /// Straight-alpha blending: `src·srcA + dst·(1 − srcA)` on color and alpha.
    pub fn alpha() -> Self {
        Self::blended(alpha_blend())
    }

    /// Premultiplied-alpha blending: `src + dst·(1 − srcA)` on color and alpha.
    pub fn alpha_premultiplied() -> Self {
        Self::blended(premul_alpha_blend())
    }

    /// No blending; fragments replace the target.
    pub fn opaque() -> Self {
        Self {
            blend: None,
            ..Self::alpha()
        }
    }

    fn blended(blend: wgpu::BlendState) -> Self {
        Self {
            blend: Some(blend),
            write_mask: wgpu::ColorWrites::ALL,
            cull_mode: None,
            // Shapes are wound clockwise on a +Y-down screen, which is
            // counter-clockwise once the projection flips Y.
            front_face: wgpu::FrontFace::Ccw,
        }
    }
}

impl Default for DrawParams {
    fn default() -> Self {
        Self::alpha()
    }
}

fn alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_straight_alpha() {
        assert_eq!(DrawParams::default(), DrawParams::alpha());
    }

    #[test]
    fn alpha_uses_source_alpha_on_both_channels() {
        let blend = DrawParams::alpha().blend.unwrap();
        assert_eq!(blend.color, blend.alpha);
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
        assert_eq!(blend.color.operation, wgpu::BlendOperation::Add);
    }

    #[test]
    fn premultiplied_uses_one_as_source_factor() {
        let blend = DrawParams::alpha_premultiplied().blend.unwrap();
        assert_eq!(blend.color, blend.alpha);
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::One);
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    }

    #[test]
    fn opaque_disables_blending_only() {
        let opaque = DrawParams::opaque();
        assert!(opaque.blend.is_none());
        assert_eq!(opaque.write_mask, wgpu::ColorWrites::ALL);
        assert_ne!(opaque, DrawParams::alpha());
    }
}
