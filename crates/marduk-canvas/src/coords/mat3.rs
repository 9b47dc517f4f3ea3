use core::ops::Mul;

use super::Vec2;

/// 3×3 matrix over homogeneous 2D coordinates, stored row-major.
///
/// Points are column vectors: `p' = M · [x, y, 1]ᵀ`. For `A * B` the
/// resulting transform applies `B` first, then `A`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    pub rows: [[f32; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self { rows }
    }

    #[inline]
    pub const fn translation(v: Vec2) -> Self {
        Self::from_rows([[1.0, 0.0, v.x], [0.0, 1.0, v.y], [0.0, 0.0, 1.0]])
    }

    #[inline]
    pub const fn scale(v: Vec2) -> Self {
        Self::from_rows([[v.x, 0.0, 0.0], [0.0, v.y, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation by `angle` radians about the origin.
    #[inline]
    pub fn rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Applies the matrix to a point (w = 1).
    ///
    /// Affine matrices keep w at 1; anything else is divided out.
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let [r0, r1, r2] = self.rows;
        let x = r0[0] * p.x + r0[1] * p.y + r0[2];
        let y = r1[0] * p.x + r1[1] * p.y + r1[2];
        let w = r2[0] * p.x + r2[1] * p.y + r2[2];
        if w == 1.0 || w == 0.0 {
            Vec2::new(x, y)
        } else {
            Vec2::new(x / w, y / w)
        }
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        let mut out = [[0.0f32; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.rows[r][k] * rhs.rows[k][c]).sum();
            }
        }
        Mat3::from_rows(out)
    }
}
