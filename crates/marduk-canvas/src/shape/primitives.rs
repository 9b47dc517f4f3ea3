use crate::coords::{ColorRgba, Rect, Vec2};
use crate::error::GraphicsResult;

use super::batch::ShapeBatch;
use super::vertex::{Vertex, VertexIndex};

/// Two triangles `[a, b, c]` and `[c, d, a]` over four corner indices.
#[inline]
pub(super) const fn quad_indices([a, b, c, d]: [VertexIndex; 4]) -> [VertexIndex; 6] {
    [a, b, c, c, d, a]
}

impl ShapeBatch {
    /// Adds one triangle. Winding is taken as given.
    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: ColorRgba) -> GraphicsResult<()> {
        self.atomic(|batch| {
            let ia = batch.add_vertex(Vertex::new(a, color))?;
            let ib = batch.add_vertex(Vertex::new(b, color))?;
            let ic = batch.add_vertex(Vertex::new(c, color))?;
            batch.add_indices(&[ia, ib, ic]);
            Ok(())
        })
    }

    /// Adds a quad as triangles `[a, b, c]` and `[c, d, a]`.
    ///
    /// Corners are expected clockwise on screen. Other orders are not
    /// rejected; they only flip the winding of the emitted triangles.
    pub fn quad(
        &mut self,
        a: Vec2,
        b: Vec2,
        c: Vec2,
        d: Vec2,
        color: ColorRgba,
    ) -> GraphicsResult<()> {
        self.quad_vertices([
            Vertex::new(a, color),
            Vertex::new(b, color),
            Vertex::new(c, color),
            Vertex::new(d, color),
        ])
    }

    /// Quad with per-corner colors.
    pub(super) fn quad_vertices(&mut self, corners: [Vertex; 4]) -> GraphicsResult<()> {
        self.atomic(|batch| {
            let mut ids = [0; 4];
            for (id, corner) in ids.iter_mut().zip(corners) {
                *id = batch.add_vertex(corner)?;
            }
            batch.add_indices(&quad_indices(ids));
            Ok(())
        })
    }

    /// Axis-aligned rectangle, corners clockwise from top-left.
    pub fn rectangle(&mut self, rect: Rect, color: ColorRgba) -> GraphicsResult<()> {
        let [tl, tr, br, bl] = rect.corners();
        self.quad(tl, tr, br, bl, color)
    }

    /// A `size`×`size` square centered on `center`.
    ///
    /// Points are squares, not discs, to keep them at four vertices.
    pub fn point(&mut self, center: Vec2, size: f32, color: ColorRgba) -> GraphicsResult<()> {
        self.rectangle(Rect::from_center_size(center, Vec2::splat(size)), color)
    }

    /// Convex polygon, fanned from the first point.
    ///
    /// Fewer than three points adds nothing. Concave input is not detected
    /// and renders with overlapping triangles.
    pub fn polygon(&mut self, points: &[Vec2], color: ColorRgba) -> GraphicsResult<()> {
        if points.len() < 3 {
            return Ok(());
        }

        self.atomic(|batch| {
            let mut ids = Vec::with_capacity(points.len());
            for &p in points {
                ids.push(batch.add_vertex(Vertex::new(p, color))?);
            }
            for pair in ids[1..].windows(2) {
                batch.add_indices(&[ids[0], pair[0], pair[1]]);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphicsError;
    use crate::shape::MAX_BATCH_VERTICES;

    fn positions(batch: &ShapeBatch) -> Vec<Vec2> {
        batch.vertices().iter().map(Vertex::position).collect()
    }

    // ── triangle ──────────────────────────────────────────────────────────

    #[test]
    fn triangle_fills_buffers_in_order() {
        let mut batch = ShapeBatch::new();
        batch.reset_shape();
        batch
            .triangle(
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                ColorRgba::WHITE,
            )
            .unwrap();

        assert_eq!(
            batch.vertices(),
            &[
                Vertex::new(Vec2::new(0.0, 0.0), ColorRgba::WHITE),
                Vertex::new(Vec2::new(1.0, 0.0), ColorRgba::WHITE),
                Vertex::new(Vec2::new(0.0, 1.0), ColorRgba::WHITE),
            ]
        );
        assert_eq!(batch.indices(), &[0, 1, 2]);
    }

    // ── quad / rectangle ──────────────────────────────────────────────────

    #[test]
    fn quad_indices_are_relative_to_batch_offset() {
        let mut batch = ShapeBatch::new();
        batch
            .triangle(Vec2::zero(), Vec2::zero(), Vec2::zero(), ColorRgba::WHITE)
            .unwrap();
        batch
            .quad(
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
                ColorRgba::WHITE,
            )
            .unwrap();

        assert_eq!(batch.vertex_count(), 7);
        assert_eq!(&batch.indices()[3..], &[3, 4, 5, 5, 6, 3]);
    }

    #[test]
    fn rectangle_corners_and_indices() {
        let mut batch = ShapeBatch::new();
        batch.rectangle(Rect::new(0.0, 0.0, 10.0, 10.0), ColorRgba::WHITE).unwrap();

        assert_eq!(
            positions(&batch),
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
            ]
        );
        assert_eq!(batch.indices(), &[0, 1, 2, 2, 3, 0]);
    }

    #[test]
    fn rectangle_follows_transform() {
        let mut batch = ShapeBatch::new();
        batch.translate(Vec2::new(5.0, 5.0));
        batch.rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), ColorRgba::WHITE).unwrap();
        assert_eq!(positions(&batch)[0], Vec2::new(5.0, 5.0));
        assert_eq!(positions(&batch)[2], Vec2::new(6.0, 6.0));
    }

    // ── point ─────────────────────────────────────────────────────────────

    #[test]
    fn point_is_centered_square() {
        let mut batch = ShapeBatch::new();
        batch.point(Vec2::new(10.0, 10.0), 4.0, ColorRgba::BLACK).unwrap();
        assert_eq!(
            positions(&batch),
            vec![
                Vec2::new(8.0, 8.0),
                Vec2::new(12.0, 8.0),
                Vec2::new(12.0, 12.0),
                Vec2::new(8.0, 12.0),
            ]
        );
        assert!(batch.vertices().iter().all(|v| v.color() == ColorRgba::BLACK));
    }

    // ── polygon ───────────────────────────────────────────────────────────

    #[test]
    fn polygon_fans_from_first_point() {
        let mut batch = ShapeBatch::new();
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        batch.polygon(&pts, ColorRgba::WHITE).unwrap();
        assert_eq!(batch.vertex_count(), 5);
        assert_eq!(batch.indices(), &[0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn polygon_needs_three_points() {
        let mut batch = ShapeBatch::new();
        batch
            .polygon(&[Vec2::zero(), Vec2::new(1.0, 0.0)], ColorRgba::WHITE)
            .unwrap();
        assert_eq!(batch.vertex_count(), 0);
    }

    // ── capacity ──────────────────────────────────────────────────────────

    #[test]
    fn shape_that_does_not_fit_is_not_added() {
        let mut batch = ShapeBatch::new();
        for _ in 0..MAX_BATCH_VERTICES - 2 {
            batch.add_vertex(Vec2::zero()).unwrap();
        }
        let err = batch
            .quad(Vec2::zero(), Vec2::zero(), Vec2::zero(), Vec2::zero(), ColorRgba::WHITE)
            .unwrap_err();

        assert!(matches!(err, GraphicsError::BatchFull { .. }));
        assert_eq!(batch.vertex_count(), MAX_BATCH_VERTICES - 2);
        assert!(batch.indices().is_empty());

        // A triangle does not fit either, but a single vertex still does.
        assert!(batch.triangle(Vec2::zero(), Vec2::zero(), Vec2::zero(), ColorRgba::WHITE).is_err());
        assert!(batch.add_vertex(Vec2::zero()).is_ok());
    }
}
