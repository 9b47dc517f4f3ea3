use std::f32::consts::TAU;

use crate::coords::{ColorRgba, Vec2};
use crate::error::GraphicsResult;

use super::batch::ShapeBatch;
use super::style::{ArcMode, ArcStyle};
use super::vertex::{Vertex, VertexIndex};

/// Rim samples used by `arc` when the style leaves `points` unset.
pub const DEFAULT_ARC_POINTS: usize = 16;

/// Rim samples used by `ellipse` and `circle` when the style leaves `points` unset.
pub const DEFAULT_ELLIPSE_POINTS: usize = 32;

#[inline]
fn rim_point(center: Vec2, radii: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    center + Vec2::new(radii.x * cos, radii.y * sin)
}

impl ShapeBatch {
    /// Filled elliptical arc from `start` to `end` (radians).
    ///
    /// Rim samples sit at `center + (radii.x·cos θ, radii.y·sin θ)` with θ
    /// stepping linearly from `start` toward `end`.
    ///
    /// - `Open`/`Chord`: `points` samples over `points - 1` steps, so `end`
    ///   is included. Fanned from the first rim vertex as
    ///   `[first, rim[i], rim[i - 1]]` for `i = points - 1 ..= 1`; the last
    ///   of these is degenerate. At least 2 samples are taken.
    /// - `Pie`: a center vertex followed by `points` samples over `points`
    ///   steps (`end` excluded). Fanned from the center as
    ///   `[center, rim[i], rim[(i + 1) % points]]`, closing back to the
    ///   first sample.
    ///
    /// `points == 0` adds nothing.
    pub fn arc(
        &mut self,
        center: Vec2,
        radii: Vec2,
        start: f32,
        end: f32,
        style: ArcStyle,
    ) -> GraphicsResult<()> {
        let points = style.points.unwrap_or(DEFAULT_ARC_POINTS);
        if points == 0 {
            return Ok(());
        }

        match style.mode {
            ArcMode::Open | ArcMode::Chord => {
                self.chord_fan(center, radii, start, end, points.max(2), style.color)
            }
            ArcMode::Pie => self.pie_fan(center, radii, start, end, points, style.color),
        }
    }

    /// Full ellipse: `arc` over `0..TAU`, 32 samples unless the style says otherwise.
    pub fn ellipse(&mut self, center: Vec2, radii: Vec2, style: ArcStyle) -> GraphicsResult<()> {
        let points = style.points.unwrap_or(DEFAULT_ELLIPSE_POINTS);
        self.arc(center, radii, 0.0, TAU, style.with_points(points))
    }

    /// Ellipse with equal radii.
    pub fn circle(&mut self, center: Vec2, radius: f32, style: ArcStyle) -> GraphicsResult<()> {
        self.ellipse(center, Vec2::splat(radius), style)
    }

    fn chord_fan(
        &mut self,
        center: Vec2,
        radii: Vec2,
        start: f32,
        end: f32,
        points: usize,
        color: ColorRgba,
    ) -> GraphicsResult<()> {
        let steps = (points - 1) as f32;
        self.atomic(|batch| {
            let mut first = 0;
            for i in 0..points {
                let angle = start + (end - start) * (i as f32 / steps);
                let id = batch.add_vertex(Vertex::new(rim_point(center, radii, angle), color))?;
                if i == 0 {
                    first = id;
                }
            }
            for i in (1..points).rev() {
                let i = i as VertexIndex;
                batch.add_indices(&[first, first + i, first + i - 1]);
            }
            Ok(())
        })
    }

    fn pie_fan(
        &mut self,
        center: Vec2,
        radii: Vec2,
        start: f32,
        end: f32,
        points: usize,
        color: ColorRgba,
    ) -> GraphicsResult<()> {
        let steps = points as f32;
        self.atomic(|batch| {
            let hub = batch.add_vertex(Vertex::new(center, color))?;
            let mut rim = 0;
            for i in 0..points {
                let angle = start + (end - start) * (i as f32 / steps);
                let id = batch.add_vertex(Vertex::new(rim_point(center, radii, angle), color))?;
                if i == 0 {
                    rim = id;
                }
            }
            for i in 0..points {
                let next = (i + 1) % points;
                batch.add_indices(&[hub, rim + i as VertexIndex, rim + next as VertexIndex]);
            }
            Ok(())
        })
    }

    /// Fan of `segments` triangles around `center`, from `from` sweeping
    /// `sweep` radians. Not closed: no triangle joins the last rim sample
    /// back to the first.
    pub(super) fn wedge(
        &mut self,
        center: Vec2,
        radius: f32,
        from: f32,
        sweep: f32,
        segments: usize,
        color: ColorRgba,
    ) -> GraphicsResult<()> {
        let segments = segments.max(1);
        self.atomic(|batch| {
            let hub = batch.add_vertex(Vertex::new(center, color))?;
            for i in 0..=segments {
                let angle = from + sweep * (i as f32 / segments as f32);
                batch.add_vertex(Vertex::new(center + Vec2::from_angle(angle) * radius, color))?;
            }
            for i in 1..=segments as VertexIndex {
                batch.add_indices(&[hub, hub + i, hub + i + 1]);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    fn positions(batch: &ShapeBatch) -> Vec<Vec2> {
        batch.vertices().iter().map(Vertex::position).collect()
    }

    // ── pie ───────────────────────────────────────────────────────────────

    #[test]
    fn pie_has_center_plus_rim_and_wraps() {
        let mut batch = ShapeBatch::new();
        let style = ArcStyle::default().with_points(4).with_mode(ArcMode::Pie);
        batch.arc(Vec2::zero(), Vec2::splat(1.0), 0.0, TAU, style).unwrap();

        assert_eq!(batch.vertex_count(), 5);
        assert_eq!(
            batch.indices(),
            &[0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1]
        );
    }

    #[test]
    fn pie_samples_exclude_end_angle() {
        let mut batch = ShapeBatch::new();
        let style = ArcStyle::default().with_points(4);
        batch.arc(Vec2::zero(), Vec2::splat(1.0), 0.0, TAU, style).unwrap();

        let pos = positions(&batch);
        assert_eq!(pos[0], Vec2::zero());
        assert!(approx_eq(pos[1], Vec2::new(1.0, 0.0)));
        assert!(approx_eq(pos[2], Vec2::new(0.0, 1.0)));
        assert!(approx_eq(pos[3], Vec2::new(-1.0, 0.0)));
        assert!(approx_eq(pos[4], Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn pie_triangle_count_matches_points() {
        let mut batch = ShapeBatch::new();
        batch
            .arc(Vec2::zero(), Vec2::splat(3.0), 0.0, PI, ArcStyle::default().with_points(7))
            .unwrap();
        assert_eq!(batch.vertex_count(), 8);
        assert_eq!(batch.index_count(), 7 * 3);
    }

    // ── chord / open ──────────────────────────────────────────────────────

    #[test]
    fn chord_fans_from_first_rim_vertex() {
        let mut batch = ShapeBatch::new();
        let style = ArcStyle::default().with_points(4).with_mode(ArcMode::Chord);
        batch.arc(Vec2::zero(), Vec2::splat(1.0), 0.0, PI, style).unwrap();

        assert_eq!(batch.vertex_count(), 4);
        assert_eq!(batch.indices(), &[0, 3, 2, 0, 2, 1, 0, 1, 0]);
    }

    #[test]
    fn chord_includes_end_angle() {
        let mut batch = ShapeBatch::new();
        let style = ArcStyle::default().with_points(3).with_mode(ArcMode::Open);
        batch.arc(Vec2::new(10.0, 10.0), Vec2::new(2.0, 1.0), 0.0, PI, style).unwrap();

        let pos = positions(&batch);
        assert!(approx_eq(pos[0], Vec2::new(12.0, 10.0)));
        assert!(approx_eq(pos[1], Vec2::new(10.0, 11.0)));
        assert!(approx_eq(pos[2], Vec2::new(8.0, 10.0)));
    }

    #[test]
    fn open_and_chord_fill_identically() {
        let mut open = ShapeBatch::new();
        let mut chord = ShapeBatch::new();
        let style = ArcStyle::default().with_points(9);
        open.arc(Vec2::zero(), Vec2::splat(5.0), 0.3, 2.0, style.with_mode(ArcMode::Open))
            .unwrap();
        chord
            .arc(Vec2::zero(), Vec2::splat(5.0), 0.3, 2.0, style.with_mode(ArcMode::Chord))
            .unwrap();
        assert_eq!(open.vertices(), chord.vertices());
        assert_eq!(open.indices(), chord.indices());
    }

    #[test]
    fn chord_offsets_indices_by_batch_length() {
        let mut batch = ShapeBatch::new();
        batch.add_vertex(Vec2::zero()).unwrap();
        let style = ArcStyle::default().with_points(3).with_mode(ArcMode::Chord);
        batch.arc(Vec2::zero(), Vec2::splat(1.0), 0.0, PI, style).unwrap();
        assert_eq!(batch.indices(), &[1, 3, 2, 1, 2, 1]);
    }

    #[test]
    fn zero_points_adds_nothing() {
        let mut batch = ShapeBatch::new();
        batch
            .arc(Vec2::zero(), Vec2::splat(1.0), 0.0, PI, ArcStyle::default().with_points(0))
            .unwrap();
        assert_eq!(batch.vertex_count(), 0);
    }

    #[test]
    fn default_arc_uses_sixteen_points() {
        let mut batch = ShapeBatch::new();
        batch.arc(Vec2::zero(), Vec2::splat(1.0), 0.0, PI, ArcStyle::default()).unwrap();
        assert_eq!(batch.vertex_count(), DEFAULT_ARC_POINTS + 1);
    }

    // ── ellipse / circle ──────────────────────────────────────────────────

    #[test]
    fn ellipse_matches_full_arc() {
        let center = Vec2::new(4.0, -2.0);
        let radii = Vec2::new(3.0, 1.5);
        let style = ArcStyle::filled(ColorRgba::BLACK).with_points(12);

        let mut ellipse = ShapeBatch::new();
        ellipse.ellipse(center, radii, style).unwrap();
        let mut arc = ShapeBatch::new();
        arc.arc(center, radii, 0.0, TAU, style).unwrap();

        assert_eq!(positions(&ellipse), positions(&arc));
        assert_eq!(ellipse.indices(), arc.indices());
    }

    #[test]
    fn circle_defaults_to_thirty_two_points() {
        let mut batch = ShapeBatch::new();
        batch.circle(Vec2::zero(), 2.0, ArcStyle::default()).unwrap();
        assert_eq!(batch.vertex_count(), DEFAULT_ELLIPSE_POINTS + 1);
        assert!(
            positions(&batch)[1..]
                .iter()
                .all(|p| (p.length() - 2.0).abs() < 1e-4)
        );
    }

    // ── wedge ─────────────────────────────────────────────────────────────

    #[test]
    fn wedge_is_not_closed() {
        let mut batch = ShapeBatch::new();
        batch
            .wedge(Vec2::zero(), 1.0, 0.0, PI / 2.0, 2, ColorRgba::WHITE)
            .unwrap();
        assert_eq!(batch.vertex_count(), 4);
        assert_eq!(batch.indices(), &[0, 1, 2, 0, 2, 3]);
    }
}
