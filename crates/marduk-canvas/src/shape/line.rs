use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::coords::{ColorRgba, Vec2};
use crate::error::GraphicsResult;

use super::batch::ShapeBatch;
use super::style::{ArcMode, ArcStyle, LineCap, LineJoin, LineStyle, PolylineStyle};
use super::vertex::Vertex;

/// Cross products below this are treated as collinear segments.
const COLLINEAR_EPSILON: f32 = 1e-6;

/// Rim samples for a round cap: proportional to the semicircle's length.
fn round_cap_points(thickness: f32) -> usize {
    ((TAU * thickness * 0.25) as usize).max(6)
}

/// One segment body between two points.
struct Segment {
    a: Vec2,
    b: Vec2,
    dir: Vec2,
}

impl Segment {
    fn new(a: Vec2, b: Vec2) -> Option<Self> {
        (b - a).try_normalize().map(|dir| Self { a, b, dir })
    }
}

impl ShapeBatch {
    /// Thick line from `a` to `b`.
    ///
    /// The body is a quad offset by `thickness / 2` on each side of the
    /// segment. `Square` caps extend both ends by `thickness / 2`; `Round`
    /// caps add a semicircle at each end. The start of the line takes
    /// `color_a`, the end `color_b`.
    ///
    /// `a == b` adds nothing.
    pub fn line(&mut self, a: Vec2, b: Vec2, style: LineStyle) -> GraphicsResult<()> {
        let Some(segment) = Segment::new(a, b) else {
            return Ok(());
        };
        let half = style.thickness * 0.5;

        self.atomic(|batch| {
            batch.segment_body(&segment, half, style.cap, style.cap, style.color_a, style.color_b)?;
            batch.round_caps(&segment, style.thickness, style.cap, style.cap, style.color_a, style.color_b)
        })
    }

    /// Connected thick line through `points`.
    ///
    /// Each segment gets a butt-ended body; `style.cap` applies only at the
    /// first and last point. Interior points get join geometry on the outer
    /// side of the turn. Consecutive duplicate points are skipped, and fewer
    /// than two distinct points adds nothing.
    pub fn polyline(&mut self, points: &[Vec2], style: PolylineStyle) -> GraphicsResult<()> {
        let mut path: Vec<Vec2> = Vec::with_capacity(points.len());
        for &p in points {
            if path.last() != Some(&p) {
                path.push(p);
            }
        }
        let segments: Vec<Segment> = path
            .windows(2)
            .filter_map(|w| Segment::new(w[0], w[1]))
            .collect();
        if segments.is_empty() {
            return Ok(());
        }

        let half = style.thickness * 0.5;
        let last = segments.len() - 1;
        let color = style.color;

        self.atomic(|batch| {
            for (i, segment) in segments.iter().enumerate() {
                let start_cap = if i == 0 { style.cap } else { LineCap::Butt };
                let end_cap = if i == last { style.cap } else { LineCap::Butt };
                batch.segment_body(segment, half, start_cap, end_cap, color, color)?;
                batch.round_caps(segment, style.thickness, start_cap, end_cap, color, color)?;
            }
            for pair in segments.windows(2) {
                batch.join(&pair[0], &pair[1], &style)?;
            }
            Ok(())
        })
    }

    fn segment_body(
        &mut self,
        segment: &Segment,
        half: f32,
        start_cap: LineCap,
        end_cap: LineCap,
        color_a: ColorRgba,
        color_b: ColorRgba,
    ) -> GraphicsResult<()> {
        let extend = |cap: LineCap| match cap {
            LineCap::Square => segment.dir * half,
            LineCap::Butt | LineCap::Round => Vec2::zero(),
        };
        let a = segment.a - extend(start_cap);
        let b = segment.b + extend(end_cap);
        let perp = segment.dir.perp() * half;

        // Clockwise on screen for a left-to-right segment.
        self.quad_vertices([
            Vertex::new(a - perp, color_a),
            Vertex::new(b - perp, color_b),
            Vertex::new(b + perp, color_b),
            Vertex::new(a + perp, color_a),
        ])
    }

    fn round_caps(
        &mut self,
        segment: &Segment,
        thickness: f32,
        start_cap: LineCap,
        end_cap: LineCap,
        color_a: ColorRgba,
        color_b: ColorRgba,
    ) -> GraphicsResult<()> {
        let radii = Vec2::splat(thickness * 0.5);
        let points = round_cap_points(thickness);
        let heading = segment.dir.angle();

        if start_cap == LineCap::Round {
            let style = ArcStyle::filled(color_a)
                .with_points(points)
                .with_mode(ArcMode::Chord);
            let from = heading + FRAC_PI_2;
            self.arc(segment.a, radii, from, from + PI, style)?;
        }
        if end_cap == LineCap::Round {
            let style = ArcStyle::filled(color_b)
                .with_points(points)
                .with_mode(ArcMode::Chord);
            let from = heading - FRAC_PI_2;
            self.arc(segment.b, radii, from, from + PI, style)?;
        }
        Ok(())
    }

    /// Fills the outer gap where `incoming` ends and `outgoing` starts.
    fn join(&mut self, incoming: &Segment, outgoing: &Segment, style: &PolylineStyle) -> GraphicsResult<()> {
        let half = style.thickness * 0.5;
        let pivot = incoming.b;
        let turn = incoming.dir.cross(outgoing.dir);
        let straight = turn.abs() < COLLINEAR_EPSILON;

        if straight && incoming.dir.dot(outgoing.dir) > 0.0 {
            return Ok(());
        }

        // The body offsets are ±perp; the outer side is opposite the turn.
        let side = if turn > 0.0 { -1.0 } else { 1.0 };
        let n_in = incoming.dir.perp() * (half * side);
        let n_out = outgoing.dir.perp() * (half * side);
        let color = style.color;

        match style.join {
            LineJoin::Round => {
                let from = n_in.angle();
                let mut sweep = n_out.angle() - from;
                if sweep > PI {
                    sweep -= TAU;
                } else if sweep < -PI {
                    sweep += TAU;
                }
                let segments =
                    ((round_cap_points(style.thickness) as f32 * sweep.abs() / PI).ceil() as usize).max(2);
                self.wedge(pivot, half, from, sweep, segments, color)
            }
            // A full reversal has no outer corner to cut.
            _ if straight => Ok(()),
            LineJoin::Miter => {
                let Some(bisector) = (n_in + n_out).try_normalize() else {
                    return self.bevel(pivot, n_in, n_out, color);
                };
                let cos_half_angle = bisector.dot(n_in) / half;
                let length = half / cos_half_angle;
                if !length.is_finite() || length > style.miter_limit * half {
                    return self.bevel(pivot, n_in, n_out, color);
                }
                self.quad_vertices([
                    Vertex::new(pivot, color),
                    Vertex::new(pivot + n_in, color),
                    Vertex::new(pivot + bisector * length, color),
                    Vertex::new(pivot + n_out, color),
                ])
            }
            LineJoin::Bevel => self.bevel(pivot, n_in, n_out, color),
        }
    }

    fn bevel(&mut self, pivot: Vec2, n_in: Vec2, n_out: Vec2, color: ColorRgba) -> GraphicsResult<()> {
        self.triangle(pivot, pivot + n_in, pivot + n_out, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn positions(batch: &ShapeBatch) -> Vec<Vec2> {
        batch.vertices().iter().map(Vertex::position).collect()
    }

    /// Distance from `p` to the infinite line through `a` with direction `dir`.
    fn distance_to_line(p: Vec2, a: Vec2, dir: Vec2) -> f32 {
        let dir = dir.try_normalize().unwrap();
        (p - a).cross(dir).abs()
    }

    // ── line ──────────────────────────────────────────────────────────────

    #[test]
    fn butt_line_is_exactly_thickness_wide() {
        let mut batch = ShapeBatch::new();
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(7.0, 10.0);
        batch.line(a, b, LineStyle::default().with_thickness(3.0)).unwrap();

        assert_eq!(batch.vertex_count(), 4);
        assert_eq!(batch.indices(), &[0, 1, 2, 2, 3, 0]);

        let pos = positions(&batch);
        let dir = b - a;
        // Edge 0→1 and edge 2→3 are parallel to a→b.
        assert!(approx(pos[0].cross(dir) - pos[1].cross(dir), 0.0));
        assert!(approx(distance_to_line(pos[3], pos[0], dir), 3.0));
        assert!(approx(distance_to_line(pos[2], pos[1], dir), 3.0));
    }

    #[test]
    fn butt_line_ends_at_endpoints() {
        let mut batch = ShapeBatch::new();
        batch
            .line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), LineStyle::default().with_thickness(2.0))
            .unwrap();
        assert_eq!(
            positions(&batch),
            vec![
                Vec2::new(0.0, -1.0),
                Vec2::new(10.0, -1.0),
                Vec2::new(10.0, 1.0),
                Vec2::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn square_cap_extends_by_half_thickness() {
        let mut batch = ShapeBatch::new();
        let style = LineStyle::default().with_thickness(4.0).with_cap(LineCap::Square);
        batch.line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), style).unwrap();

        let xs: Vec<f32> = positions(&batch).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-2.0, 12.0, 12.0, -2.0]);
    }

    #[test]
    fn round_cap_adds_semicircles() {
        let mut batch = ShapeBatch::new();
        let style = LineStyle::default().with_thickness(2.0).with_cap(LineCap::Round);
        batch.line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), style).unwrap();

        let cap_points = round_cap_points(2.0);
        assert_eq!(cap_points, 6);
        assert_eq!(batch.vertex_count(), 4 + 2 * cap_points);

        let pos = positions(&batch);
        let start_cap = &pos[4..4 + cap_points];
        let end_cap = &pos[4 + cap_points..];
        assert!(start_cap.iter().all(|p| p.x <= 1e-4 && approx(p.length(), 1.0)));
        assert!(end_cap.iter().all(|p| p.x >= 10.0 - 1e-4 && approx((*p - Vec2::new(10.0, 0.0)).length(), 1.0)));
        // Body is not extended.
        assert_eq!(pos[0].x, 0.0);
        assert_eq!(pos[1].x, 10.0);
    }

    #[test]
    fn round_cap_point_count_scales_with_thickness() {
        assert_eq!(round_cap_points(20.0), 31);
    }

    #[test]
    fn line_colors_follow_endpoints() {
        let mut batch = ShapeBatch::new();
        let red = ColorRgba::rgb(1.0, 0.0, 0.0);
        let blue = ColorRgba::rgb(0.0, 0.0, 1.0);
        let style = LineStyle::default().with_colors(red, blue);
        batch.line(Vec2::zero(), Vec2::new(5.0, 5.0), style).unwrap();

        let colors: Vec<ColorRgba> = batch.vertices().iter().map(Vertex::color).collect();
        assert_eq!(colors, vec![red, blue, blue, red]);
    }

    #[test]
    fn degenerate_line_adds_nothing() {
        let mut batch = ShapeBatch::new();
        let p = Vec2::new(3.0, 3.0);
        batch
            .line(p, p, LineStyle::default().with_cap(LineCap::Round))
            .unwrap();
        assert_eq!(batch.vertex_count(), 0);
        assert_eq!(batch.index_count(), 0);
    }

    #[test]
    fn line_follows_transform() {
        let mut batch = ShapeBatch::new();
        batch.translate(Vec2::new(0.0, 100.0));
        batch
            .line(Vec2::zero(), Vec2::new(10.0, 0.0), LineStyle::default().with_thickness(2.0))
            .unwrap();
        assert_eq!(positions(&batch)[0], Vec2::new(0.0, 99.0));
    }

    // ── polyline ──────────────────────────────────────────────────────────

    fn elbow() -> [Vec2; 3] {
        [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)]
    }

    #[test]
    fn polyline_bevel_adds_one_triangle() {
        let mut batch = ShapeBatch::new();
        let style = PolylineStyle::solid(2.0, ColorRgba::WHITE).with_join(LineJoin::Bevel);
        batch.polyline(&elbow(), style).unwrap();

        // Two bodies and one bevel triangle.
        assert_eq!(batch.vertex_count(), 4 + 4 + 3);
        let pos = positions(&batch);
        // Right turn on screen: the outer corner is up and to the right.
        assert_eq!(pos[8], Vec2::new(10.0, 0.0));
        assert_eq!(pos[9], Vec2::new(10.0, -1.0));
        assert_eq!(pos[10], Vec2::new(11.0, 0.0));
    }

    #[test]
    fn polyline_miter_reaches_corner() {
        let mut batch = ShapeBatch::new();
        let style = PolylineStyle::solid(2.0, ColorRgba::WHITE).with_join(LineJoin::Miter);
        batch.polyline(&elbow(), style).unwrap();

        assert_eq!(batch.vertex_count(), 4 + 4 + 4);
        let tip = positions(&batch)[10];
        assert!(approx(tip.x, 11.0) && approx(tip.y, -1.0));
    }

    #[test]
    fn polyline_sharp_miter_falls_back_to_bevel() {
        let mut batch = ShapeBatch::new();
        let spike = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 0.5)];
        let style = PolylineStyle::solid(2.0, ColorRgba::WHITE).with_miter_limit(2.0);
        batch.polyline(&spike, style).unwrap();
        assert_eq!(batch.vertex_count(), 4 + 4 + 3);
    }

    #[test]
    fn polyline_round_join_fans_around_pivot() {
        let mut batch = ShapeBatch::new();
        let style = PolylineStyle::solid(2.0, ColorRgba::WHITE).with_join(LineJoin::Round);
        batch.polyline(&elbow(), style).unwrap();

        let pos = positions(&batch);
        let wedge = &pos[8..];
        assert_eq!(wedge[0], Vec2::new(10.0, 0.0));
        assert!(wedge[1..]
            .iter()
            .all(|p| approx((*p - Vec2::new(10.0, 0.0)).length(), 1.0)));
        assert!(wedge[1..].iter().all(|p| p.x >= 10.0 - 1e-4 && p.y <= 1e-4));
    }

    #[test]
    fn polyline_straight_run_has_no_join() {
        let mut batch = ShapeBatch::new();
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0), Vec2::new(10.0, 0.0)];
        batch.polyline(&pts, PolylineStyle::default()).unwrap();
        assert_eq!(batch.vertex_count(), 8);
    }

    #[test]
    fn polyline_caps_only_at_ends() {
        let mut batch = ShapeBatch::new();
        let style = PolylineStyle::solid(2.0, ColorRgba::WHITE)
            .with_join(LineJoin::Bevel)
            .with_cap(LineCap::Square);
        batch.polyline(&elbow(), style).unwrap();

        let pos = positions(&batch);
        // First body starts one unit before the first point, ends flush at the pivot.
        assert_eq!(pos[0], Vec2::new(-1.0, -1.0));
        assert_eq!(pos[1], Vec2::new(10.0, -1.0));
        // Second body starts flush at the pivot, ends one unit past the last point.
        assert_eq!(pos[4].y, 0.0);
        assert_eq!(pos[5].y, 11.0);
    }

    #[test]
    fn polyline_skips_duplicates_and_short_input() {
        let mut batch = ShapeBatch::new();
        batch
            .polyline(&[Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)], PolylineStyle::default())
            .unwrap();
        assert_eq!(batch.vertex_count(), 0);

        let pts = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0)];
        batch.polyline(&pts, PolylineStyle::default()).unwrap();
        assert_eq!(batch.vertex_count(), 4);
    }
}
