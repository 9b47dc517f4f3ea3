//! The shapes drawn every frame.

use std::f32::consts::{FRAC_PI_2, TAU};

use marduk_canvas::{
    ArcMode, ArcStyle, ColorRgba, GraphicsError, GraphicsResult, LineCap, LineJoin, LineStyle,
    Mat3, PolylineStyle, Rect, ShapeBatch, Vec2, Viewport,
};

const PANEL: ColorRgba = ColorRgba::new(0.13, 0.14, 0.18, 1.0);
const ACCENT: ColorRgba = ColorRgba::new(0.95, 0.55, 0.2, 1.0);
const TEAL: ColorRgba = ColorRgba::new(0.2, 0.75, 0.7, 1.0);
const GLASS: ColorRgba = ColorRgba::new(0.6, 0.7, 1.0, 0.35);

/// Builds one frame at time `t` (seconds) for a target of `size` pixels.
pub fn paint(batch: &mut ShapeBatch, t: f32, size: Viewport) -> GraphicsResult<()> {
    batch.rectangle(Rect::new(16.0, 16.0, size.width - 32.0, size.height - 32.0), PANEL)?;

    // `rotate` replaces the matrix, so it goes first. The follow-up
    // translation is applied before the rotation; pre-rotate it by -t to land
    // the pinwheel's hub on `hub`.
    let hub = Vec2::new(size.width - 140.0, 140.0);
    batch.transform(|b| {
        b.rotate(t);
        b.translate(Mat3::rotation(-t).transform_point(hub));
        for i in 0..4 {
            let a = i as f32 * FRAC_PI_2;
            b.triangle(
                Vec2::zero(),
                Vec2::from_angle(a) * 60.0,
                Vec2::from_angle(a + 0.5) * 60.0,
                ACCENT,
            )?;
        }
        Ok::<(), GraphicsError>(())
    })?;
    batch.transform(|b| {
        // Pinwheel copy placed with a plain translation.
        b.translate(Vec2::new(140.0, 140.0));
        b.scale(Vec2::splat(0.5));
        for i in 0..4 {
            let a = i as f32 * FRAC_PI_2 + t;
            b.triangle(
                Vec2::zero(),
                Vec2::from_angle(a) * 120.0,
                Vec2::from_angle(a + 0.5) * 120.0,
                TEAL,
            )?;
        }
        Ok::<(), GraphicsError>(())
    })?;

    let center = Vec2::new(size.width * 0.5, size.height * 0.5);
    batch.circle(center, 48.0, ArcStyle::filled(GLASS))?;
    batch.circle(center, 6.0, ArcStyle::default().with_color(ACCENT).with_points(12))?;
    batch.arc(
        center + Vec2::new(140.0, 0.0),
        Vec2::new(60.0, 40.0),
        0.0,
        (t % TAU).max(0.1),
        ArcStyle::filled(ACCENT).with_points(24),
    )?;
    batch.arc(
        center - Vec2::new(140.0, 0.0),
        Vec2::splat(40.0),
        0.0,
        3.0,
        ArcStyle::filled(TEAL).with_mode(ArcMode::Chord),
    )?;

    // Baseline under the cap samples.
    batch.line(
        Vec2::new(40.0, size.height - 150.0),
        Vec2::new(280.0, size.height - 150.0),
        LineStyle::solid(2.0, ColorRgba::from_u8(96, 104, 128, 255)),
    )?;

    let caps = [LineCap::Butt, LineCap::Square, LineCap::Round];
    for (i, cap) in caps.into_iter().enumerate() {
        let y = size.height - 120.0 + i as f32 * 30.0;
        batch.line(
            Vec2::new(60.0, y),
            Vec2::new(260.0, y),
            LineStyle::default()
                .with_thickness(12.0)
                .with_cap(cap)
                .with_colors(ACCENT, TEAL),
        )?;
    }

    let joins = [LineJoin::Miter, LineJoin::Bevel, LineJoin::Round];
    for (i, join) in joins.into_iter().enumerate() {
        let x = size.width - 320.0 + i as f32 * 100.0;
        let zigzag = [
            Vec2::new(x, size.height - 60.0),
            Vec2::new(x + 30.0, size.height - 140.0),
            Vec2::new(x + 60.0, size.height - 60.0),
        ];
        batch.polyline(
            &zigzag,
            PolylineStyle::solid(10.0, ColorRgba::WHITE).with_join(join),
        )?;
    }

    for i in 0..12 {
        batch.point(Vec2::new(40.0 + i as f32 * 12.0, 40.0), 4.0, ColorRgba::WHITE)?;
    }

    Ok(())
}
