//! Optional shape arguments with documented defaults.

use crate::coords::ColorRgba;

/// How an arc's rim is closed.
///
/// Only `Pie` changes the fill geometry. `Open` and `Chord` fill the same
/// region; they differ only for outline rendering.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ArcMode {
    Open,
    Chord,
    /// Adds a center vertex and fans from it.
    #[default]
    Pie,
}

/// Options for `arc`, `ellipse` and `circle`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcStyle {
    /// Fill color. Default: white.
    pub color: ColorRgba,
    /// Number of rim samples. `None` picks the shape's default
    /// (16 for arcs, 32 for ellipses and circles).
    pub points: Option<usize>,
    /// Default: [`ArcMode::Pie`].
    pub mode: ArcMode,
}

impl Default for ArcStyle {
    fn default() -> Self {
        Self {
            color: ColorRgba::WHITE,
            points: None,
            mode: ArcMode::Pie,
        }
    }
}

impl ArcStyle {
    pub fn filled(color: ColorRgba) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: ColorRgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_points(mut self, points: usize) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_mode(mut self, mode: ArcMode) -> Self {
        self.mode = mode;
        self
    }
}

/// End cap of a line.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum LineCap {
    /// Ends flush with the endpoints.
    #[default]
    Butt,
    /// Extends each end by half the thickness.
    Square,
    /// Semicircle of radius `thickness / 2` at each end.
    Round,
}

/// Geometry filling the gap between consecutive polyline segments.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum LineJoin {
    /// Sharp corner; falls back to `Bevel` past the miter limit.
    #[default]
    Miter,
    /// Straight cut across the outer corner.
    Bevel,
    /// Circular wedge around the joint.
    Round,
}

/// Options for `line`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineStyle {
    /// Full width across the segment. Default: 1.0.
    pub thickness: f32,
    /// Default: [`LineCap::Butt`].
    pub cap: LineCap,
    /// Color at the start point. Default: white.
    pub color_a: ColorRgba,
    /// Color at the end point. Default: white.
    pub color_b: ColorRgba,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            cap: LineCap::Butt,
            color_a: ColorRgba::WHITE,
            color_b: ColorRgba::WHITE,
        }
    }
}

impl LineStyle {
    pub fn solid(thickness: f32, color: ColorRgba) -> Self {
        Self {
            thickness,
            color_a: color,
            color_b: color,
            ..Self::default()
        }
    }

    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Linear color ramp from the start point to the end point.
    pub fn with_colors(mut self, color_a: ColorRgba, color_b: ColorRgba) -> Self {
        self.color_a = color_a;
        self.color_b = color_b;
        self
    }
}

/// Options for `polyline`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PolylineStyle {
    /// Default: 1.0.
    pub thickness: f32,
    /// Default: [`LineJoin::Miter`].
    pub join: LineJoin,
    /// Applied at the first and last point only. Default: [`LineCap::Butt`].
    pub cap: LineCap,
    /// Default: white.
    pub color: ColorRgba,
    /// Longest allowed miter, in multiples of half the thickness. Default: 4.0.
    pub miter_limit: f32,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            join: LineJoin::Miter,
            cap: LineCap::Butt,
            color: ColorRgba::WHITE,
            miter_limit: 4.0,
        }
    }
}

impl PolylineStyle {
    pub fn solid(thickness: f32, color: ColorRgba) -> Self {
        Self {
            thickness,
            color,
            ..Self::default()
        }
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_miter_limit(mut self, miter_limit: f32) -> Self {
        self.miter_limit = miter_limit;
        self
    }
}
