//! Radial HSV wheel renderer.
//!
//! The wheel is swept as `sector_count` wedges. Each wedge is filled with a
//! radial gradient running from saturation 0 at the center to saturation 100
//! at the rim, sampled from [`hsv_to_rgb`] at the wedge's hue and the global
//! value. Wedges are widened by a small angular overlap so neighbours leave
//! no seams.

use tiny_skia::{
    FillRule, GradientStop, Paint, PathBuilder, Point, RadialGradient, SpreadMode, Stroke,
    Transform,
};

use crate::color::{hsv_to_rgb, ColorInfo, HUE_RANGE, PERCENT_MAX};
use crate::geometry::{AbsolutePoint, SurfaceSize};
use crate::surface::RasterSurface;

pub const DEFAULT_SECTOR_COUNT: u32 = 360;
pub const DEFAULT_GRADIENT_STEPS: u32 = 20;
pub const DEFAULT_SECTOR_OVERLAP_DEGREES: f64 = 0.1;

const WHEEL_MARGIN: f64 = 2.0;
const OUTLINE_WIDTH: f32 = 1.0;
const OUTLINE_RGBA: (u8, u8, u8, u8) = (64, 64, 64, 255);
const MAX_ARC_STEP_DEGREES: f64 = 0.5;
const HUE_UP_OFFSET_DEGREES: f64 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelOptions {
    pub sector_count: u32,
    pub gradient_steps: u32,
    pub sector_overlap_degrees: f64,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            sector_count: DEFAULT_SECTOR_COUNT,
            gradient_steps: DEFAULT_GRADIENT_STEPS,
            sector_overlap_degrees: DEFAULT_SECTOR_OVERLAP_DEGREES,
        }
    }
}

/// Center and rim radius of the wheel for a given surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub center: AbsolutePoint,
    pub max_radius: f64,
}

impl WheelGeometry {
    pub fn for_size(size: SurfaceSize) -> Self {
        let width = f64::from(size.width);
        let height = f64::from(size.height);
        Self {
            center: AbsolutePoint::new(width / 2.0, height / 2.0),
            max_radius: (width.min(height) / 2.0 - WHEEL_MARGIN).max(0.0),
        }
    }

    pub fn color_at(&self, point: AbsolutePoint, value: f64) -> Option<ColorInfo> {
        if self.max_radius <= 0.0 {
            return None;
        }
        ColorInfo::sample(point, self.center, self.max_radius, value)
    }

    fn rim_point(&self, degrees: f64) -> Point {
        let radians = degrees.to_radians();
        Point::from_xy(
            (self.center.x + self.max_radius * radians.cos()) as f32,
            (self.center.y + self.max_radius * radians.sin()) as f32,
        )
    }
}

/// Clears the surface and paints a full wheel at the given value (0..=100).
pub fn draw_color_wheel(surface: &mut RasterSurface, value: f64, options: &WheelOptions) {
    let geometry = WheelGeometry::for_size(surface.size());
    let Some(pixmap) = surface.pixmap_mut() else {
        return;
    };
    pixmap.fill(tiny_skia::Color::TRANSPARENT);
    if geometry.max_radius <= 0.0 {
        return;
    }

    let value = value.clamp(0.0, PERCENT_MAX);
    let sector_count = options.sector_count.max(1);
    let gradient_steps = options.gradient_steps.max(1);
    let sector_degrees = HUE_RANGE / f64::from(sector_count);
    let center = Point::from_xy(geometry.center.x as f32, geometry.center.y as f32);

    for sector in 0..sector_count {
        let hue = f64::from(sector) * sector_degrees;
        let start = hue + HUE_UP_OFFSET_DEGREES - options.sector_overlap_degrees;
        let end = hue + sector_degrees + HUE_UP_OFFSET_DEGREES + options.sector_overlap_degrees;

        let Some(wedge) = wedge_path(&geometry, start, end) else {
            continue;
        };
        let stops = (0..=gradient_steps)
            .map(|step| {
                let position = f64::from(step) / f64::from(gradient_steps);
                let rgb = hsv_to_rgb(hue, position * PERCENT_MAX, value);
                GradientStop::new(
                    position as f32,
                    tiny_skia::Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255),
                )
            })
            .collect::<Vec<_>>();
        let Some(shader) = RadialGradient::new(
            center,
            center,
            geometry.max_radius as f32,
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            continue;
        };
        // Anti-aliased wedge edges would stack partial coverage into
        // translucent seams; the overlap already hides the gaps.
        let paint = Paint {
            shader,
            anti_alias: false,
            ..Paint::default()
        };
        pixmap.fill_path(
            &wedge,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    if let Some(outline) = PathBuilder::from_circle(
        geometry.center.x as f32,
        geometry.center.y as f32,
        geometry.max_radius as f32,
    ) {
        let mut paint = Paint::default();
        let (r, g, b, a) = OUTLINE_RGBA;
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        let stroke = Stroke {
            width: OUTLINE_WIDTH,
            ..Stroke::default()
        };
        pixmap.stroke_path(&outline, &paint, &stroke, Transform::identity(), None);
    }
    tracing::trace!(sector_count, value, "color wheel painted");
}

fn wedge_path(geometry: &WheelGeometry, start: f64, end: f64) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    builder.move_to(geometry.center.x as f32, geometry.center.y as f32);
    // Coarse sectors need more chords or the rim sags into a polygon.
    let segments = ((end - start).abs() / MAX_ARC_STEP_DEGREES).ceil().max(1.0) as u32;
    for segment in 0..=segments {
        let degrees = start + (end - start) * f64::from(segment) / f64::from(segments);
        let rim = geometry.rim_point(degrees);
        builder.line_to(rim.x, rim.y);
    }
    builder.close();
    builder.finish()
}
