//! HSV color math used by the wheel renderer and the pointer read-out.

use crate::geometry::{AbsolutePoint, Color};

pub const HUE_RANGE: f64 = 360.0;
pub const PERCENT_MAX: f64 = 100.0;

const SECTOR_DEGREES: f64 = 60.0;
const HUE_UP_OFFSET_DEGREES: f64 = 90.0;

/// Hue and saturation at a surface position, with the raw distance from center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueSat {
    pub hue: f64,
    pub saturation: f64,
    pub distance: f64,
}

/// Converts hue (degrees), saturation and value (percent) to 8-bit RGB.
///
/// Sectors are chosen with `floor`, so a hue sitting exactly on a sector
/// boundary always starts the sector above it. Both neighbours evaluate to
/// the same pure color there, so the choice never shows.
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Color {
    let hue = normalize_hue(hue);
    let s = saturation.clamp(0.0, PERCENT_MAX) / PERCENT_MAX;
    let v = value.clamp(0.0, PERCENT_MAX) / PERCENT_MAX;

    let position = hue / SECTOR_DEGREES;
    let sector = position.floor();
    let fraction = position - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - fraction * s);
    let t = v * (1.0 - (1.0 - fraction) * s);

    let (r, g, b) = match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Color::new(channel_to_u8(r), channel_to_u8(g), channel_to_u8(b))
}

// rem_euclid can round tiny negative angles up to exactly 360.
fn normalize_hue(hue: f64) -> f64 {
    let wrapped = hue.rem_euclid(HUE_RANGE);
    if wrapped >= HUE_RANGE {
        0.0
    } else {
        wrapped
    }
}

fn channel_to_u8(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Hue 0 points up and grows clockwise on a y-down surface.
/// `distance` is unclamped so callers can tell when a point lies off the wheel.
pub fn cartesian_to_hue_sat(
    x: f64,
    y: f64,
    center_x: f64,
    center_y: f64,
    max_radius: f64,
) -> HueSat {
    let delta_x = x - center_x;
    let delta_y = y - center_y;
    let distance = delta_x.hypot(delta_y);
    let hue = normalize_hue(delta_y.atan2(delta_x).to_degrees() + HUE_UP_OFFSET_DEGREES);
    let saturation = if max_radius > 0.0 {
        (distance / max_radius * PERCENT_MAX).clamp(0.0, PERCENT_MAX)
    } else {
        0.0
    };
    HueSat {
        hue,
        saturation,
        distance,
    }
}

/// Color read-out for the pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorInfo {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
    pub color: Color,
    pub x: f64,
    pub y: f64,
}

impl ColorInfo {
    /// `None` when `point` lies outside the wheel radius.
    pub fn sample(
        point: AbsolutePoint,
        center: AbsolutePoint,
        max_radius: f64,
        value: f64,
    ) -> Option<Self> {
        let hue_sat = cartesian_to_hue_sat(point.x, point.y, center.x, center.y, max_radius);
        if hue_sat.distance > max_radius {
            return None;
        }
        Some(Self {
            hue: hue_sat.hue,
            saturation: hue_sat.saturation,
            value,
            color: hsv_to_rgb(hue_sat.hue, hue_sat.saturation, value),
            x: point.x,
            y: point.y,
        })
    }

    pub fn hex(&self) -> String {
        self.color.hex()
    }
}
