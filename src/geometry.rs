//! Point types for the three coordinate spaces and the polygon math shared by
//! the editor, the compositor and persistence.
//!
//! * [`UnitPoint`] lives in the `[0, 1] x [0, 1]` template space.
//! * [`AbsolutePoint`] is a pixel position on the current raster surface.
//! * [`RelativePoint`] is normalised to the surface center and half-extent,
//!   each axis in `[-1, 1]`; this is what gets persisted.
//!
//! The only crossings between spaces are [`unit_to_absolute`], [`to_absolute`]
//! and [`to_relative`].

use serde::{Deserialize, Serialize};

/// Default distance, in surface pixels, within which a vertex can be picked.
pub const DEFAULT_PICK_RADIUS: f64 = 12.0;

const RAY_CAST_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitPoint {
    pub x: f64,
    pub y: f64,
}

impl UnitPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsolutePoint {
    pub x: f64,
    pub y: f64,
}

impl AbsolutePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn translated(self, delta_x: f64, delta_y: f64) -> Self {
        Self::new(self.x + delta_x, self.y + delta_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativePoint {
    pub x: f64,
    pub y: f64,
}

impl RelativePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel size of a raster surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn half_extent(self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Arithmetic mean of the vertices.
///
/// NaN for an empty slice; callers keep shapes non-empty.
pub fn centroid(points: &[AbsolutePoint]) -> AbsolutePoint {
    let count = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(x, y), point| (x + point.x, y + point.y));
    AbsolutePoint::new(sum_x / count, sum_y / count)
}

/// Scales every point about the centroid of `points`. A factor of exactly 1
/// returns the points bit-for-bit.
pub fn scale_points(points: &[AbsolutePoint], scale: f64) -> Vec<AbsolutePoint> {
    if points.is_empty() || scale == 1.0 {
        return points.to_vec();
    }
    let center = centroid(points);
    points
        .iter()
        .map(|point| {
            AbsolutePoint::new(
                center.x + (point.x - center.x) * scale,
                center.y + (point.y - center.y) * scale,
            )
        })
        .collect()
}

/// Even-odd ray casting.
///
/// Edges are half-open, so for an axis-aligned square the left and top edges
/// classify as inside and the right and bottom edges as outside.
pub fn point_in_polygon(x: f64, y: f64, points: &[AbsolutePoint]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut previous = points[points.len() - 1];
    for &current in points {
        if (current.y > y) != (previous.y > y) {
            let crossing_x = current.x
                + (y - current.y) * (previous.x - current.x)
                    / (previous.y - current.y + RAY_CAST_EPSILON);
            if x < crossing_x {
                inside = !inside;
            }
        }
        previous = current;
    }
    inside
}

/// Index of the closest vertex within `pick_radius`, first index on ties.
pub fn nearest_vertex(x: f64, y: f64, points: &[AbsolutePoint], pick_radius: f64) -> Option<usize> {
    let query = AbsolutePoint::new(x, y);
    let mut best: Option<(usize, f64)> = None;
    for (index, point) in points.iter().enumerate() {
        let distance = point.distance_to(query);
        if distance > pick_radius {
            continue;
        }
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

pub fn unit_to_absolute(points: &[UnitPoint], size: SurfaceSize) -> Vec<AbsolutePoint> {
    let width = f64::from(size.width);
    let height = f64::from(size.height);
    points
        .iter()
        .map(|point| AbsolutePoint::new(point.x * width, point.y * height))
        .collect()
}

pub fn to_absolute(points: &[RelativePoint], size: SurfaceSize) -> Vec<AbsolutePoint> {
    let (half_width, half_height) = size.half_extent();
    points
        .iter()
        .map(|point| {
            AbsolutePoint::new(
                half_width + point.x * half_width,
                half_height + point.y * half_height,
            )
        })
        .collect()
}

/// Inverse of [`to_absolute`]. A zero-sized surface maps everything to the origin.
pub fn to_relative(points: &[AbsolutePoint], size: SurfaceSize) -> Vec<RelativePoint> {
    if size.is_empty() {
        return vec![RelativePoint::new(0.0, 0.0); points.len()];
    }
    let (half_width, half_height) = size.half_extent();
    points
        .iter()
        .map(|point| {
            RelativePoint::new(
                (point.x - half_width) / half_width,
                (point.y - half_height) / half_height,
            )
        })
        .collect()
}

/// `segments`-gon approximating a circle, starting at angle zero.
pub fn circle_points<P>(
    center_x: f64,
    center_y: f64,
    radius: f64,
    segments: usize,
    make: impl Fn(f64, f64) -> P,
) -> Vec<P> {
    (0..segments)
        .map(|index| {
            let angle = std::f64::consts::TAU * index as f64 / segments as f64;
            make(
                center_x + radius * angle.cos(),
                center_y + radius * angle.sin(),
            )
        })
        .collect()
}

/// Shoelace area; positive for clockwise rings in y-down surface space.
pub fn signed_area(points: &[AbsolutePoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    let mut previous = points[points.len() - 1];
    for &current in points {
        twice_area += previous.x * current.y - current.x * previous.y;
        previous = current;
    }
    twice_area / 2.0
}
