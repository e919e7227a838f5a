//! Mask shapes: the read-only template catalog and live, editable instances.

mod catalog;
mod compositor;

use serde::{Deserialize, Serialize};

use crate::geometry::{
    centroid, nearest_vertex, point_in_polygon, scale_points, AbsolutePoint, UnitPoint,
};

pub use catalog::{builtin_templates, template_by_shape, DEFAULT_CIRCLE_SEGMENTS};
pub use compositor::{composite_masks, MaskStyle, DEFAULT_DIM_ALPHA};

/// Minimum vertex count for a shape that encloses area.
pub const MIN_SHAPE_POINTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeType {
    Triangle,
    Square,
    Rectangle,
    Circle,
    Other(String),
}

impl ShapeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Triangle => "triangle",
            Self::Square => "square",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Other(tag) => tag,
        }
    }

    /// Localisation key for the shape's display name.
    pub fn label_key(&self) -> String {
        format!("shape.{}", self.as_str())
    }

    /// Circles are polygon approximations; moving single vertices would
    /// break the illusion, so only whole-shape moves and scaling apply.
    pub fn allows_vertex_edit(&self) -> bool {
        !matches!(self, Self::Circle)
    }
}

impl From<String> for ShapeType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "triangle" => Self::Triangle,
            "square" => Self::Square,
            "rectangle" => Self::Rectangle,
            "circle" => Self::Circle,
            _ => Self::Other(tag),
        }
    }
}

impl From<ShapeType> for String {
    fn from(shape_type: ShapeType) -> Self {
        shape_type.as_str().to_string()
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTemplate {
    pub id: u32,
    pub shape_type: ShapeType,
    pub points: Vec<UnitPoint>,
}

impl ShapeTemplate {
    pub fn new(id: u32, shape_type: ShapeType, points: Vec<UnitPoint>) -> Self {
        Self {
            id,
            shape_type,
            points,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.points.len() >= MIN_SHAPE_POINTS
    }
}

/// A live shape on the surface.
///
/// `original_points` is the unscaled baseline in absolute space; what is drawn
/// and hit-tested is always the baseline scaled by `scale` about its own centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskInstance {
    pub id: u64,
    pub shape_type: ShapeType,
    original_points: Vec<AbsolutePoint>,
    scale: f64,
}

impl MaskInstance {
    pub fn new(id: u64, shape_type: ShapeType, original_points: Vec<AbsolutePoint>) -> Self {
        Self {
            id,
            shape_type,
            original_points,
            scale: 1.0,
        }
    }

    pub fn original_points(&self) -> &[AbsolutePoint] {
        &self.original_points
    }

    pub const fn scale(&self) -> f64 {
        self.scale
    }

    pub(crate) fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn scaled_points(&self) -> Vec<AbsolutePoint> {
        scale_points(&self.original_points, self.scale)
    }

    pub fn is_degenerate(&self) -> bool {
        self.original_points.len() < MIN_SHAPE_POINTS
    }

    pub fn contains(&self, point: AbsolutePoint) -> bool {
        point_in_polygon(point.x, point.y, &self.scaled_points())
    }

    /// Vertex of the scaled shape within `pick_radius` of `point`, if the
    /// shape permits vertex editing.
    pub fn editable_vertex_at(&self, point: AbsolutePoint, pick_radius: f64) -> Option<usize> {
        if !self.shape_type.allows_vertex_edit() {
            return None;
        }
        nearest_vertex(point.x, point.y, &self.scaled_points(), pick_radius)
    }

    /// Translation commutes with scaling about the centroid, so the delta
    /// goes straight onto the baseline.
    pub fn translate(&mut self, delta_x: f64, delta_y: f64) {
        for point in &mut self.original_points {
            *point = point.translated(delta_x, delta_y);
        }
    }

    /// Places scaled vertex `index` at `target` and back-solves the baseline
    /// so that scaling it by the current factor reproduces the edited shape.
    ///
    /// The inverse scale is taken about the edited shape's centroid, so later
    /// scale changes re-anchor around the shape as it now stands.
    pub fn move_vertex(&mut self, index: usize, target: AbsolutePoint) -> bool {
        if index >= self.original_points.len() {
            return false;
        }
        if self.scale == 1.0 {
            self.original_points[index] = target;
            return true;
        }

        let mut edited = self.scaled_points();
        edited[index] = target;
        let center = centroid(&edited);
        let inverse = 1.0 / self.scale;
        self.original_points = edited
            .iter()
            .map(|point| {
                AbsolutePoint::new(
                    center.x + (point.x - center.x) * inverse,
                    center.y + (point.y - center.y) * inverse,
                )
            })
            .collect();
        true
    }

    pub(crate) fn map_points(&mut self, map: impl Fn(&[AbsolutePoint]) -> Vec<AbsolutePoint>) {
        self.original_points = map(&self.original_points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn square_mask() -> MaskInstance {
        MaskInstance::new(
            1,
            ShapeType::Square,
            vec![
                AbsolutePoint::new(100.0, 100.0),
                AbsolutePoint::new(300.0, 100.0),
                AbsolutePoint::new(300.0, 300.0),
                AbsolutePoint::new(100.0, 300.0),
            ],
        )
    }

    fn assert_close(left: AbsolutePoint, right: AbsolutePoint) {
        assert!(
            (left.x - right.x).abs() < TOLERANCE && (left.y - right.y).abs() < TOLERANCE,
            "{left:?} != {right:?}"
        );
    }

    #[test]
    fn shape_type_tags_round_trip_through_strings() {
        for tag in ["triangle", "square", "rectangle", "circle", "star"] {
            let shape_type = ShapeType::from(tag.to_string());
            assert_eq!(String::from(shape_type.clone()), tag);
            assert_eq!(shape_type.label_key(), format!("shape.{tag}"));
        }
        assert_eq!(
            ShapeType::from("star".to_string()),
            ShapeType::Other("star".to_string())
        );
    }

    #[test]
    fn only_circles_disallow_vertex_edits() {
        assert!(!ShapeType::Circle.allows_vertex_edit());
        assert!(ShapeType::Triangle.allows_vertex_edit());
        assert!(ShapeType::Other("hexagon".to_string()).allows_vertex_edit());
    }

    #[test]
    fn scaled_points_follow_scale_about_centroid() {
        let mut mask = square_mask();
        mask.set_scale(0.5);
        let scaled = mask.scaled_points();
        assert_close(scaled[0], AbsolutePoint::new(150.0, 150.0));
        assert_close(scaled[2], AbsolutePoint::new(250.0, 250.0));
        assert_eq!(mask.original_points()[0], AbsolutePoint::new(100.0, 100.0));
    }

    #[test]
    fn hit_tests_use_scaled_shape() {
        let mut mask = square_mask();
        mask.set_scale(0.5);
        assert!(!mask.contains(AbsolutePoint::new(120.0, 120.0)));
        assert!(mask.contains(AbsolutePoint::new(200.0, 200.0)));
        assert_eq!(
            mask.editable_vertex_at(AbsolutePoint::new(155.0, 150.0), 12.0),
            Some(0)
        );
        assert_eq!(mask.editable_vertex_at(AbsolutePoint::new(100.0, 100.0), 12.0), None);
    }

    #[test]
    fn circle_vertices_are_never_editable() {
        let mut mask = square_mask();
        mask.shape_type = ShapeType::Circle;
        assert_eq!(mask.editable_vertex_at(AbsolutePoint::new(100.0, 100.0), 12.0), None);
    }

    #[test]
    fn translate_moves_baseline() {
        let mut mask = square_mask();
        mask.set_scale(1.5);
        mask.translate(10.0, -5.0);
        assert_eq!(mask.original_points()[0], AbsolutePoint::new(110.0, 95.0));
        assert_eq!(mask.scale(), 1.5);
    }

    #[test]
    fn move_vertex_at_unit_scale_edits_single_corner() {
        let mut mask = square_mask();
        assert!(mask.move_vertex(1, AbsolutePoint::new(320.0, 80.0)));
        assert_eq!(
            mask.original_points(),
            &[
                AbsolutePoint::new(100.0, 100.0),
                AbsolutePoint::new(320.0, 80.0),
                AbsolutePoint::new(300.0, 300.0),
                AbsolutePoint::new(100.0, 300.0),
            ]
        );
        assert_eq!(mask.scale(), 1.0);
    }

    #[test]
    fn move_vertex_under_scale_reconciles_baseline() {
        let mut mask = square_mask();
        mask.set_scale(0.5);
        let before = mask.scaled_points();

        assert!(mask.move_vertex(2, AbsolutePoint::new(270.0, 260.0)));
        let after = mask.scaled_points();

        assert_eq!(mask.scale(), 0.5);
        assert_close(after[2], AbsolutePoint::new(270.0, 260.0));
        for index in [0, 1, 3] {
            assert_close(after[index], before[index]);
        }
    }

    #[test]
    fn move_vertex_rejects_out_of_range_index() {
        let mut mask = square_mask();
        assert!(!mask.move_vertex(4, AbsolutePoint::new(0.0, 0.0)));
        assert_eq!(mask, square_mask());
    }
}
