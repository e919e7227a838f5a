use super::{ShapeTemplate, ShapeType};
use crate::geometry::{circle_points, UnitPoint};

pub const DEFAULT_CIRCLE_SEGMENTS: usize = 32;

const CIRCLE_RADIUS: f64 = 0.15;

/// Built-in catalog, in display order.
pub fn builtin_templates(circle_segments: usize) -> Vec<ShapeTemplate> {
    vec![
        ShapeTemplate::new(
            1,
            ShapeType::Triangle,
            vec![
                UnitPoint::new(0.5, 0.3),
                UnitPoint::new(0.68, 0.62),
                UnitPoint::new(0.32, 0.62),
            ],
        ),
        ShapeTemplate::new(
            2,
            ShapeType::Square,
            vec![
                UnitPoint::new(0.38, 0.38),
                UnitPoint::new(0.62, 0.38),
                UnitPoint::new(0.62, 0.62),
                UnitPoint::new(0.38, 0.62),
            ],
        ),
        ShapeTemplate::new(
            3,
            ShapeType::Rectangle,
            vec![
                UnitPoint::new(0.3, 0.42),
                UnitPoint::new(0.7, 0.42),
                UnitPoint::new(0.7, 0.58),
                UnitPoint::new(0.3, 0.58),
            ],
        ),
        ShapeTemplate::new(
            4,
            ShapeType::Circle,
            circle_points(
                0.5,
                0.5,
                CIRCLE_RADIUS,
                circle_segments.max(super::MIN_SHAPE_POINTS),
                UnitPoint::new,
            ),
        ),
    ]
}

pub fn template_by_shape(shape_type: &ShapeType, circle_segments: usize) -> Option<ShapeTemplate> {
    builtin_templates(circle_segments)
        .into_iter()
        .find(|template| &template.shape_type == shape_type)
}
