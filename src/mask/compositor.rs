//! Spotlight compositing: dim everything outside the union of the masks and
//! outline each mask.
//!
//! Work happens on a scratch pixmap: fill it with the dim color, punch the
//! union of all mask rings out with `DestinationOut`, stroke the outlines,
//! then blend the scratch layer over the target once. Cutting and stroking on
//! the target directly would double-blend the outline edges.

use tiny_skia::{
    BlendMode, FillRule, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use super::MaskInstance;
use crate::geometry::{signed_area, AbsolutePoint};
use crate::surface::RasterSurface;

pub const DEFAULT_DIM_ALPHA: f32 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskStyle {
    pub dim_alpha: f32,
    pub outline_width: f32,
    pub outline_rgba: (u8, u8, u8, u8),
}

impl Default for MaskStyle {
    fn default() -> Self {
        Self {
            dim_alpha: DEFAULT_DIM_ALPHA,
            outline_width: 1.5,
            outline_rgba: (32, 32, 32, 230),
        }
    }
}

/// Composites the masks over whatever is already painted on `surface` and
/// returns how many rings were cut out. Masks with fewer than three points
/// contribute nothing.
pub fn composite_masks(
    surface: &mut RasterSurface,
    masks: &[MaskInstance],
    style: &MaskStyle,
) -> usize {
    let size = surface.size();
    let Some(target) = surface.pixmap_mut() else {
        return 0;
    };
    let Some(mut scratch) = Pixmap::new(size.width, size.height) else {
        return 0;
    };

    let dim_alpha = style.dim_alpha.clamp(0.0, 1.0);
    let dim = tiny_skia::Color::from_rgba(0.0, 0.0, 0.0, dim_alpha)
        .unwrap_or(tiny_skia::Color::BLACK);
    scratch.fill(dim);

    let rings = masks
        .iter()
        .filter_map(|mask| {
            let ring = oriented_ring(mask);
            if ring.is_none() {
                tracing::warn!(mask_id = mask.id, "skipping degenerate mask in compositor");
            }
            ring
        })
        .collect::<Vec<_>>();

    let mut union = PathBuilder::new();
    for ring in &rings {
        push_ring(&mut union, ring);
    }
    if let Some(union) = union.finish() {
        let mut cut = Paint::default();
        cut.set_color_rgba8(0, 0, 0, 255);
        cut.blend_mode = BlendMode::DestinationOut;
        cut.anti_alias = true;
        scratch.fill_path(&union, &cut, FillRule::Winding, Transform::identity(), None);
    }

    let mut outline = Paint::default();
    let (r, g, b, a) = style.outline_rgba;
    outline.set_color_rgba8(r, g, b, a);
    outline.anti_alias = true;
    let stroke = Stroke {
        width: style.outline_width,
        ..Stroke::default()
    };
    for ring in &rings {
        if let Some(path) = ring_path(ring) {
            scratch.stroke_path(&path, &outline, &stroke, Transform::identity(), None);
        }
    }

    target.draw_pixmap(
        0,
        0,
        scratch.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    rings.len()
}

// Every ring gets the same winding so the non-zero union never cancels where
// masks overlap.
fn oriented_ring(mask: &MaskInstance) -> Option<Vec<AbsolutePoint>> {
    if mask.is_degenerate() {
        return None;
    }
    let mut ring = mask.scaled_points();
    if ring
        .iter()
        .any(|point| !point.x.is_finite() || !point.y.is_finite())
    {
        return None;
    }
    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }
    Some(ring)
}

fn push_ring(builder: &mut PathBuilder, ring: &[AbsolutePoint]) {
    let Some((first, rest)) = ring.split_first() else {
        return;
    };
    builder.move_to(first.x as f32, first.y as f32);
    for point in rest {
        builder.line_to(point.x as f32, point.y as f32);
    }
    builder.close();
}

fn ring_path(ring: &[AbsolutePoint]) -> Option<Path> {
    let mut builder = PathBuilder::new();
    push_ring(&mut builder, ring);
    builder.finish()
}
