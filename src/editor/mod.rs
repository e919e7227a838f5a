//! Interaction controller: owns the live masks, routes pointer gestures and
//! keeps the raster surface in sync with mask state.

mod operations;
mod pointer;

use thiserror::Error;

use crate::color::ColorInfo;
use crate::config::EngineConfig;
use crate::geometry::{AbsolutePoint, SurfaceSize};
use crate::mask::{builtin_templates, composite_masks, MaskInstance, MaskStyle, ShapeTemplate};
use crate::surface::{RasterSurface, SurfaceError};
use crate::wheel::{draw_color_wheel, WheelGeometry, WheelOptions};

pub use pointer::Hit;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaskError {
    #[error("at most {max} masks can be active at once")]
    CapacityExceeded { max: usize },
    #[error("template {template_id} has fewer than 3 points")]
    DegenerateTemplate { template_id: u32 },
    #[error("no mask is selected")]
    NoCurrentMask,
    #[error("mask index {index} is out of range")]
    MaskNotFound { index: usize },
    #[error("scale must be a positive finite number, got {scale}")]
    InvalidScale { scale: f64 },
}

pub type MaskResult<T> = std::result::Result<T, MaskError>;

/// Pointer gesture in progress. Only one can be active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    VertexDrag {
        mask_index: usize,
        vertex_index: usize,
    },
    ShapeDrag {
        mask_index: usize,
        last: AbsolutePoint,
    },
}

impl Gesture {
    pub const fn mask_index(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::VertexDrag { mask_index, .. } | Self::ShapeDrag { mask_index, .. } => {
                Some(*mask_index)
            }
        }
    }
}

/// Cursor affordance the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Grab,
    Move,
}

#[derive(Debug, Clone)]
pub struct MaskEditor {
    config: EngineConfig,
    wheel_options: WheelOptions,
    mask_style: MaskStyle,
    surface: RasterSurface,
    masks: Vec<MaskInstance>,
    // Invariant: Some(i) with i < masks.len() whenever masks is non-empty.
    current: Option<usize>,
    gesture: Gesture,
    value: f64,
    color_info: Option<ColorInfo>,
    hover: CursorHint,
    next_id: u64,
    render_generation: u64,
}

impl MaskEditor {
    pub fn new(size: SurfaceSize, config: EngineConfig) -> Result<Self, SurfaceError> {
        let surface = RasterSurface::new(size)?;
        let value = config.default_value.clamp(0.0, 100.0);
        let mut editor = Self {
            wheel_options: config.wheel_options(),
            mask_style: config.mask_style(),
            config,
            surface,
            masks: Vec::new(),
            current: None,
            gesture: Gesture::Idle,
            value,
            color_info: None,
            hover: CursorHint::Default,
            next_id: 1,
            render_generation: 0,
        };
        editor.render();
        Ok(editor)
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Repaints the wheel, then the masks on top when there are any.
    pub fn render(&mut self) {
        draw_color_wheel(&mut self.surface, self.value, &self.wheel_options);
        if !self.masks.is_empty() {
            composite_masks(&mut self.surface, &self.masks, &self.mask_style);
        }
        self.render_generation = self.render_generation.wrapping_add(1);
        tracing::debug!(
            generation = self.render_generation,
            masks = self.masks.len(),
            "surface rendered"
        );
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn size(&self) -> SurfaceSize {
        self.surface.size()
    }

    pub fn wheel_geometry(&self) -> WheelGeometry {
        WheelGeometry::for_size(self.surface.size())
    }

    pub fn masks(&self) -> &[MaskInstance] {
        &self.masks
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_mask(&self) -> Option<&MaskInstance> {
        self.current.and_then(|index| self.masks.get(index))
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn color_info(&self) -> Option<&ColorInfo> {
        self.color_info.as_ref()
    }

    /// Incremented on every repaint; hosts present the surface when it moves.
    pub fn render_generation(&self) -> u64 {
        self.render_generation
    }

    pub fn color_at(&self, point: AbsolutePoint) -> Option<ColorInfo> {
        self.wheel_geometry().color_at(point, self.value)
    }

    /// Built-in catalog with circles tessellated per the configured segment count.
    pub fn templates(&self) -> Vec<ShapeTemplate> {
        builtin_templates(self.config.circle_segments)
    }

    pub fn can_add_mask(&self) -> bool {
        self.masks.len() < self.config.max_masks
    }

    fn debug_check_invariants(&self) {
        debug_assert!(
            match self.current {
                Some(index) => index < self.masks.len(),
                None => self.masks.is_empty(),
            },
            "current mask index must be valid whenever masks exist"
        );
        debug_assert!(
            self.gesture
                .mask_index()
                .is_none_or(|index| index < self.masks.len()),
            "gesture must reference a live mask"
        );
    }
}
