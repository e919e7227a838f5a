//! Size-independent serialization of a mask set.
//!
//! Live masks are stored with their scale baked into relative-space points,
//! so the persisted `scale` is always 1. Loading maps the points onto the
//! current surface size at scale 1.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{scale_points, to_absolute, to_relative, RelativePoint, SurfaceSize};
use crate::mask::{MaskInstance, ShapeType, MIN_SHAPE_POINTS};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("mask {index} has {points} points; at least 3 are required")]
    DegenerateMask { index: usize, points: usize },
    #[error("mask {index} has an invalid scale {scale}")]
    InvalidScale { index: usize, scale: f64 },
    #[error("mask set holds {count} masks; at most {max} can be active at once")]
    TooManyMasks { count: usize, max: usize },
    #[error("mask {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
    #[error("invalid mask set json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PersistResult<T> = std::result::Result<T, PersistError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedMask {
    #[serde(rename = "originalPoints")]
    pub original_points: Vec<RelativePoint>,
    pub scale: f64,
    pub shape_type: ShapeType,
}

/// Mask array order is z-order and hit-test priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedMaskSet {
    pub value: f64,
    pub masks: Vec<PersistedMask>,
}

impl PersistedMaskSet {
    pub fn capture(masks: &[MaskInstance], size: SurfaceSize, value: f64) -> Self {
        let masks = masks
            .iter()
            .map(|mask| PersistedMask {
                original_points: to_relative(&mask.scaled_points(), size),
                scale: 1.0,
                shape_type: mask.shape_type.clone(),
            })
            .collect();
        Self { value, masks }
    }

    pub fn validate(&self) -> PersistResult<()> {
        for (index, mask) in self.masks.iter().enumerate() {
            if mask.original_points.len() < MIN_SHAPE_POINTS {
                return Err(PersistError::DegenerateMask {
                    index,
                    points: mask.original_points.len(),
                });
            }
            if !mask.scale.is_finite() || mask.scale <= 0.0 {
                return Err(PersistError::InvalidScale {
                    index,
                    scale: mask.scale,
                });
            }
            if mask
                .original_points
                .iter()
                .any(|point| !point.x.is_finite() || !point.y.is_finite())
            {
                return Err(PersistError::NonFinitePoint { index });
            }
        }
        Ok(())
    }

    pub fn check_capacity(&self, max: usize) -> PersistResult<()> {
        if self.masks.len() > max {
            return Err(PersistError::TooManyMasks {
                count: self.masks.len(),
                max,
            });
        }
        Ok(())
    }

    /// Rebuilds live masks for `size`, numbering ids from `first_id`.
    ///
    /// A stored scale other than 1 is folded into the points so every
    /// restored mask starts at scale 1.
    pub fn restore(&self, size: SurfaceSize, first_id: u64) -> PersistResult<Vec<MaskInstance>> {
        self.validate()?;
        Ok(self
            .masks
            .iter()
            .zip(first_id..)
            .map(|(mask, id)| {
                let absolute = to_absolute(&mask.original_points, size);
                MaskInstance::new(
                    id,
                    mask.shape_type.clone(),
                    scale_points(&absolute, mask.scale),
                )
            })
            .collect())
    }

    pub fn from_json(json: &str) -> PersistResult<Self> {
        let set: Self = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    pub fn to_json(&self) -> PersistResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
