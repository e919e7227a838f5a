use super::*;
use crate::geometry::{to_absolute, to_relative, unit_to_absolute};
use crate::mask::ShapeTemplate;
use crate::persist::{PersistResult, PersistedMaskSet};
use crate::surface::ExportResult;

impl MaskEditor {
    /// Adds a mask from `template` and makes it current. At the cap nothing
    /// changes and the rejection is returned for the host to show.
    pub fn select_template(&mut self, template: &ShapeTemplate) -> MaskResult<usize> {
        if !self.can_add_mask() {
            tracing::warn!(
                max = self.config.max_masks,
                template_id = template.id,
                "mask limit reached; template ignored"
            );
            return Err(MaskError::CapacityExceeded {
                max: self.config.max_masks,
            });
        }
        if !template.is_valid() {
            return Err(MaskError::DegenerateTemplate {
                template_id: template.id,
            });
        }

        let id = self.allocate_id();
        let points = unit_to_absolute(&template.points, self.surface.size());
        self.masks
            .push(MaskInstance::new(id, template.shape_type.clone(), points));
        let index = self.masks.len() - 1;
        self.current = Some(index);
        tracing::info!(mask_id = id, shape = %template.shape_type, index, "mask added");
        self.render();
        self.debug_check_invariants();
        Ok(index)
    }

    pub fn select_mask(&mut self, index: usize) -> MaskResult<()> {
        if index >= self.masks.len() {
            return Err(MaskError::MaskNotFound { index });
        }
        self.current = Some(index);
        Ok(())
    }

    /// Removes the current mask. Returns `None` when nothing is selected.
    pub fn delete_current_mask(&mut self) -> Option<MaskInstance> {
        let index = self.current?;
        self.remove_mask(index).ok()
    }

    pub fn remove_mask(&mut self, index: usize) -> MaskResult<MaskInstance> {
        if index >= self.masks.len() {
            return Err(MaskError::MaskNotFound { index });
        }
        let removed = self.masks.remove(index);

        self.current = match self.current {
            _ if self.masks.is_empty() => None,
            Some(current) if current > index => Some(current - 1),
            Some(current) => Some(current.min(self.masks.len() - 1)),
            None => Some(0),
        };
        if self.gesture.mask_index().is_some() {
            self.gesture = Gesture::Idle;
        }
        tracing::info!(mask_id = removed.id, index, remaining = self.masks.len(), "mask removed");
        self.render();
        self.debug_check_invariants();
        Ok(removed)
    }

    /// Sets the current mask's scale. Range limiting is the caller's job
    /// (see [`EngineConfig::clamp_scale`]); only non-positive or non-finite
    /// factors are refused.
    pub fn set_scale(&mut self, scale: f64) -> MaskResult<()> {
        let index = self.current.ok_or(MaskError::NoCurrentMask)?;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MaskError::InvalidScale { scale });
        }
        let mask = self
            .masks
            .get_mut(index)
            .ok_or(MaskError::MaskNotFound { index })?;
        if mask.scale() == scale {
            return Ok(());
        }
        mask.set_scale(scale);
        self.render();
        Ok(())
    }

    pub fn set_value(&mut self, value: f64) {
        let value = if value.is_finite() {
            value.clamp(0.0, 100.0)
        } else {
            self.value
        };
        if value == self.value {
            return;
        }
        self.value = value;
        if let Some(info) = self.color_info {
            let point = AbsolutePoint::new(info.x, info.y);
            self.color_info = self.wheel_geometry().color_at(point, value);
        }
        self.render();
    }

    /// Replaces every live mask with `set`, mapped onto the current surface.
    /// On error the editor is left untouched; sets over the mask cap are
    /// refused like any other invalid input.
    pub fn load_persisted(&mut self, set: &PersistedMaskSet) -> PersistResult<()> {
        set.check_capacity(self.config.max_masks)?;
        let masks = set.restore(self.surface.size(), self.next_id)?;
        self.next_id = self.next_id.saturating_add(masks.len() as u64);
        self.current = if masks.is_empty() { None } else { Some(0) };
        self.masks = masks;
        self.gesture = Gesture::Idle;
        if set.value.is_finite() {
            self.value = set.value.clamp(0.0, 100.0);
        }
        tracing::info!(masks = self.masks.len(), value = self.value, "mask set loaded");
        self.render();
        self.debug_check_invariants();
        Ok(())
    }

    pub fn to_persisted(&self) -> PersistedMaskSet {
        PersistedMaskSet::capture(&self.masks, self.surface.size(), self.value)
    }

    /// Reallocates the surface at `size`. Masks keep their relative placement
    /// and their scale.
    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), SurfaceError> {
        let old = self.surface.size();
        if old == size {
            return Ok(());
        }
        let surface = RasterSurface::new(size)?;
        if !old.is_empty() {
            for mask in &mut self.masks {
                mask.map_points(|points| to_absolute(&to_relative(points, old), size));
            }
        }
        self.surface = surface;
        self.gesture = Gesture::Idle;
        self.color_info = None;
        tracing::debug!(width = size.width, height = size.height, "surface resized");
        self.render();
        Ok(())
    }

    /// PNG bytes of what is currently on the surface. Nothing is repainted.
    pub fn export_raster(&self) -> ExportResult<Vec<u8>> {
        let bytes = self.surface.encode_png()?;
        tracing::debug!(bytes = bytes.len(), "raster exported");
        Ok(bytes)
    }
}
