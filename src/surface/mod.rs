//! The raster surface the wheel and masks are painted onto, and PNG export.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;
use tiny_skia::Pixmap;

use crate::geometry::SurfaceSize;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to allocate a {width}x{height} raster surface")]
    Allocation { width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("surface has no pixels to export")]
    EmptySurface,
    #[error("png encoding produced no data")]
    EmptyOutput,
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Owned RGBA raster. A zero-sized surface holds no pixmap and every paint
/// operation on it is a no-op.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    size: SurfaceSize,
    pixmap: Option<Pixmap>,
}

impl RasterSurface {
    pub fn new(size: SurfaceSize) -> Result<Self, SurfaceError> {
        if size.is_empty() {
            return Ok(Self { size, pixmap: None });
        }
        let pixmap =
            Pixmap::new(size.width, size.height).ok_or(SurfaceError::Allocation {
                width: size.width,
                height: size.height,
            })?;
        Ok(Self {
            size,
            pixmap: Some(pixmap),
        })
    }

    pub const fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    pub(crate) fn pixmap_mut(&mut self) -> Option<&mut Pixmap> {
        self.pixmap.as_mut()
    }

    /// Straight (non-premultiplied) RGBA at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        // Pixmap::pixel indexes the flat buffer, so x past the width would wrap.
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let color = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        let pixmap = self.pixmap.as_ref()?;
        let mut bytes = Vec::with_capacity(pixmap.data().len());
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            bytes.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        RgbaImage::from_raw(pixmap.width(), pixmap.height(), bytes)
    }

    /// Encodes the current pixels as PNG without repainting anything.
    pub fn encode_png(&self) -> ExportResult<Vec<u8>> {
        let image = self.to_rgba_image().ok_or(ExportError::EmptySurface)?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        if bytes.is_empty() {
            return Err(ExportError::EmptyOutput);
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_surface_has_no_pixels() {
        let surface = RasterSurface::new(SurfaceSize::new(0, 10)).expect("empty surface is valid");
        assert!(surface.pixmap().is_none());
        assert!(surface.pixel(0, 0).is_none());
        assert!(matches!(
            surface.encode_png(),
            Err(ExportError::EmptySurface)
        ));
    }

    #[test]
    fn new_surface_is_transparent() {
        let surface = RasterSurface::new(SurfaceSize::new(4, 3)).expect("surface should allocate");
        assert_eq!(surface.pixel(3, 2), Some([0, 0, 0, 0]));
        assert!(surface.pixel(4, 0).is_none());
        assert!(surface.pixel(0, 3).is_none());
    }

    #[test]
    fn pixel_past_row_end_does_not_wrap_to_next_row() {
        let mut surface =
            RasterSurface::new(SurfaceSize::new(3, 2)).expect("surface should allocate");
        if let Some(pixmap) = surface.pixmap_mut() {
            pixmap.fill(tiny_skia::Color::from_rgba8(200, 10, 10, 255));
        }
        assert_eq!(surface.pixel(2, 0), Some([200, 10, 10, 255]));
        assert_eq!(surface.pixel(3, 0), None);
        assert_eq!(surface.pixel(5, 0), None);
    }

    #[test]
    fn encode_png_round_trips_through_image_decoder() {
        let mut surface =
            RasterSurface::new(SurfaceSize::new(5, 7)).expect("surface should allocate");
        if let Some(pixmap) = surface.pixmap_mut() {
            pixmap.fill(tiny_skia::Color::from_rgba8(10, 200, 30, 255));
        }
        let bytes = surface.encode_png().expect("png should encode");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .expect("png should decode")
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (5, 7));
        assert_eq!(decoded.get_pixel(2, 3).0, [10, 200, 30, 255]);
    }
}
