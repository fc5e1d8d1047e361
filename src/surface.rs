// An image plus the size it is currently shown at.
// The native pixels never change size; the display scale follows the window.
// The scaled bitmap is rendered lazily and cached under the scale it was
// rendered for.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::{debug, trace};

use crate::error::Error;
use crate::types::{FrameBuffer, PixelRect};
use crate::vec2::Vec2;

/// Scaled bitmap together with the display scale it was rendered at.
struct RenderCache {
    scale: Vec2,
    bitmap: FrameBuffer,
}

pub struct ImageSurface {
    pixels: RgbaImage,
    display_scale: Vec2,
    filter: FilterType,
    cache: Option<RenderCache>,
}

impl ImageSurface {
    /// Wrap a raster at 1:1 scale. An empty raster has no aspect ratio.
    pub fn new(pixels: RgbaImage) -> Result<Self, Error> {
        Self::with_filter(pixels, FilterType::Triangle)
    }

    pub fn with_filter(pixels: RgbaImage, filter: FilterType) -> Result<Self, Error> {
        let (w, h) = pixels.dimensions();
        if w == 0 || h == 0 {
            return Err(Error::DegenerateRect);
        }
        Ok(Self {
            pixels,
            display_scale: Vec2::new(w as f64, h as f64),
            filter,
            cache: None,
        })
    }

    pub fn native_size(&self) -> Vec2 {
        let (w, h) = self.pixels.dimensions();
        Vec2::new(w as f64, h as f64)
    }

    /// Size the surface is shown at, in display pixels.
    pub fn display_size(&self) -> Vec2 {
        self.display_scale
    }

    pub fn set_display_scale(&mut self, scale: Vec2) {
        if self.cache.as_ref().is_some_and(|c| c.scale != scale) {
            self.invalidate();
        }
        self.display_scale = scale;
    }

    /// Display size over native size, per axis.
    pub fn native_to_display_factor(&self) -> Vec2 {
        self.display_scale / self.native_size()
    }

    pub fn is_cached(&self) -> bool {
        self.cache.as_ref().is_some_and(|c| c.scale == self.display_scale)
    }

    fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Bitmap at the current display scale, resampled only on a cache miss.
    pub fn rendered(&mut self) -> &FrameBuffer {
        let cache = match self.cache.take() {
            Some(cache) if cache.scale == self.display_scale => cache,
            _ => {
                let (w, h) = self.display_scale.to_i64();
                let (w, h) = (w.max(1) as u32, h.max(1) as u32);
                trace!(w, h, "resampling surface");
                let scaled = imageops::resize(&self.pixels, w, h, self.filter);
                RenderCache { scale: self.display_scale, bitmap: FrameBuffer::from_rgba(&scaled) }
            }
        };
        &self.cache.insert(cache).bitmap
    }

    /// Copy of the pixels under `rect`, or an error if `rect` is empty or
    /// not fully inside the raster.
    pub fn try_extract(&self, rect: PixelRect) -> Result<ImageSurface, Error> {
        let (w, h) = self.pixels.dimensions();
        if rect.is_degenerate() || !rect.fits_within(w, h) {
            return Err(Error::ExtractionOutOfBounds { rect });
        }
        let sub = imageops::crop_imm(
            &self.pixels,
            rect.x as u32,
            rect.y as u32,
            rect.width as u32,
            rect.height as u32,
        )
        .to_image();
        ImageSurface::with_filter(sub, self.filter)
    }

    /// Like [`try_extract`](Self::try_extract), but an unusable rect simply
    /// yields no capture.
    pub fn extract(&self, rect: PixelRect) -> Option<ImageSurface> {
        match self.try_extract(rect) {
            Ok(surface) => Some(surface),
            Err(e) => {
                debug!(error = %e, "no capture");
                None
            }
        }
    }

    /// Overwrite pixels with `source` at `top_left` (native space), clipped
    /// to the raster. The shown bitmap is stale afterwards.
    pub fn paste(&mut self, source: &ImageSurface, top_left: (i64, i64)) {
        imageops::replace(&mut self.pixels, &source.pixels, top_left.0, top_left.1);
        self.invalidate();
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.pixels
    }
}
