//! Rectangle the user drags over the image.
//!
//! Corners are stored in display space (scaled image, origin at the image's
//! top-left). The anchor is set on pointer-down and the far corner follows
//! the pointer while dragging, so either corner may end up top-left.

use tracing::debug;

use crate::error::Error;
use crate::types::PixelRect;
use crate::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionRegion {
    anchor: Option<Vec2>,
    far_corner: Option<Vec2>,
}

impl SelectionRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new drag at `anchor`, forgetting any previous far corner.
    pub fn open(&mut self, anchor: Vec2) {
        self.anchor = Some(anchor);
        self.far_corner = None;
    }

    /// Move the far corner to the pointer. Called on every drag motion.
    ///
    /// A far corner without an anchor is not a region, so closing a region
    /// that was never opened fails.
    pub fn close(&mut self, far_corner: Vec2) -> Result<(), Error> {
        if self.anchor.is_none() {
            return Err(Error::EmptySelection);
        }
        self.far_corner = Some(far_corner);
        Ok(())
    }

    /// Both corners are known.
    pub fn is_open(&self) -> bool {
        self.far_corner.is_some()
    }

    pub fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    /// Canonical `(top_left, bottom_right)`, each axis sorted on its own.
    pub fn normalized(&self) -> Result<(Vec2, Vec2), Error> {
        match (self.anchor, self.far_corner) {
            (Some(a), Some(b)) => Ok((a.min(b), a.max(b))),
            _ => Err(Error::EmptySelection),
        }
    }

    pub fn dimensions(&self) -> Result<Vec2, Error> {
        let (top_left, bottom_right) = self.normalized()?;
        Ok(bottom_right - top_left)
    }

    /// New region with both corners multiplied by `factor`.
    pub fn scale_by(&self, factor: Vec2) -> SelectionRegion {
        SelectionRegion {
            anchor: self.anchor.map(|a| a * factor),
            far_corner: self.far_corner.map(|b| b * factor),
        }
    }

    /// Native pixel rect under the selection, where `scale` is the display
    /// size over native size. Only used for capture, never for drawing.
    pub fn to_image_space_rect(&self, scale: Vec2) -> Result<PixelRect, Error> {
        let (top_left, bottom_right) = self.normalized()?;
        let (x0, y0) = (top_left / scale).to_i64();
        let (x1, y1) = (bottom_right / scale).to_i64();
        let rect = PixelRect::new(x0, y0, x1 - x0, y1 - y0);
        debug!(%rect, "selection mapped to native pixels");
        Ok(rect)
    }
}
