// Aspect-preserving "contain" fit of an element inside a container, plus the
// window <-> image coordinate transform that follows from it.

use crate::error::Error;
use crate::vec2::Vec2;

/// Outcome of one fit: the new size, and the size it replaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub fitted_size: Vec2,
    pub previous_size: Vec2,
}

impl FitResult {
    /// Per-axis multiplier turning the previous size into the fitted one.
    /// Dependent rectangles follow this factor rather than being recomputed,
    /// so proportions survive repeated resizes.
    pub fn factor(&self) -> Vec2 {
        self.fitted_size / self.previous_size
    }
}

/// Largest size with `element`'s aspect ratio that fits inside `container`.
pub fn fit(container: Vec2, element: Vec2) -> Result<FitResult, Error> {
    let container_ratio = container.ratio()?;
    let element_ratio = element.ratio()?;

    let fitted_size = if element_ratio <= container_ratio {
        // Relatively taller: height binds.
        Vec2::new(container.y * element_ratio, container.y)
    } else {
        Vec2::new(container.x, container.x / element_ratio)
    };

    Ok(FitResult { fitted_size, previous_size: element })
}

/// Maps between window space, display space (image scaled, origin at the
/// image's top-left) and native pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Window position of the displayed image's top-left corner.
    pub offset: Vec2,
    /// Display size over native size, per axis.
    pub factor: Vec2,
}

impl ViewTransform {
    /// Centre a display of `display_size` in a container of `container_size`.
    pub fn centered(container_size: Vec2, display_size: Vec2, native_size: Vec2) -> Self {
        let center = container_size.floor_div(2.0);
        Self {
            offset: center - display_size / 2.0,
            factor: display_size / native_size,
        }
    }

    pub fn to_display_space(&self, window_point: Vec2) -> Vec2 {
        window_point - self.offset
    }

    pub fn display_to_native(&self, display_point: Vec2) -> Vec2 {
        display_point / self.factor
    }

    /// Window point to native pixel coordinates.
    pub fn to_image_space(&self, window_point: Vec2) -> Vec2 {
        self.display_to_native(self.to_display_space(window_point))
    }

    pub fn to_window_space(&self, native_point: Vec2) -> Vec2 {
        native_point * self.factor + self.offset
    }
}
