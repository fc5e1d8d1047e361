//! View/geometry core of a clone-stamp image editor.
//!
//! Drag a rectangle over the image to capture it, move the preview around,
//! click to stamp it back at full resolution. The host window feeds
//! [`ViewController`] pointer and resize events and paints the [`Frame`] it
//! returns.

pub mod controller;
pub mod error;
pub mod fit;
pub mod selection;
pub mod surface;
pub mod types;
pub mod vec2;

pub use controller::{Frame, InteractionState, Suspension, ViewController};
pub use error::Error;
pub use fit::{fit, FitResult, ViewTransform};
pub use selection::SelectionRegion;
pub use surface::ImageSurface;
pub use types::{FrameBuffer, PixelRect, ScreenRect};
pub use vec2::Vec2;
