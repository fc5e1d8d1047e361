// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

use crate::types::PixelRect;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidOperand { op: &'static str, got: &'static str }, // Raw host value could not become a Vec2
    EmptySelection,                                         // Rect/dimension query before the selection was closed
    DegenerateRect,                                         // Ratio of a zero-height size, or an empty raster
    ExtractionOutOfBounds { rect: PixelRect },              // Capture rect not fully inside the raster
    WindowInit(String),                                     // Creating the window failed
    WindowUpdate(String),                                   // Updating the window buffer failed
    ImageLoad(String),                                      // Decoding the input file failed
    ImageSave(String),                                      // Encoding/writing the output file failed
    NoInputSelected,                                        // User cancelled the open dialog
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOperand { op, got } => {
                write!(f, "Invalid operand for {op}: Vec2 and {got}")
            }
            Error::EmptySelection => write!(f, "Selection has no far corner yet"),
            Error::DegenerateRect => write!(f, "Size with zero height has no aspect ratio"),
            Error::ExtractionOutOfBounds { rect } => {
                write!(f, "Capture rect {rect} lies outside the image")
            }
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::ImageLoad(s) => write!(f, "Image load error: {s}"),
            Error::ImageSave(s) => write!(f, "Image save error: {s}"),
            Error::NoInputSelected => write!(f, "No input image selected"),
        }
    }
}

impl std::error::Error for Error {}
