// Loading and saving rasters, with native dialogs when no path was given.

use std::path::{Path, PathBuf};

use clone_stamp::Error;
use image::RgbaImage;
use tracing::info;

/// Path from the command line, else ask the user.
pub fn resolve_input(input: Option<PathBuf>) -> Result<PathBuf, Error> {
    match input {
        Some(path) => Ok(path),
        None => rfd::FileDialog::new()
            .set_title("Open image")
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
            .pick_file()
            .ok_or(Error::NoInputSelected),
    }
}

pub fn load_raster(path: &Path) -> Result<RgbaImage, Error> {
    let img = image::open(path).map_err(|e| Error::ImageLoad(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), w = img.width(), h = img.height(), "image loaded");
    Ok(img.to_rgba8())
}

/// Write `raster` as PNG. Returns Ok(None) when the save dialog was cancelled.
pub fn save_raster(raster: &RgbaImage, output: Option<&Path>) -> Result<Option<PathBuf>, Error> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => match rfd::FileDialog::new()
            .set_title("Save image")
            .add_filter("PNG", &["png"])
            .save_file()
        {
            Some(path) => path,
            None => return Ok(None),
        },
    };
    raster
        .save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| Error::ImageSave(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), "image saved");
    Ok(Some(path))
}
