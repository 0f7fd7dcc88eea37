//! I/O helpers standing in for the acquisition and display collaborators.
//!
//! - `load_color_image`: read a PNG/JPEG/BMP into a 3-channel BGR `Image`.
//! - `save_color_image`: encode an `Image` to disk (format from extension).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::Image;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk as 3-channel BGR.
///
/// The file is read into memory first and decoded from the byte buffer, so
/// paths the platform decoder would trip over (non-ASCII names) still work.
pub fn load_color_image(path: &Path) -> Result<Image, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let decoded = ::image::load_from_memory(&bytes)
        .map_err(|e| format!("Failed to decode {}: {e}", path.display()))?;
    Ok(Image::from_rgb_image(&decoded.to_rgb8()))
}

/// Save an image, converting BGR (or gray) to RGB for the encoder.
pub fn save_color_image(image: &Image, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    image
        .to_rgb_image()
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
