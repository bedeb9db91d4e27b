use std::path::Path;

use image::imageops::FilterType;

use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::frame::Frame;

/// Decodes image files with the `image` crate.
///
/// Resizing uses bilinear filtering; the format is inferred from content.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(
        &self,
        path: &Path,
        size: Option<(u32, u32)>,
    ) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = image::ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| format!("Failed to decode {}: {e}", path.display()))?
            .to_rgb8();

        let img = match size {
            Some((w, h)) if (w, h) != img.dimensions() => {
                image::imageops::resize(&img, w, h, FilterType::Triangle)
            }
            _ => img,
        };

        let (width, height) = img.dimensions();
        Ok(Frame::new(img.into_raw(), width, height, 3))
    }
}
