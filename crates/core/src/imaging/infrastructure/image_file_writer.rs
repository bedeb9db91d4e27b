use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};

use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::frame::Frame;

/// Writes a single frame to an image file using the `image` crate.
///
/// Handles RGB and grayscale frames; the format follows the file extension.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn to_dynamic(frame: &Frame) -> Result<DynamicImage, Box<dyn std::error::Error>> {
    let (w, h, data) = (frame.width(), frame.height(), frame.data().to_vec());
    let img = match frame.channels() {
        1 => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
        n => return Err(format!("Unsupported channel count: {n}").into()),
    };
    img.ok_or_else(|| "Failed to create image from frame data".into())
}

impl ImageWriter for ImageFileWriter {
    fn write(
        &self,
        path: &Path,
        frame: &Frame,
        size: Option<(u32, u32)>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Ensure parent directory exists (infrastructure concern)
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let img = to_dynamic(frame)?;
        let img = if let Some((w, h)) = size {
            img.resize_exact(w, h, image::imageops::FilterType::Triangle)
        } else {
            img
        };

        img.save(path)?;
        Ok(())
    }
}
