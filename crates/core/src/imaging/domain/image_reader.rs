use std::path::Path;

use crate::shared::frame::Frame;

/// Decodes an image file into an RGB frame.
pub trait ImageReader {
    /// Reads the image at `path`, optionally resizing it to `(width, height)`
    /// without preserving aspect ratio.
    fn read(&self, path: &Path, size: Option<(u32, u32)>)
        -> Result<Frame, Box<dyn std::error::Error>>;
}
