use std::path::PathBuf;

use crate::imaging::domain::image_writer::ImageWriter;
use crate::rendering::domain::display_sink::DisplaySink;
use crate::shared::frame::Frame;

/// Writes the composite to an image file and optionally opens it in the
/// system image viewer.
pub struct ImageFileDisplay {
    writer: Box<dyn ImageWriter>,
    output: PathBuf,
    open_viewer: bool,
}

impl ImageFileDisplay {
    pub fn new(writer: Box<dyn ImageWriter>, output: PathBuf, open_viewer: bool) -> Self {
        Self {
            writer,
            output,
            open_viewer,
        }
    }
}

impl DisplaySink for ImageFileDisplay {
    fn show(&mut self, title: &str, composite: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.write(&self.output, composite, None)?;
        log::info!("{title}: written to {}", self.output.display());

        if self.open_viewer {
            open::that(&self.output).map_err(|e| {
                format!("Failed to open viewer for {}: {e}", self.output.display())
            })?;
        }
        Ok(())
    }
}
