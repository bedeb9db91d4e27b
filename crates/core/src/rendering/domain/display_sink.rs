use crate::shared::frame::Frame;

/// Destination for the final composite image.
pub trait DisplaySink {
    fn show(&mut self, title: &str, composite: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}

/// Discards the composite. Used headless and in tests.
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn show(&mut self, _title: &str, _composite: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}
