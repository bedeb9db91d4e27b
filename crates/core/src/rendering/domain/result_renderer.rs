use crate::dataset::domain::sample::ClassLabel;
use crate::recognition::domain::prediction::RecognizedFace;
use crate::rendering::domain::annotated_image::AnnotatedImage;
use crate::rendering::domain::composite::concatenate_horizontally;
use crate::rendering::domain::display_sink::DisplaySink;
use crate::rendering::domain::face_annotator::FaceAnnotator;

/// Turns predictions into annotated images and presents them side by side.
pub struct ResultRenderer {
    annotator: Box<dyn FaceAnnotator>,
    display: Box<dyn DisplaySink>,
}

impl ResultRenderer {
    pub fn new(annotator: Box<dyn FaceAnnotator>, display: Box<dyn DisplaySink>) -> Self {
        Self { annotator, display }
    }

    /// One annotated image per recognized face, in prediction order.
    pub fn render(
        &self,
        faces: &[RecognizedFace],
        labels: &[ClassLabel],
    ) -> Result<Vec<AnnotatedImage>, Box<dyn std::error::Error>> {
        let images = self.annotator.annotate(faces, labels)?;
        if images.len() != faces.len() {
            return Err(format!(
                "Annotator produced {} images for {} faces",
                images.len(),
                faces.len()
            )
            .into());
        }
        Ok(images)
    }

    /// Concatenates the images left to right and hands the result to the display.
    pub fn show(
        &mut self,
        title: &str,
        images: &[AnnotatedImage],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let frames: Vec<_> = images.iter().map(|a| a.image.clone()).collect();
        let composite = concatenate_horizontally(&frames)?;
        log::info!(
            "Showing {} annotated images ({}x{})",
            images.len(),
            composite.width(),
            composite.height()
        );
        self.display.show(title, &composite)
    }
}
