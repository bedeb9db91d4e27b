use crate::dataset::domain::sample::ClassLabel;
use crate::recognition::domain::prediction::RecognizedFace;
use crate::rendering::domain::annotated_image::AnnotatedImage;

/// Draws each recognized face onto a fresh copy of its source image.
///
/// Produces exactly one annotated image per face, in input order.
pub trait FaceAnnotator {
    fn annotate(
        &self,
        faces: &[RecognizedFace],
        labels: &[ClassLabel],
    ) -> Result<Vec<AnnotatedImage>, Box<dyn std::error::Error>>;
}
