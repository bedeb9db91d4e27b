use crate::dataset::domain::sample::{label_name, ClassLabel};
use crate::detection::domain::face_crop::FaceCrop;
use crate::recognition::domain::face_recognizer::RecognitionModel;
use crate::recognition::domain::prediction::RecognizedFace;

/// Classifies each crop in turn; output order and length match the input.
pub fn predict_faces(
    model: &dyn RecognitionModel,
    crops: Vec<FaceCrop>,
    labels: &[ClassLabel],
) -> Result<Vec<RecognizedFace>, Box<dyn std::error::Error>> {
    let mut recognized = Vec::with_capacity(crops.len());
    for crop in crops {
        let prediction = model.predict(&crop.image)?;
        log::debug!(
            "{}: {} (distance {:.2})",
            crop.source.display(),
            prediction
                .class_id
                .and_then(|id| label_name(labels, id))
                .unwrap_or("<rejected>"),
            prediction.distance
        );
        recognized.push(RecognizedFace { crop, prediction });
    }
    Ok(recognized)
}
