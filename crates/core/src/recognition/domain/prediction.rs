use crate::dataset::domain::sample::ClassId;
use crate::detection::domain::face_crop::FaceCrop;

/// Recognizer verdict for one face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    /// `None` when the nearest training face is beyond the recognizer's threshold.
    pub class_id: Option<ClassId>,
    /// Distance to the nearest training face; lower is more confident.
    pub distance: f64,
}

/// A test face together with its prediction.
///
/// Carries its own source image and rectangle so rendering never depends
/// on list positions.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognizedFace {
    pub crop: FaceCrop,
    pub prediction: Prediction,
}
