use std::path::PathBuf;

use thiserror::Error;

use crate::detection::domain::face_crop::FaceCrop;
use crate::recognition::domain::prediction::Prediction;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("cannot train on an empty set of faces")]
    EmptyTrainingSet,
    #[error("training face from {0} has no class id")]
    UnlabeledFace(PathBuf),
    #[error("expected a grayscale face, got {0} channels")]
    NotGrayscale(u8),
    #[error("face of {width}x{height} is too small for the recognizer")]
    FaceTooSmall { width: u32, height: u32 },
}

/// Trainable face classifier.
///
/// Training consumes labeled grayscale crops and produces an independent
/// model; the recognizer itself stays reusable.
pub trait FaceRecognizer {
    fn train(
        &self,
        faces: &[FaceCrop],
    ) -> Result<Box<dyn RecognitionModel>, Box<dyn std::error::Error>>;
}

/// A fitted model that classifies one grayscale face at a time.
pub trait RecognitionModel {
    fn predict(&self, face: &Frame) -> Result<Prediction, Box<dyn std::error::Error>>;
}
