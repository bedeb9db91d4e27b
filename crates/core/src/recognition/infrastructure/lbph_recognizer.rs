//! Local Binary Patterns Histogram face recognizer.
//!
//! Each training face is reduced to a spatial histogram of circular LBP
//! codes; a query face is assigned the class of the nearest training
//! histogram under chi-square distance.

use std::collections::HashSet;

use crate::dataset::domain::sample::ClassId;
use crate::detection::domain::face_crop::FaceCrop;
use crate::recognition::domain::face_recognizer::{
    FaceRecognizer, RecognitionModel, RecognizerError,
};
use crate::recognition::domain::prediction::Prediction;
use crate::recognition::infrastructure::local_binary_pattern::{
    chi_square_distance, extended_lbp, spatial_histogram,
};
use crate::shared::config::LbphConfig;
use crate::shared::frame::Frame;

pub struct LbphRecognizer {
    config: LbphConfig,
}

impl LbphRecognizer {
    pub fn new(config: LbphConfig) -> Self {
        Self { config }
    }
}

impl Default for LbphRecognizer {
    fn default() -> Self {
        Self::new(LbphConfig::default())
    }
}

/// Trained LBPH model: one descriptor per training face.
pub struct LbphModel {
    config: LbphConfig,
    descriptors: Vec<(ClassId, Vec<f64>)>,
}

impl LbphModel {
    fn predict_face(&self, face: &Frame) -> Result<Prediction, RecognizerError> {
        let query = describe(&self.config, face)?;
        let (nearest, distance) = self
            .descriptors
            .iter()
            .map(|(id, hist)| (*id, chi_square_distance(hist, &query)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or(RecognizerError::EmptyTrainingSet)?;

        let class_id = (distance <= self.config.threshold).then_some(nearest);
        Ok(Prediction { class_id, distance })
    }
}

impl FaceRecognizer for LbphRecognizer {
    fn train(
        &self,
        faces: &[FaceCrop],
    ) -> Result<Box<dyn RecognitionModel>, Box<dyn std::error::Error>> {
        if faces.is_empty() {
            return Err(RecognizerError::EmptyTrainingSet.into());
        }

        let mut descriptors = Vec::with_capacity(faces.len());
        for face in faces {
            let id = face
                .class_id
                .ok_or_else(|| RecognizerError::UnlabeledFace(face.source.clone()))?;
            descriptors.push((id, describe(&self.config, &face.image)?));
        }

        let classes: HashSet<ClassId> = descriptors.iter().map(|(id, _)| *id).collect();
        log::info!(
            "Trained LBPH model on {} faces across {} classes",
            descriptors.len(),
            classes.len()
        );

        Ok(Box::new(LbphModel {
            config: self.config.clone(),
            descriptors,
        }))
    }
}

impl RecognitionModel for LbphModel {
    fn predict(&self, face: &Frame) -> Result<Prediction, Box<dyn std::error::Error>> {
        Ok(self.predict_face(face)?)
    }
}

fn describe(config: &LbphConfig, face: &Frame) -> Result<Vec<f64>, RecognizerError> {
    if !face.is_gray() {
        return Err(RecognizerError::NotGrayscale(face.channels()));
    }
    let too_small = || RecognizerError::FaceTooSmall {
        width: face.width(),
        height: face.height(),
    };

    let codes =
        extended_lbp(face.gray_view(), config.radius, config.neighbors).ok_or_else(too_small)?;
    spatial_histogram(
        codes.view(),
        1usize << config.neighbors,
        config.grid_x as usize,
        config.grid_y as usize,
    )
    .ok_or_else(too_small)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    // --- Helpers ---

    fn checkerboard(size: u32, square: u32) -> Frame {
        let mut data = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let dark = ((x / square) + (y / square)) % 2 == 0;
                data.push(if dark { 30 } else { 220 });
            }
        }
        Frame::new(data, size, size, 1)
    }

    fn diagonal_gradient(size: u32) -> Frame {
        let mut data = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                data.push(((x * 3 + y * 2) % 256) as u8);
            }
        }
        Frame::new(data, size, size, 1)
    }

    fn face(image: Frame, class_id: Option<usize>) -> FaceCrop {
        FaceCrop {
            source: PathBuf::from("face.jpg"),
            rect: crate::shared::face_rect::FaceRect::new(0, 0, 64, 64),
            class_id: class_id.map(ClassId),
            image,
        }
    }

    fn train(recognizer: &LbphRecognizer, faces: &[FaceCrop]) -> Box<dyn RecognitionModel> {
        recognizer.train(faces).unwrap()
    }

    fn downcast(err: Box<dyn std::error::Error>) -> RecognizerError {
        *err.downcast::<RecognizerError>().unwrap()
    }

    // --- Tests ---

    #[test]
    fn test_empty_training_set_fails() {
        let err = LbphRecognizer::default().train(&[]).err().unwrap();
        assert!(matches!(downcast(err), RecognizerError::EmptyTrainingSet));
    }

    #[test]
    fn test_unlabeled_training_face_fails() {
        let err = LbphRecognizer::default()
            .train(&[face(checkerboard(64, 8), None)])
            .err()
            .unwrap();
        assert!(matches!(downcast(err), RecognizerError::UnlabeledFace(_)));
    }

    #[test]
    fn test_color_face_fails() {
        let rgb = Frame::new(vec![0; 64 * 64 * 3], 64, 64, 3);
        let err = LbphRecognizer::default()
            .train(&[face(rgb, Some(0))])
            .err()
            .unwrap();
        assert!(matches!(downcast(err), RecognizerError::NotGrayscale(3)));
    }

    #[test]
    fn test_tiny_face_fails() {
        // 8x8 face leaves a 6x6 code image: too few pixels for an 8x8 grid
        let err = LbphRecognizer::default()
            .train(&[face(checkerboard(8, 2), Some(0))])
            .err()
            .unwrap();
        assert!(matches!(
            downcast(err),
            RecognizerError::FaceTooSmall {
                width: 8,
                height: 8
            }
        ));
    }

    #[test]
    fn test_training_face_predicts_itself_with_zero_distance() {
        let recognizer = LbphRecognizer::default();
        let model = train(
            &recognizer,
            &[
                face(checkerboard(64, 8), Some(0)),
                face(diagonal_gradient(64), Some(1)),
            ],
        );
        let prediction = model.predict(&checkerboard(64, 8)).unwrap();
        assert_eq!(prediction.class_id, Some(ClassId(0)));
        assert_relative_eq!(prediction.distance, 0.0);
    }

    #[test]
    fn test_distinct_textures_are_told_apart() {
        let recognizer = LbphRecognizer::default();
        let model = train(
            &recognizer,
            &[
                face(checkerboard(64, 8), Some(0)),
                face(checkerboard(72, 8), Some(0)),
                face(diagonal_gradient(64), Some(1)),
                face(diagonal_gradient(72), Some(1)),
            ],
        );
        let a = model.predict(&checkerboard(80, 8)).unwrap();
        let b = model.predict(&diagonal_gradient(80)).unwrap();
        assert_eq!(a.class_id, Some(ClassId(0)));
        assert_eq!(b.class_id, Some(ClassId(1)));
    }

    #[test]
    fn test_threshold_rejects_distant_faces() {
        let recognizer = LbphRecognizer::new(LbphConfig {
            threshold: 1e-6,
            ..LbphConfig::default()
        });
        let model = train(&recognizer, &[face(checkerboard(64, 8), Some(0))]);

        let rejected = model.predict(&diagonal_gradient(64)).unwrap();
        assert_eq!(rejected.class_id, None);
        assert!(rejected.distance > 1e-6);

        let accepted = model.predict(&checkerboard(64, 8)).unwrap();
        assert_eq!(accepted.class_id, Some(ClassId(0)));
    }

    #[test]
    fn test_descriptor_length_depends_on_grid_and_neighbors() {
        let config = LbphConfig {
            neighbors: 4,
            grid_x: 3,
            grid_y: 2,
            ..LbphConfig::default()
        };
        let hist = describe(&config, &checkerboard(32, 4)).unwrap();
        assert_eq!(hist.len(), 3 * 2 * 16);
    }
}
