//! Frontal face detector backed by the SeetaFace funnel-structured cascade
//! (`rustface` crate).
//!
//! The cascade model is a pretrained binary file; detection itself is a
//! black box to the rest of the pipeline.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::config::DetectorConfig;
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

pub struct SeetaCascadeDetector {
    detector: Box<dyn rustface::Detector>,
}

impl SeetaCascadeDetector {
    /// Loads the cascade model and applies the search parameters.
    pub fn new(model_path: &Path, config: &DetectorConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let bytes = fs::read(model_path)
            .map_err(|e| format!("Failed to open cascade {}: {e}", model_path.display()))?;
        let model = rustface::read_model(Cursor::new(bytes))
            .map_err(|e| format!("Failed to load cascade {}: {e}", model_path.display()))?;

        let mut detector = rustface::create_detector_with_model(model);
        detector.set_min_face_size(config.min_face_size);
        detector.set_score_thresh(config.score_thresh);
        detector.set_pyramid_scale_factor(pyramid_shrink_ratio(config.scale_factor));
        detector.set_slide_window_step(config.window_step, config.window_step);
        log::info!(
            "Loaded face cascade {} (scale factor {}, min face {}px)",
            model_path.display(),
            config.scale_factor,
            config.min_face_size
        );

        Ok(Self { detector })
    }
}

/// rustface shrinks the image between pyramid levels by a ratio below 1;
/// a scale factor of 1.2 between window sizes is a shrink ratio of 1/1.2.
fn pyramid_shrink_ratio(scale_factor: f32) -> f32 {
    1.0 / scale_factor
}

impl FaceDetector for SeetaCascadeDetector {
    fn detect(&mut self, gray: &Frame) -> Result<Vec<FaceRect>, Box<dyn std::error::Error>> {
        if !gray.is_gray() {
            return Err(format!(
                "Cascade detector expects a grayscale frame, got {} channels",
                gray.channels()
            )
            .into());
        }

        let image = rustface::ImageData::new(gray.data(), gray.width(), gray.height());
        let faces = self.detector.detect(&image);

        Ok(faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceRect::new(bbox.x(), bbox.y(), bbox.width() as i32, bbox.height() as i32)
            })
            .collect())
    }
}
