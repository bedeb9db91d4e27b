use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Domain interface for face detection.
///
/// Receives a single-channel frame and returns every face region found,
/// in detector order. Implementations may keep scratch state, hence
/// `&mut self`.
pub trait FaceDetector {
    fn detect(&mut self, gray: &Frame) -> Result<Vec<FaceRect>, Box<dyn std::error::Error>>;
}
