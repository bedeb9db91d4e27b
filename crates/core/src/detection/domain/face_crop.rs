use std::path::PathBuf;

use crate::dataset::domain::sample::{ClassId, Sample};
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// One accepted detection: the grayscale face, where it came from, and
/// the class of its source image.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceCrop {
    pub source: PathBuf,
    pub rect: FaceRect,
    pub class_id: Option<ClassId>,
    pub image: Frame,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Detection {
    /// One crop per detected region, in detector order. Never empty.
    Detected(Vec<FaceCrop>),
    NoFaceFound,
}

/// What the face filter decided for one sample.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterOutcome {
    pub sample: Sample,
    pub detection: Detection,
}

impl FilterOutcome {
    pub fn face_count(&self) -> usize {
        match &self.detection {
            Detection::Detected(crops) => crops.len(),
            Detection::NoFaceFound => 0,
        }
    }
}

/// Flattens outcomes into their accepted crops, sample order first and
/// detector order within a sample.
pub fn accepted_crops(outcomes: Vec<FilterOutcome>) -> Vec<FaceCrop> {
    outcomes
        .into_iter()
        .flat_map(|outcome| match outcome.detection {
            Detection::Detected(crops) => crops,
            Detection::NoFaceFound => Vec::new(),
        })
        .collect()
}

/// Number of samples dropped because no face was found.
pub fn count_without_faces(outcomes: &[FilterOutcome]) -> usize {
    outcomes
        .iter()
        .filter(|o| o.detection == Detection::NoFaceFound)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop(source: &str, x: i32) -> FaceCrop {
        FaceCrop {
            source: PathBuf::from(source),
            rect: FaceRect::new(x, 0, 10, 10),
            class_id: Some(ClassId(0)),
            image: Frame::new(vec![0; 100], 10, 10, 1),
        }
    }

    fn outcome(source: &str, crops: Vec<FaceCrop>) -> FilterOutcome {
        FilterOutcome {
            sample: Sample::labeled(PathBuf::from(source), ClassId(0)),
            detection: if crops.is_empty() {
                Detection::NoFaceFound
            } else {
                Detection::Detected(crops)
            },
        }
    }

    #[test]
    fn test_accepted_crops_preserve_order() {
        let outcomes = vec![
            outcome("a.jpg", vec![crop("a.jpg", 1), crop("a.jpg", 2)]),
            outcome("b.jpg", vec![]),
            outcome("c.jpg", vec![crop("c.jpg", 3)]),
        ];
        let xs: Vec<i32> = accepted_crops(outcomes).iter().map(|c| c.rect.x).collect();
        assert_eq!(xs, vec![1, 2, 3]);
    }

    #[test]
    fn test_count_without_faces() {
        let outcomes = vec![
            outcome("a.jpg", vec![crop("a.jpg", 1)]),
            outcome("b.jpg", vec![]),
            outcome("c.jpg", vec![]),
        ];
        assert_eq!(count_without_faces(&outcomes), 2);
    }

    #[test]
    fn test_face_count() {
        assert_eq!(outcome("a.jpg", vec![]).face_count(), 0);
        assert_eq!(
            outcome("a.jpg", vec![crop("a.jpg", 1), crop("a.jpg", 2)]).face_count(),
            2
        );
    }
}
