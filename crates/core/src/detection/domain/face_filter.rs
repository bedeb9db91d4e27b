use crate::dataset::domain::sample::Sample;
use crate::detection::domain::face_crop::{Detection, FaceCrop, FilterOutcome};
use crate::detection::domain::face_detector::FaceDetector;
use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::face_rect::{CropMode, FaceRect};
use crate::shared::frame::Frame;

/// Per-image stage: decode → resize to canvas → grayscale → detect → crop.
///
/// A sample yields one crop per detected region, each tagged with the
/// sample's class. Samples without a detection are reported as
/// [`Detection::NoFaceFound`] rather than silently dropped. Decode and
/// detector errors abort the whole batch.
pub struct FaceFilter {
    reader: Box<dyn ImageReader>,
    detector: Box<dyn FaceDetector>,
    canvas: (u32, u32),
    crop_mode: CropMode,
}

impl FaceFilter {
    pub fn new(
        reader: Box<dyn ImageReader>,
        detector: Box<dyn FaceDetector>,
        canvas: (u32, u32),
        crop_mode: CropMode,
    ) -> Self {
        Self {
            reader,
            detector,
            canvas,
            crop_mode,
        }
    }

    /// Filters every sample in order; the result has one outcome per sample.
    pub fn filter(
        &mut self,
        samples: &[Sample],
    ) -> Result<Vec<FilterOutcome>, Box<dyn std::error::Error>> {
        let mut outcomes = Vec::with_capacity(samples.len());
        for sample in samples {
            outcomes.push(self.filter_one(sample)?);
        }
        let faces: usize = outcomes.iter().map(FilterOutcome::face_count).sum();
        log::info!(
            "Face filter: {} samples, {} faces, {} without a face",
            samples.len(),
            faces,
            outcomes.iter().filter(|o| o.face_count() == 0).count()
        );
        Ok(outcomes)
    }

    fn filter_one(&mut self, sample: &Sample) -> Result<FilterOutcome, Box<dyn std::error::Error>> {
        let frame = self.reader.read(&sample.path, Some(self.canvas))?;
        let gray = frame.to_grayscale();
        let rects = self.detector.detect(&gray)?;
        log::debug!("{}: {} detections", sample.path.display(), rects.len());

        let crops: Vec<FaceCrop> = rects
            .into_iter()
            .filter_map(|rect| self.crop(&gray, sample, rect))
            .collect();

        let detection = if crops.is_empty() {
            Detection::NoFaceFound
        } else {
            Detection::Detected(crops)
        };
        Ok(FilterOutcome {
            sample: sample.clone(),
            detection,
        })
    }

    fn crop(&self, gray: &Frame, sample: &Sample, rect: FaceRect) -> Option<FaceCrop> {
        let Some((rows, cols)) = rect.crop_ranges(self.crop_mode, gray.width(), gray.height())
        else {
            log::warn!(
                "{}: skipping detection {:?} with an empty crop",
                sample.path.display(),
                rect
            );
            return None;
        };
        Some(FaceCrop {
            source: sample.path.clone(),
            rect,
            class_id: sample.class_id,
            image: gray.crop(rows, cols),
        })
    }
}
