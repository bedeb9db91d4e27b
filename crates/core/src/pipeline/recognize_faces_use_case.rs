use std::path::Path;
use std::time::Instant;

use crate::dataset::domain::sample::ClassLabel;
use crate::dataset::infrastructure::dataset_builder::{build_test_set, build_training_set};
use crate::dataset::infrastructure::path_indexer::list_class_labels;
use crate::detection::domain::face_crop::{accepted_crops, count_without_faces};
use crate::detection::domain::face_filter::FaceFilter;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::recognition::domain::face_recognizer::FaceRecognizer;
use crate::recognition::domain::prediction::RecognizedFace;
use crate::recognition::domain::predictor::predict_faces;
use crate::rendering::domain::result_renderer::ResultRenderer;
use crate::shared::constants::RESULT_TITLE;

/// What a completed run saw and produced.
#[derive(Debug)]
pub struct PipelineReport {
    pub labels: Vec<ClassLabel>,
    pub training_samples: usize,
    pub training_faces: usize,
    /// Training images on which no face was found.
    pub training_dropped: usize,
    pub test_samples: usize,
    /// Test images on which no face was found.
    pub test_dropped: usize,
    pub recognized: Vec<RecognizedFace>,
}

/// End-to-end recognition run:
/// index → build → filter → train → filter test → predict → render → display.
///
/// Strictly sequential. Any I/O, decode, training or rendering error aborts
/// the run.
pub struct RecognizeFacesUseCase {
    face_filter: FaceFilter,
    recognizer: Box<dyn FaceRecognizer>,
    renderer: ResultRenderer,
    logger: Box<dyn PipelineLogger>,
}

impl RecognizeFacesUseCase {
    pub fn new(
        face_filter: FaceFilter,
        recognizer: Box<dyn FaceRecognizer>,
        renderer: ResultRenderer,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            face_filter,
            recognizer,
            renderer,
            logger,
        }
    }

    pub fn execute(
        &mut self,
        train_root: &Path,
        test_root: &Path,
    ) -> Result<PipelineReport, Box<dyn std::error::Error>> {
        let t0 = Instant::now();
        let labels = list_class_labels(train_root)?;
        let training_set = build_training_set(train_root, &labels)?;
        self.logger.timing("index", elapsed_ms(t0));
        self.logger.info(&format!(
            "Indexed {} classes, {} training images under {}",
            labels.len(),
            training_set.len(),
            train_root.display()
        ));

        let t0 = Instant::now();
        let outcomes = self.face_filter.filter(&training_set)?;
        let training_dropped = count_without_faces(&outcomes);
        let training_faces = accepted_crops(outcomes);
        self.logger.timing("filter_train", elapsed_ms(t0));
        if training_dropped > 0 {
            self.logger.info(&format!(
                "No face found in {training_dropped} training images; they are excluded"
            ));
        }

        let t0 = Instant::now();
        let model = self.recognizer.train(&training_faces)?;
        self.logger.timing("train", elapsed_ms(t0));

        let t0 = Instant::now();
        let test_set = build_test_set(test_root)?;
        let outcomes = self.face_filter.filter(&test_set)?;
        let test_dropped = count_without_faces(&outcomes);
        let test_faces = accepted_crops(outcomes);
        self.logger.timing("filter_test", elapsed_ms(t0));
        if test_dropped > 0 {
            self.logger.info(&format!(
                "No face found in {test_dropped} test images; they are excluded"
            ));
        }

        let t0 = Instant::now();
        let recognized = predict_faces(model.as_ref(), test_faces, &labels)?;
        self.logger.timing("predict", elapsed_ms(t0));

        let t0 = Instant::now();
        let annotated = self.renderer.render(&recognized, &labels)?;
        self.renderer.show(RESULT_TITLE, &annotated)?;
        self.logger.timing("render", elapsed_ms(t0));

        self.logger.count("classes", labels.len());
        self.logger.count("training_images", training_set.len());
        self.logger.count("training_faces", training_faces.len());
        self.logger.count("test_images", test_set.len());
        self.logger.count("test_faces", recognized.len());

        Ok(PipelineReport {
            labels,
            training_samples: training_set.len(),
            training_faces: training_faces.len(),
            training_dropped,
            test_samples: test_set.len(),
            test_dropped,
            recognized,
        })
    }

    pub fn logger(&self) -> &dyn PipelineLogger {
        self.logger.as_ref()
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_detector::FaceDetector;
    use crate::imaging::infrastructure::image_file_reader::ImageFileReader;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::recognition::infrastructure::lbph_recognizer::LbphRecognizer;
    use crate::rendering::domain::display_sink::DisplaySink;
    use crate::rendering::infrastructure::overlay_annotator::OverlayAnnotator;
    use crate::shared::config::RenderConfig;
    use crate::shared::face_rect::{CropMode, FaceRect};
    use crate::shared::frame::Frame;
    use image::{Rgb, RgbImage};
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use std::rc::Rc;
    use tempfile::TempDir;

    const SIZE: u32 = 350;

    // --- Stubs ---

    /// Reports one fixed face on any frame that is not entirely black.
    struct BrightnessDetector;

    impl FaceDetector for BrightnessDetector {
        fn detect(&mut self, gray: &Frame) -> Result<Vec<FaceRect>, Box<dyn std::error::Error>> {
            if gray.data().iter().all(|&v| v == 0) {
                Ok(Vec::new())
            } else {
                Ok(vec![FaceRect::new(100, 100, 120, 120)])
            }
        }
    }

    struct RecordingDisplay {
        shown: Rc<RefCell<Vec<(String, Frame)>>>,
    }

    impl DisplaySink for RecordingDisplay {
        fn show(
            &mut self,
            title: &str,
            composite: &Frame,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.shown
                .borrow_mut()
                .push((title.to_string(), composite.clone()));
            Ok(())
        }
    }

    // --- Helpers ---

    fn checkerboard(square: u32) -> RgbImage {
        RgbImage::from_fn(SIZE, SIZE, |x, y| {
            if ((x / square) + (y / square)) % 2 == 0 {
                Rgb([40, 40, 40])
            } else {
                Rgb([210, 210, 210])
            }
        })
    }

    fn stripes(width: u32) -> RgbImage {
        RgbImage::from_fn(SIZE, SIZE, |x, _| {
            let v = if (x / width) % 2 == 0 { 60 } else { 190 };
            Rgb([v, v, v])
        })
    }

    fn save(image: &RgbImage, path: PathBuf) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        image.save(path).unwrap();
    }

    /// train/alice: checkerboards, train/bob: stripes,
    /// test: one of each plus an all-black image.
    fn dataset() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let train = tmp.path().join("train");
        for (i, square) in [10, 12, 14].iter().enumerate() {
            save(&checkerboard(*square), train.join("alice").join(format!("{i}.png")));
        }
        for (i, width) in [6, 8, 10].iter().enumerate() {
            save(&stripes(*width), train.join("bob").join(format!("{i}.png")));
        }
        let test = tmp.path().join("test");
        save(&checkerboard(12), test.join("checks.png"));
        save(&stripes(8), test.join("stripes.png"));
        save(&RgbImage::new(SIZE, SIZE), test.join("blank.png"));
        tmp
    }

    fn use_case(shown: Rc<RefCell<Vec<(String, Frame)>>>) -> RecognizeFacesUseCase {
        let face_filter = FaceFilter::new(
            Box::new(ImageFileReader::new()),
            Box::new(BrightnessDetector),
            (SIZE, SIZE),
            CropMode::Transposed,
        );
        let annotator = OverlayAnnotator::new(
            Box::new(ImageFileReader::new()),
            (SIZE, SIZE),
            RenderConfig::default(),
        )
        .unwrap();
        let renderer = ResultRenderer::new(Box::new(annotator), Box::new(RecordingDisplay { shown }));
        RecognizeFacesUseCase::new(
            face_filter,
            Box::new(LbphRecognizer::default()),
            renderer,
            Box::new(NullPipelineLogger),
        )
    }

    fn predicted_name<'a>(report: &'a PipelineReport, file: &str) -> &'a str {
        let face = report
            .recognized
            .iter()
            .find(|f| f.crop.source.ends_with(file))
            .unwrap();
        let id = face.prediction.class_id.unwrap();
        &report.labels[id.0].name
    }

    // --- Tests ---

    #[test]
    fn test_end_to_end_recognizes_each_test_face() {
        let tmp = dataset();
        let shown = Rc::new(RefCell::new(Vec::new()));
        let mut uc = use_case(shown.clone());

        let report = uc
            .execute(&tmp.path().join("train"), &tmp.path().join("test"))
            .unwrap();

        assert_eq!(report.labels.len(), 2);
        assert_eq!(report.training_samples, 6);
        assert_eq!(report.training_faces, 6);
        assert_eq!(report.training_dropped, 0);
        assert_eq!(report.test_samples, 3);
        assert_eq!(report.test_dropped, 1);
        assert_eq!(report.recognized.len(), 2);

        assert_eq!(predicted_name(&report, "checks.png"), "alice");
        assert_eq!(predicted_name(&report, "stripes.png"), "bob");
    }

    #[test]
    fn test_composite_has_one_canvas_per_recognized_face() {
        let tmp = dataset();
        let shown = Rc::new(RefCell::new(Vec::new()));
        let mut uc = use_case(shown.clone());
        uc.execute(&tmp.path().join("train"), &tmp.path().join("test"))
            .unwrap();

        let shown = shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, RESULT_TITLE);
        assert_eq!(shown[0].1.width(), 2 * SIZE);
        assert_eq!(shown[0].1.height(), SIZE);
    }

    #[test]
    fn test_training_without_faces_fails() {
        let tmp = TempDir::new().unwrap();
        save(&RgbImage::new(SIZE, SIZE), tmp.path().join("train/alice/0.png"));
        save(&checkerboard(10), tmp.path().join("test/0.png"));

        let mut uc = use_case(Rc::new(RefCell::new(Vec::new())));
        assert!(uc
            .execute(&tmp.path().join("train"), &tmp.path().join("test"))
            .is_err());
    }

    #[test]
    fn test_missing_train_root_fails() {
        let tmp = TempDir::new().unwrap();
        let mut uc = use_case(Rc::new(RefCell::new(Vec::new())));
        assert!(uc
            .execute(&tmp.path().join("nope"), &tmp.path().join("test"))
            .is_err());
    }

    #[test]
    fn test_non_image_file_aborts_run() {
        let tmp = dataset();
        fs::write(tmp.path().join("test/notes.txt"), b"not an image").unwrap();

        let shown = Rc::new(RefCell::new(Vec::new()));
        let mut uc = use_case(shown.clone());
        assert!(uc
            .execute(&tmp.path().join("train"), &tmp.path().join("test"))
            .is_err());
        assert!(shown.borrow().is_empty());
    }

    #[test]
    fn test_no_test_faces_fails_at_display() {
        let tmp = TempDir::new().unwrap();
        save(&checkerboard(10), tmp.path().join("train/alice/0.png"));
        save(&RgbImage::new(SIZE, SIZE), tmp.path().join("test/blank.png"));

        let mut uc = use_case(Rc::new(RefCell::new(Vec::new())));
        let err = uc
            .execute(&tmp.path().join("train"), &tmp.path().join("test"))
            .unwrap_err();
        assert!(err.to_string().contains("nothing to display"));
    }
}
