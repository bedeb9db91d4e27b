use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use facerec_core::dataset::domain::sample::label_name;
use facerec_core::detection::domain::face_filter::FaceFilter;
use facerec_core::detection::infrastructure::model_resolver;
use facerec_core::detection::infrastructure::seeta_cascade_detector::SeetaCascadeDetector;
use facerec_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use facerec_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use facerec_core::pipeline::pipeline_logger::LogPipelineLogger;
use facerec_core::pipeline::recognize_faces_use_case::{PipelineReport, RecognizeFacesUseCase};
use facerec_core::recognition::infrastructure::lbph_recognizer::LbphRecognizer;
use facerec_core::rendering::domain::result_renderer::ResultRenderer;
use facerec_core::rendering::infrastructure::image_file_display::ImageFileDisplay;
use facerec_core::rendering::infrastructure::overlay_annotator::OverlayAnnotator;
use facerec_core::shared::config::PipelineConfig;
use facerec_core::shared::constants::{
    CASCADE_MODEL_URL, DEFAULT_OUTPUT_PATH, DEFAULT_TEST_ROOT, DEFAULT_TRAIN_ROOT, UNKNOWN_LABEL,
};
use facerec_core::shared::face_rect::CropMode;

/// Train an LBPH face recognizer on a labeled image tree and label the faces
/// found in a folder of test images.
#[derive(Parser)]
#[command(name = "facerec")]
struct Cli {
    /// Training root: one subdirectory of images per person.
    #[arg(long, default_value = DEFAULT_TRAIN_ROOT)]
    train_root: PathBuf,

    /// Flat directory of test images.
    #[arg(long, default_value = DEFAULT_TEST_ROOT)]
    test_root: PathBuf,

    /// JSON pipeline configuration; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Face cascade model file (downloaded if absent).
    #[arg(long)]
    model: Option<PathBuf>,

    /// TrueType font used for the label text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Where to write the composite result image.
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Crop geometry: transposed or exact.
    #[arg(long)]
    crop_mode: Option<CropMode>,

    /// Do not open the result in the system image viewer.
    #[arg(long)]
    no_open: bool,

    /// Exit right after showing the result instead of waiting for Enter.
    #[arg(long)]
    no_wait: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    validate(&cli)?;

    let mut use_case = build_use_case(&cli, &config)?;
    let report = use_case.execute(&cli.train_root, &cli.test_root)?;
    use_case.logger().summary();
    print_report(&report);

    if waits_for_enter(&cli) {
        wait_for_enter()?;
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(model) = &cli.model {
        config.detector.model_path = model.clone();
    }
    if let Some(font) = &cli.font {
        config.render.font_path = Some(font.clone());
    }
    if let Some(mode) = cli.crop_mode {
        config.crop_mode = mode;
    }
    config.validate()?;
    Ok(config)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.train_root.is_dir() {
        return Err(format!(
            "Training directory not found: {}",
            cli.train_root.display()
        )
        .into());
    }
    if !cli.test_root.is_dir() {
        return Err(format!("Test directory not found: {}", cli.test_root.display()).into());
    }
    Ok(())
}

fn build_use_case(
    cli: &Cli,
    config: &PipelineConfig,
) -> Result<RecognizeFacesUseCase, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {}", config.detector.model_path.display());
    let model_path = model_resolver::resolve(
        &config.detector.model_path,
        CASCADE_MODEL_URL,
        Some(Box::new(download_progress)),
    )?;

    let detector = SeetaCascadeDetector::new(&model_path, &config.detector)?;
    let face_filter = FaceFilter::new(
        Box::new(ImageFileReader::new()),
        Box::new(detector),
        config.canvas(),
        config.crop_mode,
    );

    let annotator = OverlayAnnotator::new(
        Box::new(ImageFileReader::new()),
        config.canvas(),
        config.render.clone(),
    )?;
    let display = ImageFileDisplay::new(
        Box::new(ImageFileWriter::new()),
        cli.output.clone(),
        !cli.no_open,
    );
    let renderer = ResultRenderer::new(Box::new(annotator), Box::new(display));

    Ok(RecognizeFacesUseCase::new(
        face_filter,
        Box::new(LbphRecognizer::new(config.recognizer.clone())),
        renderer,
        Box::new(LogPipelineLogger::new()),
    ))
}

fn print_report(report: &PipelineReport) {
    println!(
        "Trained on {} faces from {} images ({} without a face)",
        report.training_faces, report.training_samples, report.training_dropped
    );
    println!(
        "Recognized {} faces in {} test images ({} without a face)",
        report.recognized.len(),
        report.test_samples,
        report.test_dropped
    );
    for face in &report.recognized {
        let name = face
            .prediction
            .class_id
            .and_then(|id| label_name(&report.labels, id))
            .unwrap_or(UNKNOWN_LABEL);
        println!(
            "  {}: {name} (distance {:.2})",
            face.crop.source.display(),
            face.prediction.distance
        );
    }
}

/// Only `--no-wait` skips the wait; `--no-open` just keeps the viewer closed.
fn waits_for_enter(cli: &Cli) -> bool {
    !cli.no_wait
}

fn wait_for_enter() -> Result<(), Box<dyn std::error::Error>> {
    eprint!("Press Enter to exit...");
    io::stderr().flush()?;
    io::stdin().lock().read_line(&mut String::new())?;
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}
