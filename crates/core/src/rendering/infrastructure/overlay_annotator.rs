use std::fs;
use std::path::Path;

use ab_glyph::FontArc;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::dataset::domain::sample::{label_name, ClassLabel};
use crate::imaging::domain::image_reader::ImageReader;
use crate::recognition::domain::prediction::RecognizedFace;
use crate::rendering::domain::annotated_image::AnnotatedImage;
use crate::rendering::domain::composite::RenderError;
use crate::rendering::domain::face_annotator::FaceAnnotator;
use crate::shared::config::RenderConfig;
use crate::shared::constants::UNKNOWN_LABEL;
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Reloads each face's source image at canvas size and draws the detection
/// rectangle plus the predicted label with `imageproc`.
///
/// Labels use the font named in the config, or the bundled DejaVu Sans Mono
/// when none is configured.
pub struct OverlayAnnotator {
    reader: Box<dyn ImageReader>,
    canvas: (u32, u32),
    config: RenderConfig,
    font: FontArc,
}

/// DejaVu Sans Mono, Bitstream Vera license (see `assets/`).
const BUNDLED_FONT: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/DejaVuSansMono.ttf"
));

impl OverlayAnnotator {
    /// Fails if a configured font cannot be read or parsed.
    pub fn new(
        reader: Box<dyn ImageReader>,
        canvas: (u32, u32),
        config: RenderConfig,
    ) -> Result<Self, RenderError> {
        let font = match config.font_path.as_deref() {
            Some(path) => load_font(path)?,
            None => bundled_font()?,
        };
        Ok(Self {
            reader,
            canvas,
            config,
            font,
        })
    }

    fn annotate_one(
        &self,
        face: &RecognizedFace,
        labels: &[ClassLabel],
    ) -> Result<AnnotatedImage, Box<dyn std::error::Error>> {
        let frame = self.reader.read(&face.crop.source, Some(self.canvas))?;
        let mut image = to_rgb_image(&frame)?;

        if let Some(rect) = outline(face.crop.rect) {
            draw_hollow_rect_mut(&mut image, rect, Rgb(self.config.box_color));
        }

        let label = face
            .prediction
            .class_id
            .and_then(|id| label_name(labels, id))
            .unwrap_or(UNKNOWN_LABEL)
            .to_string();

        let (x, y) = self.config.label_position;
        draw_text_mut(
            &mut image,
            Rgb(self.config.text_color),
            x,
            y,
            self.config.font_size,
            &self.font,
            &label,
        );

        let (width, height) = image.dimensions();
        Ok(AnnotatedImage {
            source: face.crop.source.clone(),
            label,
            image: Frame::new(image.into_raw(), width, height, 3),
        })
    }
}

impl FaceAnnotator for OverlayAnnotator {
    fn annotate(
        &self,
        faces: &[RecognizedFace],
        labels: &[ClassLabel],
    ) -> Result<Vec<AnnotatedImage>, Box<dyn std::error::Error>> {
        faces
            .iter()
            .map(|face| self.annotate_one(face, labels))
            .collect()
    }
}

fn load_font(path: &Path) -> Result<FontArc, RenderError> {
    let font_error = |reason: String| RenderError::Font {
        path: path.display().to_string(),
        reason,
    };
    let bytes = fs::read(path).map_err(|e| font_error(e.to_string()))?;
    let font = FontArc::try_from_vec(bytes).map_err(|e| font_error(e.to_string()))?;
    log::debug!("Using label font {}", path.display());
    Ok(font)
}

fn bundled_font() -> Result<FontArc, RenderError> {
    FontArc::try_from_slice(BUNDLED_FONT).map_err(|e| RenderError::Font {
        path: "<bundled>".to_string(),
        reason: e.to_string(),
    })
}

fn outline(rect: FaceRect) -> Option<Rect> {
    (rect.width > 0 && rect.height > 0)
        .then(|| Rect::at(rect.x, rect.y).of_size(rect.width as u32, rect.height as u32))
}

fn to_rgb_image(frame: &Frame) -> Result<RgbImage, RenderError> {
    let data = match frame.channels() {
        3 => frame.data().to_vec(),
        1 => frame.data().iter().flat_map(|&v| [v, v, v]).collect(),
        _ => Vec::new(),
    };
    RgbImage::from_raw(frame.width(), frame.height(), data).ok_or(RenderError::InvalidFrame {
        width: frame.width(),
        height: frame.height(),
        channels: frame.channels(),
    })
}
