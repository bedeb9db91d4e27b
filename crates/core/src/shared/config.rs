use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{CANVAS_SIZE, DEFAULT_CASCADE_PATH};
use crate::shared::face_rect::CropMode;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Settings for the whole recognition run.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub crop_mode: CropMode,
    pub detector: DetectorConfig,
    pub recognizer: LbphConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub model_path: PathBuf,
    /// Size ratio between consecutive levels of the search pyramid.
    pub scale_factor: f32,
    pub min_face_size: u32,
    pub score_thresh: f64,
    pub window_step: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LbphConfig {
    pub radius: u32,
    pub neighbors: u32,
    pub grid_x: u32,
    pub grid_y: u32,
    /// Predictions farther than this from every training face have no class.
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// TrueType font for the labels; the bundled DejaVu Sans Mono when unset.
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
    /// Top-left corner of the label text.
    pub label_position: (i32, i32),
    pub box_color: [u8; 3],
    pub text_color: [u8; 3],
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_SIZE,
            canvas_height: CANVAS_SIZE,
            crop_mode: CropMode::Transposed,
            detector: DetectorConfig::default(),
            recognizer: LbphConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_CASCADE_PATH),
            scale_factor: 1.2,
            min_face_size: 20,
            score_thresh: 2.0,
            window_step: 4,
        }
    }
}

impl Default for LbphConfig {
    fn default() -> Self {
        Self {
            radius: 1,
            neighbors: 8,
            grid_x: 8,
            grid_y: 8,
            threshold: f64::MAX,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            font_size: 22.0,
            label_position: (10, 4),
            box_color: [0, 255, 0],
            text_color: [255, 0, 0],
        }
    }
}

impl PipelineConfig {
    /// Reads a JSON config file and validates it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn canvas(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(invalid(
                "canvas",
                format!(
                    "dimensions must be positive, got {}x{}",
                    self.canvas_width, self.canvas_height
                ),
            ));
        }
        if self.detector.scale_factor.is_nan() || self.detector.scale_factor <= 1.0 {
            return Err(invalid(
                "detector.scale_factor",
                format!("must be greater than 1.0, got {}", self.detector.scale_factor),
            ));
        }
        if self.detector.window_step == 0 {
            return Err(invalid("detector.window_step", "must be positive".into()));
        }
        let lbph = &self.recognizer;
        if lbph.radius == 0 {
            return Err(invalid("recognizer.radius", "must be positive".into()));
        }
        if !(1..=16).contains(&lbph.neighbors) {
            return Err(invalid(
                "recognizer.neighbors",
                format!("must be between 1 and 16, got {}", lbph.neighbors),
            ));
        }
        if lbph.grid_x == 0 || lbph.grid_y == 0 {
            return Err(invalid("recognizer.grid", "cells must be positive".into()));
        }
        if lbph.threshold.is_nan() || lbph.threshold < 0.0 {
            return Err(invalid(
                "recognizer.threshold",
                format!("must be non-negative, got {}", lbph.threshold),
            ));
        }
        if self.render.font_size.is_nan() || self.render.font_size <= 0.0 {
            return Err(invalid("render.font_size", "must be positive".into()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
