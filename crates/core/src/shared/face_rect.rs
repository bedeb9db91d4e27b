use std::ops::Range;

use serde::{Deserialize, Serialize};

/// How a detection rectangle maps onto the rows and columns of its crop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    /// Rows span `y..y + width`, columns span `x..x + height`.
    ///
    /// Only square detections produce the exact face region.
    #[default]
    Transposed,
    /// Rows span `y..y + height`, columns span `x..x + width`.
    Exact,
}

impl std::fmt::Display for CropMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropMode::Transposed => write!(f, "transposed"),
            CropMode::Exact => write!(f, "exact"),
        }
    }
}

impl std::str::FromStr for CropMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transposed" => Ok(CropMode::Transposed),
            "exact" => Ok(CropMode::Exact),
            other => Err(format!(
                "crop mode must be 'transposed' or 'exact', got '{other}'"
            )),
        }
    }
}

/// Axis-aligned face bounding box in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Row and column ranges of the crop for this rectangle, clamped to a
    /// `frame_width × frame_height` frame.
    ///
    /// Returns `None` when nothing of the crop lies inside the frame.
    pub fn crop_ranges(
        &self,
        mode: CropMode,
        frame_width: u32,
        frame_height: u32,
    ) -> Option<(Range<usize>, Range<usize>)> {
        let (row_extent, col_extent) = match mode {
            CropMode::Transposed => (self.width, self.height),
            CropMode::Exact => (self.height, self.width),
        };
        let rows = clamp_span(self.y, row_extent, frame_height);
        let cols = clamp_span(self.x, col_extent, frame_width);
        if rows.is_empty() || cols.is_empty() {
            None
        } else {
            Some((rows, cols))
        }
    }
}

fn clamp_span(start: i32, extent: i32, limit: u32) -> Range<usize> {
    let limit = limit as i64;
    let lo = (start as i64).clamp(0, limit);
    let hi = (start as i64 + extent.max(0) as i64).clamp(lo, limit);
    lo as usize..hi as usize
}
