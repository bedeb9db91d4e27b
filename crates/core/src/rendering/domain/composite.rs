use ndarray::{concatenate, ArrayView3, Axis};
use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("nothing to display: no faces were recognized")]
    EmptyComposite,
    #[error("image {index} is {found}px high, expected {expected}px")]
    HeightMismatch {
        index: usize,
        expected: u32,
        found: u32,
    },
    #[error("image {index} has {found} channels, expected {expected}")]
    ChannelMismatch {
        index: usize,
        expected: u8,
        found: u8,
    },
    #[error("failed to load font {path}: {reason}")]
    Font { path: String, reason: String },
    #[error("frame buffer does not match its {width}x{height}x{channels} shape")]
    InvalidFrame {
        width: u32,
        height: u32,
        channels: u8,
    },
}

/// Joins images left to right into one frame.
///
/// All images must share height and channel count; widths may differ.
pub fn concatenate_horizontally(images: &[Frame]) -> Result<Frame, RenderError> {
    let first = images.first().ok_or(RenderError::EmptyComposite)?;
    for (index, image) in images.iter().enumerate().skip(1) {
        if image.height() != first.height() {
            return Err(RenderError::HeightMismatch {
                index,
                expected: first.height(),
                found: image.height(),
            });
        }
        if image.channels() != first.channels() {
            return Err(RenderError::ChannelMismatch {
                index,
                expected: first.channels(),
                found: image.channels(),
            });
        }
    }

    let views: Vec<ArrayView3<'_, u8>> = images.iter().map(Frame::as_ndarray).collect();
    let joined = concatenate(Axis(1), &views).map_err(|_| RenderError::InvalidFrame {
        width: first.width(),
        height: first.height(),
        channels: first.channels(),
    })?;

    let width = joined.dim().1 as u32;
    let data: Vec<u8> = joined.iter().copied().collect();
    Ok(Frame::new(data, width, first.height(), first.channels()))
}
