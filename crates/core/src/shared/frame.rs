use std::ops::Range;

use ndarray::{s, ArrayView2, ArrayView3};

/// A decoded image: contiguous bytes in row-major order.
///
/// Colour frames carry three RGB channels, grayscale frames one.
/// Format conversion happens at I/O boundaries only.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn is_gray(&self) -> bool {
        self.channels == 1
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Two-dimensional `(rows, cols)` view of a single-channel frame.
    pub fn gray_view(&self) -> ArrayView2<'_, u8> {
        debug_assert_eq!(self.channels, 1, "gray_view requires a single channel");
        ArrayView2::from_shape((self.height as usize, self.width as usize), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Luma conversion with BT.601 weights; single-channel frames are cloned.
    pub fn to_grayscale(&self) -> Frame {
        if self.is_gray() {
            return self.clone();
        }
        let channels = self.channels as usize;
        let data = self
            .data
            .chunks_exact(channels)
            .map(|px| {
                let luma = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
                luma.round().min(255.0) as u8
            })
            .collect();
        Frame::new(data, self.width, self.height, 1)
    }

    /// Copies the pixels in `rows × cols` into a new frame with the same channel count.
    pub fn crop(&self, rows: Range<usize>, cols: Range<usize>) -> Frame {
        let height = rows.len() as u32;
        let width = cols.len() as u32;
        let view = self.as_ndarray();
        let data = view.slice(s![rows, cols, ..]).iter().copied().collect();
        Frame::new(data, width, height, self.channels)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
