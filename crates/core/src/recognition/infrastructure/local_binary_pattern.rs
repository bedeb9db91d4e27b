//! Local binary pattern texture descriptors.
//!
//! Provides the circular (extended) LBP operator, the grid-of-histograms
//! face descriptor built on it, and the chi-square distance used to
//! compare descriptors.

use std::f64::consts::PI;

use ndarray::{s, Array2, ArrayView2};

/// Tolerance for treating an interpolated neighbour as equal to the centre.
const INTERPOLATION_EPSILON: f64 = 1e-9;

/// Circular LBP code image.
///
/// Each of `neighbors` sample points on a circle of `radius` around a pixel
/// is bilinearly interpolated; bit `n` is set when point `n` is at least as
/// bright as the centre. The output loses a `radius`-wide border on each
/// side. Returns `None` when the input has no interior pixels.
pub fn extended_lbp(src: ArrayView2<'_, u8>, radius: u32, neighbors: u32) -> Option<Array2<u32>> {
    let r = radius as usize;
    let (rows, cols) = src.dim();
    if rows <= 2 * r || cols <= 2 * r {
        return None;
    }

    let mut dst = Array2::<u32>::zeros((rows - 2 * r, cols - 2 * r));
    for n in 0..neighbors {
        let angle = 2.0 * PI * n as f64 / neighbors as f64;
        let x = radius as f64 * angle.cos();
        let y = -(radius as f64) * angle.sin();

        let (fx, fy) = (x.floor(), y.floor());
        let (cx, cy) = (x.ceil(), y.ceil());
        let (tx, ty) = (x - fx, y - fy);
        let w1 = (1.0 - tx) * (1.0 - ty);
        let w2 = tx * (1.0 - ty);
        let w3 = (1.0 - tx) * ty;
        let w4 = tx * ty;
        let (fx, fy, cx, cy) = (fx as isize, fy as isize, cx as isize, cy as isize);

        let bit = 1u32 << n;
        for i in r..rows - r {
            for j in r..cols - r {
                let at = |dy: isize, dx: isize| {
                    src[[(i as isize + dy) as usize, (j as isize + dx) as usize]] as f64
                };
                let t = w1 * at(fy, fx) + w2 * at(fy, cx) + w3 * at(cy, fx) + w4 * at(cy, cx);
                let center = src[[i, j]] as f64;
                if t > center || (t - center).abs() < INTERPOLATION_EPSILON {
                    dst[[i - r, j - r]] |= bit;
                }
            }
        }
    }
    Some(dst)
}

/// Concatenated per-cell histograms of an LBP code image.
///
/// The image is split into `grid_x × grid_y` equal cells (remainder pixels
/// on the right and bottom are ignored). Each cell contributes
/// `num_patterns` bins normalised by the cell's pixel count. Returns `None`
/// when a cell would be empty.
pub fn spatial_histogram(
    codes: ArrayView2<'_, u32>,
    num_patterns: usize,
    grid_x: usize,
    grid_y: usize,
) -> Option<Vec<f64>> {
    let (rows, cols) = codes.dim();
    let cell_w = cols / grid_x;
    let cell_h = rows / grid_y;
    if cell_w == 0 || cell_h == 0 {
        return None;
    }

    let cell_pixels = (cell_w * cell_h) as f64;
    let mut hist = vec![0.0f64; grid_x * grid_y * num_patterns];
    for gy in 0..grid_y {
        for gx in 0..grid_x {
            let offset = (gy * grid_x + gx) * num_patterns;
            let cell = codes.slice(s![gy * cell_h..(gy + 1) * cell_h, gx * cell_w..(gx + 1) * cell_w]);
            for &code in cell.iter() {
                hist[offset + code as usize] += 1.0;
            }
            for bin in &mut hist[offset..offset + num_patterns] {
                *bin /= cell_pixels;
            }
        }
    }
    Some(hist)
}

/// Alternative chi-square distance: `Σ 2(a−b)² / (a+b)`, skipping bins
/// where both histograms are empty.
pub fn chi_square_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let sum = x + y;
            if sum.abs() > f64::EPSILON {
                let diff = x - y;
                diff * diff / sum
            } else {
                0.0
            }
        })
        .sum::<f64>()
        * 2.0
}
